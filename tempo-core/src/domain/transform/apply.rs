// tempo-core/src/domain/transform/apply.rs
//
// Row-level reference implementation of the five transforms. Semantics are
// identical to the INSERT..SELECT statements in `statements`; these pure
// functions exist so the join, dedup and calendar rules stay unit-testable
// as data-in / data-out, decoupled from any warehouse.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

use crate::domain::transform::rows::{
    ArtistRecord, SongRecord, SongplayRecord, StagingEvent, StagingSong, TimeRecord, UserRecord,
};

/// Only events on this page are plays.
const NEXT_SONG: &str = "NextSong";

/// `epoch + millis/1000` seconds: integer division, whole-second precision,
/// UTC. Timestamps outside chrono's representable range yield None and the
/// event is skipped.
fn start_time_of(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(millis / 1000, 0).map(|dt| dt.naive_utc())
}

fn is_play(event: &StagingEvent) -> bool {
    event.page.as_deref() == Some(NEXT_SONG)
}

/// Straight projection of every staged song. No filter, no dedup.
pub fn songs_from_staging(songs: &[StagingSong]) -> Vec<SongRecord> {
    songs
        .iter()
        .map(|song| SongRecord {
            song_id: song.song_id.clone(),
            title: song.title.clone(),
            artist_id: song.artist_id.clone(),
            year: song.year,
            duration: song.duration,
        })
        .collect()
}

/// Artist projection of every staged song; the staged location is dropped.
pub fn artists_from_staging(songs: &[StagingSong]) -> Vec<ArtistRecord> {
    songs
        .iter()
        .map(|song| ArtistRecord {
            artist_id: song.artist_id.clone(),
            name: song.artist_name.clone(),
            latitude: song.artist_latitude,
            longitude: song.artist_longitude,
        })
        .collect()
}

/// One record per non-null user_id: the row with the maximum `ts`, ties
/// broken by the lexicographically greatest remaining tuple. Output is
/// ordered by user_id descending.
pub fn users_from_events(events: &[StagingEvent]) -> Vec<UserRecord> {
    fn recency<'a>(
        event: &'a StagingEvent,
    ) -> (
        i64,
        &'a Option<String>,
        &'a Option<String>,
        &'a Option<String>,
        &'a Option<String>,
    ) {
        (
            event.ts,
            &event.first_name,
            &event.last_name,
            &event.gender,
            &event.level,
        )
    }

    let mut latest: BTreeMap<i32, &StagingEvent> = BTreeMap::new();
    for event in events {
        let Some(user_id) = event.user_id else {
            continue;
        };
        match latest.entry(user_id) {
            Entry::Vacant(slot) => {
                slot.insert(event);
            }
            Entry::Occupied(mut slot) => {
                if recency(event) > recency(slot.get()) {
                    slot.insert(event);
                }
            }
        }
    }

    latest
        .into_iter()
        .rev()
        .map(|(user_id, event)| UserRecord {
            user_id,
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            gender: event.gender.clone(),
            level: event.level.clone(),
        })
        .collect()
}

/// One record per distinct play timestamp, decomposed into calendar parts
/// in UTC. `weekday` is the day-of-week index, 0 = Sunday.
pub fn time_from_events(events: &[StagingEvent]) -> Vec<TimeRecord> {
    let distinct: BTreeSet<NaiveDateTime> = events
        .iter()
        .filter(|event| is_play(event))
        .filter_map(|event| start_time_of(event.ts))
        .collect();

    distinct
        .into_iter()
        .map(|start_time| TimeRecord {
            start_time,
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.weekday().num_days_from_sunday(),
        })
        .collect()
}

/// One fact record per qualifying event and matching staged song, matched
/// on exact artist-name equality. Events with no match still produce one
/// record with NULL song/artist linkage.
pub fn songplays_from_staging(
    events: &[StagingEvent],
    songs: &[StagingSong],
) -> Vec<SongplayRecord> {
    let mut records = Vec::new();

    for event in events.iter().filter(|event| is_play(event)) {
        let Some(start_time) = start_time_of(event.ts) else {
            continue;
        };

        let record = |song_id: Option<String>, artist_id: Option<String>| SongplayRecord {
            start_time,
            user_id: event.user_id,
            level: event.level.clone(),
            song_id,
            artist_id,
            session_id: event.session_id,
            location: event.location.clone(),
            user_agent: event.user_agent.clone(),
        };

        let matches: Vec<&StagingSong> = songs
            .iter()
            .filter(|song| match (&event.artist, &song.artist_name) {
                (Some(played), Some(staged)) => played == staged,
                _ => false,
            })
            .collect();

        if matches.is_empty() {
            records.push(record(None, None));
        } else {
            for song in matches {
                records.push(record(song.song_id.clone(), Some(song.artist_id.clone())));
            }
        }
    }

    records
}
