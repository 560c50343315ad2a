// tempo-core/src/domain/transform/rows.rs
//
// Typed row shapes for the staging tables and their transform targets.
// Field order mirrors the schema catalog.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One raw user-activity log line. Everything is optional except the event
/// timestamp (`ts`, epoch milliseconds) which every log line carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagingEvent {
    pub artist: Option<String>,
    pub auth: Option<String>,
    pub first_name: Option<String>,
    pub gender: Option<String>,
    pub item_in_session: Option<i32>,
    pub last_name: Option<String>,
    pub length: Option<f64>,
    pub level: Option<String>,
    pub location: Option<String>,
    pub method: Option<String>,
    pub page: Option<String>,
    pub registration: Option<f64>,
    pub session_id: Option<i32>,
    pub song: Option<String>,
    pub status: Option<i32>,
    pub ts: i64,
    pub user_agent: Option<String>,
    pub user_id: Option<i32>,
}

/// One raw song-catalog record. Only the artist id is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagingSong {
    pub artist_id: String,
    pub artist_latitude: Option<f64>,
    pub artist_location: Option<String>,
    pub artist_longitude: Option<f64>,
    pub artist_name: Option<String>,
    pub duration: Option<f64>,
    pub num_songs: Option<i32>,
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: String,
    pub year: Option<i32>,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub artist_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

/// A fact row before the warehouse assigns its synthetic songplay_id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongplayRecord {
    pub start_time: NaiveDateTime,
    pub user_id: Option<i32>,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i32>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}
