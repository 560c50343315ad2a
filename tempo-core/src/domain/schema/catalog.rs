// tempo-core/src/domain/schema/catalog.rs
//
// The seven tables of the star schema: two staging landing zones, four
// dimensions, one fact table. Column order here IS the schema contract
// downstream queries rely on.

use super::SqlType::{BigInt, Integer, Numeric, SmallInt, Timestamp, Varchar, VarcharN};
use super::{Column, TableDef};

/// Identifies one of the seven warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    StagingEvents,
    StagingSongs,
    Songplays,
    Users,
    Songs,
    Artists,
    Time,
}

impl TableId {
    /// Creation order: staging first, then dimensions, then the fact table
    /// so its declared foreign keys resolve.
    pub const CREATE_ORDER: [TableId; 7] = [
        TableId::StagingEvents,
        TableId::StagingSongs,
        TableId::Users,
        TableId::Artists,
        TableId::Songs,
        TableId::Time,
        TableId::Songplays,
    ];

    /// Drop order: the fact table before the dimensions it references.
    pub const DROP_ORDER: [TableId; 7] = [
        TableId::StagingEvents,
        TableId::StagingSongs,
        TableId::Songplays,
        TableId::Users,
        TableId::Songs,
        TableId::Artists,
        TableId::Time,
    ];

    pub fn def(self) -> &'static TableDef {
        match self {
            TableId::StagingEvents => &STAGING_EVENTS,
            TableId::StagingSongs => &STAGING_SONGS,
            TableId::Songplays => &SONGPLAYS,
            TableId::Users => &USERS,
            TableId::Songs => &SONGS,
            TableId::Artists => &ARTISTS,
            TableId::Time => &TIME,
        }
    }

    pub fn table_name(self) -> &'static str {
        self.def().name
    }
}

/// Raw user-activity log lines, exactly as extracted. No key, nulls and
/// duplicate user_id entries allowed. `ts` holds epoch milliseconds.
pub static STAGING_EVENTS: TableDef = TableDef {
    name: "staging_events",
    columns: &[
        Column::new("artist", Varchar),
        Column::new("auth", Varchar),
        Column::new("first_name", Varchar),
        Column::new("gender", Varchar),
        Column::new("item_in_session", Integer),
        Column::new("last_name", Varchar),
        Column::new("length", Numeric),
        Column::new("level", Varchar),
        Column::new("location", Varchar),
        Column::new("method", Varchar),
        Column::new("page", Varchar),
        Column::new("registration", Numeric),
        Column::new("session_id", Integer),
        Column::new("song", Varchar),
        Column::new("status", Integer),
        Column::new("ts", BigInt),
        Column::new("user_agent", Varchar),
        Column::new("user_id", Integer),
    ],
};

/// Raw song-catalog records. No enforced key; only artist_id is required.
pub static STAGING_SONGS: TableDef = TableDef {
    name: "staging_songs",
    columns: &[
        Column::new("artist_id", Varchar).not_null(),
        Column::new("artist_latitude", Numeric),
        Column::new("artist_location", Varchar),
        Column::new("artist_longitude", Numeric),
        Column::new("artist_name", Varchar),
        Column::new("duration", Numeric),
        Column::new("num_songs", Integer),
        Column::new("song_id", Varchar),
        Column::new("title", Varchar),
        Column::new("year", Integer),
    ],
};

/// Fact table: one row per qualifying play event. song_id/artist_id stay
/// NULL when the event's artist matches no staged song.
pub static SONGPLAYS: TableDef = TableDef {
    name: "songplays",
    columns: &[
        Column::new("songplay_id", Integer)
            .identity()
            .primary_key()
            .not_null()
            .sort_key()
            .dist_key(),
        Column::new("start_time", Timestamp).references(TableId::Time, "start_time"),
        Column::new("user_id", Integer).references(TableId::Users, "user_id"),
        Column::new("level", VarcharN(20)),
        Column::new("song_id", VarcharN(18)).references(TableId::Songs, "song_id"),
        Column::new("artist_id", VarcharN(18)).references(TableId::Artists, "artist_id"),
        Column::new("session_id", Integer),
        Column::new("location", VarcharN(50)),
        Column::new("user_agent", Varchar),
    ],
};

/// One row per user_id, holding that user's most recent known state.
pub static USERS: TableDef = TableDef {
    name: "users",
    columns: &[
        Column::new("user_id", Integer).primary_key().sort_key(),
        Column::new("first_name", Varchar),
        Column::new("last_name", Varchar),
        Column::new("gender", Varchar),
        Column::new("level", Varchar),
    ],
};

/// One row per staged song. Duration is NUMERIC so fractional seconds
/// survive untouched.
pub static SONGS: TableDef = TableDef {
    name: "songs",
    columns: &[
        Column::new("song_id", VarcharN(18))
            .primary_key()
            .not_null()
            .sort_key(),
        Column::new("title", Varchar).not_null(),
        Column::new("artist_id", VarcharN(18))
            .not_null()
            .references(TableId::Artists, "artist_id"),
        Column::new("year", SmallInt).not_null(),
        Column::new("duration", Numeric).not_null(),
    ],
};

/// One row per staged artist-song pairing. `location` is declared but the
/// transform never populates it.
pub static ARTISTS: TableDef = TableDef {
    name: "artists",
    columns: &[
        Column::new("artist_id", Varchar).primary_key().not_null().sort_key(),
        Column::new("name", Varchar),
        Column::new("location", Varchar),
        Column::new("latitude", Numeric),
        Column::new("longitude", Numeric),
    ],
};

/// One row per distinct play timestamp. `weekday` is the day-of-week index
/// (0 = Sunday), not the ISO week number.
pub static TIME: TableDef = TableDef {
    name: "time",
    columns: &[
        Column::new("start_time", Timestamp).primary_key().sort_key(),
        Column::new("hour", Integer).not_null(),
        Column::new("day", Integer).not_null(),
        Column::new("week", Integer).not_null(),
        Column::new("month", Integer).not_null(),
        Column::new("year", Integer).not_null().dist_key(),
        Column::new("weekday", Integer).not_null(),
    ],
};
