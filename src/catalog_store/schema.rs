//! SQLite schema of the music catalog.
//!
//! Songs have no direct artist key: every song/artist relationship goes
//! through `artists_songs`. Albums keep an optional owning artist.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const ALBUM_FK: ForeignKey = ForeignKey {
    foreign_table: "albums",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("image", &SqlType::Text),
        sqlite_column!("genre", &SqlType::Text),
    ],
    indices: &[("idx_artists_name", "name")],
};

const ALBUMS_TABLE: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("albumName", &SqlType::Text, non_null = true),
        sqlite_column!("image", &SqlType::Text),
        sqlite_column!("releaseYear", &SqlType::Integer),
        sqlite_column!(
            "artistID",
            &SqlType::Integer,
            foreign_key = Some(&ARTIST_FK)
        ),
    ],
    indices: &[
        ("idx_albums_name", "albumName"),
        ("idx_albums_artist", "artistID"),
    ],
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("songName", &SqlType::Text, non_null = true),
        sqlite_column!("length", &SqlType::Integer), // seconds
        sqlite_column!("albumID", &SqlType::Integer, foreign_key = Some(&ALBUM_FK)),
    ],
    indices: &[
        ("idx_songs_name", "songName"),
        ("idx_songs_album", "albumID"),
    ],
};

/// Song <-> Artist association. No uniqueness on the pair.
const ARTISTS_SONGS_TABLE: Table = Table {
    name: "artists_songs",
    columns: &[
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&SONG_FK)
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
    ],
    indices: &[
        ("idx_artists_songs_song", "song_id"),
        ("idx_artists_songs_artist", "artist_id"),
    ],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ARTISTS_TABLE, ALBUMS_TABLE, SONGS_TABLE, ARTISTS_SONGS_TABLE],
}];
