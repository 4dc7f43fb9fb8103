//! Catalog models.
//!
//! Field names on the wire follow the column names of the catalog schema
//! (`albumName`, `releaseYear`, `artistID`, ...), so rows serialize the same
//! way they are stored.

use serde::{Deserialize, Serialize};

use super::coerce;

// =============================================================================
// Core Entities
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub genre: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    #[serde(rename = "albumName")]
    pub album_name: String,
    pub image: Option<String>,
    #[serde(rename = "releaseYear")]
    pub release_year: Option<i64>,
    #[serde(rename = "artistID")]
    pub artist_id: Option<i64>,
}

/// A song. Contributing artists are not a column of the song, they live in
/// the `artists_songs` association table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    #[serde(rename = "songName")]
    pub song_name: String,
    /// Duration in seconds.
    pub length: Option<i64>,
    #[serde(rename = "albumID")]
    pub album_id: Option<i64>,
}

// =============================================================================
// Write Payloads
// =============================================================================
//
// Every field is optional: whatever the client leaves out is bound as NULL and
// the storage engine decides whether that is acceptable. Scalars of the wrong
// JSON type are converted when they can be (see `coerce`).

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistPayload {
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub genre: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPayload {
    #[serde(
        rename = "albumName",
        default,
        deserialize_with = "coerce::optional_text"
    )]
    pub album_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub image: Option<String>,
    #[serde(
        rename = "releaseYear",
        default,
        deserialize_with = "coerce::optional_int"
    )]
    pub release_year: Option<i64>,
    #[serde(rename = "artistID", default, deserialize_with = "coerce::optional_int")]
    pub artist_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPayload {
    #[serde(
        rename = "songName",
        default,
        deserialize_with = "coerce::optional_text"
    )]
    pub song_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_int")]
    pub length: Option<i64>,
    #[serde(rename = "albumID", default, deserialize_with = "coerce::optional_int")]
    pub album_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongArtistPayload {
    #[serde(rename = "artistID", default, deserialize_with = "coerce::optional_int")]
    pub artist_id: Option<i64>,
}

/// Acknowledgment of a write statement.
///
/// `insert_id` carries the generated row id for inserts and is 0 for updates
/// and deletes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    #[serde(rename = "affectedRows")]
    pub affected_rows: usize,
    #[serde(rename = "insertId")]
    pub insert_id: i64,
}

// =============================================================================
// Join Rows
// =============================================================================

/// Flat row of the artist -> albums join. The artist columns repeat on every
/// album row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistAlbumRow {
    pub id: i64,
    #[serde(rename = "albumName")]
    pub album_name: String,
    pub image: Option<String>,
    #[serde(rename = "releaseYear")]
    pub release_year: Option<i64>,
    #[serde(rename = "artistID")]
    pub artist_id: i64,
    #[serde(rename = "artistName")]
    pub artist_name: String,
    #[serde(rename = "artistImage")]
    pub artist_image: Option<String>,
    #[serde(rename = "artistGenre")]
    pub artist_genre: Option<String>,
}

/// Flat row of the songs x artists x albums join.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSongRow {
    pub id: i64,
    #[serde(rename = "songName")]
    pub song_name: String,
    pub length: Option<i64>,
    #[serde(rename = "albumID")]
    pub album_id: i64,
    #[serde(rename = "albumName")]
    pub album_name: String,
    #[serde(rename = "artistID")]
    pub artist_id: i64,
    #[serde(rename = "artistName")]
    pub artist_name: String,
}

/// Flat row of the song -> artists join: the song columns repeat once per
/// contributing artist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongArtistRow {
    pub id: i64,
    #[serde(rename = "songName")]
    pub song_name: String,
    pub length: Option<i64>,
    #[serde(rename = "artistName")]
    pub artist_name: String,
    #[serde(rename = "artistImage")]
    pub artist_image: Option<String>,
    #[serde(rename = "artistGenre")]
    pub artist_genre: Option<String>,
    #[serde(rename = "artistID")]
    pub artist_id: i64,
}

// =============================================================================
// Nested Views
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongArtist {
    pub name: String,
    pub image: Option<String>,
    pub genre: Option<String>,
    pub id: i64,
}

/// A song with the ordered list of its contributing artists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongWithArtists {
    pub id: i64,
    #[serde(rename = "songName")]
    pub song_name: String,
    pub length: Option<i64>,
    pub artists: Vec<SongArtist>,
}
