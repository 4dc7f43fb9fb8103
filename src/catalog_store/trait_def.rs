//! CatalogStore trait definition.
//!
//! The HTTP layer only talks to this trait, so tests can swap the SQLite
//! backend for a double.

use super::aggregate::aggregate_song_artists;
use super::models::*;
use super::search::filter_artists_by_name;
use anyhow::Result;

/// Repository operations over the music catalog.
///
/// Each method issues a single parameterized statement. A missing row is an
/// empty result, never an error; errors are storage-engine failures.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Artists
    // =========================================================================

    /// All artists ordered by name.
    fn list_artists(&self) -> Result<Vec<Artist>>;

    /// Zero or one artist.
    fn get_artist(&self, id: i64) -> Result<Vec<Artist>>;

    fn create_artist(&self, artist: &ArtistPayload) -> Result<WriteAck>;

    /// Overwrites every column of the artist, missing fields become NULL.
    fn update_artist(&self, id: i64, artist: &ArtistPayload) -> Result<WriteAck>;

    fn delete_artist(&self, id: i64) -> Result<WriteAck>;

    /// Albums of one artist joined with the artist columns, ordered by
    /// album name.
    fn get_artist_albums(&self, artist_id: i64) -> Result<Vec<ArtistAlbumRow>>;

    // =========================================================================
    // Albums
    // =========================================================================

    /// All albums ordered by album name.
    fn list_albums(&self) -> Result<Vec<Album>>;

    fn get_album(&self, id: i64) -> Result<Vec<Album>>;

    fn create_album(&self, album: &AlbumPayload) -> Result<WriteAck>;

    fn update_album(&self, id: i64, album: &AlbumPayload) -> Result<WriteAck>;

    fn delete_album(&self, id: i64) -> Result<WriteAck>;

    /// Songs of one album credited to one artist, ordered by song name.
    fn get_album_songs(&self, artist_id: i64, album_id: i64) -> Result<Vec<AlbumSongRow>>;

    // =========================================================================
    // Songs
    // =========================================================================

    /// All songs ordered by song name.
    fn list_songs(&self) -> Result<Vec<Song>>;

    /// Plain get-by-id, same shape as `get_artist` and `get_album`. The HTTP
    /// song detail goes through `get_song_with_artists` instead.
    fn get_song(&self, id: i64) -> Result<Vec<Song>>;

    fn create_song(&self, song: &SongPayload) -> Result<WriteAck>;

    fn update_song(&self, id: i64, song: &SongPayload) -> Result<WriteAck>;

    fn delete_song(&self, id: i64) -> Result<WriteAck>;

    /// One row per contributing artist of the song, in association order.
    fn get_song_artist_rows(&self, song_id: i64) -> Result<Vec<SongArtistRow>>;

    // =========================================================================
    // Song <-> Artist associations
    // =========================================================================

    fn add_song_artist(&self, song_id: i64, link: &SongArtistPayload) -> Result<WriteAck>;

    /// Removes every association row for the pair.
    fn remove_song_artist(&self, song_id: i64, artist_id: i64) -> Result<WriteAck>;

    // =========================================================================
    // Counts (for metrics and stats)
    // =========================================================================

    fn get_artists_count(&self) -> usize;

    fn get_albums_count(&self) -> usize;

    fn get_songs_count(&self) -> usize;

    // =========================================================================
    // Composite Views
    // =========================================================================

    /// The song with its contributing artists. Empty when the song does not
    /// exist or has no artists.
    fn get_song_with_artists(&self, song_id: i64) -> Result<Vec<SongWithArtists>> {
        let rows = self.get_song_artist_rows(song_id)?;
        Ok(aggregate_song_artists(rows))
    }

    /// Artists whose name contains `query`, ignoring case.
    fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        let artists = self.list_artists()?;
        Ok(filter_artists_by_name(artists, query))
    }
}
