//! Catalog store double for handler tests.

use crate::catalog_store::*;
use anyhow::{bail, Result};
use std::time::Duration;

/// Answers every call with an empty result after `delay`, or with an error
/// when `fail` is set.
#[derive(Default)]
pub struct StubStore {
    pub delay: Duration,
    pub fail: bool,
}

impl StubStore {
    pub fn failing() -> Self {
        StubStore {
            fail: true,
            ..Default::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        StubStore {
            delay,
            ..Default::default()
        }
    }

    fn answer<T: Default>(&self) -> Result<T> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.fail {
            bail!("database is locked");
        }
        Ok(T::default())
    }
}

impl CatalogStore for StubStore {
    fn list_artists(&self) -> Result<Vec<Artist>> {
        self.answer()
    }
    fn get_artist(&self, _id: i64) -> Result<Vec<Artist>> {
        self.answer()
    }
    fn create_artist(&self, _artist: &ArtistPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn update_artist(&self, _id: i64, _artist: &ArtistPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn delete_artist(&self, _id: i64) -> Result<WriteAck> {
        self.answer()
    }
    fn get_artist_albums(&self, _artist_id: i64) -> Result<Vec<ArtistAlbumRow>> {
        self.answer()
    }
    fn list_albums(&self) -> Result<Vec<Album>> {
        self.answer()
    }
    fn get_album(&self, _id: i64) -> Result<Vec<Album>> {
        self.answer()
    }
    fn create_album(&self, _album: &AlbumPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn update_album(&self, _id: i64, _album: &AlbumPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn delete_album(&self, _id: i64) -> Result<WriteAck> {
        self.answer()
    }
    fn get_album_songs(&self, _artist_id: i64, _album_id: i64) -> Result<Vec<AlbumSongRow>> {
        self.answer()
    }
    fn list_songs(&self) -> Result<Vec<Song>> {
        self.answer()
    }
    fn get_song(&self, _id: i64) -> Result<Vec<Song>> {
        self.answer()
    }
    fn create_song(&self, _song: &SongPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn update_song(&self, _id: i64, _song: &SongPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn delete_song(&self, _id: i64) -> Result<WriteAck> {
        self.answer()
    }
    fn get_song_artist_rows(&self, _song_id: i64) -> Result<Vec<SongArtistRow>> {
        self.answer()
    }
    fn add_song_artist(&self, _song_id: i64, _link: &SongArtistPayload) -> Result<WriteAck> {
        self.answer()
    }
    fn remove_song_artist(&self, _song_id: i64, _artist_id: i64) -> Result<WriteAck> {
        self.answer()
    }
    fn get_artists_count(&self) -> usize {
        0
    }
    fn get_albums_count(&self) -> usize {
        0
    }
    fn get_songs_count(&self) -> usize {
        0
    }
}
