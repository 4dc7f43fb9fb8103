//! Test fixture creation for the catalog database
//!
//! Builds the catalog through the store itself, so fixtures go through the
//! same schema and constraints as the server.

use super::constants::*;
use anyhow::{ensure, Result};
use music_catalog_server::catalog_store::{
    AlbumPayload, ArtistPayload, CatalogStore, SongArtistPayload, SongPayload,
    SqliteCatalogStore,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn artist(name: &str, genre: &str) -> ArtistPayload {
    ArtistPayload {
        name: Some(name.to_string()),
        image: Some(format!(
            "https://img.example/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        )),
        genre: Some(genre.to_string()),
    }
}

fn album(name: &str, year: i64, artist_id: i64) -> AlbumPayload {
    AlbumPayload {
        album_name: Some(name.to_string()),
        image: None,
        release_year: Some(year),
        artist_id: Some(artist_id),
    }
}

fn song(name: &str, length: i64, album_id: i64) -> SongPayload {
    SongPayload {
        song_name: Some(name.to_string()),
        length: Some(length),
        album_id: Some(album_id),
    }
}

/// Creates a temporary catalog with 4 artists, 3 albums and 5 songs.
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalog_db_path = dir.path().join("catalog.db");
    let store = SqliteCatalogStore::new(&catalog_db_path, 1)?;

    let artists = [
        (ARTIST_CURTIS_ID, artist(ARTIST_CURTIS_NAME, "Soul")),
        (ARTIST_MERCURY_ID, artist(ARTIST_MERCURY_NAME, "Rock")),
        (ARTIST_BIEBER_ID, artist(ARTIST_BIEBER_NAME, "Pop")),
        (ARTIST_CABALLE_ID, artist(ARTIST_CABALLE_NAME, "Opera")),
    ];
    for (expected_id, payload) in artists {
        let ack = store.create_artist(&payload)?;
        ensure!(ack.insert_id == expected_id, "unexpected artist id {}", ack.insert_id);
    }

    let albums = [
        (ALBUM_SUPERFLY_ID, album(ALBUM_SUPERFLY_NAME, 1972, ARTIST_CURTIS_ID)),
        (ALBUM_BARCELONA_ID, album(ALBUM_BARCELONA_NAME, 1988, ARTIST_MERCURY_ID)),
        (ALBUM_BAD_GUY_ID, album(ALBUM_BAD_GUY_NAME, 1985, ARTIST_MERCURY_ID)),
    ];
    for (expected_id, payload) in albums {
        let ack = store.create_album(&payload)?;
        ensure!(ack.insert_id == expected_id, "unexpected album id {}", ack.insert_id);
    }

    let songs = [
        (SONG_SUPERFLY_ID, song(SONG_SUPERFLY_NAME, 236, ALBUM_SUPERFLY_ID)),
        (SONG_PUSHERMAN_ID, song(SONG_PUSHERMAN_NAME, 300, ALBUM_SUPERFLY_ID)),
        (SONG_BARCELONA_ID, song(SONG_BARCELONA_NAME, SONG_BARCELONA_LENGTH, ALBUM_BARCELONA_ID)),
        (SONG_GUIDE_ME_HOME_ID, song(SONG_GUIDE_ME_HOME_NAME, 169, ALBUM_BARCELONA_ID)),
        (SONG_LIVING_ON_MY_OWN_ID, song(SONG_LIVING_ON_MY_OWN_NAME, 218, ALBUM_BAD_GUY_ID)),
    ];
    for (expected_id, payload) in songs {
        let ack = store.create_song(&payload)?;
        ensure!(ack.insert_id == expected_id, "unexpected song id {}", ack.insert_id);
    }

    // Association order matters: song detail lists artists in this order.
    let links = [
        (SONG_SUPERFLY_ID, ARTIST_CURTIS_ID),
        (SONG_PUSHERMAN_ID, ARTIST_CURTIS_ID),
        (SONG_BARCELONA_ID, ARTIST_MERCURY_ID),
        (SONG_BARCELONA_ID, ARTIST_CABALLE_ID),
        (SONG_GUIDE_ME_HOME_ID, ARTIST_CABALLE_ID),
        (SONG_GUIDE_ME_HOME_ID, ARTIST_MERCURY_ID),
        (SONG_LIVING_ON_MY_OWN_ID, ARTIST_MERCURY_ID),
    ];
    for (song_id, artist_id) in links {
        store.add_song_artist(
            song_id,
            &SongArtistPayload {
                artist_id: Some(artist_id),
            },
        )?;
    }

    Ok((dir, catalog_db_path))
}
