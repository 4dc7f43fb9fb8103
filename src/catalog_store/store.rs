//! SQLite-backed catalog store.

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::{enable_foreign_keys, BASE_DB_VERSION};
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed catalog store.
///
/// Writes go through a single connection, reads are spread round-robin over
/// a pool of read-only connections.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn initialize_schema(conn: &Connection) -> Result<()> {
    let latest = &CATALOG_VERSIONED_SCHEMAS[CATALOG_VERSIONED_SCHEMAS.len() - 1];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating catalog db schema at version {}", latest.version);
        return latest.create(conn);
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    let expected_version = (BASE_DB_VERSION + latest.version) as i64;
    if db_version != expected_version {
        bail!(
            "Catalog db is at version {}, expected {}",
            db_version,
            expected_version
        );
    }
    latest
        .validate(conn)
        .context("Catalog db schema does not match")
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| anyhow!("Catalog db connection mutex poisoned"))
}

impl SqliteCatalogStore {
    /// Opens (creating if needed) the catalog database at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of read-only connections, at least 1
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();
        if read_pool_size == 0 {
            bail!("Read pool size must be at least 1");
        }

        let write_conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database at {:?}", db_path))?;

        initialize_schema(&write_conn)?;
        enable_foreign_keys(&write_conn)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;
        write_conn.busy_timeout(BUSY_TIMEOUT)?;

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_conn.busy_timeout(BUSY_TIMEOUT)?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        let store = SqliteCatalogStore {
            read_pool,
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_index: Arc::new(AtomicUsize::new(0)),
        };

        info!(
            "Opened catalog: {} artists, {} albums, {} songs",
            store.get_artists_count(),
            store.get_albums_count(),
            store.get_songs_count()
        );

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn query_rows<T, P, F>(&self, sql: &str, params: P, parse: F) -> Result<Vec<T>>
    where
        P: rusqlite::Params,
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        debug!("query: {}", sql);
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt
            .query_map(params, parse)?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }

    fn execute_insert<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<WriteAck> {
        debug!("insert: {}", sql);
        let conn = lock(&self.write_conn)?;
        let affected_rows = conn.execute(sql, params)?;
        Ok(WriteAck {
            affected_rows,
            insert_id: conn.last_insert_rowid(),
        })
    }

    fn execute_write<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<WriteAck> {
        debug!("write: {}", sql);
        let conn = lock(&self.write_conn)?;
        let affected_rows = conn.execute(sql, params)?;
        Ok(WriteAck {
            affected_rows,
            insert_id: 0,
        })
    }

    fn count(&self, table: &str) -> usize {
        let read_conn = self.get_read_conn();
        let Ok(conn) = lock(&read_conn) else {
            return 0;
        };
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get::<_, i64>(0)
        })
        .map(|c| c as usize)
        .unwrap_or(0)
    }

    // =========================================================================
    // Row Parsing
    // =========================================================================

    /// Parse an Artist from (id, name, image, genre).
    fn parse_artist_row(row: &Row) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
            image: row.get(2)?,
            genre: row.get(3)?,
        })
    }

    /// Parse an Album from (id, albumName, image, releaseYear, artistID).
    fn parse_album_row(row: &Row) -> rusqlite::Result<Album> {
        Ok(Album {
            id: row.get(0)?,
            album_name: row.get(1)?,
            image: row.get(2)?,
            release_year: row.get(3)?,
            artist_id: row.get(4)?,
        })
    }

    /// Parse a Song from (id, songName, length, albumID).
    fn parse_song_row(row: &Row) -> rusqlite::Result<Song> {
        Ok(Song {
            id: row.get(0)?,
            song_name: row.get(1)?,
            length: row.get(2)?,
            album_id: row.get(3)?,
        })
    }
}

impl CatalogStore for SqliteCatalogStore {
    // =========================================================================
    // Artists
    // =========================================================================

    fn list_artists(&self) -> Result<Vec<Artist>> {
        self.query_rows(
            "SELECT id, name, image, genre FROM artists ORDER BY name",
            [],
            Self::parse_artist_row,
        )
    }

    fn get_artist(&self, id: i64) -> Result<Vec<Artist>> {
        self.query_rows(
            "SELECT id, name, image, genre FROM artists WHERE id = ?1",
            params![id],
            Self::parse_artist_row,
        )
    }

    fn create_artist(&self, artist: &ArtistPayload) -> Result<WriteAck> {
        self.execute_insert(
            "INSERT INTO artists (name, image, genre) VALUES (?1, ?2, ?3)",
            params![artist.name, artist.image, artist.genre],
        )
    }

    fn update_artist(&self, id: i64, artist: &ArtistPayload) -> Result<WriteAck> {
        self.execute_write(
            "UPDATE artists SET name = ?1, image = ?2, genre = ?3 WHERE id = ?4",
            params![artist.name, artist.image, artist.genre, id],
        )
    }

    fn delete_artist(&self, id: i64) -> Result<WriteAck> {
        self.execute_write("DELETE FROM artists WHERE id = ?1", params![id])
    }

    fn get_artist_albums(&self, artist_id: i64) -> Result<Vec<ArtistAlbumRow>> {
        self.query_rows(
            "SELECT al.id, al.albumName, al.image, al.releaseYear, al.artistID,
                    ar.name, ar.image, ar.genre
             FROM albums al
             INNER JOIN artists ar ON al.artistID = ar.id
             WHERE ar.id = ?1
             ORDER BY al.albumName",
            params![artist_id],
            |row| {
                Ok(ArtistAlbumRow {
                    id: row.get(0)?,
                    album_name: row.get(1)?,
                    image: row.get(2)?,
                    release_year: row.get(3)?,
                    artist_id: row.get(4)?,
                    artist_name: row.get(5)?,
                    artist_image: row.get(6)?,
                    artist_genre: row.get(7)?,
                })
            },
        )
    }

    // =========================================================================
    // Albums
    // =========================================================================

    fn list_albums(&self) -> Result<Vec<Album>> {
        self.query_rows(
            "SELECT id, albumName, image, releaseYear, artistID FROM albums ORDER BY albumName",
            [],
            Self::parse_album_row,
        )
    }

    fn get_album(&self, id: i64) -> Result<Vec<Album>> {
        self.query_rows(
            "SELECT id, albumName, image, releaseYear, artistID FROM albums WHERE id = ?1",
            params![id],
            Self::parse_album_row,
        )
    }

    fn create_album(&self, album: &AlbumPayload) -> Result<WriteAck> {
        self.execute_insert(
            "INSERT INTO albums (albumName, image, releaseYear, artistID) VALUES (?1, ?2, ?3, ?4)",
            params![
                album.album_name,
                album.image,
                album.release_year,
                album.artist_id
            ],
        )
    }

    fn update_album(&self, id: i64, album: &AlbumPayload) -> Result<WriteAck> {
        self.execute_write(
            "UPDATE albums SET albumName = ?1, image = ?2, releaseYear = ?3, artistID = ?4
             WHERE id = ?5",
            params![
                album.album_name,
                album.image,
                album.release_year,
                album.artist_id,
                id
            ],
        )
    }

    fn delete_album(&self, id: i64) -> Result<WriteAck> {
        self.execute_write("DELETE FROM albums WHERE id = ?1", params![id])
    }

    fn get_album_songs(&self, artist_id: i64, album_id: i64) -> Result<Vec<AlbumSongRow>> {
        self.query_rows(
            "SELECT s.id, s.songName, s.length, al.id, al.albumName, ar.id, ar.name
             FROM songs s
             INNER JOIN artists_songs sa ON sa.song_id = s.id
             INNER JOIN artists ar ON ar.id = sa.artist_id
             INNER JOIN albums al ON al.id = s.albumID
             WHERE ar.id = ?1 AND al.id = ?2
             ORDER BY s.songName",
            params![artist_id, album_id],
            |row| {
                Ok(AlbumSongRow {
                    id: row.get(0)?,
                    song_name: row.get(1)?,
                    length: row.get(2)?,
                    album_id: row.get(3)?,
                    album_name: row.get(4)?,
                    artist_id: row.get(5)?,
                    artist_name: row.get(6)?,
                })
            },
        )
    }

    // =========================================================================
    // Songs
    // =========================================================================

    fn list_songs(&self) -> Result<Vec<Song>> {
        self.query_rows(
            "SELECT id, songName, length, albumID FROM songs ORDER BY songName",
            [],
            Self::parse_song_row,
        )
    }

    fn get_song(&self, id: i64) -> Result<Vec<Song>> {
        self.query_rows(
            "SELECT id, songName, length, albumID FROM songs WHERE id = ?1",
            params![id],
            Self::parse_song_row,
        )
    }

    fn create_song(&self, song: &SongPayload) -> Result<WriteAck> {
        self.execute_insert(
            "INSERT INTO songs (songName, length, albumID) VALUES (?1, ?2, ?3)",
            params![song.song_name, song.length, song.album_id],
        )
    }

    fn update_song(&self, id: i64, song: &SongPayload) -> Result<WriteAck> {
        self.execute_write(
            "UPDATE songs SET songName = ?1, length = ?2, albumID = ?3 WHERE id = ?4",
            params![song.song_name, song.length, song.album_id, id],
        )
    }

    fn delete_song(&self, id: i64) -> Result<WriteAck> {
        self.execute_write("DELETE FROM songs WHERE id = ?1", params![id])
    }

    fn get_song_artist_rows(&self, song_id: i64) -> Result<Vec<SongArtistRow>> {
        self.query_rows(
            "SELECT s.id, s.songName, s.length, ar.name, ar.image, ar.genre, ar.id
             FROM songs s
             INNER JOIN artists_songs sa ON sa.song_id = s.id
             INNER JOIN artists ar ON ar.id = sa.artist_id
             WHERE s.id = ?1
             ORDER BY sa.rowid",
            params![song_id],
            |row| {
                Ok(SongArtistRow {
                    id: row.get(0)?,
                    song_name: row.get(1)?,
                    length: row.get(2)?,
                    artist_name: row.get(3)?,
                    artist_image: row.get(4)?,
                    artist_genre: row.get(5)?,
                    artist_id: row.get(6)?,
                })
            },
        )
    }

    // =========================================================================
    // Song <-> Artist associations
    // =========================================================================

    fn add_song_artist(&self, song_id: i64, link: &SongArtistPayload) -> Result<WriteAck> {
        self.execute_insert(
            "INSERT INTO artists_songs (song_id, artist_id) VALUES (?1, ?2)",
            params![song_id, link.artist_id],
        )
    }

    fn remove_song_artist(&self, song_id: i64, artist_id: i64) -> Result<WriteAck> {
        self.execute_write(
            "DELETE FROM artists_songs WHERE song_id = ?1 AND artist_id = ?2",
            params![song_id, artist_id],
        )
    }

    // =========================================================================
    // Counts
    // =========================================================================

    fn get_artists_count(&self) -> usize {
        self.count("artists")
    }

    fn get_albums_count(&self) -> usize {
        self.count("albums")
    }

    fn get_songs_count(&self) -> usize {
        self.count("songs")
    }
}
