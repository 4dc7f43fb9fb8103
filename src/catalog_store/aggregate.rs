//! Folding of flat song/artist join rows into nested songs.

use super::models::{SongArtist, SongArtistRow, SongWithArtists};
use std::collections::HashMap;

/// Groups join rows by song id.
///
/// Produces one record per distinct song, in the order each song is first
/// seen. Every row appends one artist to its song, duplicates included, so
/// the artist list of a song is exactly as long as the number of rows for it.
pub fn aggregate_song_artists<I>(rows: I) -> Vec<SongWithArtists>
where
    I: IntoIterator<Item = SongArtistRow>,
{
    let mut songs: Vec<SongWithArtists> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let position = *positions.entry(row.id).or_insert_with(|| {
            songs.push(SongWithArtists {
                id: row.id,
                song_name: row.song_name.clone(),
                length: row.length,
                artists: Vec::new(),
            });
            songs.len() - 1
        });

        songs[position].artists.push(SongArtist {
            name: row.artist_name,
            image: row.artist_image,
            genre: row.artist_genre,
            id: row.artist_id,
        });
    }

    songs
}
