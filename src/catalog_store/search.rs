//! Artist name search.
//!
//! Filtering happens in memory over the full artist listing, the query layer
//! only does exact and id-based lookups. Cost is linear in the number of
//! artists times the name length.

use super::models::Artist;

/// Keeps the artists whose lowercased name contains the lowercased query.
///
/// Plain substring containment: no anchoring, tokenization or ranking. The
/// input order is preserved and an empty query keeps everything.
pub fn filter_artists_by_name(artists: Vec<Artist>, query: &str) -> Vec<Artist> {
    let needle = query.to_lowercase();
    artists
        .into_iter()
        .filter(|artist| artist.name.to_lowercase().contains(&needle))
        .collect()
}
