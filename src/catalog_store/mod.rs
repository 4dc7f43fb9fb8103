mod aggregate;
mod coerce;
mod models;
mod schema;
mod search;
mod store;
mod trait_def;

pub use aggregate::aggregate_song_artists;
pub use models::*;
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use search::filter_artists_by_name;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
