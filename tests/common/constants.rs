//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When the fixture catalog changes, update only this file.

// ============================================================================
// Test Catalog IDs
// ============================================================================
//
// The fixture database is fresh, so row ids follow insertion order.

pub const ARTIST_CURTIS_ID: i64 = 1;
pub const ARTIST_MERCURY_ID: i64 = 2;
pub const ARTIST_BIEBER_ID: i64 = 3;
pub const ARTIST_CABALLE_ID: i64 = 4;

pub const ALBUM_SUPERFLY_ID: i64 = 1;
pub const ALBUM_BARCELONA_ID: i64 = 2;
pub const ALBUM_BAD_GUY_ID: i64 = 3;

pub const SONG_SUPERFLY_ID: i64 = 1;
pub const SONG_PUSHERMAN_ID: i64 = 2;
pub const SONG_BARCELONA_ID: i64 = 3;
pub const SONG_GUIDE_ME_HOME_ID: i64 = 4;
pub const SONG_LIVING_ON_MY_OWN_ID: i64 = 5;

/// Id that is never used by the fixture catalog.
pub const MISSING_ID: i64 = 9999;

// ============================================================================
// Test Catalog Content
// ============================================================================

pub const ARTIST_CURTIS_NAME: &str = "Curtis Mayfield";
pub const ARTIST_MERCURY_NAME: &str = "Freddie Mercury";
pub const ARTIST_BIEBER_NAME: &str = "Justin Bieber";
pub const ARTIST_CABALLE_NAME: &str = "Montserrat Caballe";

pub const ALBUM_SUPERFLY_NAME: &str = "Superfly";
pub const ALBUM_BARCELONA_NAME: &str = "Barcelona";
pub const ALBUM_BAD_GUY_NAME: &str = "Mr. Bad Guy";

pub const SONG_SUPERFLY_NAME: &str = "Superfly";
pub const SONG_PUSHERMAN_NAME: &str = "Pusherman";
pub const SONG_BARCELONA_NAME: &str = "Barcelona";
pub const SONG_GUIDE_ME_HOME_NAME: &str = "Guide Me Home";
pub const SONG_LIVING_ON_MY_OWN_NAME: &str = "Living on My Own";

pub const SONG_BARCELONA_LENGTH: i64 = 339;

pub const ARTIST_COUNT: usize = 4;
pub const ALBUM_COUNT: usize = 3;
pub const SONG_COUNT: usize = 5;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
