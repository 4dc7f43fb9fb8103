//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all catalog endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {} failed: {}", path, e))
    }

    async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {} failed: {}", path, e))
    }

    async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("PUT {} failed: {}", path, e))
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("DELETE {} failed: {}", path, e))
    }

    /// GET any path, for routes without a dedicated helper
    pub async fn get_raw(&self, path: &str) -> Response {
        self.get(path).await
    }

    // ========================================================================
    // Server
    // ========================================================================

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.get("/").await
    }

    // ========================================================================
    // Artists
    // ========================================================================

    /// GET /artists
    pub async fn get_artists(&self) -> Response {
        self.get("/artists").await
    }

    /// GET /artists/{id}
    pub async fn get_artist(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}", id)).await
    }

    /// GET /artists/search?q={query}, without `q` when `query` is None
    pub async fn search_artists(&self, query: Option<&str>) -> Response {
        match query {
            Some(q) => self.get(&format!("/artists/search?q={}", q)).await,
            None => self.get("/artists/search").await,
        }
    }

    /// GET /artists/{id}/albums
    pub async fn get_artist_albums(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}/albums", id)).await
    }

    /// GET /artists/{artist_id}/albums/{album_id}/songs
    pub async fn get_album_songs(&self, artist_id: i64, album_id: i64) -> Response {
        self.get(&format!("/artists/{}/albums/{}/songs", artist_id, album_id))
            .await
    }

    /// POST /artists
    pub async fn create_artist(&self, name: &str, image: &str, genre: &str) -> Response {
        self.post(
            "/artists",
            &json!({ "name": name, "image": image, "genre": genre }),
        )
        .await
    }

    /// PUT /artists/{id}
    pub async fn update_artist(&self, id: i64, body: Value) -> Response {
        self.put(&format!("/artists/{}", id), &body).await
    }

    /// DELETE /artists/{id}
    pub async fn delete_artist(&self, id: i64) -> Response {
        self.delete(&format!("/artists/{}", id)).await
    }

    // ========================================================================
    // Albums
    // ========================================================================

    /// GET /albums
    pub async fn get_albums(&self) -> Response {
        self.get("/albums").await
    }

    /// GET /albums/{id}
    pub async fn get_album(&self, id: i64) -> Response {
        self.get(&format!("/albums/{}", id)).await
    }

    /// POST /albums
    pub async fn create_album(&self, body: Value) -> Response {
        self.post("/albums", &body).await
    }

    /// PUT /albums/{id}
    pub async fn update_album(&self, id: i64, body: Value) -> Response {
        self.put(&format!("/albums/{}", id), &body).await
    }

    /// DELETE /albums/{id}
    pub async fn delete_album(&self, id: i64) -> Response {
        self.delete(&format!("/albums/{}", id)).await
    }

    // ========================================================================
    // Songs
    // ========================================================================

    /// GET /songs
    pub async fn get_songs(&self) -> Response {
        self.get("/songs").await
    }

    /// GET /songs/{id}
    pub async fn get_song(&self, id: i64) -> Response {
        self.get(&format!("/songs/{}", id)).await
    }

    /// POST /songs
    pub async fn create_song(&self, body: Value) -> Response {
        self.post("/songs", &body).await
    }

    /// PUT /songs/{id}
    pub async fn update_song(&self, id: i64, body: Value) -> Response {
        self.put(&format!("/songs/{}", id), &body).await
    }

    /// DELETE /songs/{id}
    pub async fn delete_song(&self, id: i64) -> Response {
        self.delete(&format!("/songs/{}", id)).await
    }

    /// POST /songs/{id}/artists
    pub async fn link_song_artist(&self, song_id: i64, artist_id: i64) -> Response {
        self.post(
            &format!("/songs/{}/artists", song_id),
            &json!({ "artistID": artist_id }),
        )
        .await
    }

    /// DELETE /songs/{id}/artists/{artist_id}
    pub async fn unlink_song_artist(&self, song_id: i64, artist_id: i64) -> Response {
        self.delete(&format!("/songs/{}/artists/{}", song_id, artist_id))
            .await
    }
}
