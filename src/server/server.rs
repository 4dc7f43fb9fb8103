use anyhow::{Context, Result};
use std::future::Future;
use std::time::Duration;

use tracing::{error, info};

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use super::error::ApiError;
use super::json_body::JsonBody;
use super::metrics::{metrics_handler, set_catalog_metrics};
use super::state::{GuardedCatalogStore, ServerState};
use super::store_access::StoreAccess;
use super::{log_requests, ServerConfig};
use crate::catalog_store::{
    Album, AlbumPayload, AlbumSongRow, Artist, ArtistAlbumRow, ArtistPayload, Song,
    SongArtistPayload, SongPayload, SongWithArtists, WriteAck,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub artists: usize,
    pub albums: usize,
    pub songs: usize,
}

#[derive(Deserialize, Debug, Default)]
struct SearchParams {
    q: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> ApiResult<ServerStats> {
    let access = StoreAccess::new(state.catalog_store.clone(), state.config.query_timeout);
    let (artists, albums, songs) = access
        .run("count_items", |s| {
            Ok((
                s.get_artists_count(),
                s.get_albums_count(),
                s.get_songs_count(),
            ))
        })
        .await?;

    Ok(Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        artists,
        albums,
        songs,
    }))
}

// =============================================================================
// Artists
// =============================================================================

async fn list_artists(State(store): State<StoreAccess>) -> ApiResult<Vec<Artist>> {
    Ok(Json(store.run("list_artists", |s| s.list_artists()).await?))
}

async fn get_artist(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Artist>> {
    Ok(Json(store.run("get_artist", move |s| s.get_artist(id)).await?))
}

/// An absent `q` matches every artist.
async fn search_artists(
    State(store): State<StoreAccess>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<Artist>> {
    let query = params.q.unwrap_or_default();
    Ok(Json(
        store
            .run("search_artists", move |s| s.search_artists(&query))
            .await?,
    ))
}

async fn get_artist_albums(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<ArtistAlbumRow>> {
    Ok(Json(
        store
            .run("get_artist_albums", move |s| s.get_artist_albums(id))
            .await?,
    ))
}

async fn get_album_songs(
    State(store): State<StoreAccess>,
    Path((artist_id, album_id)): Path<(i64, i64)>,
) -> ApiResult<Vec<AlbumSongRow>> {
    Ok(Json(
        store
            .run("get_album_songs", move |s| {
                s.get_album_songs(artist_id, album_id)
            })
            .await?,
    ))
}

async fn create_artist(
    State(store): State<StoreAccess>,
    JsonBody(payload): JsonBody<ArtistPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("create_artist", move |s| s.create_artist(&payload))
            .await?,
    ))
}

async fn update_artist(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<ArtistPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("update_artist", move |s| s.update_artist(id, &payload))
            .await?,
    ))
}

async fn delete_artist(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<WriteAck> {
    Ok(Json(store.run("delete_artist", move |s| s.delete_artist(id)).await?))
}

// =============================================================================
// Albums
// =============================================================================

async fn list_albums(State(store): State<StoreAccess>) -> ApiResult<Vec<Album>> {
    Ok(Json(store.run("list_albums", |s| s.list_albums()).await?))
}

async fn get_album(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Album>> {
    Ok(Json(store.run("get_album", move |s| s.get_album(id)).await?))
}

async fn create_album(
    State(store): State<StoreAccess>,
    JsonBody(payload): JsonBody<AlbumPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("create_album", move |s| s.create_album(&payload))
            .await?,
    ))
}

async fn update_album(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<AlbumPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("update_album", move |s| s.update_album(id, &payload))
            .await?,
    ))
}

async fn delete_album(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<WriteAck> {
    Ok(Json(store.run("delete_album", move |s| s.delete_album(id)).await?))
}

// =============================================================================
// Songs
// =============================================================================

async fn list_songs(State(store): State<StoreAccess>) -> ApiResult<Vec<Song>> {
    Ok(Json(store.run("list_songs", |s| s.list_songs()).await?))
}

/// The song with its artists folded into a nested list.
async fn get_song(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<SongWithArtists>> {
    Ok(Json(
        store
            .run("get_song", move |s| s.get_song_with_artists(id))
            .await?,
    ))
}

async fn create_song(
    State(store): State<StoreAccess>,
    JsonBody(payload): JsonBody<SongPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("create_song", move |s| s.create_song(&payload))
            .await?,
    ))
}

async fn update_song(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<SongPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("update_song", move |s| s.update_song(id, &payload))
            .await?,
    ))
}

async fn delete_song(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
) -> ApiResult<WriteAck> {
    Ok(Json(store.run("delete_song", move |s| s.delete_song(id)).await?))
}

async fn add_song_artist(
    State(store): State<StoreAccess>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<SongArtistPayload>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("add_song_artist", move |s| s.add_song_artist(id, &payload))
            .await?,
    ))
}

async fn remove_song_artist(
    State(store): State<StoreAccess>,
    Path((id, artist_id)): Path<(i64, i64)>,
) -> ApiResult<WriteAck> {
    Ok(Json(
        store
            .run("remove_song_artist", move |s| {
                s.remove_song_artist(id, artist_id)
            })
            .await?,
    ))
}

// =============================================================================
// Metrics
// =============================================================================

async fn metrics(State(store): State<StoreAccess>) -> Response {
    match store
        .run("count_items", |s| {
            Ok((
                s.get_artists_count(),
                s.get_albums_count(),
                s.get_songs_count(),
            ))
        })
        .await
    {
        Ok((artists, albums, songs)) => set_catalog_metrics(artists, albums, songs),
        Err(err) => error!("Could not refresh catalog gauges: {}", err),
    }
    metrics_handler().await.into_response()
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Router {
    let state = ServerState::new(config, catalog_store);

    let artist_routes: Router = Router::new()
        .route("/", get(list_artists).post(create_artist))
        .route("/search", get(search_artists))
        .route(
            "/{id}",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        .route("/{id}/albums", get(get_artist_albums))
        .route("/{id}/albums/{album_id}/songs", get(get_album_songs))
        .with_state(state.clone());

    let album_routes: Router = Router::new()
        .route("/", get(list_albums).post(create_album))
        .route(
            "/{id}",
            get(get_album).put(update_album).delete(delete_album),
        )
        .with_state(state.clone());

    let song_routes: Router = Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/{id}", get(get_song).put(update_song).delete(delete_song))
        .route("/{id}/artists", post(add_song_artist))
        .route("/{id}/artists/{artist_id}", delete(remove_song_artist))
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/artists", artist_routes)
        .nest("/albums", album_routes)
        .nest("/songs", song_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
        .layer(CorsLayer::permissive())
}

pub fn make_metrics_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Router {
    let state = ServerState::new(config, catalog_store);
    Router::new()
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Serves the catalog API and the metrics endpoint until `shutdown` resolves.
pub async fn run_server<F>(
    catalog_store: GuardedCatalogStore,
    config: ServerConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = make_app(config.clone(), catalog_store.clone());
    let metrics_app = make_metrics_app(config.clone(), catalog_store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", config.metrics_port))?;

    let (stop_tx, mut stop_rx) = tokio::sync::watch::channel(false);

    let metrics_server = tokio::spawn(async move {
        axum::serve(metrics_listener, metrics_app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    info!("Ready to serve at port {}!", config.port);
    info!("Metrics available at port {}!", config.metrics_port);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    let _ = stop_tx.send(true);
    match metrics_server.await {
        Ok(Err(err)) => error!("Metrics server failed: {}", err),
        Err(err) => error!("Metrics server task failed: {}", err),
        Ok(Ok(())) => {}
    }

    info!("Server stopped");
    Ok(served?)
}
