//! Axum route handlers for the notes HTTP API.

use crate::error::ApiError;
use crate::repository::NotesRepository;
use axum::Router;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use notes_types::*;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
    pub repo: NotesRepository,
    pub start_time: Instant,
    pub max_title_len: usize,
}

impl AppState {
    pub fn new(repo: NotesRepository, max_title_len: usize) -> Self {
        Self {
            repo,
            start_time: Instant::now(),
            max_title_len,
        }
    }
}

/// Every route answers with or without a trailing slash.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/health/", get(health))
        .route("/api/version", get(version))
        .route("/api/version/", get(version))
        .route("/api/status", get(status))
        .route("/api/status/", get(status))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/", get(list_notes).post(create_note))
        .route("/api/notes/:id", get(get_note).patch(update_note).delete(delete_note))
        .route("/api/notes/:id/", get(get_note).patch(update_note).delete(delete_note))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Ids that are not positive integers can never exist.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::NotFound)
}

fn check_title(title: Option<&str>, max_len: usize) -> Result<(), ApiError> {
    match title {
        Some(t) if t.chars().count() > max_len => Err(ApiError::Validation(format!(
            "title must be at most {} characters",
            max_len
        ))),
        _ => Ok(()),
    }
}

// GET /api/health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        message: "Healthy".to_string(),
    })
}

// GET /api/version
pub async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: VERSION.to_string(),
    })
}

// GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_notes: state.repo.count(),
    })
}

// GET /api/notes
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let Query(query) = query?;
    let notes = state.repo.list(query.q.as_deref(), query.include_archived);
    Ok(Json(notes))
}

// POST /api/notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NoteCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(payload) = payload?;
    check_title(payload.title.as_deref(), state.max_title_len)?;

    let note = state.repo.create(payload);
    log::info!("[HTTP] Created note {}", note.id);
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /api/notes/:id
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&id)?;
    state.repo.get(id).map(Json).ok_or(ApiError::NotFound)
}

// PATCH /api/notes/:id
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<NoteUpdate>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    check_title(payload.title.as_deref(), state.max_title_len)?;

    state.repo.update(id, payload).map(Json).ok_or(ApiError::NotFound)
}

// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.repo.delete(id) {
        log::info!("[HTTP] Deleted note {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
