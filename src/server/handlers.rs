//! Request handlers translating HTTP calls into store operations.

use super::AppState;
use crate::task::{domain::TaskId, ports::TaskStoreError};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// JSON body for create and rename requests.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskPayload {
    name: String,
}

#[expect(clippy::unused_async, reason = "axum handler signature")]
pub(crate) async fn health() -> &'static str {
    "OK\n"
}

#[expect(clippy::unused_async, reason = "axum handler signature")]
pub(crate) async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    Json(state.counters.snapshot()).into_response()
}

pub(crate) async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<TaskPayload>>,
) -> Response {
    let Some(name) = accept_name(payload) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match state.store.create_task(&name).await {
        Ok(task) => {
            info!(id = %task.id(), "task created");
            StatusCode::CREATED.into_response()
        }
        Err(err) => store_error(&err),
    }
}

pub(crate) async fn list_tasks(State(state): State<Arc<AppState>>) -> Response {
    match state.store.list_tasks().await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(err) => store_error(&err),
    }
}

pub(crate) async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.get_task(&TaskId::new(id)).await {
        Ok(task) => Json(task).into_response(),
        Err(err) => store_error(&err),
    }
}

pub(crate) async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<TaskPayload>>,
) -> Response {
    let Some(name) = accept_name(payload) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match state.store.update_task(&TaskId::new(id), &name).await {
        Ok(task) => {
            info!(id = %task.id(), "task updated");
            Json(task).into_response()
        }
        Err(err) => store_error(&err),
    }
}

pub(crate) async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.delete_task(&TaskId::new(&id)).await {
        Ok(()) => {
            info!(id = %id, "task deleted");
            StatusCode::OK.into_response()
        }
        Err(err) => store_error(&err),
    }
}

/// Validates the request body before any store call: a rejected or empty
/// payload is the caller's mistake, never the store's problem.
fn accept_name(payload: Option<Json<TaskPayload>>) -> Option<String> {
    let Json(TaskPayload { name }) = payload?;
    if name.is_empty() { None } else { Some(name) }
}

/// Translates store errors into responses; all user-facing mapping happens
/// here, the store itself never logs.
fn store_error(err: &TaskStoreError) -> Response {
    match err {
        TaskStoreError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        TaskStoreError::Backend(source) => {
            error!(error = %source, "store operation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
