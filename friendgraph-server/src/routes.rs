// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! HTTP routes
//!
//! | Method | Path            | Body                          |
//! |--------|-----------------|-------------------------------|
//! | GET    | `/`             |                               |
//! | POST   | `/create`       | `{"name","age","friends"}`    |
//! | GET    | `/{id}`         |                               |
//! | PUT    | `/{id}`         | `{"new_age"}`                 |
//! | POST   | `/make_friends` | `{"source_id","target_id"}`   |
//! | GET    | `/friends/{id}` |                               |
//! | DELETE | `/user`         | `{"target_id"}`               |
//!
//! The service is synchronous, so every handler runs its call on a tokio
//! blocking worker.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use friendgraph::{FriendGraphResult, FriendPair, NewAge, NewUser, TargetId, User, UserService};
use log::info;

use crate::error::ApiError;

pub const HEALTH_MESSAGE: &str = "Server is up and running!";
pub const USER_NOT_FOUND: &str = "User not found";
pub const FRIEND_NOT_FOUND: &str = "Friend not found by id";
pub const AGE_UPDATED: &str = "User age updated";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    service: Arc<UserService>,
}

impl AppState {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }

    /// Run `f` against the service on a blocking worker
    async fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&UserService) -> FriendGraphResult<T> + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let result = tokio::task::spawn_blocking(move || f(&service))
            .await
            .map_err(|e| ApiError::Internal(format!("worker failed: {}", e)))?;
        Ok(result?)
    }
}

/// Build the router with request logging
pub fn create_router(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/create", post(create_user))
        .route("/make_friends", post(make_friends))
        .route("/user", delete(delete_user))
        .route("/friends/:id", get(get_friends))
        .route("/:id", get(get_user).put(update_age))
        .layer(middleware::from_fn(log_requests))
        .with_state(AppState::new(service))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

/// Malformed JSON is a client error, same as a missing field
fn bind<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = bind(payload)?;
    let id = state.run(move |service| service.create_user(request)).await?;
    Ok((StatusCode::CREATED, id))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .run(move |service| service.get_user(&id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}

async fn update_age(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewAge>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let request = bind(payload)?;
    if state
        .run(move |service| service.update_age(&id, request))
        .await?
    {
        Ok(AGE_UPDATED)
    } else {
        Err(ApiError::NotFound(USER_NOT_FOUND.to_string()))
    }
}

async fn make_friends(
    State(state): State<AppState>,
    payload: Result<Json<FriendPair>, JsonRejection>,
) -> Result<String, ApiError> {
    let pair = bind(payload)?;
    match state.run(move |service| service.make_friends(pair)).await? {
        Some((source, target)) => Ok(format!("{} and {} are now friends", source, target)),
        None => Err(ApiError::BadRequest(FRIEND_NOT_FOUND.to_string())),
    }
}

async fn get_friends(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<User>>, ApiError> {
    state
        .run(move |service| service.get_friends(&id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}

async fn delete_user(
    State(state): State<AppState>,
    payload: Result<Json<TargetId>, JsonRejection>,
) -> Result<String, ApiError> {
    let target = bind(payload)?;
    state
        .run(move |service| service.delete_user(target))
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}
