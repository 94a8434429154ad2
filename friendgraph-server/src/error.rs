// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use friendgraph::FriendGraphError;
use log::error;
use thiserror::Error;

/// Failure of a request, rendered as a status code and plain-text body
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FriendGraphError> for ApiError {
    fn from(e: FriendGraphError) -> Self {
        match e {
            FriendGraphError::Validation(msg) => ApiError::BadRequest(msg),
            // An unresolved reference inside the request body
            FriendGraphError::NotFound(id) => {
                ApiError::BadRequest(format!("Friend not found by id: {}", id))
            }
            FriendGraphError::Storage(_) | FriendGraphError::Encoding(_) => {
                error!("Request failed: {}", e);
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
