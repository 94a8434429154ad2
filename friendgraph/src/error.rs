// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for FriendGraph

use crate::storage::persistent::StorageDriverError;
use thiserror::Error;

/// Result type alias for service and store operations
pub type FriendGraphResult<T> = std::result::Result<T, FriendGraphError>;

/// Main error type for FriendGraph operations
///
/// An absent user is normally reported as `None`/`false` by the service;
/// `NotFound` is reserved for references that must resolve, such as the
/// initial friends of a new user.
#[derive(Error, Debug)]
pub enum FriendGraphError {
    /// A referenced user does not exist
    #[error("User not found: {0}")]
    NotFound(String),

    /// A required field is missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The underlying store failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored bytes could not be decoded, or a record could not be encoded
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl FriendGraphError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        FriendGraphError::NotFound(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        FriendGraphError::Validation(msg.into())
    }

    pub fn encoding<T: Into<String>>(msg: T) -> Self {
        FriendGraphError::Encoding(msg.into())
    }
}

impl From<StorageDriverError> for FriendGraphError {
    fn from(e: StorageDriverError) -> Self {
        FriendGraphError::Storage(e.to_string())
    }
}

impl From<bincode::Error> for FriendGraphError {
    fn from(e: bincode::Error) -> Self {
        FriendGraphError::Encoding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageType;

    #[test]
    fn test_driver_errors_map_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: FriendGraphError = StorageDriverError::from(io).into();
        assert!(matches!(err, FriendGraphError::Storage(ref msg) if msg.contains("read-only")));

        let err: FriendGraphError = StorageDriverError::Unsupported(StorageType::Redb).into();
        assert!(matches!(err, FriendGraphError::Storage(ref msg) if msg.contains("redb")));
    }

    #[test]
    fn test_bincode_errors_map_to_encoding() {
        let bad = bincode::deserialize::<String>(&[0xff]).unwrap_err();
        assert!(matches!(
            FriendGraphError::from(bad),
            FriendGraphError::Encoding(_)
        ));
    }
}
