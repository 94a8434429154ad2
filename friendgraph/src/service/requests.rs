// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Request shapes accepted by the user service
//!
//! Each struct binds from JSON with every field defaulting to empty, so a
//! missing field surfaces as a validation error rather than a parse error.

use serde::{Deserialize, Serialize};

use crate::error::{FriendGraphError, FriendGraphResult};

/// Fields of a user to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    /// Ignored: the service always mints a fresh id
    pub id: String,
    pub name: String,
    pub age: String,
    pub friends: Vec<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            ..Self::default()
        }
    }

    pub fn with_friends<I, S>(mut self, friends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.friends = friends.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> FriendGraphResult<()> {
        if self.name.is_empty() {
            return Err(FriendGraphError::validation("missing required field 'name'"));
        }
        if self.age.is_empty() {
            return Err(FriendGraphError::validation("missing required field 'age'"));
        }
        if self.friends.iter().any(String::is_empty) {
            return Err(FriendGraphError::validation("friend ids must not be empty"));
        }
        Ok(())
    }
}

/// Two users to link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendPair {
    pub source_id: String,
    pub target_id: String,
}

impl FriendPair {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }

    pub fn validate(&self) -> FriendGraphResult<()> {
        if self.source_id.is_empty() || self.target_id.is_empty() {
            return Err(FriendGraphError::validation(
                "missing required field 'source_id' or 'target_id'",
            ));
        }
        if self.source_id == self.target_id {
            return Err(FriendGraphError::validation(
                "a user cannot be friends with itself",
            ));
        }
        Ok(())
    }
}

/// A single user addressed by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetId {
    pub target_id: String,
}

impl TargetId {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
        }
    }

    pub fn validate(&self) -> FriendGraphResult<()> {
        if self.target_id.is_empty() {
            return Err(FriendGraphError::validation(
                "missing required field 'target_id'",
            ));
        }
        Ok(())
    }
}

/// Replacement age for an existing user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAge {
    pub new_age: String,
}

impl NewAge {
    pub fn new(new_age: impl Into<String>) -> Self {
        Self {
            new_age: new_age.into(),
        }
    }

    pub fn validate(&self) -> FriendGraphResult<()> {
        if self.new_age.is_empty() {
            return Err(FriendGraphError::validation(
                "missing required field 'new_age'",
            ));
        }
        Ok(())
    }
}
