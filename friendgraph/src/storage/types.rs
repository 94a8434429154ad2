// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Core graph record types

use serde::{Deserialize, Serialize};

/// A user and its adjacency list
///
/// `friends` keeps insertion order and never holds the same id twice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            age: age.into(),
            friends: Vec::new(),
        }
    }

    pub fn with_friends(mut self, friends: Vec<String>) -> Self {
        self.friends = friends;
        self
    }

    pub fn is_friend_with(&self, id: &str) -> bool {
        self.friends.iter().any(|f| f == id)
    }

    /// Append `id` unless it is already present; returns whether it was added
    pub fn add_friend(&mut self, id: &str) -> bool {
        if self.is_friend_with(id) {
            return false;
        }
        self.friends.push(id.to_string());
        true
    }

    /// Drop `id` from the adjacency list; returns whether it was present
    pub fn remove_friend(&mut self, id: &str) -> bool {
        match self.friends.iter().position(|f| f == id) {
            Some(idx) => {
                self.friends.remove(idx);
                true
            }
            None => false,
        }
    }
}
