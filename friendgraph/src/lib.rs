// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! FriendGraph - a minimal social graph over an embedded key-value store
//!
//! Users are stored as whole records keyed by id. Each record carries its
//! own adjacency list (`friends`); the [`UserService`] keeps those lists
//! symmetric across create, link and delete.
//!
//! ```no_run
//! use friendgraph::{FriendGraphConfig, UserService};
//! use friendgraph::service::requests::{FriendPair, NewUser};
//!
//! # fn main() -> friendgraph::FriendGraphResult<()> {
//! let service = UserService::open(&FriendGraphConfig::new("./users.db"))?;
//! let a = service.create_user(NewUser::new("a", "11"))?;
//! let b = service.create_user(NewUser::new("b", "22"))?;
//! service.make_friends(FriendPair::new(a.clone(), b))?;
//! let friends = service.get_friends(&a)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod storage;

pub use config::FriendGraphConfig;
pub use error::{FriendGraphError, FriendGraphResult};
pub use service::requests::{FriendPair, NewAge, NewUser, TargetId};
pub use service::UserService;
pub use storage::{StorageType, User, UserStore};
