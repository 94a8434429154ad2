// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Binary record codec
//!
//! Layout of a stored user record:
//!
//! ```text
//! +--------+-------------------+---------------------------+
//! | format | crc32 (LE, 4 B)   | bincode payload (User)    |
//! +--------+-------------------+---------------------------+
//! ```
//!
//! The payload uses fixed-width integers and rejects trailing bytes, so the
//! encoding is deterministic and `encode(decode(bytes)) == bytes`.

use bincode::Options;

use super::types::User;
use crate::error::{FriendGraphError, FriendGraphResult};

/// Current record format tag
pub const RECORD_FORMAT_V1: u8 = 1;

const HEADER_LEN: usize = 5;

fn payload_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode a user into its stored representation
pub fn encode_user(user: &User) -> FriendGraphResult<Vec<u8>> {
    let payload = payload_options().serialize(user)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.push(RECORD_FORMAT_V1);
    bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a stored record
///
/// Unknown format tags, checksum mismatches and malformed payloads are all
/// reported as [`FriendGraphError::Encoding`].
pub fn decode_user(bytes: &[u8]) -> FriendGraphResult<User> {
    if bytes.len() < HEADER_LEN {
        return Err(FriendGraphError::encoding(format!(
            "record too short: {} bytes",
            bytes.len()
        )));
    }

    let (header, payload) = bytes.split_at(HEADER_LEN);
    if header[0] != RECORD_FORMAT_V1 {
        return Err(FriendGraphError::encoding(format!(
            "unsupported record format {}",
            header[0]
        )));
    }

    let stored_crc = u32::from_le_bytes([header[1], header[2], header[3], header[4]]);
    let actual_crc = crc32fast::hash(payload);
    if stored_crc != actual_crc {
        return Err(FriendGraphError::encoding(format!(
            "checksum mismatch: stored {:08x}, computed {:08x}",
            stored_crc, actual_crc
        )));
    }

    Ok(payload_options().deserialize(payload)?)
}
