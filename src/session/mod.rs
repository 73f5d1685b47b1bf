// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session persistence: durable key-value storage and the session holder.

pub mod holder;
pub mod store;

pub use holder::{SessionHolder, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
