// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The session holder: current identity and bearer tokens.
//!
//! State is read from storage on every call, so a session written by another
//! process (or cleared by the 401 policy) is seen immediately. A missing user
//! key means logged out.

use super::store::KeyValueStore;
use crate::error::{ClientError, Result};
use crate::models::{SessionUser, TokenPair};
use std::sync::Arc;

pub const USER_KEY: &str = "civic_reports.auth.user";
pub const ACCESS_TOKEN_KEY: &str = "civic_reports.auth.access_token";
pub const REFRESH_TOKEN_KEY: &str = "civic_reports.auth.refresh_token";

/// Shared handle to the persisted session.
#[derive(Clone)]
pub struct SessionHolder {
    store: Arc<dyn KeyValueStore>,
}

impl SessionHolder {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.user(), Ok(Some(_)))
    }

    /// Stored user. An unreadable entry counts as logged out.
    pub fn user(&self) -> Result<Option<SessionUser>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored user");
                Ok(None)
            }
        }
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    pub fn set_user(&self, user: Option<&SessionUser>) -> Result<()> {
        match user {
            Some(user) => {
                let raw = serde_json::to_string(user)
                    .map_err(|e| ClientError::Storage(e.to_string()))?;
                self.store.set(USER_KEY, &raw)
            }
            None => self.store.remove(USER_KEY),
        }
    }

    pub fn set_tokens(&self, tokens: Option<&TokenPair>) -> Result<()> {
        match tokens {
            Some(tokens) => {
                self.store.set(ACCESS_TOKEN_KEY, &tokens.access)?;
                self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh)
            }
            None => {
                self.store.remove(ACCESS_TOKEN_KEY)?;
                self.store.remove(REFRESH_TOKEN_KEY)
            }
        }
    }

    /// Forget user and tokens.
    pub fn clear(&self) -> Result<()> {
        self.set_user(None)?;
        self.set_tokens(None)
    }
}
