// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Staff user administration.

use crate::client::{ApiClient, ApiRequest};
use crate::config::fill;
use crate::error::Result;
use crate::models::{NewUser, User, UserStatus, UserUpdate};
use crate::query::{QueryClient, QueryKey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<User>,
}

#[derive(Serialize)]
struct StatusChange {
    status: UserStatus,
}

fn users_key() -> QueryKey {
    QueryKey::new(["users"])
}

#[derive(Clone)]
pub struct UserService {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.queries
            .fetch(users_key(), || async {
                let request = ApiRequest::get(self.api.endpoints().users.clone());
                let envelope: UsersEnvelope = self.api.send_json(request).await?;
                Ok(envelope.users)
            })
            .await
    }

    /// Create a staff user. Server-side 400/422 bodies come back as
    /// [`ClientError::Validation`](crate::error::ClientError::Validation).
    pub async fn create(&self, user: &NewUser) -> Result<()> {
        user.validate()?;

        let request = ApiRequest::post(self.api.endpoints().users.clone()).json(user)?;
        self.api.send(request).await?;

        tracing::info!(email = %user.email, "User created");
        self.queries.invalidate(&users_key());
        Ok(())
    }

    pub async fn update(&self, id: &str, update: &UserUpdate) -> Result<()> {
        update.validate()?;

        let path = fill(&self.api.endpoints().user, "id", id);
        let request = ApiRequest::patch(path).json(update)?;
        self.api.send(request).await?;

        tracing::info!(user_id = id, "User updated");
        self.queries.invalidate(&users_key());
        Ok(())
    }

    pub async fn set_status(&self, id: &str, status: UserStatus) -> Result<()> {
        let path = fill(&self.api.endpoints().user_status, "id", id);
        let request = ApiRequest::patch(path).json(&StatusChange { status })?;
        self.api.send(request).await?;

        tracing::info!(user_id = id, status = %status, "User status changed");
        self.queries.invalidate(&users_key());
        Ok(())
    }

    pub async fn activate(&self, id: &str) -> Result<()> {
        self.set_status(id, UserStatus::Active).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<()> {
        self.set_status(id, UserStatus::Inactive).await
    }
}
