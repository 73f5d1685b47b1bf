// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in, sign-out and the current identity.

use crate::client::{ApiClient, ApiRequest, RequestKind};
use crate::error::Result;
use crate::models::{Credentials, LoginResponse, SessionUser};
use crate::query::QueryClient;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }

    /// Stored identity, if signed in.
    pub fn user(&self) -> Result<Option<SessionUser>> {
        self.api.session().user()
    }

    /// Exchange credentials for a token pair and persist the session.
    ///
    /// Failures (bad credentials included) propagate to the caller and leave
    /// any existing session untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser> {
        credentials.validate()?;

        let request = ApiRequest::post(self.api.endpoints().login.clone())
            .json(credentials)?
            .kind(RequestKind::Login);
        let response: LoginResponse = self.api.send_json(request).await?;

        let session = self.api.session();
        session.set_tokens(Some(&response.tokens()))?;
        session.set_user(Some(&response.user))?;
        self.queries.clear();

        tracing::info!(user_id = %response.user.id, "Signed in");
        Ok(response.user)
    }

    /// Best-effort server notification, then unconditional local sign-out.
    ///
    /// Never fails: network or server errors during the notification are
    /// logged and dropped.
    pub async fn logout(&self) {
        let session = self.api.session();
        let refresh = session.refresh_token().ok().flatten();

        if session.is_authenticated() {
            let notify = ApiRequest::post(self.api.endpoints().logout.clone())
                .json(&serde_json::json!({ "refresh": refresh }))
                .map(|r| r.kind(RequestKind::SignOut));
            match notify {
                Ok(request) => {
                    if let Err(e) = self.api.send(request).await {
                        tracing::debug!(error = %e, "Sign-out notification failed, ignoring");
                    }
                }
                Err(e) => tracing::debug!(error = %e, "Sign-out notification not sent"),
            }
        }

        if let Err(e) = session.clear() {
            tracing::error!(error = %e, "Failed to clear stored session");
        }
        self.queries.clear();
        tracing::info!("Signed out");
    }

    /// Ask the server who the stored token belongs to.
    pub async fn current_user(&self) -> Result<SessionUser> {
        let request = ApiRequest::get(self.api.endpoints().current_user.clone());
        self.api.send_json(request).await
    }
}
