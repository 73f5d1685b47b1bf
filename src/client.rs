// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the reports API.
//!
//! Every call goes through [`ApiClient::execute`], which:
//! - attaches the stored bearer token to authenticated requests
//! - optionally refreshes an expiring token first
//! - turns a 401 on anything but the login call into a forced sign-out
//! - maps other failures into [`ClientError`]

use crate::config::{Config, Endpoints};
use crate::error::{ClientError, Result};
use crate::middleware::{auth, force_sign_out, Navigator};
use crate::models::{AttachmentUpload, TokenPair};
use crate::session::SessionHolder;
use chrono::{Duration, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// How a request relates to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Carries the bearer token; a 401 forces sign-out.
    Authenticated,
    /// Never carries a token (public form, tracking lookup).
    Anonymous,
    /// The credential exchange itself; a 401 here is just a failed login.
    Login,
    /// Server notification on logout; carries the token but a 401 is ignored.
    SignOut,
}

impl RequestKind {
    fn attaches_token(self) -> bool {
        matches!(self, RequestKind::Authenticated | RequestKind::SignOut)
    }

    fn forces_sign_out_on_401(self) -> bool {
        matches!(self, RequestKind::Authenticated | RequestKind::Anonymous)
    }
}

/// Request body.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartPayload),
}

/// Multipart form kept as plain data so a request can be replayed.
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, AttachmentUpload)>,
}

impl MultipartPayload {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, upload: AttachmentUpload) -> Self {
        self.files.push((name.to_string(), upload));
        self
    }

    fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for (name, upload) in &self.files {
            let part = Part::bytes(upload.bytes.clone())
                .file_name(upload.file_name.clone())
                .mime_str(&upload.content_type)
                .map_err(|e| {
                    ClientError::InvalidInput(format!("{}: {}", upload.file_name, e))
                })?;
            form = form.part(name.clone(), part);
        }
        Ok(form)
    }
}

/// A request before it is bound to the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub payload: Payload,
    pub kind: RequestKind,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
            kind: RequestKind::Authenticated,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("Failed to encode body: {}", e)))?;
        self.payload = Payload::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartPayload) -> Self {
        self.payload = Payload::Multipart(form);
        self
    }

    pub fn kind(mut self, kind: RequestKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn anonymous(self) -> Self {
        self.kind(RequestKind::Anonymous)
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// The single pre-configured client shared by all services.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    endpoints: Endpoints,
    session: SessionHolder,
    navigator: Arc<dyn Navigator>,
    auto_refresh: bool,
    /// Serializes token refreshes and sign-outs so concurrent 401s share one
    /// outcome.
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        session: SessionHolder,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("HTTP client setup: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
            session,
            navigator,
            auto_refresh: config.token_auto_refresh,
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send a request through the full pipeline; returns only successful responses.
    pub async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response> {
        if self.auto_refresh && request.kind == RequestKind::Authenticated {
            self.refresh_if_expiring().await;
        }

        let (response, sent_token) = self.dispatch(&request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_status(response, &request.path).await;
        }

        if !request.kind.forces_sign_out_on_401() {
            return Err(ClientError::Unauthorized);
        }

        if self.recover_unauthorized(&request, sent_token.as_deref()).await {
            let (retry, retry_token) = self.dispatch(&request).await?;
            if retry.status() != StatusCode::UNAUTHORIZED {
                return check_status(retry, &request.path).await;
            }
            let _guard = self.refresh_lock.lock().await;
            self.sign_out_locked(&request, retry_token.as_deref());
        }
        Err(ClientError::Unauthorized)
    }

    /// Execute and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let response = self.execute(request).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("{}: {}", path, e)))
    }

    /// Execute and discard the body.
    pub async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Build and send one HTTP request. Returns the token it carried.
    async fn dispatch(
        &self,
        request: &ApiRequest,
    ) -> Result<(reqwest::Response, Option<String>)> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let token = if request.kind.attaches_token() {
            self.session.access_token()?
        } else {
            None
        };
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(value),
            Payload::Multipart(form) => builder.multipart(form.to_form()?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = response.status().as_u16(),
            "API request"
        );

        Ok((response, token))
    }

    async fn refresh_if_expiring(&self) {
        let token = match self.session.access_token() {
            Ok(Some(token)) => token,
            _ => return,
        };
        let margin = Duration::seconds(auth::TOKEN_REFRESH_MARGIN_SECS);
        if !auth::expires_within(&token, margin, Utc::now()) {
            return;
        }

        let _guard = self.refresh_lock.lock().await;
        // Someone else refreshed (or signed out) while we waited
        if self.session.access_token().ok().flatten().as_deref() != Some(token.as_str()) {
            return;
        }
        tracing::info!("Access token expiring, refreshing");
        if let Err(e) = self.refresh_locked().await {
            tracing::warn!(error = %e, "Proactive token refresh failed");
        }
    }

    /// Decide what a 401 means, under the refresh lock so concurrent callers
    /// that failed with the same token share one outcome.
    ///
    /// `sent` is the access token the failed request carried. If the stored
    /// token has changed since, another caller already refreshed and the
    /// request is retried with the new one. Otherwise a refresh is attempted
    /// (when enabled) and, failing that, the session is cleared once.
    /// Returns whether the request should be retried.
    async fn recover_unauthorized(&self, request: &ApiRequest, sent: Option<&str>) -> bool {
        let _guard = self.refresh_lock.lock().await;

        let current = self.session.access_token().ok().flatten();
        if sent.is_some() && current.is_some() && current.as_deref() != sent {
            tracing::debug!(path = %request.path, "Token already replaced, retrying");
            return true;
        }

        if self.auto_refresh && request.kind == RequestKind::Authenticated {
            match self.refresh_locked().await {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "Token refresh failed"),
            }
        }

        self.sign_out_locked(request, sent);
        false
    }

    /// Apply the 401 policy unless the token `sent` was already cleared by
    /// another caller. Must hold `refresh_lock`.
    fn sign_out_locked(&self, request: &ApiRequest, sent: Option<&str>) {
        if sent.is_some() && matches!(self.session.access_token(), Ok(None)) {
            tracing::debug!(path = %request.path, "Session already cleared");
            return;
        }

        tracing::warn!(
            method = %request.method,
            path = %request.path,
            "Request rejected with 401, clearing session"
        );
        force_sign_out(&self.session, self.navigator.as_ref());
    }

    /// Exchange the stored refresh token for a new access token. Must hold
    /// `refresh_lock`. Returns whether a usable token is stored.
    async fn refresh_locked(&self) -> Result<bool> {
        let Some(refresh) = self.session.refresh_token()? else {
            return Ok(false);
        };

        let request = ApiRequest::post(self.endpoints.refresh.clone())
            .json(&serde_json::json!({ "refresh": refresh }))?
            .kind(RequestKind::Login);
        let (response, _) = self.dispatch(&request).await?;
        if !response.status().is_success() {
            tracing::info!(status = response.status().as_u16(), "Refresh token rejected");
            return Ok(false);
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("{}: {}", request.path, e)))?;
        self.session.set_tokens(Some(&TokenPair {
            access: body.access,
            refresh: body.refresh.unwrap_or(refresh),
        }))?;

        tracing::info!("Access token refreshed");
        Ok(true)
    }
}

async fn check_status(response: reqwest::Response, path: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response(status, path, &body))
}
