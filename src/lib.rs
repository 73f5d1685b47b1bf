// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Civic-Reports: client for an anonymous citizen incident-reporting service
//!
//! This crate provides the typed API client, session handling and query
//! cache behind the public tracking pages and the staff dashboard.

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod query;
pub mod services;
pub mod session;
pub mod time_utils;
pub mod views;

use client::ApiClient;
use config::Config;
use error::Result;
use middleware::Navigator;
use query::{QueryClient, QueryOptions};
use services::{AuthService, DashboardService, ReportService, UserService};
use session::{KeyValueStore, SessionHolder};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: SessionHolder,
    pub api: Arc<ApiClient>,
    pub queries: QueryClient,
    pub auth: AuthService,
    pub reports: ReportService,
    pub users: UserService,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Wire the client, cache and services around one session store.
    pub fn new(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let session = SessionHolder::new(store);
        let api = Arc::new(ApiClient::new(&config, session.clone(), navigator)?);
        let queries = QueryClient::new(QueryOptions {
            stale_time: config.query_stale_time,
            gc_time: config.query_gc_time,
            retry: config.query_retry,
        });

        Ok(Self {
            auth: AuthService::new(api.clone(), queries.clone()),
            reports: ReportService::new(api.clone(), queries.clone()),
            users: UserService::new(api.clone(), queries.clone()),
            dashboard: DashboardService::new(api.clone(), queries.clone()),
            config,
            session,
            api,
            queries,
        })
    }
}
