// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - one data-fetching service per API resource.

pub mod auth;
pub mod dashboard;
pub mod reports;
pub mod users;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use reports::{report_form, ReportFilter, ReportPages, ReportService};
pub use users::UserService;
