// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Display records mirrored from API responses.

pub mod category;
pub mod dashboard;
pub mod page;
pub mod report;
pub mod timeline;
pub mod user;

pub use category::{Category, CATEGORIES};
pub use dashboard::{
    DashboardMetrics, DateRange, HeatmapPoint, MonthSegment, ResolutionComparison, StatusCounts,
    TimelinePoint,
};
pub use page::Page;
pub use report::{
    Assignee, Attachment, AttachmentUpload, Coordinates, NewReport, Report, ReportPayload,
    ReportStatus, ReportSummary, SubmitReceipt, TrackedReport,
};
pub use timeline::{Actor, TimelineAction, TimelineEvent};
pub use user::{
    Credentials, LoginResponse, NewUser, SessionUser, TokenPair, User, UserRole, UserStatus,
    UserUpdate,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier.
///
/// Some backends emit integers, others strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Id(s),
            RawId::Number(n) => Id(n.to_string()),
        }
    }
}
