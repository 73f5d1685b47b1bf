// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Report models: wire payload, admin detail, public tracking view.

use super::timeline::TimelineEvent;
use super::Id;
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Report lifecycle status.
///
/// Values the client does not know are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
    Unknown(String),
}

impl ReportStatus {
    /// Every status the backend is known to emit.
    pub const KNOWN: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
            ReportStatus::Unknown(raw) => raw,
        }
    }

    /// Parse only the known statuses; used for user input.
    pub fn parse_known(value: &str) -> std::result::Result<Self, String> {
        match Self::from(value.trim().to_string()) {
            ReportStatus::Unknown(raw) => Err(format!(
                "unknown status '{}' (expected one of: pending, in_progress, resolved, rejected)",
                raw
            )),
            status => Ok(status),
        }
    }
}

impl From<String> for ReportStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => ReportStatus::Pending,
            "in_progress" => ReportStatus::InProgress,
            "resolved" => ReportStatus::Resolved,
            "rejected" => ReportStatus::Rejected,
            _ => ReportStatus::Unknown(value),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Person or agency a report is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub entity: Option<String>,
}

impl Assignee {
    /// The responsible organization, falling back to the `entity` field.
    pub fn organization_or_entity(&self) -> Option<&str> {
        self.organization.as_deref().or(self.entity.as_deref())
    }
}

/// Uploaded file as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub content_type: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

/// Report as serialized by the API (`{"report": {...}}` payloads).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default)]
    pub id: Option<Id>,
    pub code: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<Assignee>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report detail for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ReportPayload")]
pub struct Report {
    pub id: Option<Id>,
    pub code: String,
    pub status: ReportStatus,
    /// Category id (sent as `title` by the API)
    pub category: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub note: Option<String>,
    pub assigned_to: Option<Assignee>,
    pub attachments: Vec<Attachment>,
    pub timeline: Vec<TimelineEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportPayload> for Report {
    fn from(p: ReportPayload) -> Self {
        Self {
            id: p.id,
            code: p.code,
            status: p.status,
            category: p.title,
            description: p.description,
            coordinates: Coordinates {
                lat: p.latitude,
                lng: p.longitude,
            },
            address: p.address,
            note: p.note,
            assigned_to: p.assigned_to,
            attachments: p.attachments,
            timeline: p.timeline,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Report as shown to the anonymous citizen who filed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ReportPayload")]
pub struct TrackedReport {
    pub code: String,
    pub status: ReportStatus,
    pub title: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    /// Responsible organization, if assigned
    pub assigned_to: Option<String>,
    pub attachments: Vec<Attachment>,
    pub timeline: Vec<TimelineEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportPayload> for TrackedReport {
    fn from(p: ReportPayload) -> Self {
        Self {
            assigned_to: p
                .assigned_to
                .as_ref()
                .and_then(|a| a.organization_or_entity())
                .map(str::to_string),
            code: p.code,
            status: p.status,
            title: p.title,
            description: p.description,
            coordinates: Coordinates {
                lat: p.latitude,
                lng: p.longitude,
            },
            address: p.address,
            attachments: p.attachments,
            timeline: p.timeline,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Row of the admin report listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: Id,
    pub code: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Anonymous report submission.
#[derive(Debug, Clone, Validate)]
pub struct NewReport {
    /// Category id
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "A descrição deve ter entre 1 e 1000 caracteres."
    ))]
    pub description: String,
    #[validate(custom(function = "validate_coordinates"))]
    pub coordinates: Coordinates,
    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    pub address: String,
    pub attachments: Vec<AttachmentUpload>,
}

fn validate_coordinates(c: &Coordinates) -> std::result::Result<(), ValidationError> {
    let in_range = (-90.0..=90.0).contains(&c.lat) && (-180.0..=180.0).contains(&c.lng);
    if in_range {
        Ok(())
    } else {
        let mut err = ValidationError::new("coordinates");
        err.message = Some("Coordenadas fora do intervalo válido.".into());
        Err(err)
    }
}

/// Response to a successful submission: the tracking code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub code: String,
}

/// File to upload with a new report.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::InvalidInput(format!("{}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ClientError::InvalidInput(format!("{}: not a file path", path.display()))
            })?;
        let content_type = guess_content_type(&file_name).to_string();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status: ReportStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, ReportStatus::Unknown("archived".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""archived""#);
        assert!(ReportStatus::parse_known("archived").is_err());
        assert_eq!(
            ReportStatus::parse_known("in_progress"),
            Ok(ReportStatus::InProgress)
        );
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("foto.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("audio.m4a"), "audio/mp4");
        assert_eq!(guess_content_type("LEIAME"), "application/octet-stream");
    }

    #[test]
    fn test_new_report_validation() {
        let report = NewReport {
            title: "theft".to_string(),
            description: String::new(),
            coordinates: Coordinates { lat: 95.0, lng: 0.0 },
            address: "Rua A".to_string(),
            attachments: vec![],
        };
        let errors = report.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("coordinates"));
        assert!(!fields.contains_key("address"));
    }
}
