// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Report timeline events.

use super::report::ReportStatus;
use super::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff member attached to a timeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// What happened, with the metadata specific to that action.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    Created,
    StatusUpdated {
        previous: Option<ReportStatus>,
        new: Option<ReportStatus>,
    },
    CommentAdded {
        comment: Option<String>,
    },
    Assigned {
        assignee: Option<Actor>,
    },
    MarkedResolved,
    MarkedRejected,
    /// Action name this client does not recognise
    Other(String),
}

impl TimelineAction {
    pub fn as_str(&self) -> &str {
        match self {
            TimelineAction::Created => "created",
            TimelineAction::StatusUpdated { .. } => "updated_status",
            TimelineAction::CommentAdded { .. } => "comment_added",
            TimelineAction::Assigned { .. } => "assigned_to_user",
            TimelineAction::MarkedResolved => "marked_resolved",
            TimelineAction::MarkedRejected => "marked_rejected",
            TimelineAction::Other(raw) => raw,
        }
    }
}

/// One immutable entry in a report's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireTimelineEvent", into = "WireTimelineEvent")]
pub struct TimelineEvent {
    pub id: Option<Id>,
    pub action: TimelineAction,
    pub created_by: Option<Actor>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTimelineEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    action: String,
    #[serde(default)]
    metadata: Option<WireMetadata>,
    #[serde(default)]
    created_by: Option<Actor>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    previous_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    new_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to_user: Option<Actor>,
}

impl From<WireTimelineEvent> for TimelineEvent {
    fn from(wire: WireTimelineEvent) -> Self {
        let meta = wire.metadata.unwrap_or_default();
        let action = match wire.action.as_str() {
            "created" => TimelineAction::Created,
            "updated_status" => TimelineAction::StatusUpdated {
                previous: meta.previous_status.map(ReportStatus::from),
                new: meta.new_status.map(ReportStatus::from),
            },
            "comment_added" => TimelineAction::CommentAdded {
                comment: meta.comment,
            },
            "assigned_to_user" => TimelineAction::Assigned {
                assignee: meta.assigned_to_user,
            },
            "marked_resolved" => TimelineAction::MarkedResolved,
            "marked_rejected" => TimelineAction::MarkedRejected,
            _ => TimelineAction::Other(wire.action),
        };
        Self {
            id: wire.id,
            action,
            created_by: wire.created_by,
            created_at: wire.created_at,
        }
    }
}

impl From<TimelineEvent> for WireTimelineEvent {
    fn from(event: TimelineEvent) -> Self {
        let action = event.action.as_str().to_string();
        let metadata = match event.action {
            TimelineAction::StatusUpdated { previous, new } => WireMetadata {
                previous_status: previous.map(String::from),
                new_status: new.map(String::from),
                ..Default::default()
            },
            TimelineAction::CommentAdded { comment } => WireMetadata {
                comment,
                ..Default::default()
            },
            TimelineAction::Assigned { assignee } => WireMetadata {
                assigned_to_user: assignee,
                ..Default::default()
            },
            _ => WireMetadata::default(),
        };
        Self {
            id: event.id,
            action,
            metadata: Some(metadata),
            created_by: event.created_by,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_tagged_metadata() {
        let json = r#"[
            {"action": "created", "metadata": {}, "createdAt": "2025-11-09T10:00:00Z"},
            {"action": "updated_status",
             "metadata": {"previousStatus": "pending", "newStatus": "in_progress"},
             "createdBy": {"name": "Ana", "organization": "Guarda Municipal"},
             "createdAt": "2025-11-10T08:30:00Z"},
            {"action": "assigned_to_user",
             "metadata": {"assignedToUser": {"id": 3, "name": "Bruno"}},
             "createdAt": "2025-11-10T09:00:00Z"},
            {"action": "escalated", "metadata": null, "createdAt": "2025-11-11T09:00:00Z"}
        ]"#;
        let events: Vec<TimelineEvent> = serde_json::from_str(json).unwrap();

        assert_eq!(events[0].action, TimelineAction::Created);
        assert_eq!(
            events[1].action,
            TimelineAction::StatusUpdated {
                previous: Some(ReportStatus::Pending),
                new: Some(ReportStatus::InProgress),
            }
        );
        assert_eq!(
            events[1].created_by.as_ref().and_then(|a| a.name.as_deref()),
            Some("Ana")
        );
        match &events[2].action {
            TimelineAction::Assigned { assignee: Some(actor) } => {
                assert_eq!(actor.id, Some(Id::new("3")));
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(events[3].action, TimelineAction::Other("escalated".into()));
    }

    #[test]
    fn test_serializes_back_to_wire_shape() {
        let event: TimelineEvent = serde_json::from_str(
            r#"{"action": "comment_added", "metadata": {"comment": "Viatura enviada"},
                "createdAt": "2025-11-10T09:00:00Z"}"#,
        )
        .unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["action"], "comment_added");
        assert_eq!(value["metadata"]["comment"], "Viatura enviada");
    }
}
