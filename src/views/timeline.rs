// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report history as displayed: newest first, one entry per event.

use super::format::format_date_in;
use super::labels::{action_icon, action_title, status_timeline};
use crate::models::{Actor, TimelineAction, TimelineEvent};
use chrono::TimeZone;

/// One rendered timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntryView {
    pub title: &'static str,
    pub icon: &'static str,
    pub date: String,
    /// Detail lines under the title, in display order
    pub lines: Vec<String>,
}

/// Events sorted newest first. Ties keep their server order.
pub fn newest_first(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    let mut sorted: Vec<&TimelineEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// `name - organization`, or whichever of the two is known.
fn actor_name(actor: Option<&Actor>) -> Option<String> {
    let actor = actor?;
    let name = actor.name.as_deref().or(actor.email.as_deref());
    match (name, actor.organization.as_deref()) {
        (Some(name), Some(org)) => Some(format!("{} - {}", name, org)),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(org)) => Some(org.to_string()),
        (None, None) => None,
    }
}

fn by_line(prefix: &str, actor: Option<&Actor>) -> Option<String> {
    actor_name(actor).map(|name| format!("{} {}", prefix, name))
}

/// Render one event in `tz`.
pub fn entry<Tz: TimeZone>(event: &TimelineEvent, tz: &Tz) -> TimelineEntryView {
    let author = event.created_by.as_ref();
    let mut lines = Vec::new();

    match &event.action {
        TimelineAction::Created => {
            lines.push("Denúncia registrada anonimamente no sistema".to_string());
        }
        TimelineAction::StatusUpdated { previous, new } => {
            match (previous, new) {
                (Some(previous), Some(new)) => lines.push(format!(
                    "{} → {}",
                    status_timeline(previous),
                    status_timeline(new)
                )),
                (None, Some(new)) => lines.push(status_timeline(new).into_owned()),
                _ => {}
            }
            lines.extend(by_line("Atualizado por:", author));
        }
        TimelineAction::CommentAdded { comment } => {
            lines.extend(comment.clone());
            lines.extend(by_line("Comentado por:", author));
        }
        TimelineAction::Assigned { assignee } => {
            lines.extend(by_line("Atribuído por:", author));
            lines.extend(by_line("Responsável:", assignee.as_ref()));
        }
        TimelineAction::MarkedResolved => lines.extend(by_line("Resolvida por:", author)),
        TimelineAction::MarkedRejected => lines.extend(by_line("Rejeitada por:", author)),
        TimelineAction::Other(_) => {}
    }

    TimelineEntryView {
        title: action_title(&event.action),
        icon: action_icon(&event.action),
        date: format_date_in(&event.created_at, tz),
        lines,
    }
}

/// Render a whole history, newest first.
pub fn render<Tz: TimeZone>(events: &[TimelineEvent], tz: &Tz) -> Vec<TimelineEntryView> {
    newest_first(events)
        .into_iter()
        .map(|event| entry(event, tz))
        .collect()
}
