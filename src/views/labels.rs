// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Localized display labels.
//!
//! Every lookup is total: known values map to a non-empty label, anything
//! the client does not recognise is shown as received.

use crate::models::{category, ReportStatus, TimelineAction, UserRole, UserStatus};
use std::borrow::Cow;

/// Label used on status badges (report lists and detail header).
pub fn status_badge(status: &ReportStatus) -> Cow<'_, str> {
    match status {
        ReportStatus::Pending => "Pendente".into(),
        ReportStatus::InProgress => "Em Andamento".into(),
        ReportStatus::Resolved => "Resolvido".into(),
        ReportStatus::Rejected => "Rejeitado".into(),
        ReportStatus::Unknown(raw) => raw.as_str().into(),
    }
}

/// Label used inside timeline entries ("Pendente → Em Análise").
pub fn status_timeline(status: &ReportStatus) -> Cow<'_, str> {
    match status {
        ReportStatus::Pending => "Pendente".into(),
        ReportStatus::InProgress => "Em Análise".into(),
        ReportStatus::Resolved => "Resolvida".into(),
        ReportStatus::Rejected => "Arquivada".into(),
        ReportStatus::Unknown(raw) => raw.as_str().into(),
    }
}

/// Category display name; unknown ids pass through.
pub fn category(id: &str) -> &str {
    category::find(id).map_or(id, |c| c.name)
}

pub fn user_role(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "Administrador",
        UserRole::User => "Usuário",
    }
}

pub fn user_status(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "Ativo",
        UserStatus::Inactive => "Inativo",
        UserStatus::Suspended => "Suspenso",
    }
}

/// Heading of a timeline entry.
pub fn action_title(action: &TimelineAction) -> &'static str {
    match action {
        TimelineAction::Created => "Denúncia Criada",
        TimelineAction::StatusUpdated { .. } => "Status Atualizado",
        TimelineAction::CommentAdded { .. } => "Comentário Adicionado",
        TimelineAction::Assigned { .. } => "Atribuído",
        TimelineAction::MarkedResolved => "Marcado como Resolvido",
        TimelineAction::MarkedRejected => "Marcado como Rejeitado",
        TimelineAction::Other(_) => "Evento",
    }
}

/// Icon name (lucide set) shown next to a timeline entry.
pub fn action_icon(action: &TimelineAction) -> &'static str {
    match action {
        TimelineAction::Created => "FileText",
        TimelineAction::StatusUpdated { .. } => "Clock",
        TimelineAction::CommentAdded { .. } => "MessageSquare",
        TimelineAction::Assigned { .. } => "UserCheck",
        TimelineAction::MarkedResolved => "CheckCheck",
        TimelineAction::MarkedRejected => "Ban",
        TimelineAction::Other(_) => "FileText",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_are_total() {
        for status in ReportStatus::KNOWN.iter() {
            assert!(!status_badge(status).is_empty());
            assert!(!status_timeline(status).is_empty());
        }
        let odd = ReportStatus::from("on_hold".to_string());
        assert_eq!(status_badge(&odd), "on_hold");
        assert_eq!(status_timeline(&odd), "on_hold");
    }

    #[test]
    fn test_badge_and_timeline_sets_differ() {
        assert_eq!(status_badge(&ReportStatus::InProgress), "Em Andamento");
        assert_eq!(status_timeline(&ReportStatus::InProgress), "Em Análise");
        assert_eq!(status_timeline(&ReportStatus::Rejected), "Arquivada");
    }

    #[test]
    fn test_category_passthrough() {
        assert_eq!(category("drug_activity"), "Atividade com Drogas");
        assert_eq!(category("noise"), "noise");
    }

    #[test]
    fn test_unknown_action_falls_back() {
        let action = TimelineAction::Other("escalated".to_string());
        assert_eq!(action_title(&action), "Evento");
        assert_eq!(action_icon(&action), "FileText");
    }
}
