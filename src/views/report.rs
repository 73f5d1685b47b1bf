// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of reports and users for the terminal.

use super::format::{format_date_in, format_size_kb};
use super::labels::{category, status_badge, user_role, user_status};
use super::map::{maps_link, static_map_url};
use super::timeline;
use crate::models::{Attachment, Report, ReportSummary, TrackedReport, User};
use chrono::TimeZone;

fn attachment_line(attachment: &Attachment) -> String {
    format!(
        "  - {} ({}) {}",
        attachment.name,
        format_size_kb(attachment.size),
        attachment.url
    )
}

fn push_attachments(out: &mut Vec<String>, attachments: &[Attachment]) {
    if attachments.is_empty() {
        return;
    }
    out.push("Anexos:".to_string());
    out.extend(attachments.iter().map(attachment_line));
}

fn push_timeline<Tz: TimeZone>(
    out: &mut Vec<String>,
    events: &[crate::models::TimelineEvent],
    tz: &Tz,
) {
    if events.is_empty() {
        return;
    }
    out.push("Histórico:".to_string());
    for entry in timeline::render(events, tz) {
        out.push(format!("  [{}] {} - {}", entry.icon, entry.title, entry.date));
        out.extend(entry.lines.into_iter().map(|line| format!("      {}", line)));
    }
}

/// Public tracking view.
pub fn tracked_lines<Tz: TimeZone>(
    report: &TrackedReport,
    maps_key: Option<&str>,
    tz: &Tz,
) -> Vec<String> {
    let mut out = vec![
        format!("Denúncia {}", report.code),
        format!("Status: {}", status_badge(&report.status)),
        format!("Categoria: {}", category(&report.title)),
        format!("Registrada em: {}", format_date_in(&report.created_at, tz)),
        format!("Descrição: {}", report.description),
    ];
    if let Some(address) = &report.address {
        out.push(format!("Endereço: {}", address));
    }
    out.push(format!("Mapa: {}", maps_link(&report.coordinates)));
    out.extend(static_map_url(&report.coordinates, maps_key));
    if let Some(org) = &report.assigned_to {
        out.push(format!("Responsável: {}", org));
    }
    push_attachments(&mut out, &report.attachments);
    push_timeline(&mut out, &report.timeline, tz);
    out
}

/// Admin detail view.
pub fn detail_lines<Tz: TimeZone>(report: &Report, maps_key: Option<&str>, tz: &Tz) -> Vec<String> {
    let mut out = vec![
        format!("Denúncia {}", report.code),
        format!("Status: {}", status_badge(&report.status)),
        format!("Categoria: {}", category(&report.category)),
        format!("Registrada em: {}", format_date_in(&report.created_at, tz)),
        format!("Atualizada em: {}", format_date_in(&report.updated_at, tz)),
        format!("Descrição: {}", report.description),
    ];
    if let Some(id) = &report.id {
        out.insert(1, format!("ID: {}", id));
    }
    if let Some(address) = &report.address {
        out.push(format!("Endereço: {}", address));
    }
    out.push(format!("Mapa: {}", maps_link(&report.coordinates)));
    out.extend(static_map_url(&report.coordinates, maps_key));
    if let Some(assignee) = &report.assigned_to {
        let name = assignee.name.as_deref().unwrap_or("-");
        match assignee.organization_or_entity() {
            Some(org) => out.push(format!("Responsável: {} ({})", name, org)),
            None => out.push(format!("Responsável: {}", name)),
        }
    }
    if let Some(note) = &report.note {
        out.push(format!("Observação: {}", note));
    }
    push_attachments(&mut out, &report.attachments);
    push_timeline(&mut out, &report.timeline, tz);
    out
}

/// One listing row: id, code, status, category, date.
pub fn summary_line<Tz: TimeZone>(report: &ReportSummary, tz: &Tz) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        report.id,
        report.code,
        status_badge(&report.status),
        category(&report.title),
        format_date_in(&report.created_at, tz)
    )
}

pub fn user_line(user: &User) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        user.id,
        user.name,
        user.email,
        user.organization.as_deref().unwrap_or("-"),
        user_role(user.role),
        user_status(user.status)
    )
}
