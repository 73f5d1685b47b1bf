// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard stat cards and the month-over-month resolution summary.

use super::format::{format_percent, format_points};
use crate::models::{DashboardMetrics, DateRange, ResolutionComparison};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u64,
    pub description: &'static str,
}

/// Headline cards in display order.
pub fn stat_cards(metrics: &DashboardMetrics) -> Vec<StatCard> {
    let by_status = &metrics.reports_by_status;
    let card = |title: &'static str, value: u64, description: &'static str| StatCard {
        title,
        value,
        description,
    };
    vec![
        card(
            "Total de Denúncias",
            metrics.total_reports,
            "Todas as denúncias registradas",
        ),
        card("Pendentes", by_status.pending, "Aguardando análise"),
        card("Em Análise", by_status.in_progress, "Sendo processadas"),
        card("Resolvidas", by_status.resolved, "Concluídas com sucesso"),
        card("Rejeitadas", by_status.rejected, "Denúncias rejeitadas"),
        card(
            "Usuários Ativos",
            metrics.total_active_users,
            "Cadastrados no sistema",
        ),
    ]
}

/// Text lines of the resolution-rate comparison card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub current_month: String,
    pub current_rate: String,
    pub current_detail: String,
    pub last_month: String,
    pub last_rate: String,
    pub last_detail: String,
    pub difference: String,
    /// Absent when last month had nothing to compare against
    pub variation: Option<String>,
}

pub fn resolution_summary(comparison: &ResolutionComparison) -> ResolutionSummary {
    let current = &comparison.current_month;
    let last = &comparison.last_month;
    ResolutionSummary {
        current_month: current.month.clone(),
        current_rate: format_percent(current.rate),
        current_detail: format!("{} de {} denúncias", current.resolved, current.total),
        last_month: last.month.clone(),
        last_rate: format_percent(last.rate),
        last_detail: format!("{} de {} denúncias", last.resolved, last.total),
        difference: format_points(comparison.difference),
        variation: comparison.percentage_change.map(|pct| {
            format!("Variação de {:.1}% em relação ao mês anterior", pct)
        }),
    }
}

/// Option label of the chart range selector.
pub fn range_label(range: DateRange) -> String {
    format!("Últimos {} dias", range.days())
}
