// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side search over loaded lists, plus input debouncing.

use crate::models::{ReportSummary, User};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay applied to free-text search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Reports whose code or title contains `term`, case-insensitively.
/// An empty term keeps everything.
pub fn filter_reports<'a>(reports: &'a [ReportSummary], term: &str) -> Vec<&'a ReportSummary> {
    let needle = term.trim().to_lowercase();
    reports
        .iter()
        .filter(|r| needle.is_empty() || matches(&r.code, &needle) || matches(&r.title, &needle))
        .collect()
}

/// Users whose name or email contains `term`, case-insensitively.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let needle = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| needle.is_empty() || matches(&u.name, &needle) || matches(&u.email, &needle))
        .collect()
}

/// Collapses bursts of input into the last value.
///
/// Each call to [`Debouncer::settle`] waits out the delay and yields its
/// value only if no newer call was made in the meantime.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == mine).then_some(value)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Id, ReportStatus, UserRole, UserStatus};

    fn report(code: &str, title: &str) -> ReportSummary {
        ReportSummary {
            id: Id::new(code),
            code: code.to_string(),
            status: ReportStatus::Pending,
            title: title.to_string(),
            created_at: "2025-11-09T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_filter_reports_by_code_or_title() {
        let reports = vec![report("AB12CD", "theft"), report("ZZ99XX", "vandalism")];
        assert_eq!(filter_reports(&reports, "ab12").len(), 1);
        assert_eq!(filter_reports(&reports, "VANDAL")[0].code, "ZZ99XX");
        assert_eq!(filter_reports(&reports, "  ").len(), 2);
        assert!(filter_reports(&reports, "fraud").is_empty());
    }

    #[test]
    fn test_filter_users_by_name_or_email() {
        let users = vec![User {
            id: Id::new("1"),
            name: "Ana Souza".to_string(),
            email: "ana@ssp.am.gov.br".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            organization: None,
            created_at: None,
        }];
        assert_eq!(filter_users(&users, "souza").len(), 1);
        assert_eq!(filter_users(&users, "SSP.AM").len(), 1);
        assert!(filter_users(&users, "bruno").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_keeps_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let first = debouncer.settle("rou");
        let second = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            debouncer.settle("roubo").await
        };
        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, None);
        assert_eq!(second, Some("roubo"));
    }
}
