// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation helpers: label lookup, date formatting, search.
//!
//! Nothing here performs I/O; everything takes loaded data and returns text.

pub mod dashboard;
pub mod format;
pub mod labels;
pub mod map;
pub mod report;
pub mod search;
pub mod timeline;

pub use dashboard::{range_label, resolution_summary, stat_cards, ResolutionSummary, StatCard};
pub use format::{format_date, format_date_in, format_percent, format_size_kb};
pub use search::{filter_reports, filter_users, Debouncer};
pub use timeline::{newest_first, TimelineEntryView};
