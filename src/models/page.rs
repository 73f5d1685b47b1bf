// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Page-number pagination envelope.

use serde::{Deserialize, Serialize};

/// One page of results: `{count, next, previous, results}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Page number encoded in the `next` link.
    ///
    /// The link may be absolute or relative; only its `page` parameter is used,
    /// so requests keep going through the configured base URL.
    pub fn next_page_number(&self) -> Option<u32> {
        let next = self.next.as_deref()?;
        let url = reqwest::Url::parse(next)
            .or_else(|_| reqwest::Url::parse("http://localhost/")?.join(next))
            .ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    }
}
