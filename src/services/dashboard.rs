// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregates: headline metrics, daily series and the heatmap.

use crate::client::{ApiClient, ApiRequest};
use crate::error::Result;
use crate::models::{DashboardMetrics, DateRange, HeatmapPoint, TimelinePoint};
use crate::query::{QueryClient, QueryKey};
use crate::time_utils::format_utc_millis;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct MetricsEnvelope {
    metrics: DashboardMetrics,
}

#[derive(Deserialize)]
struct TimelineEnvelope {
    timeline: Vec<TimelinePoint>,
}

#[derive(Deserialize)]
struct HeatmapEnvelope {
    points: Vec<HeatmapPoint>,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl DashboardService {
    pub fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    pub async fn metrics(&self) -> Result<DashboardMetrics> {
        self.queries
            .fetch(QueryKey::new(["dashboard-metrics"]), || async {
                let request = ApiRequest::get(self.api.endpoints().dashboard_metrics.clone());
                let envelope: MetricsEnvelope = self.api.send_json(request).await?;
                Ok(envelope.metrics)
            })
            .await
    }

    /// Daily opened/resolved counts for the trailing window ending now.
    pub async fn reports_timeline(&self, range: DateRange) -> Result<Vec<TimelinePoint>> {
        let (start, end) = range.bounds(Utc::now());
        let key = QueryKey::new([
            "admin".to_string(),
            "dashboard".to_string(),
            "chart-bar-data".to_string(),
            range.days().to_string(),
        ]);
        self.queries
            .fetch(key, || async {
                let request = ApiRequest::get(self.api.endpoints().dashboard_timeline.clone())
                    .query("startDate", format_utc_millis(start))
                    .query("endDate", format_utc_millis(end));
                let envelope: TimelineEnvelope = self.api.send_json(request).await?;
                Ok(envelope.timeline)
            })
            .await
    }

    pub async fn heatmap(&self) -> Result<Vec<HeatmapPoint>> {
        self.queries
            .fetch(QueryKey::new(["heatmapData"]), || async {
                let request = ApiRequest::get(self.api.endpoints().dashboard_heatmap.clone());
                let envelope: HeatmapEnvelope = self.api.send_json(request).await?;
                Ok(envelope.points)
            })
            .await
    }
}
