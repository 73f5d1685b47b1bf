// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report queries and mutations.

use crate::client::{ApiClient, ApiRequest, MultipartPayload};
use crate::config::fill;
use crate::error::{ClientError, Result};
use crate::models::{
    NewReport, Page, Report, ReportPayload, ReportStatus, ReportSummary, SubmitReceipt,
    TrackedReport,
};
use crate::query::{QueryClient, QueryKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Multipart field carrying each uploaded file.
pub const ATTACHMENT_FIELD: &str = "attachments";

#[derive(Deserialize)]
struct ReportEnvelope {
    report: ReportPayload,
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignRequest<'a> {
    user_id: &'a str,
}

/// Server-side filters for the report listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub page_size: Option<u32>,
}

impl ReportFilter {
    fn key(&self, page: u32) -> QueryKey {
        QueryKey::new([
            "reports".to_string(),
            self.status.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            self.created_from.map(|d| d.to_string()).unwrap_or_default(),
            self.created_to.map(|d| d.to_string()).unwrap_or_default(),
            self.page_size.map(|n| n.to_string()).unwrap_or_default(),
            page.to_string(),
        ])
    }

    fn apply(&self, mut request: ApiRequest, page: u32) -> ApiRequest {
        request = request.query("page", page);
        if let Some(size) = self.page_size {
            request = request.query("page_size", size);
        }
        if let Some(status) = &self.status {
            request = request.query("status", status);
        }
        if let Some(from) = self.created_from {
            request = request.query("created_from", from);
        }
        if let Some(to) = self.created_to {
            request = request.query("created_to", to);
        }
        request
    }
}

/// Build the multipart body of a submission: five scalar fields plus one
/// `attachments` part per file.
pub fn report_form(report: &NewReport) -> MultipartPayload {
    let form = MultipartPayload::default()
        .text("title", report.title.clone())
        .text("description", report.description.clone())
        .text("latitude", report.coordinates.lat.to_string())
        .text("longitude", report.coordinates.lng.to_string())
        .text("address", report.address.clone());

    report
        .attachments
        .iter()
        .cloned()
        .fold(form, |form, upload| form.file(ATTACHMENT_FIELD, upload))
}

#[derive(Clone)]
pub struct ReportService {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl ReportService {
    pub fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// Public lookup by tracking code.
    ///
    /// An empty code performs no request. A 404 resolves to `None`, keeping
    /// "no such report" apart from "request failed".
    pub async fn track(&self, code: &str) -> Result<Option<TrackedReport>> {
        let code = code.trim();
        if code.is_empty() {
            tracing::debug!("Empty tracking code, lookup skipped");
            return Ok(None);
        }

        let path = fill(&self.api.endpoints().track_report, "code", code);
        let key = QueryKey::new(["report-by-code", code]);
        self.queries
            .fetch(key, || async {
                let request = ApiRequest::get(path.clone()).anonymous();
                match self.api.send_json::<ReportEnvelope>(request).await {
                    Ok(envelope) => Ok(Some(TrackedReport::from(envelope.report))),
                    Err(ClientError::NotFound(_)) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
    }

    /// One page of the admin listing (1-based).
    pub async fn list(&self, filter: &ReportFilter, page: u32) -> Result<Page<ReportSummary>> {
        let page = page.max(1);
        self.queries
            .fetch(filter.key(page), || async {
                let request = ApiRequest::get(self.api.endpoints().reports.clone());
                self.api.send_json(filter.apply(request, page)).await
            })
            .await
    }

    /// Infinite-scroll cursor over the listing.
    pub fn pages(&self, filter: ReportFilter) -> ReportPages {
        ReportPages {
            service: self.clone(),
            filter,
            next: Some(1),
        }
    }

    /// Admin detail by id. A 404 is an ordinary `NotFound` error here.
    pub async fn get(&self, id: &str) -> Result<Report> {
        let path = fill(&self.api.endpoints().report, "id", id);
        self.queries
            .fetch(QueryKey::new(["report", id]), || async {
                let envelope: ReportEnvelope =
                    self.api.send_json(ApiRequest::get(path.clone())).await?;
                Ok(Report::from(envelope.report))
            })
            .await
    }

    /// File an anonymous report; returns its tracking code.
    pub async fn submit(&self, report: &NewReport) -> Result<SubmitReceipt> {
        report.validate()?;

        let request = ApiRequest::post(self.api.endpoints().reports.clone())
            .multipart(report_form(report))
            .anonymous();
        let receipt: SubmitReceipt = self.api.send_json(request).await?;

        tracing::info!(
            code = %receipt.code,
            attachments = report.attachments.len(),
            "Report submitted"
        );
        Ok(receipt)
    }

    /// Request a status transition; the server decides whether it is allowed.
    pub async fn update_status(
        &self,
        id: &str,
        status: &ReportStatus,
        note: Option<&str>,
    ) -> Result<()> {
        let path = fill(&self.api.endpoints().report_status, "id", id);
        let request = ApiRequest::patch(path).json(&StatusUpdate { status, note })?;
        self.api.send(request).await?;

        tracing::info!(report_id = id, status = %status, "Report status updated");
        self.invalidate_report(id);
        Ok(())
    }

    /// Assign a report to a staff user.
    pub async fn assign(&self, id: &str, user_id: &str) -> Result<()> {
        let path = fill(&self.api.endpoints().assign_report, "id", id);
        let request = ApiRequest::patch(path).json(&AssignRequest { user_id })?;
        self.api.send(request).await?;

        tracing::info!(report_id = id, user_id, "Report assigned");
        self.invalidate_report(id);
        Ok(())
    }

    fn invalidate_report(&self, id: &str) {
        self.queries.invalidate(&QueryKey::new(["report", id]));
        self.queries.invalidate(&QueryKey::new(["reports"]));
    }
}

/// Cursor following `next` links until the listing is exhausted.
pub struct ReportPages {
    service: ReportService,
    filter: ReportFilter,
    next: Option<u32>,
}

impl ReportPages {
    /// Fetch the following page, or `None` once there are no more.
    pub async fn next_page(&mut self) -> Result<Option<Page<ReportSummary>>> {
        let Some(page_number) = self.next else {
            return Ok(None);
        };
        let page = self.service.list(&self.filter, page_number).await?;
        self.next = page.next_page_number().filter(|n| *n > page_number);
        Ok(Some(page))
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Drain every remaining page.
    pub async fn collect_all(mut self) -> Result<Vec<ReportSummary>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page.results);
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttachmentUpload, Coordinates};

    #[test]
    fn test_report_form_has_one_part_per_attachment() {
        let report = NewReport {
            title: "vandalism".to_string(),
            description: "Pichação no muro da escola".to_string(),
            coordinates: Coordinates {
                lat: -3.1019,
                lng: -60.025,
            },
            address: "Av. Eduardo Ribeiro".to_string(),
            attachments: (0..3)
                .map(|i| AttachmentUpload::new(format!("{}.jpg", i), "image/jpeg", vec![i]))
                .collect(),
        };

        let form = report_form(&report);
        let names: Vec<_> = form.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["title", "description", "latitude", "longitude", "address"]
        );
        assert_eq!(form.files.len(), 3);
        assert!(form.files.iter().all(|(n, _)| n == ATTACHMENT_FIELD));
        assert_eq!(form.fields[2].1, "-3.1019");
    }

    #[test]
    fn test_filter_keys_differ_by_page_and_status() {
        let all = ReportFilter::default();
        let pending = ReportFilter {
            status: Some(ReportStatus::Pending),
            ..Default::default()
        };
        assert_ne!(all.key(1), all.key(2));
        assert_ne!(all.key(1), pending.key(1));
        assert!(pending.key(1).starts_with(&QueryKey::new(["reports"])));
    }
}
