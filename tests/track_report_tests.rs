// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public lookup by tracking code.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use civic_reports::config::Config;
use civic_reports::error::ClientError;
use civic_reports::models::{Coordinates, ReportStatus};
use serde_json::json;
use std::time::Duration;

mod common;
use common::Hits;

fn backend(hits: Hits) -> Router {
    Router::new().route(
        "/reports/{code}/track",
        get(move |Path(code): Path<String>, headers: HeaderMap| {
            let hits = hits.clone();
            async move {
                hits.hit();
                assert!(
                    headers.get("authorization").is_none(),
                    "Tracking lookups are anonymous"
                );
                match code.as_str() {
                    "MISSING" => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))),
                    "BROKEN" => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"detail": "boom"})),
                    ),
                    "ENTITY" => {
                        let mut report = common::report_json(&code);
                        report["assignedTo"] = json!({"name": "Carla", "entity": "Defesa Civil"});
                        (StatusCode::OK, Json(json!({ "report": report })))
                    }
                    _ => (
                        StatusCode::OK,
                        Json(json!({ "report": common::report_json(&code) })),
                    ),
                }
            }
        }),
    )
}

#[tokio::test]
async fn test_track_maps_payload() {
    let hits = Hits::default();
    let url = common::serve(backend(hits.clone())).await;
    let client = common::client(&url);

    let report = client
        .state
        .reports
        .track("AB12CD")
        .await
        .unwrap()
        .expect("Report should be found");

    assert_eq!(report.code, "AB12CD");
    assert_eq!(report.status, ReportStatus::InProgress);
    assert_eq!(
        report.coordinates,
        Coordinates {
            lat: -3.1019,
            lng: -60.025
        }
    );
    assert_eq!(report.assigned_to.as_deref(), Some("Polícia Civil"));
    assert_eq!(report.attachments.len(), 1);
    assert_eq!(report.timeline.len(), 2);
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn test_track_assignee_falls_back_to_entity() {
    let url = common::serve(backend(Hits::default())).await;
    let client = common::client(&url);

    let report = client.state.reports.track("ENTITY").await.unwrap().unwrap();
    assert_eq!(report.assigned_to.as_deref(), Some("Defesa Civil"));
}

#[tokio::test]
async fn test_track_not_found_is_none() {
    let url = common::serve(backend(Hits::default())).await;
    let client = common::client(&url);

    let result = client.state.reports.track("MISSING").await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_track_server_error_fails_without_data() {
    let url = common::serve(backend(Hits::default())).await;
    let client = common::client(&url);

    let err = client.state.reports.track("BROKEN").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(client.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_empty_code_sends_nothing() {
    let hits = Hits::default();
    let url = common::serve(backend(hits.clone())).await;
    let client = common::client(&url);

    assert!(client.state.reports.track("").await.unwrap().is_none());
    assert!(client.state.reports.track("   ").await.unwrap().is_none());
    assert_eq!(hits.count(), 0);
}

#[tokio::test]
async fn test_concurrent_lookups_share_one_request() {
    let hits = Hits::default();
    let url = common::serve(backend(hits.clone())).await;
    let client = common::client(&url);
    let reports = &client.state.reports;

    let (a, b, c) = tokio::join!(
        reports.track("AB12CD"),
        reports.track("AB12CD"),
        reports.track(" AB12CD ")
    );
    assert_eq!(a.unwrap(), b.unwrap());
    assert!(c.unwrap().is_some());
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn test_fresh_result_served_from_cache() {
    let hits = Hits::default();
    let url = common::serve(backend(hits.clone())).await;
    let client = common::client_with(Config {
        api_base_url: url,
        query_stale_time: Duration::from_secs(60),
        ..Config::default()
    });

    client.state.reports.track("AB12CD").await.unwrap();
    client.state.reports.track("AB12CD").await.unwrap();
    assert_eq!(hits.count(), 1);

    // Without a stale time every call refetches
    let url = common::serve(backend(hits.clone())).await;
    let client = common::client(&url);
    client.state.reports.track("AB12CD").await.unwrap();
    client.state.reports.track("AB12CD").await.unwrap();
    assert_eq!(hits.count(), 3);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let hits = Hits::default();
    let url = common::serve(backend(hits.clone())).await;
    let client = common::client_with(Config {
        api_base_url: url,
        query_stale_time: Duration::from_secs(60),
        ..Config::default()
    });

    assert!(client.state.reports.track("BROKEN").await.is_err());
    assert!(client.state.reports.track("BROKEN").await.is_err());
    assert_eq!(hits.count(), 2);
}
