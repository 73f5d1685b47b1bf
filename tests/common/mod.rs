// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::Router;
use civic_reports::config::Config;
use civic_reports::middleware::Navigator;
use civic_reports::models::{Id, SessionUser, TokenPair};
use civic_reports::session::{MemoryStore, SessionHolder};
use civic_reports::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Serve `router` on an ephemeral local port; returns its base URL.
#[allow(dead_code)]
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock backend failed");
    });
    format!("http://{}", addr)
}

/// Base URL nothing listens on.
#[allow(dead_code)]
pub async fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Request counter shared with mock handlers.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

#[allow(dead_code)]
impl Hits {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Navigator that remembers where it was sent.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub struct TestClient {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

#[allow(dead_code)]
impl TestClient {
    pub fn session(&self) -> &SessionHolder {
        &self.state.session
    }
}

/// Client against `base_url` with default settings and an empty session.
#[allow(dead_code)]
pub fn client(base_url: &str) -> TestClient {
    client_with(Config {
        api_base_url: base_url.to_string(),
        ..Config::default()
    })
}

#[allow(dead_code)]
pub fn client_with(config: Config) -> TestClient {
    let store = Arc::new(MemoryStore::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let state = AppState::new(config, store.clone(), navigator.clone())
        .expect("Failed to build client");
    TestClient {
        state,
        store,
        navigator,
    }
}

/// Store a signed-in staff session holding `access`.
#[allow(dead_code)]
pub fn sign_in(session: &SessionHolder, access: &str) {
    session
        .set_user(Some(&SessionUser {
            id: Id::new("1"),
            email: Some("ana@ssp.am.gov.br".to_string()),
            name: Some("Ana".to_string()),
            roles: vec!["admin".to_string()],
        }))
        .unwrap();
    session
        .set_tokens(Some(&TokenPair {
            access: access.to_string(),
            refresh: "refresh-token".to_string(),
        }))
        .unwrap();
}

/// HS256 token expiring `expires_in` seconds from now.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: u64, expires_in: i64) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        user_id: u64,
        exp: i64,
        iat: i64,
    }

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        user_id,
        exp: now + expires_in,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"test-signing-key"),
    )
    .expect("Failed to create JWT")
}

/// A report payload as the API returns it.
#[allow(dead_code)]
pub fn report_json(code: &str) -> Value {
    json!({
        "id": 42,
        "code": code,
        "status": "in_progress",
        "title": "robbery",
        "description": "Celular levado na parada de ônibus",
        "latitude": -3.1019,
        "longitude": -60.025,
        "address": "Av. Eduardo Ribeiro, Centro",
        "assignedTo": {"id": 7, "name": "Bruno", "organization": "Polícia Civil"},
        "attachments": [
            {"url": "https://files.example.org/1.jpg", "name": "1.jpg", "type": "image/jpeg", "size": 2048}
        ],
        "timeline": [
            {"action": "created", "metadata": {}, "createdAt": "2025-11-09T10:00:00Z"},
            {"action": "updated_status",
             "metadata": {"previousStatus": "pending", "newStatus": "in_progress"},
             "createdBy": {"name": "Bruno"},
             "createdAt": "2025-11-10T08:30:00Z"}
        ],
        "createdAt": "2025-11-09T10:00:00Z",
        "updatedAt": "2025-11-10T08:30:00Z"
    })
}
