//! MindMentor REST API
//!
//! HTTP API layer for MindMentor, built with Axum. Every data route acts on
//! the user named by the `X-User-Id` header (or the configured default).
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/users/stats` - Per-day sessions, hours and streaks
//! - `POST /api/sessions` - Record a completed timer session
//!
//! ## Notes
//! - `GET /api/notes` - List notes
//! - `POST /api/notes` - Create a note
//! - `PUT /api/notes/:id` - Update a note
//! - `DELETE /api/notes/:id` - Delete a note
//!
//! ## PDF
//! - `GET /api/pdf` - List documents
//! - `POST /api/pdf/upload` - Upload a PDF (multipart field `pdf`)
//! - `DELETE /api/pdf?id=` - Delete a document
//!
//! ## Curated Resources
//! - `GET /api/resources` - List curated sets
//! - `POST /api/resources` - Curate a set for a subject
//! - `DELETE /api/resources/:id` - Delete a set
//!
//! ## Study Plans
//! - `GET /api/study-plans` - List active plans
//! - `POST /api/study-plans` - Generate a plan
//! - `DELETE /api/study-plans/:id` - Deactivate a plan
//!
//! ## Profile & Design
//! - `GET /api/user/profile`, `PUT /api/user/profile`
//! - `GET /api/design-system` - Design tokens
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Real-time study events
//!
//! # Example
//!
//! ```rust,ignore
//! use mindmentor::api::{serve, AppState};
//! use mindmentor::config::Config;
//! use mindmentor::storage::Store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let store = Arc::new(Store::open(&config.data_dir())?);
//!     serve(AppState::new(store, config)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::{CurrentUser, USER_ID_HEADER};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Headroom over the upload limit so oversized files reach the handler's 413
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.api.max_upload_bytes + MULTIPART_OVERHEAD;
    let cors = cors_layer(&state.config.api.cors_origins);

    let api_routes = Router::new()
        // Dashboard
        .route("/users/stats", get(routes::stats::get_stats))
        .route("/sessions", post(routes::stats::record_session))
        // Notes
        .route(
            "/notes",
            get(routes::notes::list_notes).post(routes::notes::create_note),
        )
        .route(
            "/notes/:id",
            put(routes::notes::update_note).delete(routes::notes::delete_note),
        )
        // PDF documents
        .route(
            "/pdf",
            get(routes::pdf::list_documents).delete(routes::pdf::delete_document),
        )
        .route(
            "/pdf/upload",
            post(routes::pdf::upload_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Curated resources
        .route(
            "/resources",
            get(routes::resources::list_resources).post(routes::resources::create_resources),
        )
        .route("/resources/:id", delete(routes::resources::delete_resource))
        // Study plans
        .route(
            "/study-plans",
            get(routes::plans::list_plans).post(routes::plans::create_plan),
        )
        .route("/study-plans/:id", delete(routes::plans::delete_plan))
        // Profile
        .route(
            "/user/profile",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        // Design tokens
        .route("/design-system", get(routes::design::get_design_tokens));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins (or `*`) are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.api.bind_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("MindMentor API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("MindMentor API shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::Store;
    use crate::websocket::ServerMessage;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "mindmentor-test-boundary";

    fn create_test_app_with(config: Config) -> (Router, AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path()).unwrap());
        let state = AppState::new(store, config);
        let router = build_router(state.clone());

        (router, state, dir)
    }

    fn create_test_app() -> (Router, AppState, tempfile::TempDir) {
        create_test_app_with(Config::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn upload_request(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"pdf\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/pdf/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn session_body(minutes_ago: i64) -> Value {
        let end = chrono::Utc::now() - chrono::Duration::minutes(minutes_ago);
        let start = end - chrono::Duration::minutes(25);
        json!({
            "duration": 1500,
            "startTime": start.to_rfc3339(),
            "endTime": end.to_rfc3339(),
            "mode": "pomodoro"
        })
    }

    // ============================================
    // HEALTH
    // ============================================

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _state, _dir) = create_test_app();

        let (status, _) = send(&app, get("/health/live")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, get("/health/ready")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"], "ok");
    }

    // ============================================
    // STATS & SESSIONS
    // ============================================

    #[tokio::test]
    async fn test_stats_empty() {
        let (app, _state, _dir) = create_test_app();

        let (status, body) = send(&app, get("/api/users/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["studySessions"], json!({}));
        assert_eq!(body["currentStreak"], 0);
        assert_eq!(body["bestStreak"], 0);
        assert!(body["lastStudyDate"].is_null());
    }

    #[tokio::test]
    async fn test_record_session_updates_stats() {
        let (app, _state, _dir) = create_test_app();

        let (status, body) = send(&app, json_request("POST", "/api/sessions", session_body(0))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["duration"], 1500);

        let (_, stats) = send(&app, get("/api/users/stats")).await;
        assert_eq!(stats["currentStreak"], 1);
        assert_eq!(stats["studySessions"].as_object().unwrap().len(), 1);
        assert!(stats["lastStudyDate"].is_string());
    }

    #[tokio::test]
    async fn test_record_session_publishes_event() {
        let (app, state, _dir) = create_test_app();
        let mut events = state.hub.subscribe_events();

        let (status, _) = send(&app, json_request("POST", "/api/sessions", session_body(0))).await;
        assert_eq!(status, StatusCode::CREATED);

        let event = events.recv().await.unwrap();
        assert_eq!(event.topic, "sessions.default");
        assert!(matches!(
            event.message,
            ServerMessage::StudySessionCompleted { duration: 1500, .. }
        ));
    }

    #[tokio::test]
    async fn test_record_session_rejects_zero_duration() {
        let (app, _state, _dir) = create_test_app();

        let mut body = session_body(0);
        body["duration"] = json!(0);
        let (status, body) = send(&app, json_request("POST", "/api/sessions", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_record_session_rejects_oversized_duration() {
        let (app, _state, _dir) = create_test_app();

        for duration in [json!(u64::MAX), json!(i64::MAX), json!(1501)] {
            let mut body = session_body(0);
            body["duration"] = duration;
            let (status, body) = send(&app, json_request("POST", "/api/sessions", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }

        let (status, stats) = send(&app, get("/api/users/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["studySessions"], json!({}));
        assert_eq!(stats["totalStudyHours"], 0.0);
    }

    #[tokio::test]
    async fn test_stats_hours_match_recorded_sessions() {
        let (app, _state, _dir) = create_test_app();

        for _ in 0..3 {
            let (status, _) =
                send(&app, json_request("POST", "/api/sessions", session_body(0))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, stats) = send(&app, get("/api/users/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalStudyHours"], 1.25);
    }

    // ============================================
    // USERS
    // ============================================

    #[tokio::test]
    async fn test_data_is_scoped_per_user() {
        let (app, _state, _dir) = create_test_app();

        let mut req = json_request("POST", "/api/notes", json!({"title": "Alice's note"}));
        req.headers_mut()
            .insert(USER_ID_HEADER, HeaderValue::from_static("alice"));
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);

        let mut req = get("/api/notes");
        req.headers_mut()
            .insert(USER_ID_HEADER, HeaderValue::from_static("bob"));
        let (_, body) = send(&app, req).await;
        assert_eq!(body, json!([]));

        let mut req = get("/api/notes");
        req.headers_mut()
            .insert(USER_ID_HEADER, HeaderValue::from_static("alice"));
        let (_, body) = send(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_user_header_rejected() {
        let (app, _state, _dir) = create_test_app();

        let mut req = get("/api/notes");
        req.headers_mut()
            .insert(USER_ID_HEADER, HeaderValue::from_static("not valid!"));
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ============================================
    // NOTES
    // ============================================

    #[tokio::test]
    async fn test_note_lifecycle() {
        let (app, _state, _dir) = create_test_app();

        let (status, note) = send(
            &app,
            json_request(
                "POST",
                "/api/notes",
                json!({"title": "Lecture 1", "content": [{"type": "text", "content": "Ownership"}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = note["_id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            json_request("PUT", &format!("/api/notes/{}", id), json!({"title": "Lecture 1 (rev)"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Lecture 1 (rev)");
        assert_eq!(updated["content"][0]["content"], "Ownership");

        let (status, _) = send(&app, delete_request(&format!("/api/notes/{}", id))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, delete_request(&format!("/api/notes/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_note_requires_title() {
        let (app, _state, _dir) = create_test_app();

        let (status, _) = send(&app, json_request("POST", "/api/notes", json!({"title": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ============================================
    // PDF
    // ============================================

    const SAMPLE_PDF: &[u8] =
        b"%PDF-1.4\n1 0 obj << /Type /Pages /Count 1 >> endobj\n2 0 obj << /Type /Page >> endobj\n%%EOF";

    #[tokio::test]
    async fn test_pdf_upload_list_delete() {
        let (app, state, _dir) = create_test_app();

        let (status, doc) = send(&app, upload_request("week1.pdf", "application/pdf", SAMPLE_PDF)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(doc["title"], "week1");
        assert_eq!(doc["pageCount"], 1);
        let id = doc["_id"].as_str().unwrap().to_string();
        assert!(state.store.pdf_path(&id).exists());

        let (_, list) = send(&app, get("/api/pdf")).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, delete_request(&format!("/api/pdf?id={}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(!state.store.pdf_path(&id).exists());
    }

    #[tokio::test]
    async fn test_pdf_upload_rejects_non_pdf() {
        let (app, _state, _dir) = create_test_app();

        let (status, body) = send(&app, upload_request("photo.png", "image/png", b"\x89PNG")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Validation error: Please upload a PDF file");

        // Right content type, wrong bytes
        let (status, _) = send(&app, upload_request("fake.pdf", "application/pdf", b"hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pdf_upload_too_large() {
        let mut config = Config::default();
        config.api.max_upload_bytes = 64;
        let (app, _state, _dir) = create_test_app_with(config);

        let mut big = b"%PDF-1.4\n".to_vec();
        big.resize(1024, b' ');
        let (status, body) = send(&app, upload_request("big.pdf", "application/pdf", &big)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    // ============================================
    // RESOURCES
    // ============================================

    #[tokio::test]
    async fn test_resources_create_and_conflict() {
        let (app, _state, _dir) = create_test_app();

        let (status, created) =
            send(&app, json_request("POST", "/api/resources", json!({"subject": "Linear Algebra"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["topic"], "Linear Algebra");
        assert!(!created["resources"].as_array().unwrap().is_empty());

        let (status, body) =
            send(&app, json_request("POST", "/api/resources", json!({"subject": "linear  algebra"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "RESOURCE_EXISTS");

        let (_, list) = send(&app, get("/api/resources")).await;
        assert_eq!(list["resources"].as_array().unwrap().len(), 1);

        let id = created["_id"].as_str().unwrap();
        let (status, body) = send(&app, delete_request(&format!("/api/resources/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resource_creates_conflict_once() {
        let mut config = Config::default();
        config.curation.rate_limit_requests = 2;
        let (app, _state, _dir) = create_test_app_with(config);

        let requests = (0..16).map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(&app, json_request("POST", "/api/resources", json!({"subject": "Rust"}))).await
            })
        });
        let results = futures_util::future::join_all(requests).await;

        let mut created = 0;
        for result in results {
            let (status, body) = result.unwrap();
            match status {
                StatusCode::CREATED => created += 1,
                StatusCode::CONFLICT => assert_eq!(body["error"]["code"], "RESOURCE_EXISTS"),
                other => panic!("unexpected status {}: {}", other, body),
            }
        }
        assert_eq!(created, 1);

        // Only the winning request was charged
        let (status, _) =
            send(&app, json_request("POST", "/api/resources", json!({"subject": "Go"}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_resources_rate_limited() {
        let mut config = Config::default();
        config.curation.rate_limit_requests = 1;
        let (app, _state, _dir) = create_test_app_with(config);

        let (status, _) = send(&app, json_request("POST", "/api/resources", json!({"subject": "Chemistry"}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/resources", json!({"subject": "Physics"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "RATE_LIMITED");
        assert!(body["retryAfter"].as_u64().unwrap() > 0);
    }

    // ============================================
    // STUDY PLANS
    // ============================================

    #[tokio::test]
    async fn test_plan_lifecycle() {
        let (app, _state, _dir) = create_test_app();

        let (status, plan) = send(
            &app,
            json_request(
                "POST",
                "/api/study-plans",
                json!({"subject": "Organic Chemistry", "hoursPerWeek": 6, "weeks": 4}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(plan["weeks"].as_array().unwrap().len(), 4);
        assert_eq!(plan["active"], true);
        let id = plan["_id"].as_str().unwrap().to_string();

        let (_, list) = send(&app, get("/api/study-plans")).await;
        assert_eq!(list["plans"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, delete_request(&format!("/api/study-plans/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Study plan deactivated successfully.");

        let (_, list) = send(&app, get("/api/study-plans")).await;
        assert_eq!(list["plans"], json!([]));

        let (status, _) = send(&app, delete_request(&format!("/api/study-plans/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_plan_rejects_bad_week_count() {
        let (app, _state, _dir) = create_test_app();

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/study-plans",
                json!({"subject": "History", "hoursPerWeek": 5, "weeks": 0}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ============================================
    // PROFILE & DESIGN
    // ============================================

    #[tokio::test]
    async fn test_profile_update_keeps_email() {
        let (app, _state, _dir) = create_test_app();

        let (status, profile) = send(
            &app,
            json_request("PUT", "/api/user/profile", json!({"name": "Ada", "email": "ada@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["name"], "Ada");

        let (status, profile) = send(
            &app,
            json_request("PUT", "/api/user/profile", json!({"name": "Ada L.", "email": "ada@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["name"], "Ada L.");

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/user/profile", json!({"name": "Ada", "email": "other@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, profile) = send(&app, get("/api/user/profile")).await;
        assert_eq!(profile["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_design_system() {
        let (app, _state, _dir) = create_test_app();

        let (status, tokens) = send(&app, get("/api/design-system")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(tokens["colors"]["primary"].is_object());
        assert_eq!(tokens["breakpoints"]["sm"], "640px");
    }
}
