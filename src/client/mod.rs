//! MindMentor API client
//!
//! Typed reqwest client for the REST API, used by the CLI and by anything
//! that drives the pages' logic outside a browser.
//!
//! - **error**: `ClientError`, parsed from the server's error body
//! - **notify**: toast messages and failure classification
//! - **lists**: list validation, ordering, pagination state
//! - **events**: in-process event bus
//! - **dashboard**: dashboard loading and event-driven refresh

pub mod dashboard;
pub mod error;
pub mod events;
pub mod lists;
pub mod notify;

pub use dashboard::{
    load_dashboard, reload_plans, spawn_plan_refresh, spawn_refresh, spawn_refresh_after,
    PlansSource, StatsSource, PLAN_REFRESH_DELAY, REFRESH_DELAY,
};
pub use error::ClientError;
pub use events::{EventBus, StudyEvent};
pub use lists::{remove_by_id, sort_plans, validate_resources, Identified, ListState};
pub use notify::{Toast, ToastAction, ToastVariant};

use reqwest::{multipart, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

use crate::api::dto::{
    CreateNoteRequest, CreatePlanRequest, CreateResourcesRequest, DeleteResponse, PlansResponse,
    ProfileRequest, SessionRequest, SuccessResponse, UpdateNoteRequest,
};
use crate::api::extract::USER_ID_HEADER;
use crate::config::Config;
use crate::pdf::{self, MAX_PDF_BYTES, PDF_CONTENT_TYPE};
use crate::stats::StatsResponse;
use crate::storage::{CuratedResource, Note, PdfDocument, StudyPlan, StudySession, User};

pub type ClientResult<T> = Result<T, ClientError>;

/// MindMentor REST API client
///
/// With an `EventBus` attached, successful session, plan and resource
/// creation is announced on it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    user_id: Option<String>,
    events: Option<EventBus>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: None,
            events: None,
        })
    }

    /// Client for `[client].api_url`, acting as `[client].user_id`
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let client = Self::new(
            config.client.api_url.clone(),
            Duration::from_secs(config.api.request_timeout_secs),
        )?;
        Ok(match &config.client.user_id {
            Some(id) => client.with_user(id.clone()),
            None => client,
        })
    }

    /// Send `X-User-Id` on every request
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Publish completed sessions and generated plans on `bus`
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn events(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn publish(&self, event: StudyEvent) {
        if let Some(bus) = &self.events {
            let delivered = bus.publish(event);
            tracing::debug!(delivered, "Published study event");
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.user_id {
            Some(id) => builder.header(USER_ID_HEADER, id),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await.map_err(ClientError::transport)?;
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(ClientError::Request)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(status.as_u16(), &body))
        }
    }

    async fn send_no_content(&self, builder: RequestBuilder) -> ClientResult<()> {
        let response = builder.send().await.map_err(ClientError::transport)?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(status.as_u16(), &body))
        }
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    // ============================================
    // DASHBOARD & TIMER
    // ============================================

    pub async fn get_stats(&self) -> ClientResult<StatsResponse> {
        self.send(self.request(Method::GET, "/api/users/stats")).await
    }

    pub async fn record_session(&self, session: &StudySession) -> ClientResult<StudySession> {
        let body = SessionRequest {
            duration: session.duration,
            start_time: session.start_time,
            end_time: session.end_time,
            mode: session.mode.clone(),
        };
        let stored: StudySession = self.send_json(Method::POST, "/api/sessions", &body).await?;
        self.publish(StudyEvent::SessionCompleted(stored.clone()));
        Ok(stored)
    }

    // ============================================
    // NOTES
    // ============================================

    pub async fn list_notes(&self) -> ClientResult<Vec<Note>> {
        self.send(self.request(Method::GET, "/api/notes")).await
    }

    pub async fn create_note(&self, request: &CreateNoteRequest) -> ClientResult<Note> {
        self.send_json(Method::POST, "/api/notes", request).await
    }

    pub async fn update_note(&self, id: &str, request: &UpdateNoteRequest) -> ClientResult<Note> {
        let path = format!("/api/notes/{}", urlencoding::encode(id));
        self.send_json(Method::PUT, &path, request).await
    }

    pub async fn delete_note(&self, id: &str) -> ClientResult<()> {
        let path = format!("/api/notes/{}", urlencoding::encode(id));
        self.send_no_content(self.request(Method::DELETE, &path)).await
    }

    // ============================================
    // PDF
    // ============================================

    pub async fn list_pdfs(&self) -> ClientResult<Vec<PdfDocument>> {
        self.send(self.request(Method::GET, "/api/pdf")).await
    }

    /// Upload PDF bytes; non-PDF or over-10 MB files are refused locally
    pub async fn upload_pdf(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<PdfDocument> {
        pdf::validate_upload(Some(content_type), bytes.len(), MAX_PDF_BYTES)?;

        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("pdf", part);

        self.send(self.request(Method::POST, "/api/pdf/upload").multipart(form))
            .await
    }

    /// Read a file from disk and upload it; the content type follows the extension
    pub async fn upload_pdf_file(&self, path: &Path) -> ClientResult<PdfDocument> {
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        let content_type = if is_pdf {
            PDF_CONTENT_TYPE
        } else {
            "application/octet-stream"
        };

        // Refuse by size before reading the whole file
        let len = tokio::fs::metadata(path).await?.len() as usize;
        pdf::validate_upload(Some(content_type), len, MAX_PDF_BYTES)?;

        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        self.upload_pdf(&filename, content_type, bytes).await
    }

    pub async fn delete_pdf(&self, id: &str) -> ClientResult<()> {
        let response: SuccessResponse = self
            .send(self.request(Method::DELETE, "/api/pdf").query(&[("id", id)]))
            .await?;
        if response.success {
            Ok(())
        } else {
            Err(ClientError::Rejected("Failed to delete document".to_string()))
        }
    }

    // ============================================
    // CURATED RESOURCES
    // ============================================

    /// Fetch and keep only well-formed resource sets
    pub async fn get_curated_resources(&self) -> ClientResult<Vec<CuratedResource>> {
        let body: Value = self.send(self.request(Method::GET, "/api/resources")).await?;

        Ok(validate_resources(&body)
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(resource) => Some(resource),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable resource entry");
                    None
                }
            })
            .collect())
    }

    pub async fn create_curated_resources(&self, subject: &str) -> ClientResult<CuratedResource> {
        let body = CreateResourcesRequest {
            subject: subject.to_string(),
        };
        let created: CuratedResource = self.send_json(Method::POST, "/api/resources", &body).await?;
        self.publish(StudyEvent::ResourcesCreated {
            topic: created.topic.clone(),
        });
        Ok(created)
    }

    pub async fn delete_curated_resource(&self, id: &str) -> ClientResult<DeleteResponse> {
        let path = format!("/api/resources/{}", urlencoding::encode(id));
        let response: DeleteResponse = self.send(self.request(Method::DELETE, &path)).await?;
        confirm(response, "Failed to delete resource")
    }

    // ============================================
    // STUDY PLANS
    // ============================================

    /// Active plans, newest `_id` first
    pub async fn get_study_plans(&self) -> ClientResult<Vec<StudyPlan>> {
        let mut response: PlansResponse =
            self.send(self.request(Method::GET, "/api/study-plans")).await?;
        sort_plans(&mut response.plans);
        Ok(response.plans)
    }

    pub async fn create_study_plan(&self, request: &CreatePlanRequest) -> ClientResult<StudyPlan> {
        let plan: StudyPlan = self.send_json(Method::POST, "/api/study-plans", request).await?;
        self.publish(StudyEvent::PlanGenerated {
            id: plan.id.clone(),
        });
        Ok(plan)
    }

    pub async fn delete_study_plan(&self, id: &str) -> ClientResult<DeleteResponse> {
        let path = format!("/api/study-plans/{}", urlencoding::encode(id));
        let response: DeleteResponse = self.send(self.request(Method::DELETE, &path)).await?;
        confirm(response, "Failed to deactivate plan")
    }

    // ============================================
    // PROFILE & DESIGN
    // ============================================

    pub async fn get_profile(&self) -> ClientResult<User> {
        self.send(self.request(Method::GET, "/api/user/profile")).await
    }

    pub async fn update_profile(&self, name: &str, email: &str) -> ClientResult<User> {
        let body = ProfileRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        self.send_json(Method::PUT, "/api/user/profile", &body).await
    }

    pub async fn design_tokens(&self) -> ClientResult<Value> {
        self.send(self.request(Method::GET, "/api/design-system")).await
    }
}

/// A `{success: false}` reply becomes an error carrying its message
fn confirm(response: DeleteResponse, fallback: &str) -> ClientResult<DeleteResponse> {
    if response.success {
        Ok(response)
    } else {
        Err(ClientError::Rejected(
            response.message.unwrap_or_else(|| fallback.to_string()),
        ))
    }
}
