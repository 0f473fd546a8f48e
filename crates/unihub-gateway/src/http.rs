//! HTTP implementation of the [`Gateway`] trait.
//!
//! Plain JSON request/response against the remote gateway's REST surface.
//! Failures come back as structured [`Error`]s; this layer never swallows
//! them (that degradation belongs to the store boundary).

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use unihub_core::{
    AcademicRecord, DashboardSummary, Error, Gateway, Note, NoteDraft, NoteUpdate, Notification,
    OnboardingProfile, Result, StudyStatistics, Timetable, UserProfile, UserSettings,
};

use crate::config::GatewayConfig;

/// HTTP gateway client.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
    slow_request_ms: u64,
}

impl HttpGateway {
    /// Create a new gateway client with default settings.
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a new gateway client from a configuration.
    pub fn with_config(config: GatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing gateway client: url={}, timeout={}s",
            config.base_url, config.timeout_secs
        );

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            slow_request_ms: config.slow_request_ms,
        }
    }

    /// Create from `UNIHUB_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_config(GatewayConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and decode the JSON response body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<T> {
        let response = self.send(method, path, body).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse response: {}", e)))
    }

    /// Issue a request, discarding any response body.
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<()> {
        self.send(method, path, body).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(method.clone(), self.url(path))
            .timeout(self.timeout);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            duration_ms = elapsed,
            status = response.status().as_u16(),
            path,
            "Gateway request complete"
        );
        if elapsed > self.slow_request_ms {
            warn!(
                duration_ms = elapsed,
                path,
                slow = true,
                "Slow gateway request"
            );
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!("{} {}", method, path)));
            }
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new()
    }
}

// Body-less requests still need a concrete Serialize type for the helpers.
const NO_BODY: Option<&()> = None;

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_profile", user_id = %user_id))]
    async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile> {
        self.request(Method::GET, &format!("/users/{}/profile", user_id), NO_BODY)
            .await
    }

    #[instrument(skip(self, profile), fields(subsystem = "gateway", component = "http", op = "update_profile", user_id = %user_id))]
    async fn update_profile(&self, user_id: Uuid, profile: &UserProfile) -> Result<UserProfile> {
        self.request(
            Method::PUT,
            &format!("/users/{}/profile", user_id),
            Some(profile),
        )
        .await
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_notes", user_id = %user_id))]
    async fn get_notes(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let notes: Vec<Note> = self
            .request(Method::GET, &format!("/users/{}/notes", user_id), NO_BODY)
            .await?;
        debug!(result_count = notes.len(), "Fetched note list");
        Ok(notes)
    }

    #[instrument(skip(self, draft), fields(subsystem = "gateway", component = "http", op = "add_note", user_id = %user_id))]
    async fn add_note(&self, user_id: Uuid, draft: &NoteDraft) -> Result<Note> {
        self.request(
            Method::POST,
            &format!("/users/{}/notes", user_id),
            Some(draft),
        )
        .await
    }

    #[instrument(skip(self, patch), fields(subsystem = "gateway", component = "http", op = "update_note", user_id = %user_id, note_id = %id))]
    async fn update_note(&self, user_id: Uuid, id: Uuid, patch: &NoteUpdate) -> Result<Note> {
        self.request(
            Method::PATCH,
            &format!("/users/{}/notes/{}", user_id, id),
            Some(patch),
        )
        .await
        .map_err(|e| match e {
            Error::NotFound(_) => Error::NoteNotFound(id),
            other => other,
        })
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "delete_note", user_id = %user_id, note_id = %id))]
    async fn delete_note(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        self.request_empty(
            Method::DELETE,
            &format!("/users/{}/notes/{}", user_id, id),
            NO_BODY,
        )
        .await
        .map_err(|e| match e {
            Error::NotFound(_) => Error::NoteNotFound(id),
            other => other,
        })
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_settings", user_id = %user_id))]
    async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings> {
        self.request(Method::GET, &format!("/users/{}/settings", user_id), NO_BODY)
            .await
    }

    #[instrument(skip(self, settings), fields(subsystem = "gateway", component = "http", op = "update_settings", user_id = %user_id))]
    async fn update_settings(
        &self,
        user_id: Uuid,
        settings: &UserSettings,
    ) -> Result<UserSettings> {
        self.request(
            Method::PUT,
            &format!("/users/{}/settings", user_id),
            Some(settings),
        )
        .await
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_statistics", user_id = %user_id))]
    async fn get_statistics(&self, user_id: Uuid) -> Result<StudyStatistics> {
        self.request(
            Method::GET,
            &format!("/users/{}/statistics", user_id),
            NO_BODY,
        )
        .await
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_notifications", user_id = %user_id))]
    async fn get_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        self.request(
            Method::GET,
            &format!("/users/{}/notifications", user_id),
            NO_BODY,
        )
        .await
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_current_timetable", user_id = %user_id))]
    async fn get_current_timetable(&self, user_id: Uuid) -> Result<Timetable> {
        self.request(
            Method::GET,
            &format!("/users/{}/timetable/current", user_id),
            NO_BODY,
        )
        .await
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_records", user_id = %user_id))]
    async fn get_records(&self, user_id: Uuid) -> Result<Vec<AcademicRecord>> {
        self.request(Method::GET, &format!("/users/{}/records", user_id), NO_BODY)
            .await
    }

    #[instrument(skip(self), fields(subsystem = "gateway", component = "http", op = "get_dashboard_summary", user_id = %user_id))]
    async fn get_dashboard_summary(&self, user_id: Uuid) -> Result<DashboardSummary> {
        self.request(
            Method::GET,
            &format!("/users/{}/dashboard", user_id),
            NO_BODY,
        )
        .await
    }

    #[instrument(skip(self, profile), fields(subsystem = "gateway", component = "http", op = "complete_onboarding", user_id = %user_id))]
    async fn complete_onboarding(
        &self,
        user_id: Uuid,
        profile: &OnboardingProfile,
    ) -> Result<UserProfile> {
        self.request(
            Method::POST,
            &format!("/users/{}/onboarding/complete", user_id),
            Some(profile),
        )
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        match self.send(Method::GET, "/health", NO_BODY).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_transport() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
