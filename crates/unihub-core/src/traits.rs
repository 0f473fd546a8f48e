//! Core traits for unihub abstractions.
//!
//! These traits define the seams between the data context and its
//! collaborators (the remote gateway and the local fallback store),
//! enabling pluggable backends and testability.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// GATEWAY
// =============================================================================

/// The remote HTTP API providing persistent storage for user data.
///
/// One method per endpoint. Implementations surface failures as structured
/// [`crate::Error`]s; degradation to null/empty results is the store's job,
/// not the gateway's.
#[async_trait]
pub trait Gateway: Send + Sync {
    // ── profile ──────────────────────────────────────────────────────────

    /// Fetch the profile for a user.
    async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile>;

    /// Replace the profile for a user.
    async fn update_profile(&self, user_id: Uuid, profile: &UserProfile) -> Result<UserProfile>;

    // ── notes ────────────────────────────────────────────────────────────

    /// Fetch the full current note set for a user.
    async fn get_notes(&self, user_id: Uuid) -> Result<Vec<Note>>;

    /// Create a note from a draft. Returns the created record.
    async fn add_note(&self, user_id: Uuid, draft: &NoteDraft) -> Result<Note>;

    /// Apply a partial update to a note. Returns the updated record.
    async fn update_note(&self, user_id: Uuid, id: Uuid, patch: &NoteUpdate) -> Result<Note>;

    /// Delete a note.
    async fn delete_note(&self, user_id: Uuid, id: Uuid) -> Result<()>;

    // ── settings / statistics ────────────────────────────────────────────

    /// Fetch the settings record for a user.
    async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings>;

    /// Replace the settings record for a user.
    async fn update_settings(&self, user_id: Uuid, settings: &UserSettings)
        -> Result<UserSettings>;

    /// Fetch aggregated study statistics for a user.
    async fn get_statistics(&self, user_id: Uuid) -> Result<StudyStatistics>;

    // ── dashboard ────────────────────────────────────────────────────────

    /// Fetch the notification inbox for a user.
    async fn get_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>>;

    /// Fetch the current-semester timetable for a user.
    async fn get_current_timetable(&self, user_id: Uuid) -> Result<Timetable>;

    /// Fetch completed-course records for a user.
    async fn get_records(&self, user_id: Uuid) -> Result<Vec<AcademicRecord>>;

    /// Fetch dashboard summary card data for a user.
    async fn get_dashboard_summary(&self, user_id: Uuid) -> Result<DashboardSummary>;

    // ── onboarding ───────────────────────────────────────────────────────

    /// Submit the completed onboarding profile. One-shot; the gateway
    /// persists the profile and marks the account onboarded.
    async fn complete_onboarding(
        &self,
        user_id: Uuid,
        profile: &OnboardingProfile,
    ) -> Result<UserProfile>;

    /// Check if the gateway is reachable and responding.
    async fn health_check(&self) -> Result<bool>;
}

// =============================================================================
// FALLBACK STORE
// =============================================================================

/// Local key-value store holding per-user denormalized JSON records,
/// consulted when the gateway is unreachable at load time.
///
/// Keys are namespaced per user and record kind. Data read from here is
/// stale by definition; the store marks it so and never promotes it.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Load a cached record, if one exists.
    async fn load(&self, user_id: Uuid, kind: RecordKind) -> Result<Option<JsonValue>>;

    /// Write a record through to the cache.
    async fn save(&self, user_id: Uuid, kind: RecordKind, value: &JsonValue) -> Result<()>;

    /// Drop all cached records for a user.
    async fn remove_user(&self, user_id: Uuid) -> Result<()>;
}

/// No-op fallback store for when local caching isn't wanted.
pub struct NoopFallbackStore;

#[async_trait]
impl FallbackStore for NoopFallbackStore {
    async fn load(&self, _user_id: Uuid, _kind: RecordKind) -> Result<Option<JsonValue>> {
        Ok(None)
    }

    async fn save(&self, _user_id: Uuid, _kind: RecordKind, _value: &JsonValue) -> Result<()> {
        Ok(())
    }

    async fn remove_user(&self, _user_id: Uuid) -> Result<()> {
        Ok(())
    }
}
