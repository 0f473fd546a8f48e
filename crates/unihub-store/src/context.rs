//! The data context: user-scoped state plus the notes synchronization
//! contract.
//!
//! Synchronization contract for notes: every successful mutation is
//! followed by a full re-read of the server's list, and that read replaces
//! the in-memory list wholesale. The record a mutation returns carries no
//! authority over the list. This guarantees read-your-writes at the cost
//! of one extra round trip per write.
//!
//! Responses are sequenced with a monotonic fetch ticket; a list response
//! is applied only if no later response has been applied, so an in-flight
//! read that resolves out of order cannot overwrite newer state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use unihub_core::{
    Error, FallbackStore, Gateway, NoopFallbackStore, Note, NoteDraft, NoteUpdate,
    OnboardingProfile, RecordKind, Result, UserProfile, UserSettings,
};

use crate::state::{self, Cached, StateUpdate, UserState};

struct Inner {
    state: UserState,
    /// Ticket of the last note-list response applied to state.
    last_applied_fetch: u64,
}

/// Injectable per-user data context.
///
/// Owns the gateway and fallback-store seams; constructed where the
/// application wires its dependencies, never a global.
pub struct DataContext {
    gateway: Arc<dyn Gateway>,
    fallback: Arc<dyn FallbackStore>,
    inner: RwLock<Inner>,
    /// Monotonic ticket counter for note-list fetches.
    fetch_seq: AtomicU64,
}

impl DataContext {
    /// Create a context with an explicit gateway and fallback store.
    pub fn new(gateway: Arc<dyn Gateway>, fallback: Arc<dyn FallbackStore>) -> Self {
        Self {
            gateway,
            fallback,
            inner: RwLock::new(Inner {
                state: UserState::default(),
                last_applied_fetch: 0,
            }),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Create a context without local fallback caching.
    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> Self {
        Self::new(gateway, Arc::new(NoopFallbackStore))
    }

    /// Clone of the current in-memory state, for the view layer.
    pub async fn snapshot(&self) -> UserState {
        self.inner.read().await.state.clone()
    }

    /// The active user, if one is loaded.
    pub async fn active_user(&self) -> Option<Uuid> {
        self.inner.read().await.state.user_id
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Wholesale load of every user-scoped record.
    ///
    /// Records the gateway cannot produce are read through the fallback
    /// store and marked stale; records absent everywhere get their default
    /// value, marked missing. Gateway reads are written back to the
    /// fallback store for the next offline load.
    #[instrument(skip(self), fields(subsystem = "store", component = "context", op = "load_user", user_id = %user_id))]
    pub async fn load_user(&self, user_id: Uuid) {
        info!("Loading user state");
        {
            let mut inner = self.inner.write().await;
            state::apply(&mut inner.state, StateUpdate::UserChanged(user_id));
        }

        let profile = self
            .load_record(user_id, RecordKind::Profile, self.gateway.get_profile(user_id))
            .await;
        let settings = self
            .load_record(
                user_id,
                RecordKind::Settings,
                self.gateway.get_settings(user_id),
            )
            .await;
        let statistics = self
            .load_record(
                user_id,
                RecordKind::Statistics,
                self.gateway.get_statistics(user_id),
            )
            .await;
        let timetable = self
            .load_record(
                user_id,
                RecordKind::Timetable,
                self.gateway.get_current_timetable(user_id),
            )
            .await;

        // Gateway-only records: no fallback kind, degrade to defaults.
        let summary = match self.gateway.get_dashboard_summary(user_id).await {
            Ok(summary) => Cached::fresh(summary),
            Err(e) => {
                warn!(error = %e, "Failed to load dashboard summary");
                Cached::default()
            }
        };
        let records = self.gateway.get_records(user_id).await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load academic records");
            Vec::new()
        });
        let notifications = self
            .gateway
            .get_notifications(user_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load notifications");
                Vec::new()
            });

        {
            let mut inner = self.inner.write().await;
            if inner.state.user_id != Some(user_id) {
                debug!("User switched during load, discarding loaded records");
                return;
            }
            state::apply(&mut inner.state, StateUpdate::ProfileLoaded(profile));
            state::apply(&mut inner.state, StateUpdate::SettingsLoaded(settings));
            state::apply(&mut inner.state, StateUpdate::StatisticsLoaded(statistics));
            state::apply(&mut inner.state, StateUpdate::TimetableLoaded(timetable));
            state::apply(&mut inner.state, StateUpdate::SummaryLoaded(summary));
            state::apply(&mut inner.state, StateUpdate::RecordsLoaded(records));
            state::apply(
                &mut inner.state,
                StateUpdate::NotificationsLoaded(notifications),
            );
        }

        if let Err(e) = self.refresh_notes(user_id).await {
            warn!(error = %e, "Initial note fetch failed, starting with empty list");
        }
    }

    /// Logout: discard all in-memory state. The fallback store keeps its
    /// records for the next offline load.
    #[instrument(skip(self), fields(subsystem = "store", component = "context", op = "clear"))]
    pub async fn clear(&self) {
        info!("Clearing user state");
        let mut inner = self.inner.write().await;
        state::apply(&mut inner.state, StateUpdate::Cleared);
    }

    // ========================================================================
    // NOTES
    // ========================================================================

    /// Fetch the full current note set for the active user.
    ///
    /// Returns an empty list on transport error (no retry, no backoff);
    /// prior in-memory state is kept in that case.
    #[instrument(skip(self), fields(subsystem = "store", component = "context", op = "list_notes"))]
    pub async fn list_notes(&self) -> Vec<Note> {
        let Some(user_id) = self.require_user("list_notes").await else {
            return Vec::new();
        };
        match self.refresh_notes(user_id).await {
            Ok(notes) => notes,
            Err(e) => {
                warn!(error = %e, "Failed to fetch note list");
                Vec::new()
            }
        }
    }

    /// Create a note from a draft.
    ///
    /// On success the in-memory list is re-read from the server; the
    /// created record is returned for convenience but carries no authority
    /// over the list. Returns `None` on failure, meaning no state change
    /// occurred.
    #[instrument(skip(self, draft), fields(subsystem = "store", component = "context", op = "add_note"))]
    pub async fn add_note(&self, draft: &NoteDraft) -> Option<Note> {
        let user_id = self.require_user("add_note").await?;
        let created = match self.gateway.add_note(user_id, draft).await {
            Ok(note) => note,
            Err(e) => {
                warn!(error = %e, "Failed to add note, state unchanged");
                return None;
            }
        };
        if let Err(e) = self.refresh_notes(user_id).await {
            warn!(note_id = %created.id, error = %e, "Note created but list refresh failed");
        }
        Some(created)
    }

    /// Apply a partial update to a note; same re-fetch-after-write pattern
    /// as [`Self::add_note`]. Returns `None` on failure with prior state
    /// untouched.
    #[instrument(skip(self, patch), fields(subsystem = "store", component = "context", op = "update_note", note_id = %id))]
    pub async fn update_note(&self, id: Uuid, patch: &NoteUpdate) -> Option<Note> {
        let user_id = self.require_user("update_note").await?;
        let updated = match self.gateway.update_note(user_id, id, patch).await {
            Ok(note) => note,
            Err(e) => {
                warn!(error = %e, "Failed to update note, state unchanged");
                return None;
            }
        };
        if let Err(e) = self.refresh_notes(user_id).await {
            warn!(note_id = %id, error = %e, "Note updated but list refresh failed");
        }
        Some(updated)
    }

    /// Delete a note. After a successful delete resolves, the id is
    /// guaranteed absent from the next list read. Returns `false` on
    /// failure with prior state untouched.
    #[instrument(skip(self), fields(subsystem = "store", component = "context", op = "delete_note", note_id = %id))]
    pub async fn delete_note(&self, id: Uuid) -> bool {
        let Some(user_id) = self.require_user("delete_note").await else {
            return false;
        };
        if let Err(e) = self.gateway.delete_note(user_id, id).await {
            warn!(error = %e, "Failed to delete note, state unchanged");
            return false;
        }
        if let Err(e) = self.refresh_notes(user_id).await {
            warn!(note_id = %id, error = %e, "Note deleted but list refresh failed");
        }
        true
    }

    /// Re-read the full note list and apply it unless a later response has
    /// already been applied or the user changed mid-flight.
    async fn refresh_notes(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let ticket = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let notes = self.gateway.get_notes(user_id).await?;

        let mut inner = self.inner.write().await;
        if inner.state.user_id != Some(user_id) {
            debug!(fetch_ticket = ticket, "Discarding note list for inactive user");
            return Ok(notes);
        }
        if ticket <= inner.last_applied_fetch {
            debug!(fetch_ticket = ticket, "Discarding stale note list response");
            return Ok(notes);
        }
        inner.last_applied_fetch = ticket;
        state::apply(&mut inner.state, StateUpdate::NotesReplaced(notes.clone()));
        Ok(notes)
    }

    // ========================================================================
    // PROFILE / SETTINGS / ONBOARDING
    // ========================================================================

    /// Replace the profile. Returns `None` on failure with prior state
    /// untouched.
    #[instrument(skip(self, profile), fields(subsystem = "store", component = "context", op = "update_profile"))]
    pub async fn update_profile(&self, profile: &UserProfile) -> Option<UserProfile> {
        let user_id = self.require_user("update_profile").await?;
        let updated = match self.gateway.update_profile(user_id, profile).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Failed to update profile, state unchanged");
                return None;
            }
        };
        self.write_back(user_id, RecordKind::Profile, &updated).await;
        let mut inner = self.inner.write().await;
        state::apply(&mut inner.state, StateUpdate::ProfileUpdated(updated.clone()));
        Some(updated)
    }

    /// Replace the settings record. Returns `None` on failure with prior
    /// state untouched.
    #[instrument(skip(self, settings), fields(subsystem = "store", component = "context", op = "update_settings"))]
    pub async fn update_settings(&self, settings: &UserSettings) -> Option<UserSettings> {
        let user_id = self.require_user("update_settings").await?;
        let updated = match self.gateway.update_settings(user_id, settings).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to update settings, state unchanged");
                return None;
            }
        };
        self.write_back(user_id, RecordKind::Settings, &updated).await;
        let mut inner = self.inner.write().await;
        state::apply(
            &mut inner.state,
            StateUpdate::SettingsUpdated(updated.clone()),
        );
        Some(updated)
    }

    /// Submit the completed onboarding profile.
    ///
    /// The local completed flag flips only when the gateway call succeeds;
    /// on failure the error is surfaced and in-memory state is untouched,
    /// so there is nothing to roll back.
    #[instrument(skip(self, profile), fields(subsystem = "store", component = "context", op = "complete_onboarding"))]
    pub async fn complete_onboarding(&self, profile: &OnboardingProfile) -> Result<UserProfile> {
        let user_id = self
            .active_user()
            .await
            .ok_or_else(|| Error::Internal("no active user".to_string()))?;
        let updated = self.gateway.complete_onboarding(user_id, profile).await?;
        info!(user_id = %user_id, "Onboarding completed");
        self.write_back(user_id, RecordKind::Profile, &updated).await;
        let mut inner = self.inner.write().await;
        state::apply(
            &mut inner.state,
            StateUpdate::OnboardingCompleted(updated.clone()),
        );
        Ok(updated)
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    async fn require_user(&self, op: &str) -> Option<Uuid> {
        let user = self.active_user().await;
        if user.is_none() {
            warn!(op, "Operation called with no active user");
        }
        user
    }

    /// Load one record: gateway first, fallback on transport failure,
    /// default when absent everywhere.
    async fn load_record<T, F>(&self, user_id: Uuid, kind: RecordKind, fetch: F) -> Cached<T>
    where
        T: Default + Serialize + DeserializeOwned,
        F: Future<Output = Result<T>>,
    {
        match fetch.await {
            Ok(value) => {
                self.write_back(user_id, kind, &value).await;
                Cached::fresh(value)
            }
            Err(e) if e.is_transport() => {
                warn!(record_kind = %kind, error = %e, stale = true, "Gateway unreachable, reading record from fallback");
                match self.fallback.load(user_id, kind).await {
                    Ok(Some(json)) => match serde_json::from_value(json) {
                        Ok(value) => Cached::stale(value),
                        Err(e) => {
                            warn!(record_kind = %kind, error = %e, "Corrupt fallback record, substituting default");
                            Cached::default()
                        }
                    },
                    Ok(None) => Cached::default(),
                    Err(e) => {
                        warn!(record_kind = %kind, error = %e, "Fallback read failed, substituting default");
                        Cached::default()
                    }
                }
            }
            Err(e) => {
                debug!(record_kind = %kind, error = %e, "Record absent, substituting default");
                Cached::default()
            }
        }
    }

    async fn write_back<T: Serialize>(&self, user_id: Uuid, kind: RecordKind, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                if let Err(e) = self.fallback.save(user_id, kind, &json).await {
                    warn!(record_kind = %kind, error = %e, "Failed to write record to fallback store");
                }
            }
            Err(e) => {
                warn!(record_kind = %kind, error = %e, "Failed to serialize record for fallback store")
            }
        }
    }
}
