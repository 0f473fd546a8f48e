//! Mock gateway for deterministic testing.
//!
//! Provides an in-memory implementation of the [`Gateway`] trait with
//! builder-style seeding, per-operation failure injection, and a call log
//! for assertions. Used by the store crate's integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use unihub_core::{
    AcademicRecord, DashboardSummary, Error, Gateway, Note, NoteDraft, NoteUpdate, Notification,
    OnboardingProfile, Result, StudyStatistics, Timetable, UserProfile, UserSettings,
};

/// In-memory gateway for tests.
#[derive(Clone, Default)]
pub struct MockGateway {
    inner: Arc<Mutex<MockState>>,
    latency_ms: u64,
}

#[derive(Default)]
struct MockState {
    profiles: HashMap<Uuid, UserProfile>,
    settings: HashMap<Uuid, UserSettings>,
    statistics: HashMap<Uuid, StudyStatistics>,
    timetables: HashMap<Uuid, Timetable>,
    records: HashMap<Uuid, Vec<AcademicRecord>>,
    notifications: HashMap<Uuid, Vec<Notification>>,
    summaries: HashMap<Uuid, DashboardSummary>,
    notes: HashMap<Uuid, Vec<Note>>,
    onboarding: HashMap<Uuid, OnboardingProfile>,
    failing_ops: HashSet<&'static str>,
    call_log: Vec<MockCall>,
}

/// A logged gateway call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: &'static str,
    pub user_id: Uuid,
}

impl MockGateway {
    /// Create an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile record.
    pub fn with_profile(self, user_id: Uuid, profile: UserProfile) -> Self {
        self.inner.lock().unwrap().profiles.insert(user_id, profile);
        self
    }

    /// Seed a settings record.
    pub fn with_settings(self, user_id: Uuid, settings: UserSettings) -> Self {
        self.inner.lock().unwrap().settings.insert(user_id, settings);
        self
    }

    /// Seed a statistics record.
    pub fn with_statistics(self, user_id: Uuid, stats: StudyStatistics) -> Self {
        self.inner.lock().unwrap().statistics.insert(user_id, stats);
        self
    }

    /// Seed a timetable record.
    pub fn with_timetable(self, user_id: Uuid, timetable: Timetable) -> Self {
        self.inner
            .lock()
            .unwrap()
            .timetables
            .insert(user_id, timetable);
        self
    }

    /// Seed notes for a user.
    pub fn with_notes(self, user_id: Uuid, notes: Vec<Note>) -> Self {
        self.inner.lock().unwrap().notes.insert(user_id, notes);
        self
    }

    /// Simulate latency for every operation.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Make one operation fail with a transport error until cleared.
    ///
    /// Operation names are the `Gateway` method names ("get_notes",
    /// "update_note", "complete_onboarding", ...).
    pub fn fail_on(&self, operation: &'static str) {
        self.inner.lock().unwrap().failing_ops.insert(operation);
    }

    /// Clear all injected failures.
    pub fn clear_failures(&self) {
        self.inner.lock().unwrap().failing_ops.clear();
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Count logged calls for one operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// The onboarding profile submitted via `complete_onboarding`, if any.
    pub fn submitted_onboarding(&self, user_id: Uuid) -> Option<OnboardingProfile> {
        self.inner.lock().unwrap().onboarding.get(&user_id).cloned()
    }

    /// Fails the call when the operation has an injected failure,
    /// otherwise logs it.
    fn enter(&self, operation: &'static str, user_id: Uuid) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(MockCall { operation, user_id });
        if state.failing_ops.contains(operation) {
            return Err(Error::Request(format!(
                "injected failure for {}",
                operation
            )));
        }
        Ok(())
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile> {
        self.enter("get_profile", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .profiles
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("profile for {}", user_id)))
    }

    async fn update_profile(&self, user_id: Uuid, profile: &UserProfile) -> Result<UserProfile> {
        self.enter("update_profile", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .profiles
            .insert(user_id, profile.clone());
        Ok(profile.clone())
    }

    async fn get_notes(&self, user_id: Uuid) -> Result<Vec<Note>> {
        self.enter("get_notes", user_id)?;
        self.simulate_latency().await;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .notes
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_note(&self, user_id: Uuid, draft: &NoteDraft) -> Result<Note> {
        self.enter("add_note", user_id)?;
        self.simulate_latency().await;
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            category: draft.category.clone(),
            tags: draft.tags.clone().unwrap_or_default(),
            pinned: draft.pinned.unwrap_or(false),
            archived: draft.archived.unwrap_or(false),
            order: draft.order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        self.inner
            .lock()
            .unwrap()
            .notes
            .entry(user_id)
            .or_default()
            .push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, user_id: Uuid, id: Uuid, patch: &NoteUpdate) -> Result<Note> {
        self.enter("update_note", user_id)?;
        self.simulate_latency().await;
        let mut state = self.inner.lock().unwrap();
        let notes = state.notes.entry(user_id).or_default();
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        if let Some(category) = &patch.category {
            note.category = Some(category.clone());
        }
        if let Some(tags) = &patch.tags {
            note.tags = tags.clone();
        }
        if let Some(pinned) = patch.pinned {
            note.pinned = pinned;
        }
        if let Some(archived) = patch.archived {
            note.archived = archived;
        }
        if let Some(order) = patch.order {
            note.order = order;
        }
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete_note(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        self.enter("delete_note", user_id)?;
        self.simulate_latency().await;
        let mut state = self.inner.lock().unwrap();
        let notes = state.notes.entry(user_id).or_default();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings> {
        self.enter("get_settings", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .settings
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("settings for {}", user_id)))
    }

    async fn update_settings(
        &self,
        user_id: Uuid,
        settings: &UserSettings,
    ) -> Result<UserSettings> {
        self.enter("update_settings", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .settings
            .insert(user_id, settings.clone());
        Ok(settings.clone())
    }

    async fn get_statistics(&self, user_id: Uuid) -> Result<StudyStatistics> {
        self.enter("get_statistics", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .statistics
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("statistics for {}", user_id)))
    }

    async fn get_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        self.enter("get_notifications", user_id)?;
        self.simulate_latency().await;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .notifications
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_current_timetable(&self, user_id: Uuid) -> Result<Timetable> {
        self.enter("get_current_timetable", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .timetables
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("timetable for {}", user_id)))
    }

    async fn get_records(&self, user_id: Uuid) -> Result<Vec<AcademicRecord>> {
        self.enter("get_records", user_id)?;
        self.simulate_latency().await;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .records
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_dashboard_summary(&self, user_id: Uuid) -> Result<DashboardSummary> {
        self.enter("get_dashboard_summary", user_id)?;
        self.simulate_latency().await;
        self.inner
            .lock()
            .unwrap()
            .summaries
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("summary for {}", user_id)))
    }

    async fn complete_onboarding(
        &self,
        user_id: Uuid,
        profile: &OnboardingProfile,
    ) -> Result<UserProfile> {
        self.enter("complete_onboarding", user_id)?;
        self.simulate_latency().await;
        let mut state = self.inner.lock().unwrap();
        state.onboarding.insert(user_id, profile.clone());
        let user = state.profiles.entry(user_id).or_default();
        user.major = profile.major.clone();
        user.onboarding_completed = true;
        Ok(user.clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
