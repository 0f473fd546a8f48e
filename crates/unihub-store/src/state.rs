//! Per-user state container and its reducer.
//!
//! Every mutation of [`UserState`] flows through [`apply`] as a typed
//! [`StateUpdate`], so there is exactly one place where state changes
//! happen and no hidden field writes scattered across the codebase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unihub_core::{
    AcademicRecord, DashboardSummary, Note, Notification, StudyStatistics, Timetable, UserProfile,
    UserSettings,
};

/// How current a record is relative to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Freshness {
    /// Read from the gateway during this session.
    Fresh,
    /// Served from the fallback store because the gateway was unreachable.
    Stale,
    /// Absent everywhere; the default value was substituted.
    Missing,
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// A record together with its freshness marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cached<T> {
    pub value: T,
    pub freshness: Freshness,
}

impl<T: Default> Default for Cached<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            freshness: Freshness::Missing,
        }
    }
}

impl<T> Cached<T> {
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            freshness: Freshness::Fresh,
        }
    }

    pub fn stale(value: T) -> Self {
        Self {
            value,
            freshness: Freshness::Stale,
        }
    }
}

/// All in-memory state for the active user.
///
/// Loaded wholesale on user switch, discarded on logout. The note list is
/// only ever replaced with a full server read, never locally patched.
#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub user_id: Option<Uuid>,
    pub profile: Cached<UserProfile>,
    pub settings: Cached<UserSettings>,
    pub statistics: Cached<StudyStatistics>,
    pub timetable: Cached<Timetable>,
    pub summary: Cached<DashboardSummary>,
    pub records: Vec<AcademicRecord>,
    pub notifications: Vec<Notification>,
    pub notes: Vec<Note>,
}

/// Typed state mutations, one variant per entity change.
#[derive(Debug, Clone)]
pub enum StateUpdate {
    /// A new active user; resets everything else.
    UserChanged(Uuid),
    ProfileLoaded(Cached<UserProfile>),
    SettingsLoaded(Cached<UserSettings>),
    StatisticsLoaded(Cached<StudyStatistics>),
    TimetableLoaded(Cached<Timetable>),
    SummaryLoaded(Cached<DashboardSummary>),
    RecordsLoaded(Vec<AcademicRecord>),
    NotificationsLoaded(Vec<Notification>),
    /// Full replacement of the note list with a server read.
    NotesReplaced(Vec<Note>),
    ProfileUpdated(UserProfile),
    SettingsUpdated(UserSettings),
    /// Onboarding completed; the gateway's post-completion profile wins.
    OnboardingCompleted(UserProfile),
    /// Logout.
    Cleared,
}

/// Apply one update to the state.
pub fn apply(state: &mut UserState, update: StateUpdate) {
    match update {
        StateUpdate::UserChanged(user_id) => {
            *state = UserState {
                user_id: Some(user_id),
                ..Default::default()
            };
        }
        StateUpdate::ProfileLoaded(profile) => state.profile = profile,
        StateUpdate::SettingsLoaded(settings) => state.settings = settings,
        StateUpdate::StatisticsLoaded(statistics) => state.statistics = statistics,
        StateUpdate::TimetableLoaded(timetable) => state.timetable = timetable,
        StateUpdate::SummaryLoaded(summary) => state.summary = summary,
        StateUpdate::RecordsLoaded(records) => state.records = records,
        StateUpdate::NotificationsLoaded(notifications) => state.notifications = notifications,
        StateUpdate::NotesReplaced(notes) => state.notes = notes,
        StateUpdate::ProfileUpdated(profile) => state.profile = Cached::fresh(profile),
        StateUpdate::SettingsUpdated(settings) => state.settings = Cached::fresh(settings),
        StateUpdate::OnboardingCompleted(profile) => state.profile = Cached::fresh(profile),
        StateUpdate::Cleared => *state = UserState::default(),
    }
}
