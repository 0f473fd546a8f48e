//! Core data models for the unihub client data layer.
//!
//! These types mirror the JSON records served by the remote gateway and are
//! shared across all unihub crates. Every record is user-scoped; records are
//! loaded wholesale on user switch and discarded on logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note as stored by the gateway.
///
/// `content` is a rich-text HTML string and is opaque to this layer.
/// Ownership is exclusive to one user; the server is authoritative and
/// last writer wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-side draft for creating a note.
///
/// There is deliberately no required-field gate: an empty title and content
/// are accepted and sent to the gateway as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Partial update to an existing note. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

// =============================================================================
// USER RECORDS
// =============================================================================

/// Student profile record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    pub university: String,
    pub major: String,
    #[serde(default)]
    pub onboarding_completed: bool,
}

/// Data collected by the onboarding wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub major: String,
    pub target_graduation: String,
    pub remaining_semesters: i32,
    pub completed_credits: i32,
    pub max_credits_per_term: i32,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Per-user preference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: String,
    pub language: String,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            language: "en".to_string(),
            email_notifications: true,
            push_notifications: false,
        }
    }
}

/// Aggregated study statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyStatistics {
    pub completed_credits: i32,
    pub gpa: f64,
    pub current_semester: i32,
    pub notes_count: i64,
}

/// One timetable slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub course: String,
    /// ISO weekday, 1 = Monday.
    pub weekday: u8,
    pub starts: String,
    pub ends: String,
    pub location: Option<String>,
}

/// Current-semester timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    pub semester: String,
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
}

/// One completed-course record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub course: String,
    pub semester: String,
    pub credits: i32,
    pub grade: Option<String>,
}

/// A notification item for the dashboard inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Dashboard summary card data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub unread_notifications: i64,
    pub pinned_notes: i64,
    pub next_class: Option<ScheduleEntry>,
    pub credits_this_term: i32,
}

// =============================================================================
// RECORD KINDS
// =============================================================================

/// Kinds of per-user records the fallback store can hold.
///
/// The string form doubles as the namespaced storage key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Profile,
    Settings,
    Statistics,
    Timetable,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Settings => "settings",
            Self::Statistics => "statistics",
            Self::Timetable => "timetable",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
