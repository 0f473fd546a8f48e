//! Structured logging schema and field name constants for unihub.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work by the same names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded state the caller must handle |
//! | WARN  | Recoverable issue, fallback or degradation applied |
//! | INFO  | Lifecycle events (user load, logout), operation completions |
//! | DEBUG | Decision points, discarded stale responses, config choices |
//! | TRACE | Per-item iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "gateway", "store"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "http", "mock", "context", "fallback", "onboarding"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "get_notes", "add_note", "load_user", "complete"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// User UUID being operated on.
pub const USER_ID: &str = "user_id";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Record kind being loaded or cached.
pub const RECORD_KIND: &str = "record_kind";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a list operation.
pub const RESULT_COUNT: &str = "result_count";

/// Fetch ticket number for list-response sequencing.
pub const FETCH_TICKET: &str = "fetch_ticket";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Record served from the fallback store rather than the gateway.
pub const STALE: &str = "stale";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
