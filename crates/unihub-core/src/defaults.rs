//! Centralized default constants for the unihub data layer.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// GATEWAY
// =============================================================================

/// Default base URL for the remote gateway.
pub const GATEWAY_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Requests slower than this are logged at WARN (milliseconds).
pub const SLOW_REQUEST_MS: u64 = 3_000;

// =============================================================================
// ONBOARDING VALIDATION RANGES
// =============================================================================

/// Minimum remaining semesters accepted by the wizard.
pub const MIN_REMAINING_SEMESTERS: i32 = 1;

/// Maximum remaining semesters accepted by the wizard.
pub const MAX_REMAINING_SEMESTERS: i32 = 10;

/// Minimum completed credits accepted by the wizard.
pub const MIN_COMPLETED_CREDITS: i32 = 0;

/// Maximum completed credits accepted by the wizard.
pub const MAX_COMPLETED_CREDITS: i32 = 200;

/// Minimum credits per term accepted by the wizard.
pub const MIN_CREDITS_PER_TERM: i32 = 1;

/// Maximum credits per term accepted by the wizard.
pub const MAX_CREDITS_PER_TERM: i32 = 30;

/// Number of linear steps in the onboarding wizard.
pub const ONBOARDING_STEPS: usize = 5;

// =============================================================================
// FALLBACK STORE
// =============================================================================

/// Key namespace prefix for fallback records ("{prefix}:{user_id}:{kind}").
pub const FALLBACK_KEY_PREFIX: &str = "unihub";
