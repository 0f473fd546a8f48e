//! # unihub-store
//!
//! The per-user data context: a single injectable state container that
//! loads all user-scoped records on user switch, exposes CRUD operations
//! for notes, and re-synchronizes the full note list after every mutation
//! rather than applying local patches.
//!
//! Gateway failures are degraded at this boundary to null/empty results
//! plus a tracing diagnostic; structured errors never cross into the UI
//! layer. See [`DataContext`] for the synchronization contract.

pub mod context;
pub mod fallback;
pub mod onboarding;
pub mod state;

pub use context::DataContext;
pub use fallback::MemoryFallbackStore;
pub use onboarding::{FieldError, OnboardingWizard, Step};
pub use state::{Cached, Freshness, StateUpdate, UserState};
