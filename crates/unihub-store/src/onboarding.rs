//! Multi-step onboarding wizard.
//!
//! Five linear steps, each with an independent validation predicate over
//! the collected [`OnboardingProfile`]. `next()` only advances when the
//! active step validates; `back()` is unconditional. The terminal step
//! triggers a one-time completion call to the gateway, and the local
//! completed flag flips only when that call succeeds.

use tracing::{debug, instrument};

use unihub_core::defaults::{
    MAX_COMPLETED_CREDITS, MAX_CREDITS_PER_TERM, MAX_REMAINING_SEMESTERS, MIN_COMPLETED_CREDITS,
    MIN_CREDITS_PER_TERM, MIN_REMAINING_SEMESTERS, ONBOARDING_STEPS,
};
use unihub_core::{Error, OnboardingProfile, Result, UserProfile};

use crate::context::DataContext;

/// The wizard's linear steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Major and target graduation.
    Basics,
    /// Credits completed so far and semesters left.
    Progress,
    /// Per-term course load.
    Planning,
    /// Optional interest tags.
    Interests,
    /// Summary; completion happens here.
    Review,
}

impl Step {
    const ALL: [Step; ONBOARDING_STEPS] = [
        Step::Basics,
        Step::Progress,
        Step::Planning,
        Step::Interests,
        Step::Review,
    ];

    /// Zero-based position in the wizard.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    fn next(&self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn back(&self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_last(&self) -> bool {
        *self == Step::Review
    }
}

/// One failed validation check, tied to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

fn range_check(
    field: &'static str,
    value: i32,
    min: i32,
    max: i32,
    errors: &mut Vec<FieldError>,
) {
    if value < min || value > max {
        errors.push(FieldError {
            field,
            message: format!("must be between {} and {}, got {}", min, max, value),
        });
    }
}

/// Validation predicate for one step.
pub fn validate_step(step: Step, profile: &OnboardingProfile) -> Vec<FieldError> {
    let mut errors = Vec::new();
    match step {
        Step::Basics => {
            if profile.major.trim().is_empty() {
                errors.push(FieldError {
                    field: "major",
                    message: "is required".to_string(),
                });
            }
            if profile.target_graduation.trim().is_empty() {
                errors.push(FieldError {
                    field: "target_graduation",
                    message: "is required".to_string(),
                });
            }
        }
        Step::Progress => {
            range_check(
                "remaining_semesters",
                profile.remaining_semesters,
                MIN_REMAINING_SEMESTERS,
                MAX_REMAINING_SEMESTERS,
                &mut errors,
            );
            range_check(
                "completed_credits",
                profile.completed_credits,
                MIN_COMPLETED_CREDITS,
                MAX_COMPLETED_CREDITS,
                &mut errors,
            );
        }
        Step::Planning => {
            range_check(
                "max_credits_per_term",
                profile.max_credits_per_term,
                MIN_CREDITS_PER_TERM,
                MAX_CREDITS_PER_TERM,
                &mut errors,
            );
        }
        // Interests are optional; nothing to check.
        Step::Interests => {}
        Step::Review => {
            for prior in [Step::Basics, Step::Progress, Step::Planning, Step::Interests] {
                errors.extend(validate_step(prior, profile));
            }
        }
    }
    errors
}

/// The wizard's form state.
pub struct OnboardingWizard {
    profile: OnboardingProfile,
    step: Step,
    completed: bool,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::with_profile(OnboardingProfile::default())
    }

    /// Resume from previously entered data.
    pub fn with_profile(profile: OnboardingProfile) -> Self {
        Self {
            profile,
            step: Step::Basics,
            completed: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn profile(&self) -> &OnboardingProfile {
        &self.profile
    }

    /// Mutable access for form bindings.
    pub fn profile_mut(&mut self) -> &mut OnboardingProfile {
        &mut self.profile
    }

    /// Advance to the next step if the active step validates.
    ///
    /// Returns the new step, or the field errors that block advancement.
    /// Calling `next()` on the terminal step is a no-op.
    pub fn next(&mut self) -> std::result::Result<Step, Vec<FieldError>> {
        let errors = validate_step(self.step, &self.profile);
        if !errors.is_empty() {
            debug!(step = ?self.step, error_count = errors.len(), "Step blocked by validation");
            return Err(errors);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step. Unconditional.
    pub fn back(&mut self) -> Step {
        if let Some(prev) = self.step.back() {
            self.step = prev;
        }
        self.step
    }

    /// Submit the wizard on the terminal step.
    ///
    /// The completed flag flips only after the gateway call succeeds; on
    /// failure the wizard stays on the final step with the flag unset and
    /// the error is surfaced to the caller.
    #[instrument(skip(self, ctx), fields(subsystem = "store", component = "onboarding", op = "complete"))]
    pub async fn complete(&mut self, ctx: &DataContext) -> Result<UserProfile> {
        if !self.step.is_last() {
            return Err(Error::Validation(
                "onboarding can only be completed from the final step".to_string(),
            ));
        }
        if self.completed {
            return Err(Error::Validation(
                "onboarding was already completed".to_string(),
            ));
        }
        let errors = validate_step(Step::Review, &self.profile);
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Validation(joined));
        }

        let profile = ctx.complete_onboarding(&self.profile).await?;
        self.completed = true;
        Ok(profile)
    }
}
