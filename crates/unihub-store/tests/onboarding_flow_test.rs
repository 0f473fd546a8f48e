//! End-to-end onboarding wizard flow against the data context.

use std::sync::Arc;

use uuid::Uuid;

use unihub_core::{Error, OnboardingProfile, UserProfile};
use unihub_gateway::MockGateway;
use unihub_store::{DataContext, OnboardingWizard, Step};

fn filled_profile() -> OnboardingProfile {
    OnboardingProfile {
        major: "Physics".to_string(),
        target_graduation: "2028".to_string(),
        remaining_semesters: 4,
        completed_credits: 90,
        max_credits_per_term: 18,
        interests: vec!["astro".to_string()],
    }
}

async fn context_for(gateway: MockGateway) -> (DataContext, Uuid) {
    let user = Uuid::new_v4();
    let gateway = gateway.with_profile(user, UserProfile::default());
    let ctx = DataContext::with_gateway(Arc::new(gateway));
    ctx.load_user(user).await;
    (ctx, user)
}

#[tokio::test]
async fn test_happy_path_completes_and_flips_flag() {
    let gateway = MockGateway::new();
    let (ctx, user) = context_for(gateway.clone()).await;

    let mut wizard = OnboardingWizard::with_profile(filled_profile());
    while !wizard.step().is_last() {
        wizard.next().unwrap();
    }

    let profile = wizard.complete(&ctx).await.unwrap();

    assert!(wizard.is_completed());
    assert!(profile.onboarding_completed);
    assert_eq!(profile.major, "Physics");
    // The context's profile reflects the post-completion record.
    assert!(ctx.snapshot().await.profile.value.onboarding_completed);
    assert_eq!(gateway.submitted_onboarding(user).unwrap(), filled_profile());
    assert_eq!(gateway.call_count("complete_onboarding"), 1);
}

#[tokio::test]
async fn test_completion_failure_keeps_flag_unset() {
    let gateway = MockGateway::new();
    let (ctx, _user) = context_for(gateway.clone()).await;
    gateway.fail_on("complete_onboarding");

    let mut wizard = OnboardingWizard::with_profile(filled_profile());
    while !wizard.step().is_last() {
        wizard.next().unwrap();
    }

    let err = wizard.complete(&ctx).await.unwrap_err();

    assert!(matches!(err, Error::Request(_)));
    assert!(!wizard.is_completed());
    assert_eq!(wizard.step(), Step::Review);
    assert!(!ctx.snapshot().await.profile.value.onboarding_completed);

    // The user re-invokes the action once the gateway recovers.
    gateway.clear_failures();
    wizard.complete(&ctx).await.unwrap();
    assert!(wizard.is_completed());
}

#[tokio::test]
async fn test_complete_before_final_step_is_rejected() {
    let gateway = MockGateway::new();
    let (ctx, _user) = context_for(gateway.clone()).await;

    let mut wizard = OnboardingWizard::with_profile(filled_profile());
    let err = wizard.complete(&ctx).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(gateway.call_count("complete_onboarding"), 0);
}

#[tokio::test]
async fn test_complete_twice_is_rejected() {
    let gateway = MockGateway::new();
    let (ctx, _user) = context_for(gateway.clone()).await;

    let mut wizard = OnboardingWizard::with_profile(filled_profile());
    while !wizard.step().is_last() {
        wizard.next().unwrap();
    }
    wizard.complete(&ctx).await.unwrap();

    let err = wizard.complete(&ctx).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(gateway.call_count("complete_onboarding"), 1);
}

#[tokio::test]
async fn test_invalid_review_blocks_completion() {
    let gateway = MockGateway::new();
    let (ctx, _user) = context_for(gateway.clone()).await;

    // Walk forward with valid data, then invalidate a field before review.
    let mut wizard = OnboardingWizard::with_profile(filled_profile());
    while !wizard.step().is_last() {
        wizard.next().unwrap();
    }
    wizard.profile_mut().remaining_semesters = 11;

    let err = wizard.complete(&ctx).await.unwrap_err();
    match err {
        Error::Validation(msg) => assert!(msg.contains("remaining_semesters")),
        other => panic!("Expected Validation error, got {:?}", other),
    }
    assert_eq!(gateway.call_count("complete_onboarding"), 0);
}

#[tokio::test]
async fn test_completion_without_active_user_fails() {
    let ctx = DataContext::with_gateway(Arc::new(MockGateway::new()));

    let mut wizard = OnboardingWizard::with_profile(filled_profile());
    while !wizard.step().is_last() {
        wizard.next().unwrap();
    }

    assert!(wizard.complete(&ctx).await.is_err());
    assert!(!wizard.is_completed());
}
