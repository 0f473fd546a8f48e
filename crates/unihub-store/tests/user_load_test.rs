//! User lifecycle and fallback cache tests.
//!
//! Covers the wholesale load on user switch, read-through fallback with
//! explicit staleness marking, default substitution for absent records,
//! and discard-on-logout.

use std::sync::Arc;

use uuid::Uuid;

use unihub_core::{FallbackStore, RecordKind, StudyStatistics, UserProfile, UserSettings};
use unihub_gateway::MockGateway;
use unihub_store::{DataContext, Freshness, MemoryFallbackStore};

fn profile(name: &str) -> UserProfile {
    UserProfile {
        display_name: name.to_string(),
        email: format!("{}@campus.example", name),
        university: "Example U".to_string(),
        major: "Physics".to_string(),
        onboarding_completed: true,
    }
}

#[tokio::test]
async fn test_load_user_marks_gateway_records_fresh() {
    let user = Uuid::new_v4();
    let gateway = MockGateway::new()
        .with_profile(user, profile("avery"))
        .with_settings(user, UserSettings::default())
        .with_statistics(
            user,
            StudyStatistics {
                completed_credits: 90,
                gpa: 3.4,
                current_semester: 5,
                notes_count: 2,
            },
        );
    let ctx = DataContext::with_gateway(Arc::new(gateway));

    ctx.load_user(user).await;
    let state = ctx.snapshot().await;

    assert_eq!(state.user_id, Some(user));
    assert_eq!(state.profile.freshness, Freshness::Fresh);
    assert_eq!(state.profile.value.display_name, "avery");
    assert_eq!(state.statistics.value.completed_credits, 90);
}

#[tokio::test]
async fn test_gateway_reads_are_written_back_to_fallback() {
    let user = Uuid::new_v4();
    let gateway = MockGateway::new().with_profile(user, profile("avery"));
    let fallback = Arc::new(MemoryFallbackStore::new());
    let ctx = DataContext::new(Arc::new(gateway), fallback.clone());

    ctx.load_user(user).await;

    let cached = fallback.load(user, RecordKind::Profile).await.unwrap();
    assert_eq!(cached.unwrap()["display_name"], "avery");
}

#[tokio::test]
async fn test_unreachable_gateway_serves_fallback_marked_stale() {
    let user = Uuid::new_v4();
    let fallback = Arc::new(MemoryFallbackStore::new());
    fallback
        .save(
            user,
            RecordKind::Profile,
            &serde_json::to_value(profile("cached")).unwrap(),
        )
        .await
        .unwrap();

    let gateway = MockGateway::new();
    gateway.fail_on("get_profile");
    let ctx = DataContext::new(Arc::new(gateway), fallback);

    ctx.load_user(user).await;
    let state = ctx.snapshot().await;

    assert_eq!(state.profile.freshness, Freshness::Stale);
    assert_eq!(state.profile.value.display_name, "cached");
}

#[tokio::test]
async fn test_record_absent_everywhere_substitutes_default() {
    // No profile on the gateway (404-class error, not transport) and no
    // fallback record: the default value is substituted, marked missing.
    let user = Uuid::new_v4();
    let ctx = DataContext::with_gateway(Arc::new(MockGateway::new()));

    ctx.load_user(user).await;
    let state = ctx.snapshot().await;

    assert_eq!(state.profile.freshness, Freshness::Missing);
    assert_eq!(state.profile.value, UserProfile::default());
    assert_eq!(state.settings.freshness, Freshness::Missing);
    // Default settings still carry usable values.
    assert_eq!(state.settings.value.theme, "system");
}

#[tokio::test]
async fn test_transport_failure_with_empty_fallback_is_missing() {
    let user = Uuid::new_v4();
    let gateway = MockGateway::new();
    gateway.fail_on("get_settings");
    let ctx = DataContext::new(Arc::new(gateway), Arc::new(MemoryFallbackStore::new()));

    ctx.load_user(user).await;

    assert_eq!(ctx.snapshot().await.settings.freshness, Freshness::Missing);
}

#[tokio::test]
async fn test_clear_discards_memory_but_keeps_fallback() {
    let user = Uuid::new_v4();
    let gateway = MockGateway::new().with_profile(user, profile("avery"));
    let fallback = Arc::new(MemoryFallbackStore::new());
    let ctx = DataContext::new(Arc::new(gateway), fallback.clone());

    ctx.load_user(user).await;
    ctx.clear().await;

    let state = ctx.snapshot().await;
    assert!(state.user_id.is_none());
    assert_eq!(state.profile.value, UserProfile::default());
    // The fallback record survives logout for the next offline load.
    assert!(fallback
        .load(user, RecordKind::Profile)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_user_switch_replaces_all_state() {
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    let gateway = MockGateway::new()
        .with_profile(user_a, profile("avery"))
        .with_profile(user_b, profile("blake"));
    let ctx = DataContext::with_gateway(Arc::new(gateway));

    ctx.load_user(user_a).await;
    ctx.add_note(&unihub_core::NoteDraft {
        title: "a's note".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    ctx.load_user(user_b).await;
    let state = ctx.snapshot().await;

    assert_eq!(state.user_id, Some(user_b));
    assert_eq!(state.profile.value.display_name, "blake");
    assert!(state.notes.is_empty());
}

#[tokio::test]
async fn test_update_settings_writes_through_and_marks_fresh() {
    let user = Uuid::new_v4();
    let gateway = MockGateway::new();
    let fallback = Arc::new(MemoryFallbackStore::new());
    let ctx = DataContext::new(Arc::new(gateway), fallback.clone());
    ctx.load_user(user).await;

    let settings = UserSettings {
        theme: "dark".to_string(),
        ..Default::default()
    };
    let updated = ctx.update_settings(&settings).await.unwrap();

    assert_eq!(updated.theme, "dark");
    let state = ctx.snapshot().await;
    assert_eq!(state.settings.freshness, Freshness::Fresh);
    assert_eq!(state.settings.value.theme, "dark");
    let cached = fallback.load(user, RecordKind::Settings).await.unwrap();
    assert_eq!(cached.unwrap()["theme"], "dark");
}

#[tokio::test]
async fn test_failed_profile_update_leaves_state() {
    let user = Uuid::new_v4();
    let gateway = MockGateway::new().with_profile(user, profile("avery"));
    let ctx = DataContext::with_gateway(Arc::new(gateway.clone()));
    ctx.load_user(user).await;

    gateway.fail_on("update_profile");
    let result = ctx.update_profile(&profile("changed")).await;

    assert!(result.is_none());
    assert_eq!(ctx.snapshot().await.profile.value.display_name, "avery");
}
