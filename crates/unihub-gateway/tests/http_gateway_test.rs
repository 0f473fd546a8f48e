//! HTTP-level tests for the gateway client.
//!
//! Verifies JSON decoding, status mapping, and the paths and methods
//! each operation uses against a stub server.

use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unihub_core::{Error, Gateway, NoteDraft, NoteUpdate};
use unihub_gateway::{GatewayConfig, HttpGateway};

fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::with_config(GatewayConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        slow_request_ms: 10_000,
    })
}

fn note_json(id: Uuid, user_id: Uuid, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user_id": user_id,
        "title": title,
        "content": "<p>x</p>",
        "category": null,
        "tags": ["exam"],
        "pinned": false,
        "archived": false,
        "order": 0,
        "created_at": "2026-02-01T10:00:00Z",
        "updated_at": "2026-02-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_get_notes_decodes_list() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/users/{}/notes", user)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vec![note_json(id, user, "Calculus")]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notes = gateway_for(&server).get_notes(user).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, id);
    assert_eq!(notes[0].title, "Calculus");
    assert_eq!(notes[0].tags, vec!["exam".to_string()]);
}

#[tokio::test]
async fn test_add_note_posts_draft_body() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/users/{}/notes", user)))
        .and(body_partial_json(serde_json::json!({"title": "A"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(note_json(id, user, "A")))
        .expect(1)
        .mount(&server)
        .await;

    let draft = NoteDraft {
        title: "A".to_string(),
        content: "<p>x</p>".to_string(),
        ..Default::default()
    };
    let created = gateway_for(&server).add_note(user, &draft).await.unwrap();
    assert_eq!(created.id, id);
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/users/{}/notes", user)))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = gateway_for(&server).get_notes(user).await.unwrap_err();
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
    assert!(gateway_for(&server)
        .get_notes(user)
        .await
        .unwrap_err()
        .is_transport());
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Nothing listens on this port.
    let gateway = HttpGateway::with_config(GatewayConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
        slow_request_ms: 10_000,
    });

    let err = gateway.get_notes(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}

#[tokio::test]
async fn test_update_missing_note_maps_to_note_not_found() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();
    let id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path(format!("/users/{}/notes/{}", user, id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .update_note(user, id, &NoteUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoteNotFound(got) if got == id));
}

#[tokio::test]
async fn test_delete_note_sends_delete() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/users/{}/notes/{}", user, id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gateway_for(&server).delete_note(user, id).await.unwrap();
}

#[tokio::test]
async fn test_complete_onboarding_posts_profile() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/users/{}/onboarding/complete", user)))
        .and(body_partial_json(
            serde_json::json!({"remaining_semesters": 4}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Avery",
            "email": "avery@campus.example",
            "university": "Example U",
            "major": "Physics",
            "onboarding_completed": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = unihub_core::OnboardingProfile {
        major: "Physics".to_string(),
        remaining_semesters: 4,
        completed_credits: 90,
        max_credits_per_term: 18,
        ..Default::default()
    };
    let user_profile = gateway_for(&server)
        .complete_onboarding(user, &profile)
        .await
        .unwrap();
    assert!(user_profile.onboarding_completed);
}

#[tokio::test]
async fn test_health_check_degrades_to_false_when_down() {
    let gateway = HttpGateway::with_config(GatewayConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
        slow_request_ms: 10_000,
    });
    assert!(!gateway.health_check().await.unwrap());
}
