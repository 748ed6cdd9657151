use clubdesk_client::{
    ClubData, ClubSnapshot, GatewayError, InsightsClient, InsightsConfig, SheetGateway,
    INSIGHTS_PLACEHOLDER,
};
use clubdesk_core::{AttendanceRecord, Category, Member, PaymentStatus, Role};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> SheetGateway {
    SheetGateway::new(
        server.uri(),
        Some("admin@club.com".to_string()),
        Duration::from_secs(5),
    )
}

fn sample_member(id: &str) -> Member {
    Member {
        id: id.to_string(),
        first_name: "Lionel".to_string(),
        last_name: "Paz".to_string(),
        category: Category::Decima,
        guardian_name: "Marta Paz".to_string(),
        guardian_phone: "3815550000".to_string(),
        active: true,
        enrolled_at: None,
    }
}

#[tokio::test]
async fn reads_issue_get_with_action_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("action", "obtain-members"))
        .and(query_param("userToken", "admin@club.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_member("member-1")])))
        .expect(1)
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    let members = data.list_members().await;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "member-1");
}

#[tokio::test]
async fn save_then_list_round_trips_one_member() {
    let server = MockServer::start().await;
    let member = sample_member("member-77");

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "save-member",
            "userToken": "admin@club.com",
            "id": "member-77",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("action", "obtain-members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([member])))
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    let id = data.save_member(&member).await.unwrap();
    assert_eq!(id, "member-77");

    let listed = data.list_members().await;
    let matches: Vec<_> = listed.iter().filter(|m| m.id == id).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(*matches[0], member);
}

#[tokio::test]
async fn save_without_id_mints_one_and_sends_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    let mut member = sample_member("");
    member.id.clear();
    let id = data.save_member(&member).await.unwrap();
    assert!(id.starts_with("member-"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["data"]["id"], json!(id));
}

#[tokio::test]
async fn delete_goes_through_delete_row_with_sheet() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "delete-row",
            "sheet": "Socios",
            "id": "member-1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    data.delete_member("member-1").await.unwrap();
}

#[tokio::test]
async fn status_update_carries_estado() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "update-payment-status",
            "id": "payment-3",
            "estado": "PAID",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    data.set_payment_status("payment-3", PaymentStatus::Paid)
        .await
        .unwrap();
}

#[tokio::test]
async fn attendance_batch_posts_exactly_the_roster() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "save-attendance"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let roster = vec![
        AttendanceRecord::mark("member-1", "2025-03-10", Category::Decima.label(), true),
        AttendanceRecord::mark("member-2", "2025-03-10", Category::Decima.label(), false),
    ];
    let data = ClubData::new(gateway(&server));
    data.save_attendance_batch(&roster).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let batch = body["data"].as_array().unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0]["memberId"], json!("member-1"));
    assert_eq!(batch[1]["present"], json!(false));
    // Batches have no top-level id to lift.
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn failed_read_degrades_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    assert!(data.list_members().await.is_empty());
    assert!(data.list_payments().await.is_empty());
}

#[tokio::test]
async fn non_json_read_body_degrades_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>redirect</html>"))
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    assert!(data.list_events().await.is_empty());
}

#[tokio::test]
async fn drifted_rows_are_skipped_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sample_member("member-1"),
            {"id": "member-2", "firstName": "Bad", "lastName": "Row", "category": "Juveniles"},
        ])))
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    let members = data.list_members().await;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "member-1");
}

#[tokio::test]
async fn write_failure_is_an_error_not_a_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "read only"})))
        .mount(&server)
        .await;

    let data = ClubData::new(gateway(&server));
    let err = data.save_member(&sample_member("member-1")).await.unwrap_err();
    match err {
        GatewayError::Status {
            status, message, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "read only");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn read_without_token_is_missing_token() {
    let server = MockServer::start().await;
    let gateway = SheetGateway::new(server.uri(), None, Duration::from_secs(5));
    let err = gateway.invoke("obtain-members", None).await.unwrap_err();
    assert!(matches!(err, GatewayError::MissingToken));
}

#[tokio::test]
async fn validate_user_substitutes_candidate_email() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("action", "validate-user"))
        .and(query_param("userToken", "coach@club.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"autorizado": true, "rol": "staff"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // No session token at all: the candidate email rides in its place.
    let gateway = SheetGateway::new(server.uri(), None, Duration::from_secs(5));
    let validation = gateway.validate_user("coach@club.com").await.unwrap();
    assert!(validation.autorizado);
    assert_eq!(validation.rol, Some(Role::Staff));
}

#[tokio::test]
async fn validate_user_denies_on_malformed_answer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let gateway = SheetGateway::new(server.uri(), None, Duration::from_secs(5));
    let validation = gateway.validate_user("who@club.com").await.unwrap();
    assert!(!validation.autorizado);
    assert_eq!(validation.rol, None);
}

fn snapshot() -> ClubSnapshot {
    ClubSnapshot {
        club_name: "Famaillá IF".to_string(),
        member_count: 42,
        overdue_count: 7,
        total_collected: 357_000.0,
    }
}

#[tokio::test]
async fn insights_parses_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Solid month."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = InsightsClient::new(InsightsConfig {
        base_url: server.uri(),
        model: "gemini-1.5-flash".to_string(),
        api_key: "test-key".to_string(),
    });
    assert_eq!(client.summary_or_placeholder(&snapshot()).await, "Solid month.");
}

#[tokio::test]
async fn insights_failure_degrades_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = InsightsClient::new(InsightsConfig {
        base_url: server.uri(),
        model: "gemini-1.5-flash".to_string(),
        api_key: "test-key".to_string(),
    });
    assert_eq!(
        client.summary_or_placeholder(&snapshot()).await,
        INSIGHTS_PLACEHOLDER
    );
}

#[tokio::test]
async fn missing_api_key_never_calls_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = InsightsClient::new(InsightsConfig {
        base_url: server.uri(),
        model: "gemini-1.5-flash".to_string(),
        api_key: "  ".to_string(),
    });
    assert_eq!(
        client.summary_or_placeholder(&snapshot()).await,
        INSIGHTS_PLACEHOLDER
    );
}
