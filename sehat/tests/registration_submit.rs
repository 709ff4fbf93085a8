use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sehat::config::WizardConfig;
use sehat::notify::{NoticeLevel, Route};
use sehat::registration::{
    AccountType, BasicIdentity, Gender, RegistrationAction, RegistrationClient, RegistrationManager,
    SecondaryProfile, Step,
};
use sehat::ApiClient;

fn manager_for(base_url: &str) -> RegistrationManager {
    let client = RegistrationClient::new(ApiClient::from_base_url(base_url));
    RegistrationManager::new(client, &WizardConfig { animate: false, transition_ms: 0 })
}

/// Fill both steps for a patient and land on the review step.
async fn walk_to_review(manager: &mut RegistrationManager) {
    let basic = BasicIdentity {
        account_type: AccountType::Patient,
        first_name: "Ann".to_string(),
        last_name: None,
        phone: "1234567890".to_string(),
        email: "a@b.com".to_string(),
        password: "pw123456".to_string(),
        password_confirmation: "pw123456".to_string(),
    };
    let mut profile = SecondaryProfile::default();
    profile.address.street = "12 MG Road".to_string();
    profile.address.city = "Pune".to_string();
    profile.address.state = "Maharashtra".to_string();
    profile.address.postal_code = "411001".to_string();
    profile.gender = Some(Gender::Female);
    profile.date_of_birth = NaiveDate::from_ymd_opt(1990, 4, 12);

    manager.dispatch(RegistrationAction::UpdateBasic { data: basic });
    manager.dispatch(RegistrationAction::Advance);
    manager.dispatch(RegistrationAction::UpdateSecondary { data: profile });
    manager.dispatch(RegistrationAction::Advance);
    manager.run_pending().await;

    assert_eq!(manager.context().current_step(), Step::Review);
}

#[tokio::test]
async fn test_successful_registration_navigates_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_partial_json(json!({
            "type": "user",
            "name": "Ann",
            "phone": "1234567890",
            "email": "a@b.com",
            "address": {"street": "12 MG Road", "postalCode": "411001"},
            "gender": "Female",
            "dob": "1990-04-12"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    walk_to_review(&mut manager).await;

    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    let notices = manager.drain_notifications();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Registration successful");
    assert_eq!(manager.take_navigation(), Some(Route::Login));

    // Wizard discarded
    assert_eq!(manager.context().current_step(), Step::Basic);
    assert_eq!(manager.context().basic(), &BasicIdentity::default());
    assert!(manager.submit_control().enabled);
}

#[tokio::test]
async fn test_confirmation_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    walk_to_review(&mut manager).await;
    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("confirmPassword").is_none());
    assert_eq!(body["password"], "pw123456");

    // Empty 2xx body still counts as success
    assert_eq!(manager.take_navigation(), Some(Route::Login));
}

#[tokio::test]
async fn test_server_message_becomes_warning() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    walk_to_review(&mut manager).await;
    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    let notices = manager.drain_notifications();
    assert_eq!(notices[0].level, NoticeLevel::Warn);
    assert_eq!(notices[0].message, "Email already registered");
    assert!(manager.take_navigation().is_none());
    assert_eq!(manager.context().current_step(), Step::Review);
}

#[tokio::test]
async fn test_nested_error_message_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": {"message": "Phone in use"}})),
        )
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    walk_to_review(&mut manager).await;
    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    assert_eq!(manager.drain_notifications()[0].message, "Phone in use");
}

#[tokio::test]
async fn test_unstructured_failure_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    walk_to_review(&mut manager).await;
    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    let notices = manager.drain_notifications();
    assert_eq!(notices[0].level, NoticeLevel::Warn);
    assert_eq!(notices[0].message, "An error occurred. Please try again.");
}

#[tokio::test]
async fn test_network_drop_reports_connectivity() {
    // Nothing listens on the discard port.
    let mut manager = manager_for("http://127.0.0.1:9");
    walk_to_review(&mut manager).await;

    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    let notices = manager.drain_notifications();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Error connecting to the server");
    assert!(manager.take_navigation().is_none());
    assert_eq!(manager.context().current_step(), Step::Review);
    assert!(manager.submit_control().enabled);
}

#[tokio::test]
async fn test_double_submit_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    walk_to_review(&mut manager).await;

    manager.dispatch(RegistrationAction::Submit);
    assert_eq!(manager.submit_control().label, "Registering");
    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;

    assert_eq!(manager.take_navigation(), Some(Route::Login));
}
