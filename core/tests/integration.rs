//! Users API checks against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and talks to it over
//! real HTTP through `ReqwestTransport`, the same way a suite would talk to a
//! deployed API. Writes on the server are faked, so tests do not depend on
//! each other.

use exchange_core::{
    attempt, users, ExpectedResponse, Outcome, OutcomeKind, Request, ReqwestTransport, TransportConfig,
    User,
};

async fn start_server() -> ReqwestTransport {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));

    let config = TransportConfig::default()
        .with_base_url(&format!("http://{addr}"))
        .unwrap();
    ReqwestTransport::new(config).unwrap()
}

#[tokio::test]
async fn list() {
    let api = start_server().await;
    let users = attempt(&api, users::list()).expect(&users::list_ok()).await.unwrap();
    assert_eq!(users.len(), 10);
}

#[tokio::test]
async fn add() {
    let api = start_server().await;
    let user = User::fixture(1);
    let created = attempt(&api, users::add(&user).unwrap())
        .expect(&users::add_ok())
        .await
        .unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.name, user.name);
}

#[tokio::test]
async fn find_ok() {
    let api = start_server().await;
    let user = attempt(&api, users::find(1)).expect(&users::find_ok()).await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.company.name, "Romaguera-Crona");
}

#[tokio::test]
async fn find_not_found() {
    let api = start_server().await;
    attempt(&api, users::find(11))
        .expect(&users::find_not_found())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_ok() {
    let api = start_server().await;
    let user = User::fixture(1);
    let updated = attempt(&api, users::update(1, &user).unwrap())
        .expect(&users::update_ok())
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
}

#[tokio::test]
async fn update_not_found() {
    let api = start_server().await;
    let user = User::fixture(1);
    attempt(&api, users::update(11, &user).unwrap())
        .expect(&users::update_not_found())
        .await
        .unwrap();
}

#[tokio::test]
async fn remove_ok() {
    let api = start_server().await;
    attempt(&api, users::remove(10)).expect(&users::remove_ok()).await.unwrap();
}

#[tokio::test]
async fn remove_not_found() {
    let api = start_server().await;
    attempt(&api, users::remove(11))
        .expect(&users::remove_not_found())
        .await
        .unwrap();
}

#[tokio::test]
async fn health_matches_text_pattern() {
    let api = start_server().await;
    let text = attempt(&api, users::health()).expect(&users::health_ok()).await.unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn wrong_status_report_shows_response() {
    let api = start_server().await;
    let user = User::fixture(2);
    let failure = attempt(&api, users::update(11, &user).unwrap())
        .expect(&users::update_ok())
        .await
        .unwrap_err();

    assert_eq!(failure.kind, OutcomeKind::WrongStatus);
    let report = failure.report;
    assert!(report.contains("Expected status: 200\nActual status: 404"), "{report}");
    assert!(report.contains("# REQUEST\nPUT /users/11\nOptions:"), "{report}");
    assert!(report.contains(&format!("\"username\": \"{}\"", user.username)), "{report}");
    assert!(report.contains("# RESPONSE\nUrl: http://127.0.0.1:"), "{report}");
    assert!(report.contains("Body:\n===\n\n==="), "{report}");
}

#[tokio::test]
async fn broken_body_is_invalid() {
    let api = start_server().await;
    let failure = attempt(&api, Request::get("/broken"))
        .expect(&ExpectedResponse::<serde_json::Value>::json(200))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, OutcomeKind::InvalidBody);
    assert!(failure.report.contains("- Body was not JSON"), "{}", failure.report);
    assert!(failure.report.contains("Body:\n===\nnot json\n==="), "{}", failure.report);
    assert!(
        failure.report.contains("\"content-type\": \"application/json\""),
        "{}",
        failure.report
    );
}

#[tokio::test]
async fn closed_port_is_no_response() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = TransportConfig::default()
        .with_base_url(&format!("http://{addr}"))
        .unwrap();
    let api = ReqwestTransport::new(config).unwrap();

    let outcome = attempt(&api, users::list()).outcome(&users::list_ok()).await;

    assert_eq!(outcome.kind(), OutcomeKind::NoResponse);
    let failure = outcome.into_result().unwrap_err();
    assert!(failure.report.contains("NoResponse: No Response was received"));
    assert!(failure.report.ends_with("# RESPONSE\nNo Response was received"));
}

#[tokio::test]
async fn query_params_are_sent() {
    let api = start_server().await;
    let outcome = attempt(&api, users::list().with_param("username", "Bret"))
        .outcome(&users::list_ok())
        .await;

    match outcome {
        Outcome::Valid { response, .. } => {
            assert!(response.head.url.ends_with("/users?username=Bret"), "{}", response.head.url);
            assert_eq!(response.body.len(), 10);
        }
        other => panic!("expected Valid, got {:?}", other.kind()),
    }
}
