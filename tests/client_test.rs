//! HTTP client against a mock CLA backend.

mod common;

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cla_portal::cla::{ClaClient, ClaError, ClaService};
use cla_portal::models::SignatureOutcome;
use common::*;

fn client_for(server: &MockServer) -> ClaClient {
    ClaClient::new(&server.uri(), Duration::from_secs(5)).expect("build client")
}

#[tokio::test]
async fn test_check_and_prepare_posts_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check-prepare-employee-signature"))
        .and(bearer_token(TOKEN))
        .and(body_json(json!({
            "project_id": PROJECT_ID,
            "company_id": COMPANY_ID,
            "user_id": USER_ID
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": {"ccla_approval_list": "No user email authorized for this ccla"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .check_and_prepare_employee_signature(&token(), &request())
        .await
        .expect("outcome");

    assert_eq!(outcome, SignatureOutcome::NotOnApprovalList);
}

#[tokio::test]
async fn test_check_and_prepare_error_shape_with_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check-prepare-employee-signature"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": {"missing_ccla": "Company does not have CCLA with this project"}
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .check_and_prepare_employee_signature(&token(), &request())
        .await
        .expect("outcome");

    assert_eq!(outcome, SignatureOutcome::MissingCcla);
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check-prepare-employee-signature"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .check_and_prepare_employee_signature(&token(), &request())
        .await
        .expect_err("should fail");

    match err {
        ClaError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_project_and_companies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/project/{PROJECT_ID}")))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project_id": PROJECT_ID,
            "project_name": "OpenWidget",
            "logoUrl": "https://cdn.example.org/openwidget.png"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"company_id": "c-acme", "company_name": "Acme Corp", "company_acl": []},
            {"company_id": "c-globex", "company_name": "Globex Corporation"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let project = client.get_project(&token(), PROJECT_ID).await.expect("project");
    assert_eq!(project.project_name, "OpenWidget");
    assert_eq!(project.logo_url, "https://cdn.example.org/openwidget.png");

    let companies = client.list_companies(&token()).await.expect("companies");
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].company_name, "Acme Corp");
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/project/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_project(&token(), "nope")
        .await
        .expect_err("should fail");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_company_project_signatures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/signatures/company/{COMPANY_ID}/project/{PROJECT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCount": 1,
            "signatures": [{
                "signatureID": "ccla-1",
                "signatureType": "ccla",
                "signatureSigned": true,
                "signatureApproved": true,
                "emailWhitelist": ["b@acme.example", "a@acme.example"]
            }]
        })))
        .mount(&server)
        .await;

    let signatures = client_for(&server)
        .get_company_project_signatures(&token(), COMPANY_ID, PROJECT_ID)
        .await
        .expect("signatures");
    assert_eq!(signatures.result_count, 1);
    let sig = signatures.into_ccla().expect("ccla");
    assert!(sig.signature_signed);
    assert_eq!(sig.emails().len(), 2);
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/user/gerrit"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .post_or_get_user_for_gerrit(&token())
        .await
        .expect_err("should fail");
    assert!(matches!(err, ClaError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = ClaClient::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("client");
    let err = client.list_companies(&token()).await.expect_err("should fail");
    assert!(matches!(err, ClaError::Transport(_)));
}
