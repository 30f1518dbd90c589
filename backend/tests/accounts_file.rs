//! Loading the account directory from disk and authenticating against it.

// The shared harness carries helpers only the ownership suite uses.
#[allow(dead_code)]
mod support;

use std::io::Write as _;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use backend::outbound::memory::{AccountSeedError, MemoryAccountDirectory};
use rstest::rstest;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

use support::{app, state};

fn accounts_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write accounts");
    file
}

#[rstest]
#[actix_web::test]
async fn users_from_the_accounts_file_can_log_in() {
    let file = accounts_file(
        r#"{
            "users": [{"username": "carol", "password": "hunter2"}],
            "groups": [{"id": 7, "name": "staff"}]
        }"#,
    );
    let directory = MemoryAccountDirectory::load(file.path()).expect("accounts load");
    let app = actix_test::init_service(app(state(directory))).await;

    let login = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api-auth/login/")
            .set_json(json!({"username": "carol", "password": "hunter2"}))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/groups/7/").to_request()).await;
    let group: Value = actix_test::read_body_json(res).await;
    assert_eq!(group["name"], "staff");
}

#[rstest]
#[case(r#"{"users": [{"username": "a", "password": ""}]}"#)]
#[case(r#"{"users": [{"username": "a", "password": "x"}, {"username": "a", "password": "y"}]}"#)]
#[case(r#"{"groups": [{"id": 1, "name": "x"}, {"id": 1, "name": "y"}]}"#)]
#[case(r#"{"admins": []}"#)]
fn invalid_documents_are_rejected(#[case] contents: &str) {
    let file = accounts_file(contents);
    let err = MemoryAccountDirectory::load(file.path()).expect_err("invalid document");
    assert!(
        matches!(
            err,
            AccountSeedError::EmptyPassword(_)
                | AccountSeedError::DuplicateUsername(_)
                | AccountSeedError::DuplicateGroup(_)
                | AccountSeedError::Parse(_)
        ),
        "{err}"
    );
}

#[rstest]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("accounts.json");
    let err = MemoryAccountDirectory::load(&path).expect_err("missing file");
    assert!(matches!(err, AccountSeedError::Read { .. }));
    assert!(err.to_string().contains("accounts.json"));
}
