#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Each test owns a private in-memory database, so committing is safe. Flip to
// rollback per binary with `POKEDECK_TXN_POLICY=rollback`.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("POKEDECK_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => pokedeck_backend::db::txn_policy::TxnPolicy::RollbackOnOk,
        _ => pokedeck_backend::db::txn_policy::TxnPolicy::CommitOnOk,
    };

    pokedeck_backend::db::txn_policy::set_txn_policy(policy);
}

/// Read a response body as JSON.
pub async fn body_json(resp: ServiceResponse<BoxBody>) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert a problem+json error with the given HTTP status and `code`.
pub async fn assert_problem(resp: ServiceResponse<BoxBody>, status: u16, code: &str) -> Value {
    assert_eq!(resp.status().as_u16(), status, "unexpected status");
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    let body = body_json(resp).await;
    assert_eq!(body["code"], code, "problem body: {body}");
    assert_eq!(body["status"], status);
    body
}
