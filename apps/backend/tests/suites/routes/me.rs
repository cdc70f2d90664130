use actix_web::test;
use pokedeck_backend::extractors::current_user::USER_ID_HEADER;
use pokedeck_backend::AppError;

use crate::common::{assert_problem, body_json};
use crate::support::app_builder::create_test_app;
use crate::support::factory::create_test_user;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn me_returns_caller_without_password_hash() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user = create_test_user(state.db(), "ash").await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header((USER_ID_HEADER, user.id.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["id"], user.id);
    assert_eq!(body["username"], user.username.as_str());
    assert!(body.get("password_hash").is_none());
    Ok(())
}

#[actix_web::test]
async fn me_without_identity_is_unauthorized() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, 401, "UNAUTHORIZED").await;
    Ok(())
}

#[actix_web::test]
async fn me_for_unknown_user_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header((USER_ID_HEADER, "424242"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, 404, "USER_NOT_FOUND").await;
    Ok(())
}
