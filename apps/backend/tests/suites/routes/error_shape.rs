use actix_web::test;
use pokedeck_backend::extractors::current_user::USER_ID_HEADER;
use pokedeck_backend::AppError;

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn malformed_identity_renders_problem_details() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/cards")
        .insert_header((USER_ID_HEADER, "not-a-number"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_problem(resp, 400, "INVALID_USER_ID").await;
    assert_eq!(body["title"], "Invalid User Id");
    assert_eq!(body["type"], "https://pokedeck.dev/errors/INVALID_USER_ID");
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
    Ok(())
}

#[actix_web::test]
async fn missing_card_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user = crate::support::factory::create_test_user(state.db(), "ash").await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/cards/987654")
        .insert_header((USER_ID_HEADER, user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, 404, "CARD_NOT_FOUND").await;
    Ok(())
}
