use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::infra::cancel::guarded;
use crate::services::cards::CardService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateDeckRequest {
    pub card_ids: Vec<i64>,
}

/// GET /api/cards
async fn list_cards(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cards = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        CardService::new().get_user_cards(app_state.db(), current_user.id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(cards))
}

/// GET /api/cards/{id}
async fn get_card(
    current_user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let card_id = path.into_inner();
    let detail = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        CardService::new().get_card_detail(app_state.db(), current_user.id, card_id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// GET /api/deck
async fn get_deck(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        CardService::new().get_user_deck(app_state.db(), current_user.id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(deck))
}

/// PUT /api/deck
async fn update_deck(
    current_user: CurrentUser,
    body: web::Json<UpdateDeckRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let card_ids = body.into_inner().card_ids;

    let deck = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        with_txn(&app_state, move |txn| async move {
            CardService::new()
                .update_deck(txn.as_ref(), user_id, &card_ids)
                .await
        }),
    )
    .await?;

    Ok(HttpResponse::Ok().json(deck))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cards", web::get().to(list_cards))
        .route("/cards/{card_id}", web::get().to(get_card))
        .route("/deck", web::get().to(get_deck))
        .route("/deck", web::put().to(update_deck));
}
