use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::infra::cancel::guarded;
use crate::services::achievements::AchievementService;
use crate::services::progression::{BattleOutcome, ProgressionService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

/// POST /api/battles
async fn record_battle(
    current_user: CurrentUser,
    body: web::Json<BattleOutcome>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let outcome = body.into_inner();

    let report = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        with_txn(&app_state, move |txn| async move {
            ProgressionService::new()
                .record_battle_outcome(txn.as_ref(), user_id, outcome)
                .await
        }),
    )
    .await?;

    Ok(HttpResponse::Created().json(report))
}

/// GET /api/battles?limit=n
async fn list_battles(
    current_user: CurrentUser,
    query: web::Query<HistoryQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let history = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        ProgressionService::new().get_history(app_state.db(), current_user.id, query.limit),
    )
    .await?;

    Ok(HttpResponse::Ok().json(history))
}

/// GET /api/stats
async fn get_stats(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let stats = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        ProgressionService::new().get_stats(app_state.db(), current_user.id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// GET /api/achievements
async fn list_achievements(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let achievements = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        AchievementService::new().get_achievements(app_state.db(), current_user.id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(achievements))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/battles", web::post().to(record_battle))
        .route("/battles", web::get().to(list_battles))
        .route("/stats", web::get().to(get_stats))
        .route("/achievements", web::get().to(list_achievements));
}
