use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::infra::cancel::guarded;
use crate::services::users::UserService;
use crate::state::app_state::AppState;

/// GET /api/me
async fn get_me(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = guarded(
        &app_state.shutdown,
        app_state.config.request_timeout,
        UserService::new().get_current_user(app_state.db(), current_user.id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(get_me));
}
