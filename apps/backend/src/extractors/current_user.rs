use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Header carrying the authenticated user id, set by the credential gateway.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated caller. Credentials were checked upstream; the core only
/// trusts the id the gateway forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

fn parse_user_id(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(AppError::unauthorized)?;

    let id = raw
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            debug!("rejecting malformed user id header");
            AppError::bad_request(ErrorCode::InvalidUserId, "X-User-Id must be a positive integer")
        })?;

    Ok(CurrentUser { id })
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_user_id(req))
    }
}
