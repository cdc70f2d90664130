//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::users_sea::{self as users_adapter, UserCreate};
use crate::errors::domain::{DomainError, NotFoundKind};

/// User domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub coins: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

fn user_not_found(user_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::User, format!("user {user_id} not found"))
}

/// Insert with `coins = 0`. Duplicate username/email surface as conflicts.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, DomainError> {
    let user =
        users_adapter::create_user(conn, UserCreate::new(username, email, password_hash)).await?;
    Ok(User::from(user))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn get_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))
}

pub async fn find_user_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_username(conn, username).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

/// Advisory only; insert-time uniqueness is what actually holds.
pub async fn username_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<bool, DomainError> {
    Ok(users_adapter::username_exists(conn, username).await?)
}

pub async fn email_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<bool, DomainError> {
    Ok(users_adapter::email_exists(conn, email).await?)
}

pub async fn update_coins<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    coins: i64,
) -> Result<(), DomainError> {
    match users_adapter::set_coins(conn, user_id, coins).await? {
        0 => Err(user_not_found(user_id)),
        _ => Ok(()),
    }
}

/// Atomic increment; `amount` may be negative but the balance stays >= 0.
pub async fn add_coins<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
) -> Result<(), DomainError> {
    match users_adapter::add_coins(conn, user_id, amount).await? {
        0 => Err(user_not_found(user_id)),
        _ => Ok(()),
    }
}

/// Owned cards, stats, history and unlocks go with the user via FK cascade.
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<(), DomainError> {
    match users_adapter::delete_user(conn, user_id).await? {
        0 => Err(user_not_found(user_id)),
        _ => Ok(()),
    }
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            coins: model.coins,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
