//! User service: registration, login lookup, account removal.

use rand::Rng;
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use tracing::{debug, info};

use super::cards::{draw_starter_species, CardService};
use crate::catalog::SpeciesCatalog;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::cards::PlayerCard;
use crate::repos::stats;
use crate::repos::users::{self, User};

/// Compares a presented password with a stored hash.
///
/// Hashing lives with the credential gateway; the core only asks yes or no.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUser {
    pub user: User,
    pub starter_deck: Vec<PlayerCard>,
}

async fn ensure_available<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
) -> Result<(), AppError> {
    if users::username_exists(conn, username).await? {
        return Err(
            DomainError::conflict(ConflictKind::UniqueUsername, "Username already taken").into(),
        );
    }
    if users::email_exists(conn, email).await? {
        return Err(
            DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered").into(),
        );
    }
    Ok(())
}

/// User domain service.
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Create the account, its stats row and its starter deck as one unit.
    ///
    /// Starter species are drawn from the catalog before the transaction
    /// opens, so slow catalog calls never hold a pooled connection.
    pub async fn register_user<C, R>(
        &self,
        conn: &C,
        catalog: &dyn SpeciesCatalog,
        rng: &mut R,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<RegisteredUser, AppError>
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync,
        R: Rng + Send,
    {
        // Advisory; the unique indexes still decide at insert time
        ensure_available(conn, username, email).await?;

        let species = draw_starter_species(catalog, rng).await?;

        let txn = conn.begin().await?;
        let user = users::create_user(&txn, username, email, password_hash).await?;
        stats::get_or_create(&txn, user.id).await?;
        let starter_deck = CardService::new()
            .insert_starter_deck(&txn, user.id, species)
            .await?;
        txn.commit().await?;

        info!(user_id = user.id, email = %Redacted(email), "user registered");
        Ok(RegisteredUser { user, starter_deck })
    }

    /// Resolve `login` (username, then email) and check the password.
    ///
    /// Unknown accounts and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        login: &str,
        password: &str,
        verifier: &dyn PasswordVerifier,
    ) -> Result<User, AppError> {
        let user = match users::find_user_by_username(conn, login).await? {
            Some(user) => Some(user),
            None => users::find_user_by_email(conn, login).await?,
        };

        match user {
            Some(user) if verifier.verify(password, &user.password_hash) => {
                debug!(user_id = user.id, "authenticated");
                Ok(user)
            }
            _ => {
                debug!(login = %Redacted(login), "authentication rejected");
                Err(AppError::unauthorized())
            }
        }
    }

    pub async fn get_current_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<User, AppError> {
        Ok(users::get_user(conn, user_id).await?)
    }

    /// Remove the account; cards, stats, history and unlocks cascade.
    pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<(), AppError> {
        users::delete_user(conn, user_id).await?;
        info!(user_id, "user deleted");
        Ok(())
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
