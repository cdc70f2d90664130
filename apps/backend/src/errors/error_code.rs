//! Error codes for the pokedeck backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP problem responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Resource belongs to another user
    Forbidden,

    // Request Validation
    /// Deck is not five distinct owned cards
    InvalidDeck,
    /// Caller identity header missing or malformed
    InvalidUserId,
    /// Coin balance would go negative
    InsufficientCoins,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    UserNotFound,
    CardNotFound,
    StatsNotFound,
    AchievementNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    DuplicateUsername,
    DuplicateEmail,
    /// User already received a starter deck
    StarterDeckExists,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Starter-deck sampling exhausted its retry budget
    StarterGenerationFailed,
    /// Species catalog unavailable
    CatalogUnavailable,
    /// Request cancelled or past its deadline
    Cancelled,

    // Database Constraint Violations
    UniqueViolation,
    FkViolation,
    CheckViolation,
    RecordNotFound,

    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Canonical wire string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidDeck => "INVALID_DECK",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InsufficientCoins => "INSUFFICIENT_COINS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::StatsNotFound => "STATS_NOT_FOUND",
            Self::AchievementNotFound => "ACHIEVEMENT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::StarterDeckExists => "STARTER_DECK_EXISTS",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::StarterGenerationFailed => "STARTER_GENERATION_FAILED",
            Self::CatalogUnavailable => "CATALOG_UNAVAILABLE",
            Self::Cancelled => "CANCELLED",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
