//! Business logic. Services compose repos and return `AppError`.

pub mod achievements;
pub mod cards;
pub mod progression;
pub mod users;

pub use achievements::AchievementService;
pub use cards::CardService;
pub use progression::ProgressionService;
pub use users::UserService;
