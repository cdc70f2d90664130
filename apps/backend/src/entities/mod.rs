pub mod achievements;
pub mod battle_history;
pub mod player_cards;
pub mod player_stats;
pub mod user_achievements;
pub mod users;

pub use achievements::Entity as Achievements;
pub use achievements::Model as Achievement;
pub use battle_history::Entity as BattleHistory;
pub use battle_history::Model as BattleRecord;
pub use player_cards::Entity as PlayerCards;
pub use player_cards::Model as PlayerCard;
pub use player_stats::Entity as PlayerStats;
pub use player_stats::Model as PlayerStat;
pub use user_achievements::Entity as UserAchievements;
pub use user_achievements::Model as UserAchievement;
pub use users::Entity as Users;
pub use users::Model as User;
