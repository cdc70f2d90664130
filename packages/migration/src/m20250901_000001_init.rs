use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Coins,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlayerCards {
    Table,
    Id,
    UserId,
    PokemonName,
    Level,
    Xp,
    BaseHp,
    BaseAttack,
    BaseDefense,
    BaseSpeed,
    Types,
    Moves,
    Sprite,
    IsLegendary,
    IsMythical,
    InDeck,
    DeckPosition,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlayerStats {
    Table,
    UserId,
    #[iden = "total_battles_1v1"]
    TotalBattles1v1,
    #[iden = "wins_1v1"]
    Wins1v1,
    #[iden = "losses_1v1"]
    Losses1v1,
    #[iden = "total_battles_5v5"]
    TotalBattles5v5,
    #[iden = "wins_5v5"]
    Wins5v5,
    #[iden = "losses_5v5"]
    Losses5v5,
    TotalCoinsEarned,
    HighestLevel,
    UpdatedAt,
}

#[derive(Iden)]
enum BattleHistory {
    Table,
    Id,
    UserId,
    Mode,
    Result,
    CoinsEarned,
    Duration,
    CreatedAt,
}

#[derive(Iden)]
enum Achievements {
    Table,
    Id,
    Name,
    Description,
    Icon,
    RequirementType,
    RequirementValue,
}

#[derive(Iden)]
enum UserAchievements {
    Table,
    UserId,
    AchievementId,
    UnlockedAt,
}

fn counter(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .default(0)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Coins)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Users::Coins).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Case-sensitive uniqueness on both login keys
        manager
            .create_index(
                Index::create()
                    .name("ux_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // player_cards
        manager
            .create_table(
                Table::create()
                    .table(PlayerCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerCards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(PlayerCards::UserId).big_integer().not_null())
                    .col(ColumnDef::new(PlayerCards::PokemonName).string().not_null())
                    .col(
                        ColumnDef::new(PlayerCards::Level)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(PlayerCards::Level).between(1, 50)),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::Xp)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(PlayerCards::Xp).gte(0)),
                    )
                    .col(ColumnDef::new(PlayerCards::BaseHp).integer().not_null())
                    .col(ColumnDef::new(PlayerCards::BaseAttack).integer().not_null())
                    .col(ColumnDef::new(PlayerCards::BaseDefense).integer().not_null())
                    .col(ColumnDef::new(PlayerCards::BaseSpeed).integer().not_null())
                    .col(ColumnDef::new(PlayerCards::Types).json_binary().not_null())
                    .col(ColumnDef::new(PlayerCards::Moves).json_binary().not_null())
                    .col(ColumnDef::new(PlayerCards::Sprite).string().not_null())
                    .col(
                        ColumnDef::new(PlayerCards::IsLegendary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::IsMythical)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::InDeck)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::DeckPosition)
                            .small_integer()
                            .null()
                            .check(Expr::col(PlayerCards::DeckPosition).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_cards_user_id")
                            .from(PlayerCards::Table, PlayerCards::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_player_cards_user_id")
                    .table(PlayerCards::Table)
                    .col(PlayerCards::UserId)
                    .to_owned(),
            )
            .await?;

        // NULL positions never collide, so only in-deck cards are constrained
        manager
            .create_index(
                Index::create()
                    .name("ux_player_cards_user_deck_position")
                    .table(PlayerCards::Table)
                    .col(PlayerCards::UserId)
                    .col(PlayerCards::DeckPosition)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // player_stats
        manager
            .create_table(
                Table::create()
                    .table(PlayerStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerStats::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(counter(PlayerStats::TotalBattles1v1))
                    .col(counter(PlayerStats::Wins1v1))
                    .col(counter(PlayerStats::Losses1v1))
                    .col(counter(PlayerStats::TotalBattles5v5))
                    .col(counter(PlayerStats::Wins5v5))
                    .col(counter(PlayerStats::Losses5v5))
                    .col(counter(PlayerStats::TotalCoinsEarned))
                    .col(
                        ColumnDef::new(PlayerStats::HighestLevel)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PlayerStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_stats_user_id")
                            .from(PlayerStats::Table, PlayerStats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // battle_history
        manager
            .create_table(
                Table::create()
                    .table(BattleHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BattleHistory::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(BattleHistory::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BattleHistory::Mode)
                            .string_len(8)
                            .not_null()
                            .check(Expr::col(BattleHistory::Mode).is_in(["1v1", "5v5"])),
                    )
                    .col(
                        ColumnDef::new(BattleHistory::Result)
                            .string_len(8)
                            .not_null()
                            .check(Expr::col(BattleHistory::Result).is_in(["win", "loss", "draw"])),
                    )
                    .col(
                        ColumnDef::new(BattleHistory::CoinsEarned)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BattleHistory::Duration)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BattleHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_battle_history_user_id")
                            .from(BattleHistory::Table, BattleHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_battle_history_user_created")
                    .table(BattleHistory::Table)
                    .col(BattleHistory::UserId)
                    .col(BattleHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // achievements (catalog)
        manager
            .create_table(
                Table::create()
                    .table(Achievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Achievements::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Achievements::Name).string().not_null())
                    .col(ColumnDef::new(Achievements::Description).text().not_null())
                    .col(ColumnDef::new(Achievements::Icon).string().not_null())
                    .col(
                        ColumnDef::new(Achievements::RequirementType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Achievements::RequirementValue)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_achievements_name")
                    .table(Achievements::Table)
                    .col(Achievements::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // user_achievements
        manager
            .create_table(
                Table::create()
                    .table(UserAchievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAchievements::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::AchievementId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::UnlockedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_user_achievements")
                            .col(UserAchievements::UserId)
                            .col(UserAchievements::AchievementId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievements_user_id")
                            .from(UserAchievements::Table, UserAchievements::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievements_achievement_id")
                            .from(UserAchievements::Table, UserAchievements::AchievementId)
                            .to(Achievements::Table, Achievements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // reverse dependency order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(UserAchievements::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Achievements::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BattleHistory::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerStats::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerCards::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
