//! SeaORM adapter for the card store - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::player_cards;
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::{CardCreate, CardUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, sea_orm::DbErr> {
    serde_json::to_value(value).map_err(|e| sea_orm::DbErr::Json(e.to_string()))
}

/// Apply an update guarded by `lock_version`, bump the version, then refetch.
///
/// Zero rows affected means either the card is gone (`RecordNotFound`) or the
/// version moved (`OPTIMISTIC_LOCK:` payload).
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<player_cards::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(
        sea_orm::UpdateMany<player_cards::Entity>,
    ) -> sea_orm::UpdateMany<player_cards::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(player_cards::Entity::update_many())
        .col_expr(player_cards::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            player_cards::Column::LockVersion,
            Expr::col(player_cards::Column::LockVersion).add(1),
        )
        .filter(player_cards::Column::Id.eq(id))
        .filter(player_cards::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match player_cards::Entity::find_by_id(id).one(conn).await? {
            Some(card) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, card.lock_version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound(format!("card {id}"))),
        };
    }

    player_cards::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("card {id}")))
}

pub async fn create_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CardCreate,
) -> Result<player_cards::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let card_active = player_cards::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        pokemon_name: Set(dto.pokemon_name),
        level: Set(dto.level),
        xp: Set(dto.xp),
        base_hp: Set(dto.base.hp),
        base_attack: Set(dto.base.attack),
        base_defense: Set(dto.base.defense),
        base_speed: Set(dto.base.speed),
        types: Set(to_json(&dto.types)?),
        moves: Set(to_json(&dto.moves)?),
        sprite: Set(dto.sprite),
        is_legendary: Set(dto.is_legendary),
        is_mythical: Set(dto.is_mythical),
        in_deck: Set(dto.deck_position.is_some()),
        deck_position: Set(dto.deck_position),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    card_active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Option<player_cards::Model>, sea_orm::DbErr> {
    player_cards::Entity::find_by_id(card_id).one(conn).await
}

/// Newest first; id breaks ties between cards created in the same instant.
pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<player_cards::Model>, sea_orm::DbErr> {
    player_cards::Entity::find()
        .filter(player_cards::Column::UserId.eq(user_id))
        .order_by_desc(player_cards::Column::CreatedAt)
        .order_by_desc(player_cards::Column::Id)
        .all(conn)
        .await
}

pub async fn find_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<player_cards::Model>, sea_orm::DbErr> {
    player_cards::Entity::find()
        .filter(player_cards::Column::UserId.eq(user_id))
        .filter(player_cards::Column::InDeck.eq(true))
        .order_by_asc(player_cards::Column::DeckPosition)
        .all(conn)
        .await
}

pub async fn count_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    player_cards::Entity::find()
        .filter(player_cards::Column::UserId.eq(user_id))
        .count(conn)
        .await
}

pub async fn count_legendary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    player_cards::Entity::find()
        .filter(player_cards::Column::UserId.eq(user_id))
        .filter(player_cards::Column::IsLegendary.eq(true))
        .count(conn)
        .await
}

pub async fn count_mythical<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    player_cards::Entity::find()
        .filter(player_cards::Column::UserId.eq(user_id))
        .filter(player_cards::Column::IsMythical.eq(true))
        .count(conn)
        .await
}

/// Highest card level the user owns; `None` when they own no cards.
pub async fn max_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<i32>, sea_orm::DbErr> {
    let row: Option<Option<i32>> = player_cards::Entity::find()
        .select_only()
        .column_as(player_cards::Column::Level.max(), "max_level")
        .filter(player_cards::Column::UserId.eq(user_id))
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?;
    Ok(row.flatten())
}

/// Take every card of `user_id` out of the deck. Returns rows affected.
pub async fn clear_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = player_cards::Entity::update_many()
        .col_expr(player_cards::Column::InDeck, Expr::val(false).into())
        .col_expr(
            player_cards::Column::DeckPosition,
            Expr::val(Option::<i16>::None).into(),
        )
        .col_expr(
            player_cards::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(player_cards::Column::UserId.eq(user_id))
        .filter(player_cards::Column::InDeck.eq(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Put one card in a deck slot, filtered by owner. Returns rows affected
/// (0 when the card is missing or belongs to someone else).
pub async fn assign_deck_slot<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    card_id: i64,
    position: i16,
) -> Result<u64, sea_orm::DbErr> {
    let result = player_cards::Entity::update_many()
        .col_expr(player_cards::Column::InDeck, Expr::val(true).into())
        .col_expr(player_cards::Column::DeckPosition, Expr::val(position).into())
        .col_expr(
            player_cards::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(player_cards::Column::Id.eq(card_id))
        .filter(player_cards::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Write a new `(level, xp)` if nobody else touched the card since it was read.
pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
    expected_lock_version: i32,
    level: i32,
    xp: i32,
) -> Result<player_cards::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, card_id, expected_lock_version, |q| {
        q.col_expr(player_cards::Column::Level, Expr::val(level).into())
            .col_expr(player_cards::Column::Xp, Expr::val(xp).into())
    })
    .await
}

pub async fn update_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CardUpdate,
) -> Result<player_cards::Model, sea_orm::DbErr> {
    let CardUpdate {
        id,
        expected_lock_version,
        pokemon_name,
        level,
        xp,
        sprite,
    } = dto;
    optimistic_update_then_fetch(conn, id, expected_lock_version, move |q| {
        q.col_expr(player_cards::Column::PokemonName, Expr::val(pokemon_name).into())
            .col_expr(player_cards::Column::Level, Expr::val(level).into())
            .col_expr(player_cards::Column::Xp, Expr::val(xp).into())
            .col_expr(player_cards::Column::Sprite, Expr::val(sprite).into())
    })
    .await
}

pub async fn delete_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = player_cards::Entity::delete_by_id(card_id).exec(conn).await?;
    Ok(result.rows_affected)
}
