use pokedeck_backend::adapters::achievements_sea::{self, AchievementCreate};
use pokedeck_backend::domain::achievements::default_catalog;
use pokedeck_backend::AppError;

use crate::support::factory::create_test_user;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn seeded_catalog_is_present_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    let all = achievements_sea::list_all(db).await?;
    assert_eq!(all.len(), default_catalog().len());

    let again = achievements_sea::insert_if_absent(
        db,
        AchievementCreate::new("First Victory", "total_wins", 1),
    )
    .await?;
    assert_eq!(again, 0);
    Ok(())
}

#[tokio::test]
async fn unlock_is_recorded_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let achievement = achievements_sea::create(
        db,
        AchievementCreate::new("Test Badge", "total_wins", 3)
            .with_description("three wins")
            .with_icon("badge"),
    )
    .await?;

    assert_eq!(achievements_sea::unlock(db, user.id, achievement.id).await?, 1);
    assert_eq!(achievements_sea::unlock(db, user.id, achievement.id).await?, 0);

    let unlocks = achievements_sea::list_unlocks(db, user.id).await?;
    assert_eq!(unlocks.len(), 1);
    assert_eq!(unlocks[0].achievement_id, achievement.id);
    Ok(())
}
