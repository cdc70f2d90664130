use pokedeck_backend::config::db::DbSettings;
use pokedeck_backend::infra::db::bootstrap_db;
use pokedeck_backend::AppError;

#[tokio::test]
async fn bootstrap_applies_migrations() -> Result<(), AppError> {
    let db = bootstrap_db(&DbSettings::in_memory()).await?;

    let applied = migration::count_applied_migrations(&db).await?;
    assert!(applied >= 1);
    Ok(())
}
