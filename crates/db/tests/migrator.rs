use std::str::FromStr;

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;

async fn connect(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);

    Ok(SqlitePool::connect_with(opts).await?)
}

#[tokio::test]
async fn test_apply_all_creates_schema() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = connect(&dir).await?;
    let mut conn = pool.acquire().await?;
    recipebook_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    let tables: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&pool)
            .await?;
    let tables = tables.into_iter().map(|t| t.0).collect::<Vec<_>>();

    for expected in [
        "favorite_remote_recipe",
        "ingredient",
        "recipe",
        "recipe_ingredient",
        "user",
        "user_favorite_remote_recipe",
        "user_recipe",
    ] {
        assert!(tables.contains(&expected.to_owned()), "missing {expected}");
    }

    let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('recipe')")
        .fetch_all(&pool)
        .await?;
    assert!(columns.iter().any(|c| c.0 == "image"));
    assert!(columns.iter().any(|c| c.0 == "key"));

    let indexes: Vec<(String, i64)> =
        sqlx::query_as("SELECT name, \"unique\" FROM pragma_index_list('recipe')")
            .fetch_all(&pool)
            .await?;
    assert!(indexes.contains(&("idx_recipe_key".to_owned(), 1)));

    Ok(())
}

#[tokio::test]
async fn test_apply_all_twice_is_noop() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = connect(&dir).await?;
    let mut conn = pool.acquire().await?;

    recipebook_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    recipebook_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}
