use std::{collections::BTreeMap, net::SocketAddr, path::PathBuf, str::FromStr};

use axum::Router;
use recipebook_shared::{Ingredient, LocalRecipe, RecipeType};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

#[allow(dead_code)]
pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebook_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[allow(dead_code)]
pub async fn serve(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(addr)
}

#[allow(dead_code)]
pub fn local_recipe(id: i64, name: &str) -> LocalRecipe {
    LocalRecipe {
        id,
        key: format!("key-{id}"),
        name: name.to_owned(),
        types: vec![RecipeType::Dinner],
        prep_time: 30,
        image: None,
        favorite: false,
        description: String::new(),
        steps: vec!["Cook".to_owned()],
        ingredients: BTreeMap::from([(Ingredient::new("rice"), "200 g".to_owned())]),
    }
}
