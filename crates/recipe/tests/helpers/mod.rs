use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

use recipebook_shared::{Ingredient, NewRecipe, RecipeType};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

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
pub fn new_recipe(name: impl Into<String>, ingredients: &[(&str, &str)]) -> NewRecipe {
    NewRecipe {
        name: name.into(),
        description: "A family favorite".to_owned(),
        prep_time: 25,
        types: vec![RecipeType::Lunch, RecipeType::Dinner],
        image: None,
        steps: vec!["Prepare".to_owned(), "Cook".to_owned(), "Serve".to_owned()],
        ingredients: ingredients
            .iter()
            .map(|(name, quantity)| (Ingredient::new(name), quantity.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}
