pub mod prefs;
pub mod recipe;
pub mod user;

use anyhow::Result;
use recipebook::{App, config::Config, preferences::PreferenceStore};
use recipebook_shared::{Recipe, RecipeId};
use recipebook_user::Session;

pub fn preference_store(config: &Config) -> PreferenceStore {
    PreferenceStore::new(&config.preferences.path)
}

/// Signed-in session saved by `login` or `signup`, with the cloud token
/// installed on `app`.
pub async fn session(config: &Config, app: &App) -> Result<Session> {
    let Some(session) = preference_store(config).load().await?.session else {
        anyhow::bail!("not logged in, run `recipebook login` first");
    };

    app.set_session(Some(&session)).await;

    Ok(session)
}

/// Numeric ids are local recipes, anything else is a search API uri.
pub fn parse_recipe_id(value: &str) -> RecipeId {
    match value.parse::<i64>() {
        Ok(id) => RecipeId::Local(id),
        Err(_) => RecipeId::Remote(value.to_owned()),
    }
}

pub fn print_recipe_line(recipe: &Recipe) {
    let types = recipe
        .types()
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let favorite = if recipe.is_favorite() { "*" } else { " " };

    println!(
        "{favorite} {:<60} {:>5} min  [{types}]  {}",
        recipe.name(),
        recipe.prep_time(),
        recipe.id()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_ids() {
        assert_eq!(parse_recipe_id("42"), RecipeId::Local(42));
        assert_eq!(
            parse_recipe_id("http://www.edamam.com/ontologies/edamam.owl#recipe_a"),
            RecipeId::Remote("http://www.edamam.com/ontologies/edamam.owl#recipe_a".to_owned())
        );
    }
}
