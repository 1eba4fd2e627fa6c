use recipebook_shared::{Page, Recipe};

use crate::repository::RecipeRepository;

pub struct ToggleFavorite(pub RecipeRepository);

impl ToggleFavorite {
    pub async fn execute(&self, uid: &str, recipe: Recipe) -> recipebook_shared::Result<Recipe> {
        self.0.toggle_favorite(uid, recipe).await
    }
}

pub struct GetFavoriteRecipes(pub RecipeRepository);

impl GetFavoriteRecipes {
    pub async fn execute(&self, uid: &str, page: Page) -> recipebook_shared::Result<Vec<Recipe>> {
        if page.limit == 0 {
            return Ok(vec![]);
        }

        self.0.get_favorite_recipes(uid, page).await
    }
}
