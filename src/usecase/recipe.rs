use recipebook_recipe::{SearchPage, SearchQuery};
use recipebook_shared::{LocalRecipe, NewRecipe, Recipe, RecipeId};
use validator::Validate;

use crate::repository::RecipeRepository;

pub struct CreateRecipe(pub RecipeRepository);

impl CreateRecipe {
    pub async fn execute(&self, uid: &str, input: NewRecipe) -> recipebook_shared::Result<LocalRecipe> {
        input.validate()?;

        self.0.create_local(uid, input).await
    }
}

pub struct UpdateRecipe(pub RecipeRepository);

impl UpdateRecipe {
    pub async fn execute(
        &self,
        uid: &str,
        id: i64,
        input: NewRecipe,
    ) -> recipebook_shared::Result<LocalRecipe> {
        input.validate()?;

        self.0.update_local(uid, id, input).await
    }
}

pub struct DeleteRecipe(pub RecipeRepository);

impl DeleteRecipe {
    pub async fn execute(&self, uid: &str, id: i64) -> recipebook_shared::Result<()> {
        self.0.delete_local(uid, id).await
    }
}

pub struct GetRecipe(pub RecipeRepository);

impl GetRecipe {
    pub async fn execute(&self, uid: &str, id: &RecipeId) -> recipebook_shared::Result<Recipe> {
        let recipe = match id {
            RecipeId::Local(id) => self.0.get_local(uid, *id).await?.map(Recipe::Local),
            RecipeId::Remote(id) => self.0.get_remote(uid, id).await?.map(Recipe::Remote),
        };

        let Some(recipe) = recipe else {
            recipebook_shared::not_found!("recipe {id}");
        };

        Ok(recipe)
    }
}

pub struct GetRecipes(pub RecipeRepository);

impl GetRecipes {
    pub async fn execute(&self, uid: &str) -> recipebook_shared::Result<Vec<LocalRecipe>> {
        self.0.get_local_recipes(uid).await
    }
}

pub struct SearchRecipes(pub RecipeRepository);

impl SearchRecipes {
    pub async fn execute(&self, uid: &str, query: &SearchQuery) -> recipebook_shared::Result<SearchPage> {
        if query.next.is_none() && query.query.trim().is_empty() {
            recipebook_shared::user!("Type something to search for");
        }

        self.0.get_remote_recipes(uid, query).await
    }
}
