use std::{collections::HashSet, sync::Arc};

use recipebook_recipe::{RecipeSearch, SearchPage, SearchQuery, local};
use recipebook_shared::{LocalRecipe, NewRecipe, Page, Recipe, RemoteRecipe};
use recipebook_user::{Documents, repository as user_repository};
use sqlx::SqlitePool;

/// Recipes of a user, kept in sync between the device and the cloud
/// document. Every write lands in the local store first.
#[derive(Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
    search: Arc<dyn RecipeSearch>,
    documents: Documents,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool, search: Arc<dyn RecipeSearch>, documents: Documents) -> Self {
        Self {
            pool,
            search,
            documents,
        }
    }

    async fn sync_recipe(&self, uid: &str, recipe: &LocalRecipe) -> recipebook_shared::Result<()> {
        let document = self.documents.upsert_recipe(uid, recipe).await?;
        user_repository::touch(&self.pool, uid, document.last_update).await
    }

    pub async fn create_local(
        &self,
        uid: &str,
        input: NewRecipe,
    ) -> recipebook_shared::Result<LocalRecipe> {
        let recipe = local::create(&self.pool, uid, input).await?;
        self.sync_recipe(uid, &recipe).await?;

        tracing::info!(recipe.id = recipe.id, user.uid = uid, "recipe created");

        Ok(recipe)
    }

    pub async fn update_local(
        &self,
        uid: &str,
        id: i64,
        input: NewRecipe,
    ) -> recipebook_shared::Result<LocalRecipe> {
        let recipe = local::update(&self.pool, uid, id, input).await?;
        self.sync_recipe(uid, &recipe).await?;

        Ok(recipe)
    }

    pub async fn delete_local(&self, uid: &str, id: i64) -> recipebook_shared::Result<()> {
        let recipe = local::delete(&self.pool, uid, id).await?;

        let document = self.documents.remove_recipe(uid, &recipe.key).await?;
        user_repository::touch(&self.pool, uid, document.last_update).await?;

        tracing::info!(recipe.id = id, user.uid = uid, "recipe deleted");

        Ok(())
    }

    pub async fn get_local(
        &self,
        uid: &str,
        id: i64,
    ) -> recipebook_shared::Result<Option<LocalRecipe>> {
        local::find(&self.pool, uid, id).await
    }

    pub async fn get_local_recipes(&self, uid: &str) -> recipebook_shared::Result<Vec<LocalRecipe>> {
        local::list(&self.pool, uid).await
    }

    async fn remote_favorites(&self, uid: &str) -> recipebook_shared::Result<HashSet<String>> {
        Ok(local::remote_favorite_ids(&self.pool, uid, None)
            .await?
            .into_iter()
            .collect())
    }

    /// Search results with the favorite flag of each recipe restored from
    /// the favorites saved on the device.
    pub async fn get_remote_recipes(
        &self,
        uid: &str,
        query: &SearchQuery,
    ) -> recipebook_shared::Result<SearchPage> {
        let mut page = self.search.search(query).await?;
        let favorites = self.remote_favorites(uid).await?;

        for recipe in page.recipes.iter_mut() {
            recipe.favorite = favorites.contains(&recipe.id);
        }

        Ok(page)
    }

    pub async fn get_remote(
        &self,
        uid: &str,
        id: &str,
    ) -> recipebook_shared::Result<Option<RemoteRecipe>> {
        let Some(mut recipe) = self.search.find(id).await? else {
            return Ok(None);
        };

        recipe.favorite = self.remote_favorites(uid).await?.contains(&recipe.id);

        Ok(Some(recipe))
    }

    /// Flips the favorite flag of `recipe` on the device and in the cloud
    /// document, returning the recipe with its new flag.
    pub async fn toggle_favorite(&self, uid: &str, recipe: Recipe) -> recipebook_shared::Result<Recipe> {
        let favorite = !recipe.is_favorite();

        let recipe = match recipe {
            Recipe::Local(recipe) => {
                local::set_favorite(&self.pool, uid, recipe.id, favorite).await?;

                let Some(recipe) = local::find(&self.pool, uid, recipe.id).await? else {
                    recipebook_shared::not_found!("recipe {}", recipe.id);
                };

                self.sync_recipe(uid, &recipe).await?;

                Recipe::Local(recipe)
            }
            Recipe::Remote(mut recipe) => {
                if favorite {
                    local::add_remote_favorite(&self.pool, uid, &recipe).await?;
                } else {
                    local::remove_remote_favorite(&self.pool, uid, &recipe.id).await?;
                }

                let document = self
                    .documents
                    .set_remote_favorite(uid, &recipe.id, favorite)
                    .await?;
                user_repository::touch(&self.pool, uid, document.last_update).await?;

                recipe.favorite = favorite;
                Recipe::Remote(recipe)
            }
        };

        tracing::info!(recipe.id = %recipe.id(), user.uid = uid, favorite, "favorite toggled");

        Ok(recipe)
    }

    /// One page of favorites: the page of local favorites followed by the
    /// same page of remote favorites, each looked up by id.
    pub async fn get_favorite_recipes(
        &self,
        uid: &str,
        page: Page,
    ) -> recipebook_shared::Result<Vec<Recipe>> {
        let local = local::list_favorites(&self.pool, uid, page).await?;
        let ids = local::remote_favorite_ids(&self.pool, uid, Some(page)).await?;
        let remote = self.find_remote_favorites(&ids).await?;

        Ok(merge_favorites(local, remote))
    }

    /// Every remote favorite of `uid`.
    pub async fn get_remote_favorites(&self, uid: &str) -> recipebook_shared::Result<Vec<RemoteRecipe>> {
        let ids = local::remote_favorite_ids(&self.pool, uid, None).await?;

        self.find_remote_favorites(&ids).await
    }

    async fn find_remote_favorites(&self, ids: &[String]) -> recipebook_shared::Result<Vec<RemoteRecipe>> {
        let mut recipes = Vec::with_capacity(ids.len());
        for id in ids {
            match self.search.find(id).await? {
                Some(mut recipe) => {
                    recipe.favorite = true;
                    recipes.push(recipe);
                }
                None => tracing::warn!(recipe.id = %id, "favorite recipe no longer available"),
            }
        }

        Ok(recipes)
    }
}

fn merge_favorites(local: Vec<LocalRecipe>, remote: Vec<RemoteRecipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();

    local
        .into_iter()
        .map(Recipe::Local)
        .chain(remote.into_iter().map(Recipe::Remote))
        .filter(|recipe| seen.insert(recipe.id()))
        .collect()
}
