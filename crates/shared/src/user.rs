use serde::{Deserialize, Serialize};

use crate::{LocalRecipe, Recipe, RemoteRecipe};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub last_update: i64,
    /// Local recipes followed by the remote recipes the user marked as favorite.
    pub recipes: Vec<Recipe>,
}

impl User {
    pub fn favorites(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(|r| r.is_favorite())
    }

    pub fn local_recipes(&self) -> impl Iterator<Item = &LocalRecipe> {
        self.recipes.iter().filter_map(|r| match r {
            Recipe::Local(r) => Some(r),
            Recipe::Remote(_) => None,
        })
    }

    pub fn remote_recipes(&self) -> impl Iterator<Item = &RemoteRecipe> {
        self.recipes.iter().filter_map(|r| match r {
            Recipe::Remote(r) => Some(r),
            Recipe::Local(_) => None,
        })
    }
}
