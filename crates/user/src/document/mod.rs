//! Per-user document kept in the cloud.
//!
//! The document is the source of truth used to restore a device: it holds
//! the recipes authored by the user and the ids of the search results they
//! marked as favorite. Writes always replace the whole document.

mod http;
mod memory;

pub use http::{HttpDocumentStore, HttpDocumentStoreConfig};
pub use memory::MemoryDocumentStore;

use std::sync::Arc;

use recipebook_shared::LocalRecipe;
use serde::{Deserialize, Serialize};

use crate::now_millis;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub uid: String,
    #[serde(default)]
    pub last_update: i64,
    #[serde(default)]
    pub recipes: Vec<LocalRecipe>,
    #[serde(default)]
    pub favorite_remote_recipes: Vec<String>,
}

impl UserDocument {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            last_update: now_millis(),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, uid: &str) -> recipebook_shared::Result<Option<UserDocument>>;
    async fn set(&self, document: &UserDocument) -> recipebook_shared::Result<()>;

    /// Credentials of the signed-in user, `None` once signed out.
    async fn authorize(&self, _token: Option<&str>) {}
}

/// Read-modify-write operations over a [`DocumentStore`].
///
/// Concurrent writers are not detected, the last one to write wins.
#[derive(Clone)]
pub struct Documents(Arc<dyn DocumentStore>);

impl Documents {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self(Arc::new(store))
    }

    pub fn from_arc(store: Arc<dyn DocumentStore>) -> Self {
        Self(store)
    }

    pub async fn get(&self, uid: &str) -> recipebook_shared::Result<Option<UserDocument>> {
        self.0.get(uid).await
    }

    pub async fn get_or_default(&self, uid: &str) -> recipebook_shared::Result<UserDocument> {
        Ok(self
            .0
            .get(uid)
            .await?
            .unwrap_or_else(|| UserDocument::new(uid)))
    }

    pub async fn set(&self, document: &UserDocument) -> recipebook_shared::Result<()> {
        self.0.set(document).await
    }

    pub async fn authorize(&self, token: Option<&str>) {
        self.0.authorize(token).await
    }

    async fn modify<F>(&self, uid: &str, f: F) -> recipebook_shared::Result<UserDocument>
    where
        F: FnOnce(&mut UserDocument) + Send,
    {
        let mut document = self.get_or_default(uid).await?;
        f(&mut document);
        document.last_update = now_millis().max(document.last_update + 1);

        self.0.set(&document).await?;

        tracing::debug!(user.uid = uid, last_update = document.last_update, "user document saved");

        Ok(document)
    }

    /// Inserts `recipe` or replaces the recipe with the same key. Local ids
    /// differ between devices and are never used to match entries.
    pub async fn upsert_recipe(
        &self,
        uid: &str,
        recipe: &LocalRecipe,
    ) -> recipebook_shared::Result<UserDocument> {
        self.modify(uid, |document| {
            match document.recipes.iter_mut().find(|r| r.key == recipe.key) {
                Some(existing) => *existing = recipe.clone(),
                None => document.recipes.push(recipe.clone()),
            }
        })
        .await
    }

    pub async fn remove_recipe(&self, uid: &str, key: &str) -> recipebook_shared::Result<UserDocument> {
        self.modify(uid, |document| document.recipes.retain(|r| r.key != key))
            .await
    }

    pub async fn set_remote_favorite(
        &self,
        uid: &str,
        recipe_id: &str,
        favorite: bool,
    ) -> recipebook_shared::Result<UserDocument> {
        self.modify(uid, |document| {
            let ids = &mut document.favorite_remote_recipes;
            if favorite {
                if !ids.iter().any(|id| id == recipe_id) {
                    ids.push(recipe_id.to_owned());
                }
            } else {
                ids.retain(|id| id != recipe_id);
            }
        })
        .await
    }
}
