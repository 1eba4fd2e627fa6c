use std::sync::Arc;

use recipebook_recipe::local;
use recipebook_shared::{Recipe, User};
use recipebook_user::{
    AuthService, Documents, Session, UserDocument, now_millis, repository as user_repository,
};
use sqlx::SqlitePool;

use super::RecipeRepository;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
    auth: Arc<dyn AuthService>,
    documents: Documents,
    recipes: RecipeRepository,
}

impl UserRepository {
    pub fn new(
        pool: SqlitePool,
        auth: Arc<dyn AuthService>,
        documents: Documents,
        recipes: RecipeRepository,
    ) -> Self {
        Self {
            pool,
            auth,
            documents,
            recipes,
        }
    }

    /// Signs in and authorizes the following cloud document requests.
    pub async fn sign_in(&self, email: &str, password: &str) -> recipebook_shared::Result<Session> {
        let session = self.auth.sign_in(email, password).await?;
        self.set_session(Some(&session)).await;

        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> recipebook_shared::Result<Session> {
        let session = self.auth.sign_up(email, password).await?;
        self.set_session(Some(&session)).await;

        Ok(session)
    }

    /// Restores a session saved earlier, or signs out with `None`.
    pub async fn set_session(&self, session: Option<&Session>) {
        self.documents
            .authorize(session.map(|s| s.token.as_str()))
            .await;
    }

    /// Brings the device and the cloud document of `uid` in line and returns
    /// the user with all of its recipes.
    ///
    /// The side with the most recent `last_update` wins. A missing document
    /// is created from whatever the device holds, a missing local user is
    /// restored from the document.
    pub async fn get_or_create_user(&self, uid: &str) -> recipebook_shared::Result<User> {
        let row = user_repository::find(&self.pool, uid).await?;

        let last_update = match (self.documents.get(uid).await?, row) {
            (None, row) => {
                let last_update = row.map_or(0, |row| row.last_update).max(now_millis());
                self.upload(uid, last_update).await?
            }
            (Some(document), Some(row)) if row.last_update == document.last_update => {
                row.last_update
            }
            (Some(document), Some(row)) if row.last_update > document.last_update => {
                self.upload(uid, row.last_update).await?
            }
            (Some(document), _) => self.restore(document).await?,
        };

        user_repository::touch(&self.pool, uid, last_update).await?;

        let mut recipes = self
            .recipes
            .get_local_recipes(uid)
            .await?
            .into_iter()
            .map(Recipe::Local)
            .collect::<Vec<_>>();

        recipes.extend(
            self.recipes
                .get_remote_favorites(uid)
                .await?
                .into_iter()
                .map(Recipe::Remote),
        );

        Ok(User {
            uid: uid.to_owned(),
            last_update,
            recipes,
        })
    }

    /// Overwrites the cloud document with what the device holds.
    async fn upload(&self, uid: &str, last_update: i64) -> recipebook_shared::Result<i64> {
        let document = UserDocument {
            uid: uid.to_owned(),
            last_update,
            recipes: local::list(&self.pool, uid).await?,
            favorite_remote_recipes: local::remote_favorite_ids(&self.pool, uid, None).await?,
        };

        self.documents.set(&document).await?;

        tracing::info!(
            user.uid = uid,
            recipes = document.recipes.len(),
            "user document uploaded"
        );

        Ok(last_update)
    }

    /// Replaces the device data of the document owner. Local ids are
    /// assigned by the device and never written back, recipes are matched by
    /// key. The document is rewritten only when a recipe had no key yet.
    async fn restore(&self, mut document: UserDocument) -> recipebook_shared::Result<i64> {
        let restored = local::replace_all(&self.pool, &document.uid, &document.recipes).await?;
        local::replace_remote_favorites(
            &self.pool,
            &document.uid,
            &document.favorite_remote_recipes,
        )
        .await?;

        let keyed = restored
            .iter()
            .zip(document.recipes.iter())
            .any(|(a, b)| a.key != b.key);

        if keyed {
            document.recipes = restored;
            document.last_update = now_millis().max(document.last_update + 1);
            self.documents.set(&document).await?;
        }

        tracing::info!(
            user.uid = %document.uid,
            recipes = document.recipes.len(),
            favorites = document.favorite_remote_recipes.len(),
            "user restored from cloud"
        );

        Ok(document.last_update)
    }
}
