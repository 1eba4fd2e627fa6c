use std::{sync::Arc, time::Duration};

use anyhow::Result;
use recipebook_recipe::{EdamamClient, EdamamConfig, RecipeSearch};
use recipebook_user::{
    AuthService, Documents, HttpDocumentStore, HttpDocumentStoreConfig, IdentityClient,
    IdentityConfig, MemoryAuth, MemoryDocumentStore, Session,
};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    repository::{RecipeRepository, UserRepository},
};

/// Services of a running application, wired from its configuration.
#[derive(Clone)]
pub struct App {
    pub pool: SqlitePool,
    pub recipes: RecipeRepository,
    pub users: UserRepository,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = crate::db::create_pool(&config.database.url, config.database.max_connections)
            .await?;
        crate::db::migrate(&pool).await?;

        let search: Arc<dyn RecipeSearch> = Arc::new(EdamamClient::new(EdamamConfig {
            base_url: config.search.base_url.to_owned(),
            app_id: config.search.app_id.to_owned(),
            app_key: config.search.app_key.to_owned(),
            timeout: Duration::from_secs(config.search.timeout_secs),
        })?);

        if config.cloud.offline {
            tracing::warn!("cloud services disabled, accounts and documents stay in memory");

            return Ok(Self::with_services(
                pool,
                search,
                Arc::new(MemoryAuth::default()),
                Documents::new(MemoryDocumentStore::default()),
            ));
        }

        let timeout = Duration::from_secs(config.cloud.timeout_secs);
        let auth = Arc::new(IdentityClient::new(IdentityConfig {
            base_url: config.cloud.auth_url.to_owned(),
            api_key: config.cloud.api_key.to_owned(),
            timeout,
        })?);
        let store = HttpDocumentStore::new(HttpDocumentStoreConfig {
            base_url: config.cloud.database_url.to_owned(),
            timeout,
        })?;

        Ok(Self::with_services(pool, search, auth, Documents::new(store)))
    }

    pub fn with_services(
        pool: SqlitePool,
        search: Arc<dyn RecipeSearch>,
        auth: Arc<dyn AuthService>,
        documents: Documents,
    ) -> Self {
        let recipes = RecipeRepository::new(pool.clone(), search, documents.clone());
        let users = UserRepository::new(pool.clone(), auth, documents, recipes.clone());

        Self {
            pool,
            recipes,
            users,
        }
    }

    /// Authenticates cloud document requests with the session token.
    pub async fn set_session(&self, session: Option<&Session>) {
        self.users.set_session(session).await;
    }
}
