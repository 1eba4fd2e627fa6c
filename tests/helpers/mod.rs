use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use recipebook::App;
use recipebook_recipe::{RecipeSearch, SearchPage, SearchQuery};
use recipebook_shared::{Ingredient, NewRecipe, RecipeType, RemoteRecipe};
use recipebook_user::{Documents, MemoryAuth, MemoryDocumentStore};
use sqlx::SqlitePool;

const PAGE_SIZE: usize = 2;

/// Search API stand-in serving a fixed catalog, two results per page.
#[derive(Default)]
pub struct FakeSearch {
    recipes: Vec<RemoteRecipe>,
    offline: AtomicBool,
}

#[allow(dead_code)]
impl FakeSearch {
    pub fn new(recipes: Vec<RemoteRecipe>) -> Self {
        Self {
            recipes,
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, value: bool) {
        self.offline.store(value, Ordering::SeqCst);
    }

    fn check_online(&self) -> recipebook_shared::Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(recipebook_shared::Error::NoInternet(
                "connection refused".to_owned(),
            ));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl RecipeSearch for FakeSearch {
    async fn search(&self, query: &SearchQuery) -> recipebook_shared::Result<SearchPage> {
        self.check_online()?;

        let start = query
            .next
            .as_deref()
            .and_then(|next| next.parse::<usize>().ok())
            .unwrap_or(0);
        let q = query.query.to_lowercase();

        let matches = self
            .recipes
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&q))
            .filter(|r| query.meal_type.is_none_or(|t| r.types.contains(&t)))
            .collect::<Vec<_>>();

        let recipes = matches
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|r| (*r).clone())
            .collect();
        let next = (start + PAGE_SIZE < matches.len()).then(|| (start + PAGE_SIZE).to_string());

        Ok(SearchPage { recipes, next })
    }

    async fn find(&self, id: &str) -> recipebook_shared::Result<Option<RemoteRecipe>> {
        self.check_online()?;

        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}

#[allow(dead_code)]
pub fn remote(id: &str, name: &str) -> RemoteRecipe {
    RemoteRecipe {
        id: format!("http://www.edamam.com/ontologies/edamam.owl#recipe_{id}"),
        name: name.to_owned(),
        types: vec![RecipeType::Dinner],
        prep_time: 40,
        image: Some(format!("https://img/{id}.jpg")),
        favorite: false,
        source: "Serious Eats".to_owned(),
        url: format!("https://example.com/{id}"),
        ingredients: vec!["1 onion".to_owned()],
    }
}

pub fn catalog() -> Vec<RemoteRecipe> {
    vec![
        remote("a", "Chicken curry"),
        remote("b", "Chicken soup"),
        remote("c", "Roast chicken"),
        remote("d", "Beef stew"),
    ]
}

#[allow(dead_code)]
pub fn new_recipe(name: impl Into<String>, ingredients: &[(&str, &str)]) -> NewRecipe {
    NewRecipe {
        name: name.into(),
        description: "Weeknight dinner".to_owned(),
        prep_time: 35,
        types: vec![RecipeType::Dinner],
        image: None,
        steps: vec!["Chop".to_owned(), "Simmer".to_owned()],
        ingredients: ingredients
            .iter()
            .map(|(name, quantity)| (Ingredient::new(name), quantity.to_string()))
            .collect(),
    }
}

pub struct TestState {
    pub app: App,
    pub pool: SqlitePool,
    pub search: Arc<FakeSearch>,
    pub store: Arc<MemoryDocumentStore>,
    pub auth: Arc<MemoryAuth>,
}

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let pool = recipebook::create_pool(&format!("sqlite:{}", path.to_str().unwrap()), 1).await?;
    recipebook::db::migrate(&pool).await?;

    Ok(pool)
}

/// App on its own database file, sharing the cloud services given.
pub async fn setup_device(
    path: PathBuf,
    search: Arc<FakeSearch>,
    store: Arc<MemoryDocumentStore>,
    auth: Arc<MemoryAuth>,
) -> anyhow::Result<TestState> {
    let pool = setup_test_pool(path).await?;
    let app = App::with_services(
        pool.clone(),
        search.clone(),
        auth.clone(),
        Documents::from_arc(store.clone()),
    );

    Ok(TestState {
        app,
        pool,
        search,
        store,
        auth,
    })
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    setup_device(
        path,
        Arc::new(FakeSearch::new(catalog())),
        Arc::new(MemoryDocumentStore::default()),
        Arc::new(MemoryAuth::default()),
    )
    .await
}
