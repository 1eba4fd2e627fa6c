mod edamam;

pub use edamam::{EdamamClient, EdamamConfig};

use recipebook_shared::{RecipeType, RemoteRecipe};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub meal_type: Option<RecipeType>,
    /// Continuation returned with the previous page.
    pub next: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn meal_type(mut self, value: RecipeType) -> Self {
        self.meal_type = Some(value);
        self
    }

    pub fn next(mut self, value: impl Into<String>) -> Self {
        self.next = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub recipes: Vec<RemoteRecipe>,
    pub next: Option<String>,
}

#[async_trait::async_trait]
pub trait RecipeSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> recipebook_shared::Result<SearchPage>;

    async fn find(&self, id: &str) -> recipebook_shared::Result<Option<RemoteRecipe>>;
}
