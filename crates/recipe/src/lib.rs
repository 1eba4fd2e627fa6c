pub mod local;
pub mod remote;

pub use remote::{EdamamClient, EdamamConfig, RecipeSearch, SearchPage, SearchQuery};
