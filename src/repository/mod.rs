mod recipe;
mod user;

pub use recipe::RecipeRepository;
pub use user::UserRepository;
