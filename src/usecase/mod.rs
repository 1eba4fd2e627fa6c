//! Application services, one per user action. Inputs are validated here,
//! every failure comes back as a [`recipebook_shared::Error`].

mod favorite;
mod recipe;
mod user;

pub use favorite::*;
pub use recipe::*;
pub use user::*;
