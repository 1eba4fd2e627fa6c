mod ingredient;
mod recipe;
mod recipe_ingredient;
mod user;
mod user_recipe;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebook",
    "m0001",
    vec_box![],
    vec_box![
        recipe::CreateTable,
        ingredient::CreateTable,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIdx1,
        user::CreateTable,
        user_recipe::CreateTable,
        user_recipe::CreateIdx1,
    ]
);
