mod favorite_remote_recipe;
mod user_favorite_remote_recipe;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebook",
    "m0002",
    vec_box![crate::m0001::Migration],
    vec_box![
        favorite_remote_recipe::CreateTable,
        user_favorite_remote_recipe::CreateTable,
    ]
);
