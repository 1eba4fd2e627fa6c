mod recipe_key;
mod recipe_key_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebook",
    "m0004",
    vec_box![crate::m0003::Migration],
    vec_box![recipe_key::Operation, recipe_key_idx::Operation]
);
