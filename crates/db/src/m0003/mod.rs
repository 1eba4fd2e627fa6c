mod recipe_favorite_idx;
mod recipe_image;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebook",
    "m0003",
    vec_box![crate::m0002::Migration],
    vec_box![recipe_image::Operation, recipe_favorite_idx::Operation]
);
