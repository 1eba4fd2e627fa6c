//! On-device recipe storage.
//!
//! A recipe row owns its steps and meal types as JSON columns, ingredients
//! live in their own table and are attached through `recipe_ingredient`.
//! Every recipe is linked to its author through `user_recipe`.

mod remote_favorite;

pub use remote_favorite::*;

use std::collections::{BTreeMap, HashMap};

use recipebook_db::table::{Ingredient, Recipe, RecipeIngredient, User, UserRecipe};
use recipebook_shared::{Ingredient as IngredientName, LocalRecipe, NewRecipe, Page, RecipeType};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use ulid::Ulid;

#[derive(FromRow)]
struct RecipeRow {
    id: i64,
    key: String,
    name: String,
    description: String,
    prep_time: u32,
    types: sqlx::types::Json<Vec<RecipeType>>,
    steps: sqlx::types::Json<Vec<String>>,
    image: Option<String>,
    is_favorite: bool,
}

impl RecipeRow {
    fn into_recipe(self, ingredients: BTreeMap<IngredientName, String>) -> LocalRecipe {
        LocalRecipe {
            id: self.id,
            key: self.key,
            name: self.name,
            types: self.types.0,
            prep_time: self.prep_time,
            image: self.image,
            favorite: self.is_favorite,
            description: self.description,
            steps: self.steps.0,
            ingredients,
        }
    }
}

#[derive(FromRow)]
struct IngredientRow {
    recipe_id: i64,
    ingredient_name: String,
    quantity: String,
}

fn select_recipes() -> SelectStatement {
    Query::select()
        .columns(
            [
                Recipe::Id,
                Recipe::Key,
                Recipe::Name,
                Recipe::Description,
                Recipe::PrepTime,
                Recipe::Types,
                Recipe::Steps,
                Recipe::Image,
                Recipe::IsFavorite,
            ]
            .map(|col| (Recipe::Table, col)),
        )
        .from(Recipe::Table)
        .to_owned()
}

/// Matches the recipe rows linked to `uid`.
fn owned_by(uid: impl Into<String>) -> Expr {
    Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
        Query::select()
            .column(UserRecipe::RecipeId)
            .from(UserRecipe::Table)
            .and_where(Expr::col(UserRecipe::Uid).eq(uid.into()))
            .to_owned(),
    )
}

fn select_user_recipes(uid: impl Into<String>) -> SelectStatement {
    select_recipes()
        .inner_join(
            UserRecipe::Table,
            Expr::col((UserRecipe::Table, UserRecipe::RecipeId)).equals((Recipe::Table, Recipe::Id)),
        )
        .and_where(Expr::col((UserRecipe::Table, UserRecipe::Uid)).eq(uid.into()))
        .order_by((Recipe::Table, Recipe::Id), Order::Asc)
        .to_owned()
}

async fn fetch_recipes(
    pool: &SqlitePool,
    statement: SelectStatement,
) -> recipebook_shared::Result<Vec<LocalRecipe>> {
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut ingredients = fetch_ingredients(pool, rows.iter().map(|r| r.id).collect()).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let recipe_ingredients = ingredients.remove(&row.id).unwrap_or_default();
            row.into_recipe(recipe_ingredients)
        })
        .collect())
}

async fn fetch_ingredients(
    pool: &SqlitePool,
    recipe_ids: Vec<i64>,
) -> recipebook_shared::Result<HashMap<i64, BTreeMap<IngredientName, String>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let statement = Query::select()
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientName,
            RecipeIngredient::Quantity,
        ])
        .from(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).is_in(recipe_ids))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut ingredients: HashMap<i64, BTreeMap<IngredientName, String>> = HashMap::new();
    for row in rows {
        ingredients
            .entry(row.recipe_id)
            .or_default()
            .insert(IngredientName::new(row.ingredient_name), row.quantity);
    }

    Ok(ingredients)
}

pub(crate) async fn ensure_user(
    conn: &mut SqliteConnection,
    uid: &str,
) -> recipebook_shared::Result<()> {
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([User::Uid, User::LastUpdate])
        .values_panic([uid.into(), 0i64.into()])
        .on_conflict(OnConflict::column(User::Uid).do_nothing().to_owned())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

async fn insert_recipe(
    conn: &mut SqliteConnection,
    uid: &str,
    key: &str,
    input: &NewRecipe,
    favorite: bool,
) -> recipebook_shared::Result<i64> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let columns = [
        Recipe::Key,
        Recipe::Name,
        Recipe::Description,
        Recipe::PrepTime,
        Recipe::Types,
        Recipe::Steps,
        Recipe::Image,
        Recipe::IsFavorite,
        Recipe::CreatedAt,
    ];
    let values: [Expr; 9] = [
        key.into(),
        input.name.to_owned().into(),
        input.description.to_owned().into(),
        input.prep_time.into(),
        serde_json::to_string(&input.types)?.into(),
        serde_json::to_string(&input.steps)?.into(),
        input.image.to_owned().into(),
        favorite.into(),
        now.into(),
    ];

    let statement = Query::insert()
        .into_table(Recipe::Table)
        .columns(columns)
        .values_panic(values)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let id = sqlx::query_with(&sql, values)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    insert_ingredients(conn, id, &input.ingredients).await?;

    let statement = Query::insert()
        .into_table(UserRecipe::Table)
        .columns([UserRecipe::Uid, UserRecipe::RecipeId])
        .values_panic([uid.into(), id.into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(id)
}

async fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    ingredients: &BTreeMap<IngredientName, String>,
) -> recipebook_shared::Result<()> {
    for (ingredient, quantity) in ingredients {
        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([Ingredient::Name])
            .values_panic([ingredient.name().into()])
            .on_conflict(OnConflict::column(Ingredient::Name).do_nothing().to_owned())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;

        let statement = Query::insert()
            .into_table(RecipeIngredient::Table)
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::IngredientName,
                RecipeIngredient::Quantity,
            ])
            .values_panic([
                recipe_id.into(),
                ingredient.name().into(),
                quantity.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    Ok(())
}

async fn delete_recipe(conn: &mut SqliteConnection, id: i64) -> recipebook_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let statement = Query::delete()
        .from_table(UserRecipe::Table)
        .and_where(Expr::col(UserRecipe::RecipeId).eq(id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let statement = Query::delete()
        .from_table(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(result.rows_affected())
}

pub async fn create(
    pool: &SqlitePool,
    uid: impl Into<String>,
    input: NewRecipe,
) -> recipebook_shared::Result<LocalRecipe> {
    let uid = uid.into();
    let mut tx = pool.begin().await?;

    let key = Ulid::new().to_string();

    ensure_user(&mut tx, &uid).await?;
    let id = insert_recipe(&mut tx, &uid, &key, &input, false).await?;

    tx.commit().await?;

    tracing::debug!(recipe.id = id, recipe.key = %key, user.uid = %uid, "local recipe created");

    Ok(input.into_recipe(id, key, false))
}

/// Replaces the fields of recipe `id`. Recipes of other users are reported
/// as not found.
pub async fn update(
    pool: &SqlitePool,
    uid: impl Into<String>,
    id: i64,
    input: NewRecipe,
) -> recipebook_shared::Result<LocalRecipe> {
    let uid = uid.into();
    let mut tx = pool.begin().await?;

    let statement = Query::update()
        .table(Recipe::Table)
        .value(Recipe::Name, input.name.to_owned())
        .value(Recipe::Description, input.description.to_owned())
        .value(Recipe::PrepTime, input.prep_time)
        .value(Recipe::Types, serde_json::to_string(&input.types)?)
        .value(Recipe::Steps, serde_json::to_string(&input.steps)?)
        .value(Recipe::Image, input.image.to_owned())
        .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
        .and_where(owned_by(uid.to_owned()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    if result.rows_affected() == 0 {
        recipebook_shared::not_found!("recipe {id}");
    }

    let statement = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    insert_ingredients(&mut tx, id, &input.ingredients).await?;

    tx.commit().await?;

    let Some(recipe) = find(pool, uid, id).await? else {
        recipebook_shared::not_found!("recipe {id}");
    };

    Ok(recipe)
}

/// Deletes recipe `id` of `uid` and returns it.
pub async fn delete(
    pool: &SqlitePool,
    uid: impl Into<String>,
    id: i64,
) -> recipebook_shared::Result<LocalRecipe> {
    let Some(recipe) = find(pool, uid, id).await? else {
        recipebook_shared::not_found!("recipe {id}");
    };

    let mut tx = pool.begin().await?;

    if delete_recipe(&mut tx, id).await? == 0 {
        recipebook_shared::not_found!("recipe {id}");
    }

    tx.commit().await?;

    tracing::debug!(recipe.id = id, "local recipe deleted");

    Ok(recipe)
}

/// Recipe `id` when it belongs to `uid`.
pub async fn find(
    pool: &SqlitePool,
    uid: impl Into<String>,
    id: i64,
) -> recipebook_shared::Result<Option<LocalRecipe>> {
    let statement = select_recipes()
        .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
        .and_where(owned_by(uid))
        .limit(1)
        .to_owned();

    Ok(fetch_recipes(pool, statement).await?.into_iter().next())
}

pub async fn list(
    pool: &SqlitePool,
    uid: impl Into<String>,
) -> recipebook_shared::Result<Vec<LocalRecipe>> {
    fetch_recipes(pool, select_user_recipes(uid)).await
}

pub async fn list_favorites(
    pool: &SqlitePool,
    uid: impl Into<String>,
    page: Page,
) -> recipebook_shared::Result<Vec<LocalRecipe>> {
    let statement = select_user_recipes(uid)
        .and_where(Expr::col((Recipe::Table, Recipe::IsFavorite)).eq(true))
        .limit(page.limit.into())
        .offset(page.offset.into())
        .to_owned();

    fetch_recipes(pool, statement).await
}

pub async fn set_favorite(
    pool: &SqlitePool,
    uid: impl Into<String>,
    id: i64,
    value: bool,
) -> recipebook_shared::Result<()> {
    let statement = Query::update()
        .table(Recipe::Table)
        .value(Recipe::IsFavorite, value)
        .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
        .and_where(owned_by(uid))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        recipebook_shared::not_found!("recipe {id}");
    }

    Ok(())
}

/// Replaces every recipe owned by `uid` with `recipes`. Ids are reassigned
/// by the local store while keys are kept; a recipe without a key gets a new
/// one. The restored recipes are returned with their local ids.
pub async fn replace_all(
    pool: &SqlitePool,
    uid: impl Into<String>,
    recipes: &[LocalRecipe],
) -> recipebook_shared::Result<Vec<LocalRecipe>> {
    let uid = uid.into();
    let mut tx = pool.begin().await?;

    ensure_user(&mut tx, &uid).await?;

    let statement = Query::select()
        .column(UserRecipe::RecipeId)
        .from(UserRecipe::Table)
        .and_where(Expr::col(UserRecipe::Uid).eq(uid.to_owned()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let owned = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_all(&mut *tx)
        .await?;

    for (id,) in owned {
        delete_recipe(&mut tx, id).await?;
    }

    let mut restored = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let key = if recipe.key.is_empty() {
            Ulid::new().to_string()
        } else {
            recipe.key.to_owned()
        };
        let input = NewRecipe::from(recipe);
        let id = insert_recipe(&mut tx, &uid, &key, &input, recipe.favorite).await?;
        restored.push(input.into_recipe(id, key, recipe.favorite));
    }

    tx.commit().await?;

    tracing::info!(user.uid = %uid, total = restored.len(), "local recipes restored");

    Ok(restored)
}
