use recipebook_db::table::{FavoriteRemoteRecipe, UserFavoriteRemoteRecipe};
use recipebook_shared::{Page, RemoteRecipe};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool};
use time::OffsetDateTime;

use super::ensure_user;

async fn link(
    conn: &mut SqliteConnection,
    uid: &str,
    recipe_id: &str,
) -> recipebook_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(UserFavoriteRemoteRecipe::Table)
        .columns([
            UserFavoriteRemoteRecipe::Uid,
            UserFavoriteRemoteRecipe::RecipeId,
            UserFavoriteRemoteRecipe::CreatedAt,
        ])
        .values_panic([uid.into(), recipe_id.into(), now.into()])
        .on_conflict(
            OnConflict::columns([
                UserFavoriteRemoteRecipe::Uid,
                UserFavoriteRemoteRecipe::RecipeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Remembers `recipe` as a favorite of `uid`. The summary row is refreshed
/// when the recipe was already known.
pub async fn add_remote_favorite(
    pool: &SqlitePool,
    uid: impl Into<String>,
    recipe: &RemoteRecipe,
) -> recipebook_shared::Result<()> {
    let uid = uid.into();
    let mut tx = pool.begin().await?;

    ensure_user(&mut tx, &uid).await?;

    let statement = Query::insert()
        .into_table(FavoriteRemoteRecipe::Table)
        .columns([
            FavoriteRemoteRecipe::Id,
            FavoriteRemoteRecipe::Name,
            FavoriteRemoteRecipe::Image,
            FavoriteRemoteRecipe::Source,
            FavoriteRemoteRecipe::Url,
        ])
        .values_panic([
            recipe.id.to_owned().into(),
            recipe.name.to_owned().into(),
            recipe.image.to_owned().into(),
            recipe.source.to_owned().into(),
            recipe.url.to_owned().into(),
        ])
        .on_conflict(
            OnConflict::column(FavoriteRemoteRecipe::Id)
                .update_columns([
                    FavoriteRemoteRecipe::Name,
                    FavoriteRemoteRecipe::Image,
                    FavoriteRemoteRecipe::Source,
                    FavoriteRemoteRecipe::Url,
                ])
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    link(&mut tx, &uid, &recipe.id).await?;

    tx.commit().await?;

    Ok(())
}

pub async fn remove_remote_favorite(
    pool: &SqlitePool,
    uid: impl Into<String>,
    recipe_id: impl Into<String>,
) -> recipebook_shared::Result<()> {
    let recipe_id = recipe_id.into();
    let mut tx = pool.begin().await?;

    let statement = Query::delete()
        .from_table(UserFavoriteRemoteRecipe::Table)
        .and_where(Expr::col(UserFavoriteRemoteRecipe::Uid).eq(uid.into()))
        .and_where(Expr::col(UserFavoriteRemoteRecipe::RecipeId).eq(recipe_id.to_owned()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    // summary rows are shared between users of the device
    let statement = Query::delete()
        .from_table(FavoriteRemoteRecipe::Table)
        .and_where(Expr::col(FavoriteRemoteRecipe::Id).eq(recipe_id))
        .and_where(
            Expr::col(FavoriteRemoteRecipe::Id).not_in_subquery(
                Query::select()
                    .column(UserFavoriteRemoteRecipe::RecipeId)
                    .from(UserFavoriteRemoteRecipe::Table)
                    .to_owned(),
            ),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(())
}

/// Favorite remote recipe ids of `uid`, oldest first.
pub async fn remote_favorite_ids(
    pool: &SqlitePool,
    uid: impl Into<String>,
    page: Option<Page>,
) -> recipebook_shared::Result<Vec<String>> {
    let mut statement = Query::select()
        .column(UserFavoriteRemoteRecipe::RecipeId)
        .from(UserFavoriteRemoteRecipe::Table)
        .and_where(Expr::col(UserFavoriteRemoteRecipe::Uid).eq(uid.into()))
        .order_by(UserFavoriteRemoteRecipe::CreatedAt, Order::Asc)
        .order_by(UserFavoriteRemoteRecipe::RecipeId, Order::Asc)
        .to_owned();

    if let Some(page) = page {
        statement.limit(page.limit.into()).offset(page.offset.into());
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Replaces the favorite remote ids of `uid`. Only ids are known at this
/// point, summary rows are filled the next time the recipe is favorited.
pub async fn replace_remote_favorites(
    pool: &SqlitePool,
    uid: impl Into<String>,
    ids: &[String],
) -> recipebook_shared::Result<()> {
    let uid = uid.into();
    let mut tx = pool.begin().await?;

    ensure_user(&mut tx, &uid).await?;

    let statement = Query::delete()
        .from_table(UserFavoriteRemoteRecipe::Table)
        .and_where(Expr::col(UserFavoriteRemoteRecipe::Uid).eq(uid.to_owned()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    for id in ids {
        let statement = Query::insert()
            .into_table(FavoriteRemoteRecipe::Table)
            .columns([FavoriteRemoteRecipe::Id])
            .values_panic([id.to_owned().into()])
            .on_conflict(
                OnConflict::column(FavoriteRemoteRecipe::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        link(&mut tx, &uid, id).await?;
    }

    tx.commit().await?;

    Ok(())
}
