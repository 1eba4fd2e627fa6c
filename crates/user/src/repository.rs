use recipebook_db::table::User;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub uid: String,
    pub last_update: i64,
}

pub async fn find(
    pool: &SqlitePool,
    uid: impl Into<String>,
) -> recipebook_shared::Result<Option<UserRow>> {
    let statement = Query::select()
        .columns([User::Uid, User::LastUpdate])
        .from(User::Table)
        .and_where(Expr::col(User::Uid).eq(uid.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Inserts the user unless it already exists.
pub async fn create(
    pool: &SqlitePool,
    uid: impl Into<String>,
    last_update: i64,
) -> recipebook_shared::Result<()> {
    let uid = uid.into();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([User::Uid, User::LastUpdate])
        .values_panic([uid.into(), last_update.into()])
        .on_conflict(OnConflict::column(User::Uid).do_nothing().to_owned())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Inserts the user or overwrites its `last_update` with the timestamp of
/// the cloud document it mirrors.
pub async fn touch(
    pool: &SqlitePool,
    uid: impl Into<String>,
    last_update: i64,
) -> recipebook_shared::Result<()> {
    let uid = uid.into();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([User::Uid, User::LastUpdate])
        .values_panic([uid.into(), last_update.into()])
        .on_conflict(
            OnConflict::column(User::Uid)
                .update_column(User::LastUpdate)
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
