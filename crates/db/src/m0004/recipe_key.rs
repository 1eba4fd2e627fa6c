use sea_query::{ColumnDef, Expr, ExprTrait, Query, Table, TableAlterStatement, UpdateStatement};

use crate::table::Recipe;

pub struct Operation;

fn up_statement() -> TableAlterStatement {
    Table::alter()
        .table(Recipe::Table)
        .add_column(ColumnDef::new(Recipe::Key).string().not_null().default(""))
        .to_owned()
}

// rows created before keys existed get a random one
fn backfill_statement() -> UpdateStatement {
    Query::update()
        .table(Recipe::Table)
        .value(Recipe::Key, Expr::cust("lower(hex(randomblob(16)))"))
        .and_where(Expr::col(Recipe::Key).eq(""))
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        let statement = backfill_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        sqlx::query("ALTER TABLE \"recipe\" DROP COLUMN \"key\"")
            .execute(connection)
            .await?;

        Ok(())
    }
}
