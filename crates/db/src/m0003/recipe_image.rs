use sea_query::{ColumnDef, Table, TableAlterStatement};

use crate::table::Recipe;

pub struct Operation;

fn up_statement() -> TableAlterStatement {
    Table::alter()
        .table(Recipe::Table)
        .add_column(ColumnDef::new(Recipe::Image).string().null())
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        sqlx::query("ALTER TABLE \"recipe\" DROP COLUMN \"image\"")
            .execute(connection)
            .await?;

        Ok(())
    }
}
