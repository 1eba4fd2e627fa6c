use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::FavoriteRemoteRecipe;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(FavoriteRemoteRecipe::Table)
        .col(
            ColumnDef::new(FavoriteRemoteRecipe::Id)
                .string()
                .not_null()
                .string_len(255)
                .primary_key(),
        )
        .col(
            ColumnDef::new(FavoriteRemoteRecipe::Name)
                .string()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(FavoriteRemoteRecipe::Image).string().null())
        .col(
            ColumnDef::new(FavoriteRemoteRecipe::Source)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(FavoriteRemoteRecipe::Url)
                .string()
                .not_null()
                .default(""),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(FavoriteRemoteRecipe::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
