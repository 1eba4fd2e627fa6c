use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{FavoriteRemoteRecipe, User, UserFavoriteRemoteRecipe};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(UserFavoriteRemoteRecipe::Table)
        .col(
            ColumnDef::new(UserFavoriteRemoteRecipe::Uid)
                .string()
                .not_null()
                .string_len(128),
        )
        .col(
            ColumnDef::new(UserFavoriteRemoteRecipe::RecipeId)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(UserFavoriteRemoteRecipe::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(UserFavoriteRemoteRecipe::Uid)
                .col(UserFavoriteRemoteRecipe::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_favorite_remote_recipe_user")
                .from(UserFavoriteRemoteRecipe::Table, UserFavoriteRemoteRecipe::Uid)
                .to(User::Table, User::Uid)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_favorite_remote_recipe_recipe")
                .from(
                    UserFavoriteRemoteRecipe::Table,
                    UserFavoriteRemoteRecipe::RecipeId,
                )
                .to(FavoriteRemoteRecipe::Table, FavoriteRemoteRecipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop()
        .table(UserFavoriteRemoteRecipe::Table)
        .to_owned()
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
