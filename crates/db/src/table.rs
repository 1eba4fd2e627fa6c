use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    Name,
    Description,
    PrepTime,
    Types,
    Steps,
    Image,
    IsFavorite,
    CreatedAt,
    Key,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Name,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    IngredientName,
    Quantity,
}

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Uid,
    LastUpdate,
}

#[derive(Iden, Clone)]
pub enum UserRecipe {
    Table,
    Uid,
    RecipeId,
}

#[derive(Iden, Clone)]
pub enum FavoriteRemoteRecipe {
    Table,
    Id,
    Name,
    Image,
    Source,
    Url,
}

#[derive(Iden, Clone)]
pub enum UserFavoriteRemoteRecipe {
    Table,
    Uid,
    RecipeId,
    CreatedAt,
}
