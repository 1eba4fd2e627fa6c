use recipebook::usecase::{
    CreateRecipe, GetFavoriteRecipes, GetRecipe, SearchRecipes, ToggleFavorite,
};
use recipebook_recipe::SearchQuery;
use recipebook_shared::{Error, Page, RecipeId};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create_recipe_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let create = CreateRecipe(state.app.recipes.clone());

    let mut input = helpers::new_recipe("Chili", &[("beans", "400 g")]);
    input.types.clear();
    assert!(matches!(
        create.execute("u1", input).await,
        Err(Error::Validate(_))
    ));

    let mut input = helpers::new_recipe("Chili", &[("beans", "400 g")]);
    input.prep_time = 10081;
    assert!(matches!(
        create.execute("u1", input).await,
        Err(Error::Validate(_))
    ));

    assert!(state.app.recipes.get_local_recipes("u1").await?.is_empty());

    let recipe = create
        .execute("u1", helpers::new_recipe("Chili", &[("beans", "400 g")]))
        .await?;
    assert_eq!(recipe.name, "Chili");

    Ok(())
}

#[tokio::test]
async fn test_get_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let get = GetRecipe(state.app.recipes.clone());

    let err = get.execute("u1", &RecipeId::Local(7)).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe 7 not found");

    let soup = helpers::remote("b", "Chicken soup");
    let recipe = get
        .execute("u1", &RecipeId::Remote(soup.id.to_owned()))
        .await?;
    assert_eq!(recipe.name(), "Chicken soup");
    assert!(!recipe.is_favorite());

    ToggleFavorite(state.app.recipes.clone())
        .execute("u1", recipe)
        .await?;
    let recipe = get.execute("u1", &RecipeId::Remote(soup.id)).await?;
    assert!(recipe.is_favorite());

    Ok(())
}

#[tokio::test]
async fn test_search_requires_query() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let search = SearchRecipes(state.app.recipes.clone());

    let resp = search.execute("u1", &SearchQuery::new("  ")).await;
    assert!(matches!(resp, Err(Error::User(_))));

    let page = search.execute("u1", &SearchQuery::new("stew")).await?;
    assert_eq!(page.recipes.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_empty_favorite_page() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let favorites = GetFavoriteRecipes(state.app.recipes.clone())
        .execute("u1", Page::first(0))
        .await?;
    assert!(favorites.is_empty());

    Ok(())
}
