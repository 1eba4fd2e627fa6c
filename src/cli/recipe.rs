use anyhow::Result;
use recipebook::{
    App,
    config::Config,
    usecase::{
        CreateRecipe, DeleteRecipe, GetFavoriteRecipes, GetRecipe, GetRecipes, SearchRecipes,
        ToggleFavorite, UpdateRecipe,
    },
};
use recipebook_recipe::SearchQuery;
use recipebook_shared::{Ingredient, NewRecipe, Page, Recipe, RecipeType};

/// Fields of `recipe create` and `recipe update`.
#[derive(clap::Args, Debug)]
pub struct RecipeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Preparation time in minutes
    #[arg(long)]
    pub prep_time: u32,
    /// Meal type, repeat for several
    #[arg(long = "type", required = true)]
    pub types: Vec<RecipeType>,
    /// `name=quantity`, repeat for several
    #[arg(long = "ingredient", required = true, value_parser = parse_ingredient)]
    pub ingredients: Vec<(String, String)>,
    /// Repeat for several, in order
    #[arg(long = "step", required = true)]
    pub steps: Vec<String>,
    #[arg(long)]
    pub image: Option<String>,
}

fn parse_ingredient(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, quantity)) => Ok((name.trim().to_owned(), quantity.trim().to_owned())),
        None => Err(format!("expected name=quantity, got `{value}`")),
    }
}

impl From<RecipeArgs> for NewRecipe {
    fn from(value: RecipeArgs) -> Self {
        let mut types = value.types;
        types.sort();
        types.dedup();

        NewRecipe {
            name: value.name,
            description: value.description,
            prep_time: value.prep_time,
            types,
            image: value.image,
            steps: value.steps,
            ingredients: value
                .ingredients
                .into_iter()
                .map(|(name, quantity)| (Ingredient::new(name), quantity))
                .collect(),
        }
    }
}

fn print_recipe(recipe: &Recipe) {
    super::print_recipe_line(recipe);

    match recipe {
        Recipe::Local(recipe) => {
            if !recipe.description.is_empty() {
                println!("\n{}", recipe.description);
            }
            println!("\nIngredients:");
            for (name, quantity) in &recipe.ingredients {
                println!("  - {name}: {quantity}");
            }
            println!("\nSteps:");
            for (i, step) in recipe.steps.iter().enumerate() {
                println!("  {}. {step}", i + 1);
            }
        }
        Recipe::Remote(recipe) => {
            println!("\nIngredients:");
            for line in &recipe.ingredients {
                println!("  - {line}");
            }
            println!("\nSource: {} {}", recipe.source, recipe.url);
        }
    }
}

pub async fn create(config: Config, args: RecipeArgs) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let recipe = CreateRecipe(app.recipes.clone())
        .execute(&session.uid, args.into())
        .await?;

    print_recipe(&Recipe::Local(recipe));

    Ok(())
}

pub async fn update(config: Config, id: i64, args: RecipeArgs) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let recipe = UpdateRecipe(app.recipes.clone())
        .execute(&session.uid, id, args.into())
        .await?;

    print_recipe(&Recipe::Local(recipe));

    Ok(())
}

pub async fn list(config: Config) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let recipes = GetRecipes(app.recipes.clone()).execute(&session.uid).await?;
    if recipes.is_empty() {
        println!("no recipes yet");
    }

    for recipe in recipes {
        super::print_recipe_line(&Recipe::Local(recipe));
    }

    Ok(())
}

pub async fn show(config: Config, id: String) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let recipe = GetRecipe(app.recipes.clone())
        .execute(&session.uid, &super::parse_recipe_id(&id))
        .await?;

    print_recipe(&recipe);

    Ok(())
}

pub async fn delete(config: Config, id: i64) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    DeleteRecipe(app.recipes.clone())
        .execute(&session.uid, id)
        .await?;

    println!("recipe {id} deleted");

    Ok(())
}

pub async fn search(
    config: Config,
    query: String,
    meal_type: Option<RecipeType>,
    next: Option<String>,
) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let mut search = SearchQuery::new(query);
    if let Some(meal_type) = meal_type {
        search = search.meal_type(meal_type);
    }
    if let Some(next) = next {
        search = search.next(next);
    }

    let page = SearchRecipes(app.recipes.clone())
        .execute(&session.uid, &search)
        .await?;

    if page.recipes.is_empty() {
        println!("no results");
    }

    for recipe in page.recipes {
        super::print_recipe_line(&Recipe::Remote(recipe));
    }

    if let Some(next) = page.next {
        println!("\nmore results: --next '{next}'");
    }

    Ok(())
}

pub async fn favorite(config: Config, id: String) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let recipe = GetRecipe(app.recipes.clone())
        .execute(&session.uid, &super::parse_recipe_id(&id))
        .await?;
    let recipe = ToggleFavorite(app.recipes.clone())
        .execute(&session.uid, recipe)
        .await?;

    super::print_recipe_line(&recipe);

    Ok(())
}

/// Window of the 1-based `page`.
fn page_window(page: u32, limit: u32) -> Page {
    Page {
        offset: page.saturating_sub(1).saturating_mul(limit),
        limit,
    }
}

pub async fn favorites(config: Config, page: u32, limit: u32) -> Result<()> {
    let app = App::new(&config).await?;
    let session = super::session(&config, &app).await?;

    let page = page_window(page, limit);
    let recipes = GetFavoriteRecipes(app.recipes.clone())
        .execute(&session.uid, page)
        .await?;

    if recipes.is_empty() {
        println!("no favorites");
    }

    for recipe in recipes {
        super::print_recipe_line(&recipe);
    }

    Ok(())
}
