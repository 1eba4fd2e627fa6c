mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipebook::preferences::Theme;
use recipebook_shared::RecipeType;

/// recipebook - Your recipes, on every device
#[derive(Parser)]
#[command(name = "recipebook")]
#[command(about = "Create, search and favorite recipes", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and restore recipes from the cloud
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the signed-in session
    Logout,
    /// Search the recipe API
    Search {
        query: String,
        #[arg(long)]
        meal_type: Option<RecipeType>,
        /// Continuation link printed by a previous search
        #[arg(long)]
        next: Option<String>,
    },
    /// Manage your own recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Toggle the favorite flag of a recipe (local id or search API uri)
    Favorite { id: String },
    /// List favorite recipes
    Favorites {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Show or change device preferences
    Prefs {
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        theme: Option<Theme>,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    Create(cli::recipe::RecipeArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: cli::recipe::RecipeArgs,
    },
    List,
    /// Local id or search API uri
    Show { id: String },
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = recipebook::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    recipebook::observability::init_observability(
        "recipebook",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Migrate => migrate_command(config).await,
        Commands::Signup { email, password } => cli::user::signup(config, email, password).await,
        Commands::Login { email, password } => cli::user::login(config, email, password).await,
        Commands::Logout => cli::user::logout(config).await,
        Commands::Search {
            query,
            meal_type,
            next,
        } => cli::recipe::search(config, query, meal_type, next).await,
        Commands::Recipe { command } => match command {
            RecipeCommands::Create(args) => cli::recipe::create(config, args).await,
            RecipeCommands::Update { id, args } => cli::recipe::update(config, id, args).await,
            RecipeCommands::List => cli::recipe::list(config).await,
            RecipeCommands::Show { id } => cli::recipe::show(config, id).await,
            RecipeCommands::Delete { id } => cli::recipe::delete(config, id).await,
        },
        Commands::Favorite { id } => cli::recipe::favorite(config, id).await,
        Commands::Favorites { page, limit } => cli::recipe::favorites(config, page, limit).await,
        Commands::Prefs { locale, theme } => cli::prefs::prefs(config, locale, theme).await,
    }
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: recipebook::config::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    let pool = recipebook::create_pool(&config.database.url, 1).await?;
    recipebook::db::migrate(&pool).await?;

    Ok(())
}
