mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    cmd_category_add, cmd_export, cmd_import, cmd_list, cmd_product_add, cmd_product_check,
    cmd_product_optional, cmd_product_quantity, cmd_product_remove, cmd_product_rename,
    cmd_product_shop, cmd_product_unit, cmd_recipe_add, cmd_recipe_add_product,
    cmd_recipe_import, cmd_recipe_list, cmd_recipe_show, cmd_shop_add, cmd_shop_list,
};
use crate::config::Config;
use zakupy_core::persist::{FileStore, SnapshotSaver};
use zakupy_core::service::ShoppingService;

#[derive(Parser)]
#[command(
    name = "zakupy",
    version,
    about = "A simple, local-first shopping list CLI",
    long_about = "Shopping lists, recipes, and shops — kept in a single local document.\n\
                  Every change is saved immediately."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the shopping list grouped by category
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage products on the list
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage recipes and import them into the list
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Manage shops and view products by shop
    Shop {
        #[command(subcommand)]
        command: ShopCommands,
    },
    /// Export the current list to a timestamped file
    Export,
    /// Import a previously exported list
    Import {
        /// Path to the exported file
        file: PathBuf,
        /// Replace the current list instead of asking
        #[arg(long, conflicts_with = "merge")]
        replace: bool,
        /// Merge into the current list instead of asking
        #[arg(long)]
        merge: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a new empty category
    Add {
        /// Category name (must be unique)
        name: String,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Add a product to a category
    Add {
        /// Product name
        name: String,
        /// Target category (interactive menu when omitted)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Remove a product from the list
    Remove {
        /// Product name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Mark a product as bought (moves it to the end of its category)
    Check {
        /// Product name
        name: String,
    },
    /// Unmark a bought product
    Uncheck {
        /// Product name
        name: String,
    },
    /// Increase a product's quantity by one
    Inc {
        /// Product name
        name: String,
    },
    /// Decrease a product's quantity by one (never below zero)
    Dec {
        /// Product name
        name: String,
    },
    /// Set a product's unit
    Unit {
        /// Product name
        name: String,
        /// Unit (interactive menu when omitted)
        unit: Option<String>,
    },
    /// Toggle whether a product is optional
    Optional {
        /// Product name
        name: String,
    },
    /// Assign a product to a shop
    Shop {
        /// Product name
        name: String,
        /// Shop name (interactive menu when omitted)
        shop: Option<String>,
        /// Clear the assignment instead
        #[arg(long, conflicts_with = "shop")]
        clear: bool,
    },
    /// Rename a product
    Rename {
        /// Current product name
        name: String,
        /// New product name
        new_name: String,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// Add a new recipe
    Add {
        /// Recipe name
        name: String,
        /// Preparation instructions
        description: String,
    },
    /// Add an ingredient to a recipe
    AddProduct {
        /// Recipe name
        recipe: String,
        /// Ingredient name
        product: String,
        /// Unit (interactive menu when omitted, defaults to "szt.")
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// List all recipes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a recipe's ingredients and instructions
    Show {
        /// Recipe name
        name: String,
    },
    /// Move a recipe's ingredients into the list, one category choice per
    /// product; the recipe is deleted once empty
    Import {
        /// Recipe name
        name: String,
    },
}

#[derive(Subcommand)]
enum ShopCommands {
    /// Add a new shop
    Add {
        /// Shop name (must be unique)
        name: String,
    },
    /// List shops with their assigned products
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = FileStore::new(config.data_dir);
    let mut app = ShoppingService::new();
    app.subscribe(Box::new(SnapshotSaver::new(store.clone())));
    app.load(&store);

    match cli.command {
        Commands::List { json } => cmd_list(&app, json),
        Commands::Category { command } => match command {
            CategoryCommands::Add { name } => cmd_category_add(&mut app, &name),
        },
        Commands::Product { command } => match command {
            ProductCommands::Add { name, category } => {
                cmd_product_add(&mut app, &name, category.as_deref())
            }
            ProductCommands::Remove { name, yes } => cmd_product_remove(&mut app, &name, yes),
            ProductCommands::Check { name } => cmd_product_check(&mut app, &name, true),
            ProductCommands::Uncheck { name } => cmd_product_check(&mut app, &name, false),
            ProductCommands::Inc { name } => cmd_product_quantity(&mut app, &name, true),
            ProductCommands::Dec { name } => cmd_product_quantity(&mut app, &name, false),
            ProductCommands::Unit { name, unit } => {
                cmd_product_unit(&mut app, &name, unit.as_deref())
            }
            ProductCommands::Optional { name } => cmd_product_optional(&mut app, &name),
            ProductCommands::Shop { name, shop, clear } => {
                cmd_product_shop(&mut app, &name, shop.as_deref(), clear)
            }
            ProductCommands::Rename { name, new_name } => {
                cmd_product_rename(&mut app, &name, &new_name)
            }
        },
        Commands::Recipe { command } => match command {
            RecipeCommands::Add { name, description } => {
                cmd_recipe_add(&mut app, &name, &description)
            }
            RecipeCommands::AddProduct {
                recipe,
                product,
                unit,
            } => cmd_recipe_add_product(&mut app, &recipe, &product, unit.as_deref()),
            RecipeCommands::List { json } => cmd_recipe_list(&app, json),
            RecipeCommands::Show { name } => cmd_recipe_show(&app, &name),
            RecipeCommands::Import { name } => cmd_recipe_import(&mut app, &name),
        },
        Commands::Shop { command } => match command {
            ShopCommands::Add { name } => cmd_shop_add(&mut app, &name),
            ShopCommands::List { json } => cmd_shop_list(&app, json),
        },
        Commands::Export => cmd_export(&app, &store),
        Commands::Import {
            file,
            replace,
            merge,
        } => cmd_import(&mut app, &file, replace, merge),
    }
}
