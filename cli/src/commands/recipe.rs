use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use zakupy_core::models::UNITS;
use zakupy_core::service::ShoppingService;

use super::helpers::{TerminalChooser, choose_one, truncate};

pub(crate) fn cmd_recipe_add(app: &mut ShoppingService, name: &str, description: &str) -> Result<()> {
    if app.add_recipe(name, description) {
        println!("Added recipe: {}", name.trim());
        println!("Add ingredients with: zakupy recipe add-product \"{}\" <product>", name.trim());
    } else {
        eprintln!("Recipe name and instructions must both be non-empty.");
    }
    Ok(())
}

pub(crate) fn cmd_recipe_add_product(
    app: &mut ShoppingService,
    recipe: &str,
    product: &str,
    unit: Option<&str>,
) -> Result<()> {
    let unit = match unit {
        Some(u) => u.to_string(),
        None => {
            let options: Vec<String> = UNITS.iter().map(|u| (*u).to_string()).collect();
            match choose_one("Choose a unit:", &options)? {
                Some(i) => options[i].clone(),
                // a dismissed unit picker falls back to pieces
                None => "szt.".to_string(),
            }
        }
    };
    match app.add_product_to_recipe(product, recipe, Some(&unit))? {
        Some(_) => println!("Added {} to {recipe}", product.trim()),
        None => eprintln!("Product name must be non-empty."),
    }
    Ok(())
}

pub(crate) fn cmd_recipe_list(app: &ShoppingService, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&app.recipes.snapshot())?);
        return Ok(());
    }
    if app.recipes.is_empty() {
        println!("No recipes.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "Recipe")]
        name: String,
        #[tabled(rename = "Ingredients")]
        ingredients: usize,
        #[tabled(rename = "Instructions")]
        description: String,
    }

    let rows: Vec<RecipeRow> = app
        .recipes
        .recipes
        .iter()
        .map(|r| RecipeRow {
            name: r.name.clone(),
            ingredients: r.products.len(),
            description: truncate(&r.description, 50),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn cmd_recipe_show(app: &ShoppingService, name: &str) -> Result<()> {
    let Some(recipe) = app.recipes.find(name) else {
        anyhow::bail!("No recipe named '{name}'");
    };
    println!("=== {} ===", recipe.name);
    println!("{}\n", recipe.description);
    println!("  INGREDIENTS:");
    for product in &recipe.products {
        let unit = product.unit.clone().unwrap_or_default();
        println!("    {} — {} {unit}", product.name, product.quantity);
    }
    Ok(())
}

pub(crate) fn cmd_recipe_import(app: &mut ShoppingService, name: &str) -> Result<()> {
    let outcome = app.import_recipe(name, &mut TerminalChooser)?;
    println!(
        "Imported {} product(s), skipped {}.",
        outcome.imported, outcome.skipped
    );
    if outcome.recipe_removed {
        println!("Recipe '{name}' is now empty and was removed.");
    }
    Ok(())
}
