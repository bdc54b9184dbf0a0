use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use zakupy_core::models::{Product, ProductId};
use zakupy_core::service::{CategoryChooser, ShoppingService};

/// Numbered choice menu on stderr. Empty or unparseable input cancels
/// (`None`), mirroring a dismissed action sheet.
pub(crate) fn choose_one(title: &str, options: &[String]) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }
    eprintln!("{title}");
    for (i, option) in options.iter().enumerate() {
        eprintln!("  {}. {option}", i + 1);
    }
    eprint!("Choice (1-{}, empty cancels): ", options.len());
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Ok(n) = line.parse::<usize>() else {
        return Ok(None);
    };
    if n < 1 || n > options.len() {
        return Ok(None);
    }
    Ok(Some(n - 1))
}

/// Yes/no confirmation on stderr; anything but an explicit yes declines.
pub(crate) fn confirm(message: &str) -> Result<bool> {
    eprint!("{message} [y/N]: ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// The terminal rendition of the recipe-import category picker.
pub(crate) struct TerminalChooser;

impl CategoryChooser for TerminalChooser {
    fn choose(&mut self, product_name: &str, categories: &[String]) -> Option<String> {
        match choose_one(
            &format!("Choose a category for: {product_name}"),
            categories,
        ) {
            Ok(Some(i)) => Some(categories[i].clone()),
            _ => None,
        }
    }
}

/// Resolves a product by name, list products first, then recipe
/// ingredients. First match wins when names repeat.
pub(crate) fn find_product_id(app: &ShoppingService, name: &str) -> Result<ProductId> {
    for category in &app.categories.categories {
        if let Some(product) = category.products.iter().find(|p| p.name == name) {
            return Ok(product.id);
        }
    }
    for recipe in &app.recipes.recipes {
        if let Some(product) = recipe.products.iter().find(|p| p.name == name) {
            return Ok(product.id);
        }
    }
    bail!("No product named '{name}'");
}

pub(crate) fn product_ref(app: &ShoppingService, id: ProductId) -> Option<&Product> {
    app.categories.product(id).or_else(|| app.recipes.product(id))
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Opt")]
    optional: String,
    #[tabled(rename = "Shop")]
    shop: String,
}

pub(crate) fn print_list_table(app: &ShoppingService) {
    let mut rows: Vec<ProductRow> = Vec::new();
    for category in &app.categories.categories {
        if category.products.is_empty() {
            rows.push(ProductRow {
                category: category.name.clone(),
                product: "(empty)".to_string(),
                quantity: 0,
                unit: String::new(),
                done: String::new(),
                optional: String::new(),
                shop: String::new(),
            });
            continue;
        }
        for product in &category.products {
            rows.push(ProductRow {
                category: category.name.clone(),
                product: truncate(&product.name, 35),
                quantity: product.quantity,
                unit: product.unit.clone().unwrap_or_default(),
                done: if product.checked { "x" } else { "" }.to_string(),
                optional: if product.optional { "x" } else { "" }.to_string(),
                shop: product.shop.clone().unwrap_or_default(),
            });
        }
    }

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
