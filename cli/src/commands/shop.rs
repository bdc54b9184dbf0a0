use anyhow::Result;
use serde::Serialize;

use zakupy_core::service::ShoppingService;

pub(crate) fn cmd_shop_add(app: &mut ShoppingService, name: &str) -> Result<()> {
    if app.add_shop(name) {
        println!("Added shop: {}", name.trim());
    } else {
        eprintln!("Shop name must be non-empty and unique.");
    }
    Ok(())
}

/// The derived membership view: a shop lists every product whose shop
/// assignment names it.
pub(crate) fn cmd_shop_list(app: &ShoppingService, json: bool) -> Result<()> {
    #[derive(Serialize)]
    struct ShopView {
        name: String,
        products: Vec<String>,
    }

    let views: Vec<ShopView> = app
        .shops
        .names()
        .iter()
        .map(|shop| ShopView {
            name: shop.clone(),
            products: app
                .shops
                .members(shop, &app.categories)
                .iter()
                .map(|p| p.name.clone())
                .collect(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }
    if views.is_empty() {
        println!("No shops.");
        return Ok(());
    }
    for view in views {
        println!("=== {} ===", view.name);
        if view.products.is_empty() {
            println!("    (no products)");
        }
        for product in view.products {
            println!("    {product}");
        }
    }
    Ok(())
}
