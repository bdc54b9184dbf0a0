use anyhow::{Result, bail};

use zakupy_core::models::UNITS;
use zakupy_core::service::ShoppingService;

use super::helpers::{choose_one, confirm, find_product_id, product_ref};

pub(crate) fn cmd_product_add(
    app: &mut ShoppingService,
    name: &str,
    category: Option<&str>,
) -> Result<()> {
    let category = match category {
        Some(c) => c.to_string(),
        None => {
            let names = app.categories.names();
            if names.is_empty() {
                bail!("No categories yet. Add a category first.");
            }
            match choose_one("Choose a category:", &names)? {
                Some(i) => names[i].clone(),
                None => {
                    eprintln!("Pick a category.");
                    return Ok(());
                }
            }
        }
    };

    match app.add_product(name, &category)? {
        Some(_) => println!("Added {} to {category}", name.trim()),
        None => eprintln!("Product name must be non-empty."),
    }
    Ok(())
}

pub(crate) fn cmd_product_remove(app: &mut ShoppingService, name: &str, yes: bool) -> Result<()> {
    let id = find_product_id(app, name)?;
    if !yes && !confirm(&format!("Remove product '{name}'?"))? {
        return Ok(());
    }
    if app.remove_product(id) {
        println!("Removed {name}");
    } else {
        eprintln!("'{name}' is a recipe ingredient; import or edit the recipe instead.");
    }
    Ok(())
}

pub(crate) fn cmd_product_check(app: &mut ShoppingService, name: &str, checked: bool) -> Result<()> {
    let id = find_product_id(app, name)?;
    if app.set_checked(id, checked) {
        println!(
            "{name} {}",
            if checked { "checked off" } else { "unchecked" }
        );
    }
    Ok(())
}

pub(crate) fn cmd_product_quantity(app: &mut ShoppingService, name: &str, up: bool) -> Result<()> {
    let id = find_product_id(app, name)?;
    if up {
        app.increment(id);
    } else {
        app.decrement(id);
    }
    if let Some(product) = product_ref(app, id) {
        let quantity = product.quantity;
        let unit = product.unit.clone().unwrap_or_default();
        println!("{name}: {quantity} {unit}");
    }
    Ok(())
}

pub(crate) fn cmd_product_unit(
    app: &mut ShoppingService,
    name: &str,
    unit: Option<&str>,
) -> Result<()> {
    let id = find_product_id(app, name)?;
    let unit = match unit {
        Some(u) => u.to_string(),
        None => {
            let options: Vec<String> = UNITS.iter().map(|u| (*u).to_string()).collect();
            match choose_one("Choose a unit:", &options)? {
                Some(i) => options[i].clone(),
                None => return Ok(()),
            }
        }
    };
    app.set_unit(id, Some(&unit));
    println!("Set unit of {name} to {unit}");
    Ok(())
}

pub(crate) fn cmd_product_optional(app: &mut ShoppingService, name: &str) -> Result<()> {
    let id = find_product_id(app, name)?;
    let optional = product_ref(app, id).is_some_and(|p| p.optional);
    app.set_optional(id, !optional);
    println!(
        "{name} is now {}",
        if optional { "required" } else { "optional" }
    );
    Ok(())
}

pub(crate) fn cmd_product_shop(
    app: &mut ShoppingService,
    name: &str,
    shop: Option<&str>,
    clear: bool,
) -> Result<()> {
    let id = find_product_id(app, name)?;
    if clear {
        if app.clear_shop(id) {
            println!("Cleared shop of {name}");
        }
        return Ok(());
    }
    let shop = match shop {
        Some(s) => s.to_string(),
        None => {
            let names = app.shops.names();
            if names.is_empty() {
                bail!("No shops yet. Add a shop first.");
            }
            match choose_one("Choose a shop:", &names)? {
                Some(i) => names[i].clone(),
                None => return Ok(()),
            }
        }
    };
    if app.assign_shop(id, &shop)? {
        println!("Assigned {name} to {shop}");
    }
    Ok(())
}

pub(crate) fn cmd_product_rename(
    app: &mut ShoppingService,
    name: &str,
    new_name: &str,
) -> Result<()> {
    let id = find_product_id(app, name)?;
    if app.rename_product(id, new_name) {
        println!("Renamed {name} to {}", new_name.trim());
    } else {
        eprintln!("Product name must be non-empty.");
    }
    Ok(())
}
