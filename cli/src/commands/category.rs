use anyhow::Result;

use zakupy_core::service::ShoppingService;

pub(crate) fn cmd_category_add(app: &mut ShoppingService, name: &str) -> Result<()> {
    if app.add_category(name) {
        println!("Added category: {}", name.trim());
    } else {
        eprintln!("Category name must be non-empty and unique.");
    }
    Ok(())
}
