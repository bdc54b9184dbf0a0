use anyhow::Result;

use zakupy_core::service::ShoppingService;

use super::helpers::print_list_table;

pub(crate) fn cmd_list(app: &ShoppingService, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
        return Ok(());
    }
    if app.categories.is_empty() {
        println!("The shopping list is empty. Add a category first.");
        return Ok(());
    }
    print_list_table(app);
    Ok(())
}
