use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use zakupy_core::persist::FileStore;
use zakupy_core::service::{ImportMode, ShoppingService};

use super::helpers::choose_one;

pub(crate) fn cmd_export(app: &ShoppingService, store: &FileStore) -> Result<()> {
    let path = app.export(store)?;
    println!("Exported to {}", path.display());
    Ok(())
}

pub(crate) fn cmd_import(
    app: &mut ShoppingService,
    file: &Path,
    replace: bool,
    merge: bool,
) -> Result<()> {
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let data = FileStore::read_export(reader)?;
    if data.categories.is_empty() {
        eprintln!("The file is empty or invalid.");
        return Ok(());
    }

    let total: usize = data.categories.iter().map(|c| c.products.len()).sum();
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(&data.export_date) {
        eprintln!(
            "List exported {} with {total} product(s).",
            date.format("%Y-%m-%d %H:%M")
        );
    }

    let mode = if replace {
        ImportMode::Replace
    } else if merge {
        ImportMode::Merge
    } else {
        let options = vec![
            "Replace the current list".to_string(),
            "Merge into the current list".to_string(),
        ];
        match choose_one("What to do with the list?", &options)? {
            Some(0) => ImportMode::Replace,
            Some(_) => ImportMode::Merge,
            // dismissed: nothing is touched
            None => return Ok(()),
        }
    };

    let count = app.import_list_data(data, mode)?;
    println!("Imported {count} product(s).");
    Ok(())
}
