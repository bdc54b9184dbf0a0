use std::io::Read;
use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Local;

use crate::events::{StoreEvent, StoreSubscriber};
use crate::models::{AppData, ListExport, Product, ProductField, ProductId};
use crate::persist::FileStore;
use crate::store::{CategoryStore, RecipeStore, ShopStore};

/// Frontend-supplied category picker used during recipe import.
///
/// The mobile shell implements this with an action sheet, the CLI with a
/// numbered stdin menu. Returning `None` means the user cancelled for this
/// one product — it is skipped and the import continues with the next.
pub trait CategoryChooser {
    fn choose(&mut self, product_name: &str, categories: &[String]) -> Option<String>;
}

/// What to do with the current categories when importing an exported list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Drop the current categories and take the imported ones.
    Replace,
    /// Append into matching categories by name, create the rest.
    Merge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeImportOutcome {
    pub imported: usize,
    pub skipped: usize,
    /// True when the recipe ended up empty and was deleted.
    pub recipe_removed: bool,
}

/// The application state container: the three stores plus the change
/// subscribers. Constructed once per process and passed by reference to
/// whoever needs it — there are no globals.
///
/// Every successful mutating operation publishes exactly one [`StoreEvent`];
/// the registered [`crate::persist::SnapshotSaver`] turns each into a save.
#[derive(Default)]
pub struct ShoppingService {
    pub categories: CategoryStore,
    pub recipes: RecipeStore,
    pub shops: ShopStore,
    subscribers: Vec<Box<dyn StoreSubscriber>>,
}

impl ShoppingService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn StoreSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// The full persisted state: categories, recipes, and shop names.
    #[must_use]
    pub fn snapshot(&self) -> AppData {
        AppData {
            categories: self.categories.snapshot(),
            recipes: self.recipes.snapshot(),
            shops: self.shops.snapshot(),
        }
    }

    fn publish(&mut self, event: StoreEvent) {
        let snapshot = self.snapshot();
        for subscriber in &mut self.subscribers {
            subscriber.on_change(&event, &snapshot);
        }
    }

    // --- Categories & products ---

    /// Blank and duplicate names are rejected silently.
    pub fn add_category(&mut self, name: &str) -> bool {
        if self.categories.add(name) {
            self.publish(StoreEvent::CategoryAdded {
                name: name.trim().to_string(),
            });
            true
        } else {
            false
        }
    }

    /// `Ok(None)` on a blank product name; `Err` on an unknown category.
    pub fn add_product(&mut self, name: &str, category: &str) -> Result<Option<ProductId>> {
        match self.categories.add_product(name, category)? {
            Some(id) => {
                self.publish(StoreEvent::ProductAdded {
                    id,
                    category: category.to_string(),
                });
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Removes a product from whichever category owns it. Confirmation of
    /// the destructive intent is the caller's responsibility. No-op (and no
    /// save) when no category owns the product.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        if self.categories.remove_product(id) {
            self.publish(StoreEvent::ProductRemoved { id });
            true
        } else {
            false
        }
    }

    /// Looks the product up in categories first, then recipes — recipe
    /// ingredients are editable with the same operations.
    fn find_product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        if self.categories.product(id).is_some() {
            return self.categories.product_mut(id);
        }
        self.recipes.product_mut(id)
    }

    /// Checking a product relocates it to the end of its category; unchecking
    /// never moves it. No event when the flag already had the requested value.
    pub fn set_checked(&mut self, id: ProductId, checked: bool) -> bool {
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        if product.checked == checked {
            return false;
        }
        product.checked = checked;
        if checked {
            self.categories.move_to_end(id);
        }
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Checked,
        });
        true
    }

    pub fn increment(&mut self, id: ProductId) -> bool {
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        product.increment();
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Quantity,
        });
        true
    }

    /// Quantity floors at 0; a decrement at 0 changes nothing and publishes
    /// nothing.
    pub fn decrement(&mut self, id: ProductId) -> bool {
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        if product.quantity == 0 {
            return false;
        }
        product.decrement();
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Quantity,
        });
        true
    }

    /// Renames a product. Blank names are rejected (the name stays non-empty).
    pub fn rename_product(&mut self, id: ProductId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        if product.name == name {
            return false;
        }
        product.name = name.to_string();
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Name,
        });
        true
    }

    pub fn set_optional(&mut self, id: ProductId, optional: bool) -> bool {
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        if product.optional == optional {
            return false;
        }
        product.optional = optional;
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Optional,
        });
        true
    }

    pub fn set_unit(&mut self, id: ProductId, unit: Option<&str>) -> bool {
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        if product.unit.as_deref() == unit {
            return false;
        }
        product.unit = unit.map(str::to_string);
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Unit,
        });
        true
    }

    /// Assigns the product to an existing shop. Membership views are derived
    /// from this field, so reassignment replaces the previous shop. Errors
    /// when the shop does not exist; `Ok(false)` when nothing changed.
    pub fn assign_shop(&mut self, id: ProductId, shop: &str) -> Result<bool> {
        if !self.shops.contains(shop) {
            bail!("No shop named '{shop}'");
        }
        let Some(product) = self.find_product_mut(id) else {
            return Ok(false);
        };
        if product.shop.as_deref() == Some(shop) {
            return Ok(false);
        }
        product.shop = Some(shop.to_string());
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Shop,
        });
        Ok(true)
    }

    pub fn clear_shop(&mut self, id: ProductId) -> bool {
        let Some(product) = self.find_product_mut(id) else {
            return false;
        };
        if product.shop.is_none() {
            return false;
        }
        product.shop = None;
        self.publish(StoreEvent::ProductChanged {
            id,
            field: ProductField::Shop,
        });
        true
    }

    /// UI-only expansion state; changes are never persisted and publish no
    /// event.
    pub fn toggle_expanded(&mut self, category: &str) -> bool {
        self.categories.toggle_expanded(category)
    }

    // --- Recipes ---

    pub fn add_recipe(&mut self, name: &str, description: &str) -> bool {
        if self.recipes.add(name, description) {
            self.publish(StoreEvent::RecipeAdded {
                name: name.trim().to_string(),
            });
            true
        } else {
            false
        }
    }

    pub fn add_product_to_recipe(
        &mut self,
        name: &str,
        recipe: &str,
        unit: Option<&str>,
    ) -> Result<Option<ProductId>> {
        match self.recipes.add_product(name, recipe, unit)? {
            Some(id) => {
                self.publish(StoreEvent::RecipeProductAdded {
                    id,
                    recipe: recipe.to_string(),
                });
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Moves a recipe's products into categories picked by the chooser, one
    /// choice per product. A cancelled or invalid choice skips that product
    /// only; the batch continues. Moved products become fresh records —
    /// quantity, unit and the optional flag are carried, `checked` is reset,
    /// the shop assignment is not. When the recipe ends up empty it is
    /// deleted. One event (one save) for the whole batch.
    pub fn import_recipe(
        &mut self,
        recipe: &str,
        chooser: &mut dyn CategoryChooser,
    ) -> Result<RecipeImportOutcome> {
        if self.categories.is_empty() {
            bail!("No categories yet. Add a category first.");
        }
        let Some(found) = self.recipes.find(recipe) else {
            bail!("No recipe named '{recipe}'");
        };
        let entries: Vec<(ProductId, String)> = found
            .products
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect();
        let category_names = self.categories.names();

        let mut outcome = RecipeImportOutcome::default();
        for (id, product_name) in entries {
            let choice = chooser
                .choose(&product_name, &category_names)
                .filter(|c| self.categories.find(c).is_some());
            let Some(target) = choice else {
                outcome.skipped += 1;
                continue;
            };
            let Some(original) = self.recipes.take_product(recipe, id) else {
                continue;
            };
            let mut fresh = Product::new(&original.name);
            fresh.quantity = original.quantity;
            fresh.unit = original.unit.clone();
            fresh.optional = original.optional;
            if let Some(category) = self.categories.find_mut(&target) {
                category.products.push(fresh);
                outcome.imported += 1;
            }
        }

        if self.recipes.find(recipe).is_some_and(|r| r.products.is_empty()) {
            self.recipes.remove(recipe);
            outcome.recipe_removed = true;
        }

        self.publish(StoreEvent::RecipeImported {
            recipe: recipe.to_string(),
            imported: outcome.imported,
            skipped: outcome.skipped,
        });
        Ok(outcome)
    }

    /// Seeds the two built-in recipes. Invoked when no usable persisted
    /// state exists.
    pub fn seed_defaults(&mut self) {
        self.recipes.seed_defaults();
        self.publish(StoreEvent::DefaultsSeeded);
    }

    // --- Shops ---

    pub fn add_shop(&mut self, name: &str) -> bool {
        if self.shops.add(name) {
            self.publish(StoreEvent::ShopAdded {
                name: name.trim().to_string(),
            });
            true
        } else {
            false
        }
    }

    // --- Persistence ---

    /// Loads the persisted snapshot at startup. A missing, unreadable, or
    /// recipe-less document falls back to seeding the defaults — the sole
    /// recovery path. A successful plain load publishes nothing.
    pub fn load(&mut self, store: &FileStore) {
        let data = match store.read() {
            Ok(Some(data)) => data,
            Ok(None) => {
                self.seed_defaults();
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to load snapshot, seeding defaults: {:#}", e);
                self.seed_defaults();
                return;
            }
        };
        self.shops.replace(&data.shops);
        self.categories.merge(&data.categories);
        self.recipes.replace(&data.recipes);
        if self.recipes.is_empty() {
            self.seed_defaults();
        }
    }

    /// Writes the categories-only export document. Errors when the list is
    /// empty or the write fails; nothing is written in either case.
    pub fn export(&self, store: &FileStore) -> Result<PathBuf> {
        if self.categories.is_empty() {
            bail!("The shopping list is empty.");
        }
        let export = ListExport {
            export_date: Local::now().to_rfc3339(),
            categories: self.categories.snapshot(),
        };
        store.export(&export)
    }

    /// Imports a previously exported list from a picked file's byte stream.
    pub fn import_list<R: Read>(&mut self, reader: R, mode: ImportMode) -> Result<usize> {
        let data = FileStore::read_export(reader)?;
        self.import_list_data(data, mode)
    }

    /// Applies an already-parsed export document. Errors when it holds zero
    /// categories. Returns the number of imported products; one event (one
    /// save) for the whole import.
    pub fn import_list_data(&mut self, data: ListExport, mode: ImportMode) -> Result<usize> {
        if data.categories.is_empty() {
            bail!("The file is empty or invalid.");
        }
        if mode == ImportMode::Replace {
            self.categories.clear();
        }
        let count = self.categories.merge(&data.categories);
        self.publish(StoreEvent::ListImported { products: count });
        Ok(count)
    }
}
