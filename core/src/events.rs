use crate::models::{AppData, ProductField, ProductId};

/// Published by [`crate::service::ShoppingService`] after every successful
/// mutating operation — exactly one event per operation. Batch operations
/// (recipe import, list import) publish a single event for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    CategoryAdded { name: String },
    ProductAdded { id: ProductId, category: String },
    ProductChanged { id: ProductId, field: ProductField },
    ProductRemoved { id: ProductId },
    RecipeAdded { name: String },
    RecipeProductAdded { id: ProductId, recipe: String },
    RecipeImported { recipe: String, imported: usize, skipped: usize },
    ShopAdded { name: String },
    DefaultsSeeded,
    ListImported { products: usize },
}

/// A change listener. The persistence layer registers one of these and
/// writes the snapshot on every event; frontends may register their own to
/// refresh views.
pub trait StoreSubscriber {
    /// Called once per mutation with the event and a snapshot taken after
    /// the mutation was applied.
    fn on_change(&mut self, event: &StoreEvent, snapshot: &AppData);
}
