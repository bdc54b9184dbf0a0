use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Units offered by the product editor, in menu order.
pub const UNITS: &[&str] = &["szt.", "l", "kg", "ml", "g", "opak.", "szczypta", "łyżki"];

/// Name substituted for blank product names.
pub const DEFAULT_PRODUCT_NAME: &str = "Produkt";

/// Stable identity of a product across stores.
///
/// Products are owned by exactly one category or one recipe, but are referred
/// to from outside (removal, field mutation, shop views), so they carry an id
/// rather than being addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(Uuid);

impl ProductId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which product field a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Quantity,
    Checked,
    Optional,
    Unit,
    Shop,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub checked: bool,
    pub optional: bool,
    pub unit: Option<String>,
    /// Name of the shop this product is assigned to. Shop membership views
    /// are derived from this field.
    pub shop: Option<String>,
}

impl Product {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        Self {
            id: ProductId::new(),
            name: if name.is_empty() {
                DEFAULT_PRODUCT_NAME.to_string()
            } else {
                name.to_string()
            },
            quantity: 0,
            checked: false,
            optional: false,
            unit: None,
            shop: None,
        }
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Floors at 0; never negative, never an error.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1);
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    /// UI state only; defaults to true and is never persisted.
    pub expanded: bool,
    pub products: Vec<Product>,
}

impl Category {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            expanded: true,
            products: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub products: Vec<Product>,
}

impl Recipe {
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            products: Vec::new(),
        }
    }
}

/// Shops persist and carry their name only; which products belong to a shop
/// is recomputed from each product's `shop` field.
#[derive(Debug, Clone)]
pub struct Shop {
    pub name: String,
}

// --- Persisted document types ---

/// Root of the persisted document (the full snapshot).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub categories: Vec<CategoryData>,
    #[serde(default)]
    pub recipes: Vec<RecipeData>,
    #[serde(default)]
    pub shops: Vec<ShopData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
    #[serde(default)]
    pub products: Vec<ProductData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub products: Vec<ProductData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopData {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub value: u32,
    pub is_checked: bool,
    pub is_optional: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shop: Option<String>,
}

impl ProductData {
    /// Rebuilds an owned product from its persisted form. Ids are not
    /// persisted; the restored product gets a fresh one.
    #[must_use]
    pub fn to_product(&self) -> Product {
        let mut product = Product::new(&self.name);
        product.quantity = self.value;
        product.checked = self.is_checked;
        product.optional = self.is_optional;
        product.unit = self.unit.clone();
        product.shop = self.shop.clone();
        product
    }
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            value: product.quantity,
            is_checked: product.checked,
            is_optional: product.optional,
            unit: product.unit.clone(),
            shop: product.shop.clone(),
        }
    }
}

/// Root of the categories-only export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListExport {
    /// RFC 3339 timestamp taken when the export was written.
    pub export_date: String,
    #[serde(default)]
    pub categories: Vec<CategoryData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_defaults() {
        let p = Product::new("Mleko");
        assert_eq!(p.name, "Mleko");
        assert_eq!(p.quantity, 0);
        assert!(!p.checked);
        assert!(!p.optional);
        assert!(p.unit.is_none());
        assert!(p.shop.is_none());
    }

    #[test]
    fn test_blank_name_gets_default() {
        assert_eq!(Product::new("").name, DEFAULT_PRODUCT_NAME);
        assert_eq!(Product::new("   ").name, DEFAULT_PRODUCT_NAME);
    }

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(Product::new("  Chleb ").name, "Chleb");
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut p = Product::new("Jajka");
        p.increment();
        p.increment();
        for _ in 0..10 {
            p.decrement();
        }
        assert_eq!(p.quantity, 0);
    }

    #[test]
    fn test_increment() {
        let mut p = Product::new("Jajka");
        p.increment();
        assert_eq!(p.quantity, 1);
        p.increment();
        assert_eq!(p.quantity, 2);
    }

    #[test]
    fn test_product_ids_are_unique() {
        assert_ne!(Product::new("a").id, Product::new("a").id);
    }

    #[test]
    fn test_product_data_round_trip() {
        let mut p = Product::new("Masło");
        p.quantity = 15;
        p.checked = true;
        p.optional = true;
        p.unit = Some("g".to_string());
        p.shop = Some("Biedronka".to_string());

        let data = ProductData::from(&p);
        let restored = data.to_product();
        assert_eq!(restored.name, "Masło");
        assert_eq!(restored.quantity, 15);
        assert!(restored.checked);
        assert!(restored.optional);
        assert_eq!(restored.unit.as_deref(), Some("g"));
        assert_eq!(restored.shop.as_deref(), Some("Biedronka"));
        // identity is not persisted
        assert_ne!(restored.id, p.id);
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let p = Product::new("Chleb");
        let json = serde_json::to_string(&ProductData::from(&p)).unwrap();
        assert!(!json.contains("unit"));
        assert!(!json.contains("shop"));
    }

    #[test]
    fn test_app_data_tolerates_missing_lists() {
        let data: AppData = serde_json::from_str("{}").unwrap();
        assert!(data.categories.is_empty());
        assert!(data.recipes.is_empty());
        assert!(data.shops.is_empty());
    }
}
