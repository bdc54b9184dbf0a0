use anyhow::{Result, bail};

use crate::models::{
    Category, CategoryData, Product, ProductData, ProductId, Recipe, RecipeData, Shop, ShopData,
};

fn trimmed(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t) }
}

/// Ordered collection of named categories, each owning its products.
#[derive(Debug, Default)]
pub struct CategoryStore {
    pub categories: Vec<Category>,
}

impl CategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new empty category. Blank and duplicate names are rejected
    /// silently (returns false, no state change).
    pub fn add(&mut self, name: &str) -> bool {
        let Some(name) = trimmed(name) else {
            return false;
        };
        if self.find(name).is_some() {
            return false;
        }
        self.categories.push(Category::new(name));
        true
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Appends a zero-quantity product to an existing category.
    ///
    /// Returns `Ok(None)` when the product name is blank (silent rejection);
    /// errors when the category does not exist.
    pub fn add_product(&mut self, name: &str, category: &str) -> Result<Option<ProductId>> {
        let Some(name) = trimmed(name) else {
            return Ok(None);
        };
        let Some(target) = self.find_mut(category) else {
            bail!("No category named '{category}'");
        };
        let product = Product::new(name);
        let id = product.id;
        target.products.push(product);
        Ok(Some(id))
    }

    /// Removes a product by membership scan across all categories.
    /// False when no category owns it.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        for category in &mut self.categories {
            if let Some(pos) = category.products.iter().position(|p| p.id == id) {
                category.products.remove(pos);
                return true;
            }
        }
        false
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.categories
            .iter()
            .flat_map(|c| &c.products)
            .find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.categories
            .iter_mut()
            .flat_map(|c| &mut c.products)
            .find(|p| p.id == id)
    }

    /// The category owning the given product, if any.
    #[must_use]
    pub fn owner_of(&self, id: ProductId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.products.iter().any(|p| p.id == id))
    }

    /// Relocates a product to the last position of its category. The relative
    /// order of every other product is unchanged. No-op when the product is
    /// already last or not owned by any category.
    pub fn move_to_end(&mut self, id: ProductId) {
        for category in &mut self.categories {
            if let Some(pos) = category.products.iter().position(|p| p.id == id) {
                let last = category.products.len() - 1;
                if pos != last {
                    let product = category.products.remove(pos);
                    category.products.push(product);
                }
                return;
            }
        }
    }

    /// Flips a category's expansion state. UI-only; not persisted.
    pub fn toggle_expanded(&mut self, name: &str) -> bool {
        match self.find_mut(name) {
            Some(category) => {
                category.expanded = !category.expanded;
                true
            }
            None => false,
        }
    }

    /// Merges loaded or imported categories: products are appended into the
    /// category of the same name when one exists, otherwise the category is
    /// created. Returns how many products were added.
    pub fn merge(&mut self, categories: &[CategoryData]) -> usize {
        let mut added = 0;
        for data in categories {
            let pos = match self.categories.iter().position(|c| c.name == data.name) {
                Some(pos) => pos,
                None => {
                    self.categories.push(Category::new(&data.name));
                    self.categories.len() - 1
                }
            };
            for product in &data.products {
                self.categories[pos].products.push(product.to_product());
                added += 1;
            }
        }
        added
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<CategoryData> {
        self.categories
            .iter()
            .map(|c| CategoryData {
                name: c.name.clone(),
                products: c.products.iter().map(ProductData::from).collect(),
            })
            .collect()
    }
}

/// Ordered collection of recipes, each owning its own products until they
/// are imported into a category.
#[derive(Debug, Default)]
pub struct RecipeStore {
    pub recipes: Vec<Recipe>,
}

impl RecipeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a recipe with an empty product list. Rejects the call when
    /// either the name or the description is blank after trimming.
    pub fn add(&mut self, name: &str, description: &str) -> bool {
        let (Some(name), Some(description)) = (trimmed(name), trimmed(description)) else {
            return false;
        };
        self.recipes.push(Recipe::new(name, description));
        true
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.recipes.iter().map(|r| r.name.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Appends a zero-quantity product to an existing recipe.
    ///
    /// Returns `Ok(None)` when the product name is blank; errors when the
    /// recipe does not exist.
    pub fn add_product(
        &mut self,
        name: &str,
        recipe: &str,
        unit: Option<&str>,
    ) -> Result<Option<ProductId>> {
        let Some(name) = trimmed(name) else {
            return Ok(None);
        };
        let Some(target) = self.find_mut(recipe) else {
            bail!("No recipe named '{recipe}'");
        };
        let mut product = Product::new(name);
        product.unit = unit.map(str::to_string);
        let id = product.id;
        target.products.push(product);
        Ok(Some(id))
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.recipes
            .iter()
            .flat_map(|r| &r.products)
            .find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.recipes
            .iter_mut()
            .flat_map(|r| &mut r.products)
            .find(|p| p.id == id)
    }

    /// Removes and returns a product from the named recipe.
    pub fn take_product(&mut self, recipe: &str, id: ProductId) -> Option<Product> {
        let target = self.find_mut(recipe)?;
        let pos = target.products.iter().position(|p| p.id == id)?;
        Some(target.products.remove(pos))
    }

    /// Deletes a recipe by name.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.recipes.iter().position(|r| r.name == name) {
            Some(pos) => {
                self.recipes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Wholesale replacement from persisted data (recipes are never merged).
    pub fn replace(&mut self, recipes: &[RecipeData]) {
        self.recipes = recipes
            .iter()
            .map(|data| {
                let mut recipe = Recipe::new(&data.name, &data.description);
                recipe.products = data.products.iter().map(ProductData::to_product).collect();
                recipe
            })
            .collect();
    }

    /// Populates the two built-in recipes shipped with the app.
    pub fn seed_defaults(&mut self) {
        fn ingredient(name: &str, quantity: u32, unit: &str) -> Product {
            let mut product = Product::new(name);
            product.quantity = quantity;
            product.unit = Some(unit.to_string());
            product
        }

        let mut scrambled_eggs = Recipe::new(
            "Jajecznica",
            "Na patelni rozpuść masło. Dodaj jajka i na średnim ogniu mieszaj jajka do \
             ścięcia. W trakcie mieszania dodaj szynke i sól.",
        );
        scrambled_eggs.products = vec![
            ingredient("Jajka", 3, "szt."),
            ingredient("Masło", 15, "g"),
            ingredient("Szynka", 100, "g"),
            ingredient("Sól", 1, "szczypta"),
        ];
        self.recipes.push(scrambled_eggs);

        let mut pancakes = Recipe::new(
            "Naleśniki",
            "Wymieszaj mąkę z jajkami, stopniowo dodając mleko. Dodaj szczyptę cukru i \
             roztopione masło. Smaż cienkie placki na rozgrzanej patelni po ok. 1-2 min \
             z każdej strony.",
        );
        pancakes.products = vec![
            ingredient("Mąka", 250, "g"),
            ingredient("Mleko", 500, "ml"),
            ingredient("Jajka", 2, "szt."),
            ingredient("Cukier", 2, "szczypta"),
            ingredient("Masło", 5, "g"),
        ];
        self.recipes.push(pancakes);
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<RecipeData> {
        self.recipes
            .iter()
            .map(|r| RecipeData {
                name: r.name.clone(),
                description: r.description.clone(),
                products: r.products.iter().map(ProductData::from).collect(),
            })
            .collect()
    }
}

/// Ordered collection of named shops. Membership is a derived view over the
/// category products' `shop` fields, never stored.
#[derive(Debug, Default)]
pub struct ShopStore {
    pub shops: Vec<Shop>,
}

impl ShopStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shop. Blank and duplicate names are rejected silently.
    pub fn add(&mut self, name: &str) -> bool {
        let Some(name) = trimmed(name) else {
            return false;
        };
        if self.contains(name) {
            return false;
        }
        self.shops.push(Shop {
            name: name.to_string(),
        });
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.shops.iter().any(|s| s.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.shops.iter().map(|s| s.name.clone()).collect()
    }

    /// Every product assigned to the named shop, across all categories.
    /// Unknown shops yield an empty view.
    #[must_use]
    pub fn members<'a>(&self, shop: &str, categories: &'a CategoryStore) -> Vec<&'a Product> {
        if !self.contains(shop) {
            return Vec::new();
        }
        categories
            .categories
            .iter()
            .flat_map(|c| &c.products)
            .filter(|p| p.shop.as_deref() == Some(shop))
            .collect()
    }

    pub fn replace(&mut self, shops: &[ShopData]) {
        self.shops = shops
            .iter()
            .map(|s| Shop {
                name: s.name.clone(),
            })
            .collect();
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ShopData> {
        self.shops
            .iter()
            .map(|s| ShopData {
                name: s.name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_category() {
        let mut store = CategoryStore::new();
        assert!(store.add("Nabiał"));
        assert_eq!(store.categories.len(), 1);
        assert_eq!(store.categories[0].name, "Nabiał");
        assert!(store.categories[0].expanded);
    }

    #[test]
    fn test_add_category_rejects_blank() {
        let mut store = CategoryStore::new();
        assert!(!store.add(""));
        assert!(!store.add("   "));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_category_rejects_duplicate() {
        let mut store = CategoryStore::new();
        assert!(store.add("Nabiał"));
        assert!(!store.add("Nabiał"));
        assert_eq!(store.categories.len(), 1);
    }

    #[test]
    fn test_add_product_to_unknown_category() {
        let mut store = CategoryStore::new();
        assert!(store.add_product("Mleko", "Nabiał").is_err());
    }

    #[test]
    fn test_add_product_blank_name_is_silent_noop() {
        let mut store = CategoryStore::new();
        store.add("Nabiał");
        assert!(store.add_product("  ", "Nabiał").unwrap().is_none());
        assert!(store.categories[0].products.is_empty());
    }

    #[test]
    fn test_add_and_remove_product() {
        let mut store = CategoryStore::new();
        store.add("Nabiał");
        let id = store.add_product("Mleko", "Nabiał").unwrap().unwrap();
        assert_eq!(store.categories[0].products.len(), 1);
        assert_eq!(store.categories[0].products[0].quantity, 0);

        assert!(store.remove_product(id));
        assert!(store.categories[0].products.is_empty());
        // second removal is a no-op
        assert!(!store.remove_product(id));
    }

    #[test]
    fn test_move_to_end_preserves_relative_order() {
        let mut store = CategoryStore::new();
        store.add("Warzywa");
        let a = store.add_product("Marchew", "Warzywa").unwrap().unwrap();
        let _b = store.add_product("Ziemniaki", "Warzywa").unwrap().unwrap();
        let _c = store.add_product("Cebula", "Warzywa").unwrap().unwrap();

        store.move_to_end(a);
        let names: Vec<&str> = store.categories[0]
            .products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Ziemniaki", "Cebula", "Marchew"]);
    }

    #[test]
    fn test_move_to_end_when_already_last() {
        let mut store = CategoryStore::new();
        store.add("Warzywa");
        let _a = store.add_product("Marchew", "Warzywa").unwrap().unwrap();
        let b = store.add_product("Cebula", "Warzywa").unwrap().unwrap();

        store.move_to_end(b);
        let names: Vec<&str> = store.categories[0]
            .products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Marchew", "Cebula"]);
    }

    #[test]
    fn test_owner_of() {
        let mut store = CategoryStore::new();
        store.add("Nabiał");
        store.add("Warzywa");
        let id = store.add_product("Marchew", "Warzywa").unwrap().unwrap();
        assert_eq!(store.owner_of(id).unwrap().name, "Warzywa");
        assert!(store.owner_of(ProductId::new()).is_none());
    }

    #[test]
    fn test_merge_into_existing_category() {
        let mut store = CategoryStore::new();
        store.add("Nabiał");
        store.add_product("Mleko", "Nabiał").unwrap();

        let incoming = vec![CategoryData {
            name: "Nabiał".to_string(),
            products: vec![ProductData {
                name: "Ser".to_string(),
                value: 1,
                is_checked: false,
                is_optional: false,
                unit: None,
                shop: None,
            }],
        }];
        let added = store.merge(&incoming);
        assert_eq!(added, 1);
        assert_eq!(store.categories.len(), 1);
        assert_eq!(store.categories[0].products.len(), 2);
    }

    #[test]
    fn test_merge_creates_missing_category() {
        let mut store = CategoryStore::new();
        let incoming = vec![CategoryData {
            name: "Pieczywo".to_string(),
            products: vec![ProductData {
                name: "Chleb".to_string(),
                value: 1,
                is_checked: true,
                is_optional: false,
                unit: Some("szt.".to_string()),
                shop: None,
            }],
        }];
        assert_eq!(store.merge(&incoming), 1);
        assert_eq!(store.categories[0].name, "Pieczywo");
        assert!(store.categories[0].products[0].checked);
    }

    #[test]
    fn test_toggle_expanded() {
        let mut store = CategoryStore::new();
        store.add("Nabiał");
        assert!(store.toggle_expanded("Nabiał"));
        assert!(!store.categories[0].expanded);
        assert!(store.toggle_expanded("Nabiał"));
        assert!(store.categories[0].expanded);
        assert!(!store.toggle_expanded("Inne"));
    }

    #[test]
    fn test_add_recipe_requires_name_and_description() {
        let mut store = RecipeStore::new();
        assert!(!store.add("", "opis"));
        assert!(!store.add("Zupa", "   "));
        assert!(store.is_empty());
        assert!(store.add("Zupa", "Gotuj wszystko razem."));
        assert_eq!(store.recipes.len(), 1);
    }

    #[test]
    fn test_add_product_to_recipe() {
        let mut store = RecipeStore::new();
        store.add("Zupa", "Gotuj.");
        let id = store
            .add_product("Marchew", "Zupa", Some("szt."))
            .unwrap()
            .unwrap();
        let recipe = store.find("Zupa").unwrap();
        assert_eq!(recipe.products.len(), 1);
        assert_eq!(recipe.products[0].id, id);
        assert_eq!(recipe.products[0].unit.as_deref(), Some("szt."));
        assert_eq!(recipe.products[0].quantity, 0);
    }

    #[test]
    fn test_add_product_to_unknown_recipe() {
        let mut store = RecipeStore::new();
        assert!(store.add_product("Marchew", "Zupa", None).is_err());
    }

    #[test]
    fn test_take_product() {
        let mut store = RecipeStore::new();
        store.add("Zupa", "Gotuj.");
        let id = store.add_product("Marchew", "Zupa", None).unwrap().unwrap();
        let taken = store.take_product("Zupa", id).unwrap();
        assert_eq!(taken.name, "Marchew");
        assert!(store.find("Zupa").unwrap().products.is_empty());
        assert!(store.take_product("Zupa", id).is_none());
    }

    #[test]
    fn test_seed_defaults_exact_contents() {
        let mut store = RecipeStore::new();
        store.seed_defaults();
        assert_eq!(store.recipes.len(), 2);

        let eggs = &store.recipes[0];
        assert_eq!(eggs.name, "Jajecznica");
        assert_eq!(eggs.products.len(), 4);
        let expected = [
            ("Jajka", 3, "szt."),
            ("Masło", 15, "g"),
            ("Szynka", 100, "g"),
            ("Sól", 1, "szczypta"),
        ];
        for (product, (name, qty, unit)) in eggs.products.iter().zip(expected) {
            assert_eq!(product.name, name);
            assert_eq!(product.quantity, qty);
            assert_eq!(product.unit.as_deref(), Some(unit));
        }

        let pancakes = &store.recipes[1];
        assert_eq!(pancakes.name, "Naleśniki");
        assert_eq!(pancakes.products.len(), 5);
        let expected = [
            ("Mąka", 250, "g"),
            ("Mleko", 500, "ml"),
            ("Jajka", 2, "szt."),
            ("Cukier", 2, "szczypta"),
            ("Masło", 5, "g"),
        ];
        for (product, (name, qty, unit)) in pancakes.products.iter().zip(expected) {
            assert_eq!(product.name, name);
            assert_eq!(product.quantity, qty);
            assert_eq!(product.unit.as_deref(), Some(unit));
        }
    }

    #[test]
    fn test_shop_add_and_duplicates() {
        let mut store = ShopStore::new();
        assert!(store.add("Biedronka"));
        assert!(!store.add("Biedronka"));
        assert!(!store.add(" "));
        assert_eq!(store.names(), ["Biedronka"]);
    }

    #[test]
    fn test_shop_members_is_derived() {
        let mut shops = ShopStore::new();
        shops.add("Biedronka");
        shops.add("Lidl");

        let mut categories = CategoryStore::new();
        categories.add("Nabiał");
        let milk = categories.add_product("Mleko", "Nabiał").unwrap().unwrap();
        let cheese = categories.add_product("Ser", "Nabiał").unwrap().unwrap();
        categories.product_mut(milk).unwrap().shop = Some("Biedronka".to_string());
        categories.product_mut(cheese).unwrap().shop = Some("Lidl".to_string());

        let members = shops.members("Biedronka", &categories);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Mleko");

        // reassignment replaces, never accumulates
        categories.product_mut(milk).unwrap().shop = Some("Lidl".to_string());
        assert!(shops.members("Biedronka", &categories).is_empty());
        assert_eq!(shops.members("Lidl", &categories).len(), 2);

        // unknown shop yields nothing
        assert!(shops.members("Żabka", &categories).is_empty());
    }
}
