use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result};
use crate::models::{Component, Ingredient, IngredientLine, ItemKind, Recipe, SellableItem};
use crate::state::repository::{refresh_line_prices, InMemoryRepository, Repository};

/// Serializable snapshot of everything the back office works with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub menus: Vec<SellableItem>,
    #[serde(default)]
    pub packages: Vec<SellableItem>,
}

impl Catalog {
    /// Built-in mock data used when no catalog file is given.
    pub fn sample() -> Self {
        let mut beef = Ingredient::new("ING-001", "Daging Sapi", "Protein", "g", 45.0);
        beef.previous_price = Some(42.0);
        let mut rice = Ingredient::new("ING-003", "Beras", "Karbohidrat", "g", 14.0);
        rice.previous_price = Some(13.0);
        let mut chili = Ingredient::new("ING-005", "Cabai Hijau", "Sayuran", "g", 60.0);
        chili.previous_price = Some(75.0);
        let mut sugar = Ingredient::new("ING-009", "Gula Pasir", "Bumbu", "g", 16.0);
        sugar.previous_price = Some(15.0);

        let ingredients = vec![
            beef,
            Ingredient::new("ING-002", "Santan", "Dairy", "ml", 12.0),
            rice,
            Ingredient::new("ING-004", "Air", "Lainnya", "ml", 0.0),
            chili,
            Ingredient::new("ING-006", "Bawang Merah", "Sayuran", "g", 40.0),
            Ingredient::new("ING-007", "Minyak Goreng", "Bumbu", "ml", 20.0),
            Ingredient::new("ING-008", "Teh", "Minuman", "g", 100.0),
            sugar,
        ];

        let recipes = vec![
            Recipe {
                id: "RCP-001".to_string(),
                name: "Rendang Sapi".to_string(),
                category: "Main Course".to_string(),
                portions: 3,
                ingredients: vec![
                    IngredientLine::new("ING-001", "Daging Sapi", 300.0, "g", 45.0),
                    IngredientLine::new("ING-002", "Santan", 100.0, "ml", 12.0),
                ],
                selling_price: Some(9000.0),
            },
            Recipe {
                id: "RCP-002".to_string(),
                name: "Nasi Putih".to_string(),
                category: "Side Dish".to_string(),
                portions: 4,
                ingredients: vec![
                    IngredientLine::new("ING-003", "Beras", 500.0, "g", 14.0),
                    IngredientLine::new("ING-004", "Air", 600.0, "ml", 0.0),
                ],
                selling_price: Some(5000.0),
            },
            Recipe {
                id: "RCP-003".to_string(),
                name: "Sambal Hijau".to_string(),
                category: "Condiment".to_string(),
                portions: 10,
                ingredients: vec![
                    IngredientLine::new("ING-005", "Cabai Hijau", 200.0, "g", 60.0),
                    IngredientLine::new("ING-006", "Bawang Merah", 100.0, "g", 40.0),
                    IngredientLine::new("ING-007", "Minyak Goreng", 50.0, "ml", 20.0),
                ],
                selling_price: None,
            },
            Recipe {
                id: "RCP-004".to_string(),
                name: "Es Teh Manis".to_string(),
                category: "Beverage".to_string(),
                portions: 5,
                ingredients: vec![
                    IngredientLine::new("ING-008", "Teh", 20.0, "g", 100.0),
                    IngredientLine::new("ING-009", "Gula Pasir", 100.0, "g", 16.0),
                ],
                selling_price: Some(5000.0),
            },
        ];

        let component = |ref_id: &str, cost: f64| Component {
            ref_id: ref_id.to_string(),
            cost,
        };

        let menus = vec![
            SellableItem {
                id: "MNU-001".to_string(),
                name: "Nasi Rendang".to_string(),
                kind: ItemKind::Menu,
                components: vec![
                    component("RCP-001", 4900.0),
                    component("RCP-002", 1750.0),
                    component("RCP-003", 850.0),
                ],
                selling_price: 12000.0,
            },
            SellableItem {
                id: "MNU-002".to_string(),
                name: "Es Teh Manis".to_string(),
                kind: ItemKind::Menu,
                components: vec![component("RCP-004", 720.0)],
                selling_price: 5000.0,
            },
            SellableItem {
                id: "MNU-003".to_string(),
                name: "Nasi Sambal".to_string(),
                kind: ItemKind::Menu,
                components: vec![component("RCP-002", 1750.0), component("RCP-003", 1700.0)],
                selling_price: 0.0,
            },
        ];

        let packages = vec![SellableItem {
            id: "PKG-001".to_string(),
            name: "Paket Hemat Rendang".to_string(),
            kind: ItemKind::Package,
            components: vec![component("MNU-001", 7500.0), component("MNU-002", 720.0)],
            selling_price: 15000.0,
        }];

        Self {
            ingredients,
            recipes,
            menus,
            packages,
        }
    }
}

/// Load a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    tracing::debug!("Loading catalog from {:?}", path);
    let content = fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    tracing::debug!(
        ingredients = catalog.ingredients.len(),
        recipes = catalog.recipes.len(),
        menus = catalog.menus.len(),
        packages = catalog.packages.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// In-memory repositories for one session.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub ingredients: InMemoryRepository<Ingredient>,
    pub recipes: InMemoryRepository<Recipe>,
    pub menus: InMemoryRepository<SellableItem>,
    pub packages: InMemoryRepository<SellableItem>,
}

impl Store {
    /// Build repositories from a catalog, rejecting duplicate ids and
    /// items filed under the wrong kind.
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        for (items, kind) in [(&catalog.menus, ItemKind::Menu), (&catalog.packages, ItemKind::Package)] {
            if let Some(item) = items.iter().find(|i| i.kind != kind) {
                return Err(CostError::InvalidInput(format!(
                    "{} '{}' listed under {}s",
                    item.kind.label(),
                    item.id,
                    kind.label().to_lowercase()
                )));
            }
        }

        Ok(Self {
            ingredients: InMemoryRepository::from_items(catalog.ingredients)?,
            recipes: InMemoryRepository::from_items(catalog.recipes)?,
            menus: InMemoryRepository::from_items(catalog.menus)?,
            packages: InMemoryRepository::from_items(catalog.packages)?,
        })
    }

    /// Snapshot the repositories back into a catalog.
    pub fn to_catalog(&self) -> Catalog {
        Catalog {
            ingredients: self.ingredients.to_vec(),
            recipes: self.recipes.to_vec(),
            menus: self.menus.to_vec(),
            packages: self.packages.to_vec(),
        }
    }

    /// Repository holding items of the given kind.
    pub fn items(&self, kind: ItemKind) -> &InMemoryRepository<SellableItem> {
        match kind {
            ItemKind::Menu => &self.menus,
            ItemKind::Package => &self.packages,
        }
    }

    /// A recipe with its line prices refreshed from the ingredient price list.
    pub fn priced_recipe(&self, id: &str) -> Result<Recipe> {
        let recipe = self
            .recipes
            .get(id)
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;
        let mut priced = recipe.clone();
        priced.ingredients = refresh_line_prices(&recipe.ingredients, &self.ingredients);
        Ok(priced)
    }
}
