use serde::{Deserialize, Serialize};

use crate::costing::margin_from_price;
use crate::error::{CostError, Result};
use crate::models::Recipe;

/// Whether a sellable item is a single menu item or a bundle of menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Menu,
    Package,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Menu => "Menu",
            ItemKind::Package => "Package",
        }
    }
}

/// A costed component of a sellable item (a recipe for menus, a menu for packages).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub ref_id: String,
    pub cost: f64,
}

impl Component {
    /// Component costed at `servings` portions of a recipe.
    pub fn from_recipe(recipe: &Recipe, servings: f64) -> Result<Self> {
        CostError::check_amount(&recipe.name, "servings", servings)?;
        Ok(Self {
            ref_id: recipe.id.clone(),
            cost: recipe.cost_per_portion()? * servings,
        })
    }

    /// Component costed at the full cost of another sellable item.
    pub fn from_item(item: &SellableItem) -> Result<Self> {
        Ok(Self {
            ref_id: item.id.clone(),
            cost: item.total_cost()?,
        })
    }
}

/// A menu item or package offered for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellableItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub components: Vec<Component>,

    /// Selling price; 0 means the item has not been priced yet.
    #[serde(default)]
    pub selling_price: f64,
}

impl SellableItem {
    /// Sum of component costs.
    pub fn total_cost(&self) -> Result<f64> {
        let mut total = 0.0;
        for component in &self.components {
            CostError::check_amount(
                format!("{}/{}", self.name, component.ref_id),
                "cost",
                component.cost,
            )?;
            total += component.cost;
        }
        Ok(total)
    }

    /// Margin percentage against the selling price.
    ///
    /// Fails with `UndefinedMargin` when the item is not priced.
    pub fn margin(&self) -> Result<f64> {
        margin_from_price(self.total_cost()?, self.selling_price)
    }

    pub fn is_priced(&self) -> bool {
        self.selling_price > 0.0
    }
}
