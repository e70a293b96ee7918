use serde::{Deserialize, Serialize};

use crate::costing::{aggregate, per_portion};
use crate::error::Result;

/// One itemized ingredient on a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub ingredient_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
}

impl IngredientLine {
    pub fn new(ingredient_id: &str, name: &str, quantity: f64, unit: &str, unit_price: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.to_string(),
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            unit_price,
        }
    }

    /// Line cost: quantity * unit price.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// A recipe: a list of ingredient lines yielding `portions` servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub category: String,

    pub portions: i64,
    pub ingredients: Vec<IngredientLine>,

    /// Selling price per portion, if the recipe has been priced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
}

impl Recipe {
    /// Total cost of all ingredient lines.
    pub fn total_cost(&self) -> Result<f64> {
        aggregate(&self.ingredients)
    }

    /// Cost per portion (HPP). Fails when `portions <= 0`.
    pub fn cost_per_portion(&self) -> Result<f64> {
        per_portion(self.total_cost()?, self.portions as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CostError;

    fn sample_recipe(portions: i64) -> Recipe {
        Recipe {
            id: "RCP-001".to_string(),
            name: "Rendang".to_string(),
            category: "Main".to_string(),
            portions,
            ingredients: vec![
                IngredientLine::new("ING-001", "Daging Sapi", 300.0, "g", 45.0),
                IngredientLine::new("ING-002", "Santan", 100.0, "g", 12.0),
            ],
            selling_price: Some(9000.0),
        }
    }

    #[test]
    fn test_line_cost() {
        let line = IngredientLine::new("ING-001", "Daging Sapi", 300.0, "g", 45.0);
        assert!((line.cost() - 13500.0).abs() < 0.001);
    }

    #[test]
    fn test_recipe_costs() {
        let recipe = sample_recipe(3);
        assert!((recipe.total_cost().unwrap() - 14700.0).abs() < 0.001);
        assert!((recipe.cost_per_portion().unwrap() - 4900.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_portions_is_error() {
        let recipe = sample_recipe(0);
        assert!(matches!(
            recipe.cost_per_portion(),
            Err(CostError::InvalidPortion(_))
        ));
    }
}
