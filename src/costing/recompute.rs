use serde::Serialize;

use crate::costing::{aggregate, per_portion, price_from_margin, MarginStatus, TierThresholds};
use crate::error::Result;
use crate::models::{IngredientLine, Recipe};

/// How the caller wants the selling price determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pricing {
    /// No selling price yet.
    Unpriced,
    /// A fixed selling price per portion.
    SellingPrice(f64),
    /// Solve the selling price per portion for this margin percentage.
    TargetMargin(f64),
}

/// Everything a costing form holds at a given moment.
#[derive(Debug, Clone)]
pub struct CostingInput<'a> {
    pub lines: &'a [IngredientLine],
    pub portions: f64,
    pub pricing: Pricing,
    pub thresholds: TierThresholds,
}

impl<'a> CostingInput<'a> {
    /// Input for a stored recipe, priced at its own selling price.
    pub fn for_recipe(recipe: &'a Recipe, thresholds: TierThresholds) -> Self {
        let pricing = match recipe.selling_price {
            Some(price) => Pricing::SellingPrice(price),
            None => Pricing::Unpriced,
        };
        Self {
            lines: &recipe.ingredients,
            portions: recipe.portions as f64,
            pricing,
            thresholds,
        }
    }
}

/// Values derived from a [`CostingInput`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedCosting {
    pub total_cost: f64,
    pub cost_per_portion: f64,
    pub selling_price: Option<f64>,
    pub margin: MarginStatus,
}

/// Derive totals, per-portion cost and margin from the current inputs.
///
/// Call after every mutation of the inputs; nothing is cached between calls.
pub fn recompute(input: &CostingInput<'_>) -> Result<DerivedCosting> {
    let total_cost = aggregate(input.lines)?;
    let cost_per_portion = per_portion(total_cost, input.portions)?;

    let selling_price = match input.pricing {
        Pricing::Unpriced => None,
        Pricing::SellingPrice(price) => Some(price),
        Pricing::TargetMargin(target) => Some(price_from_margin(cost_per_portion, target)?),
    };

    let margin = match selling_price {
        Some(price) => MarginStatus::evaluate(cost_per_portion, price, &input.thresholds)?,
        None => MarginStatus::NotPriced,
    };

    Ok(DerivedCosting {
        total_cost,
        cost_per_portion,
        selling_price,
        margin,
    })
}
