use serde::{Deserialize, Serialize};

/// An entry in the ingredient price list.
///
/// `price` is the current price per `unit`; `previous_price` is the last
/// recorded price, kept for price-change tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub category: String,

    pub unit: String,
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<f64>,
}

impl Ingredient {
    pub fn new(id: &str, name: &str, category: &str, unit: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            unit: unit.to_string(),
            price,
            previous_price: None,
        }
    }

    /// Record a new price, moving the current one into `previous_price`.
    pub fn update_price(&mut self, new_price: f64) {
        self.previous_price = Some(self.price);
        self.price = new_price;
    }

    /// Percentage change from the previous price.
    ///
    /// `None` when there is no previous price or it was zero.
    pub fn price_change_percent(&self) -> Option<f64> {
        match self.previous_price {
            Some(prev) if prev > 0.0 => Some((self.price - prev) / prev * 100.0),
            _ => None,
        }
    }
}
