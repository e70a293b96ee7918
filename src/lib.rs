pub mod cli;
pub mod config;
pub mod costing;
pub mod error;
pub mod interface;
pub mod models;
pub mod report;
pub mod state;

pub use error::{CostError, Result};
pub use models::{Component, Ingredient, IngredientLine, ItemKind, Recipe, SellableItem};
