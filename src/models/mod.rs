mod ingredient;
mod recipe;
mod sellable;

pub use ingredient::Ingredient;
pub use recipe::{IngredientLine, Recipe};
pub use sellable::{Component, ItemKind, SellableItem};
