pub mod prompts;
pub mod render;

pub use prompts::{parse_price, prompt_override_price, resolve_recipe, run_simulation_session};
pub use render::{
    display_costing, display_ingredients, display_items, display_recipes, display_simulation,
};
