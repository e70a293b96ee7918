use dialoguer::{Input, Select};
use strsim::jaro_winkler;

use crate::costing::constants::FUZZY_MATCH_THRESHOLD;
use crate::costing::PriceSimulator;
use crate::error::{CostError, Result};
use crate::interface::render::display_simulation;
use crate::models::Recipe;

/// Find a recipe by id or name.
///
/// Exact (case-insensitive) id or name matches win; otherwise the best
/// Jaro-Winkler match on the name above the fuzzy threshold is returned.
pub fn resolve_recipe<'a>(query: &str, recipes: &[&'a Recipe]) -> Result<&'a Recipe> {
    let needle = query.trim().to_lowercase();

    if let Some(recipe) = recipes
        .iter()
        .copied()
        .find(|r| r.id.to_lowercase() == needle || r.name.to_lowercase() == needle)
    {
        return Ok(recipe);
    }

    let mut candidates: Vec<(&Recipe, f64)> = recipes
        .iter()
        .map(|r| (*r, jaro_winkler(&r.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    match candidates.first() {
        Some(&(recipe, score)) => {
            tracing::debug!(query, matched = %recipe.name, score, "fuzzy recipe match");
            Ok(recipe)
        }
        None => Err(CostError::RecipeNotFound(query.to_string())),
    }
}

/// Prompt for a simulated price, defaulting to `current`.
pub fn prompt_override_price(name: &str, unit: &str, current: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("Simulated price for '{}' (per {})", name, unit))
        .default(format!("{}", current))
        .interact_text()?;

    parse_price(name, &input)
}

/// Parse a typed price; it must be a finite, non-negative number.
pub fn parse_price(name: &str, input: &str) -> Result<f64> {
    let price: f64 = input
        .trim()
        .parse()
        .map_err(|_| CostError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    CostError::check_amount(name, "simulatedPrice", price)?;
    Ok(price)
}

/// Interactive override loop over a loaded simulator.
///
/// Each change is applied to the simulator and the recomputed result is
/// shown. Invalid entries are reported and the loop continues.
pub fn run_simulation_session(simulator: &mut PriceSimulator, portions: f64) -> Result<()> {
    loop {
        let simulation = simulator.result()?;
        display_simulation(&simulation, portions);

        let mut options: Vec<String> = simulation
            .lines
            .iter()
            .map(|l| {
                format!(
                    "{} ({:.2} -> {:.2} per {})",
                    l.name, l.current_price, l.simulated_price, l.unit
                )
            })
            .collect();
        let reset_idx = options.len();
        options.push("Reset all prices".to_string());
        options.push("Done".to_string());

        let selection = Select::new()
            .with_prompt("Change which ingredient price?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection == reset_idx {
            simulator.reset();
            println!("All simulated prices reset.");
            continue;
        }
        let Some(line) = simulation.lines.get(selection) else {
            return Ok(());
        };

        match prompt_override_price(&line.name, &line.unit, line.simulated_price) {
            Ok(price) if price == line.current_price => {
                simulator.clear_override(&line.ingredient_id);
            }
            Ok(price) => {
                if let Err(e) = simulator.set_override(&line.ingredient_id, price) {
                    println!("{}", e);
                }
            }
            Err(CostError::Prompt(e)) => return Err(CostError::Prompt(e)),
            Err(e) => println!("{}", e),
        }
    }
}
