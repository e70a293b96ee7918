use crate::costing::constants::DISPLAY_EPSILON;
use crate::costing::{per_portion, recompute, CostingInput, DerivedCosting, MarginStatus, Simulation, TierThresholds};
use crate::models::{Ingredient, Recipe, SellableItem};

fn signed(value: f64) -> String {
    if value.abs() < DISPLAY_EPSILON {
        "0.00".to_string()
    } else {
        format!("{:+.2}", value)
    }
}

fn signed_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() < DISPLAY_EPSILON => "0.00%".to_string(),
        Some(v) => format!("{:+.2}%", v),
        None => "new".to_string(),
    }
}

/// Display the ingredient price list with price changes.
pub fn display_ingredients(ingredients: &[&Ingredient]) {
    if ingredients.is_empty() {
        println!("Ingredients: (none)");
        return;
    }

    println!();
    println!("=== Ingredients ({} items) ===", ingredients.len());
    println!();

    let width = ingredients.iter().map(|i| i.name.len()).max().unwrap_or(10);

    for ing in ingredients {
        let change = match ing.price_change_percent() {
            Some(pct) if pct.abs() >= DISPLAY_EPSILON => format!("  ({:+.2}%)", pct),
            _ => String::new(),
        };
        println!(
            "  {:<8} {:<width$}  {:>10.2} / {:<3} [{}]{}",
            ing.id,
            ing.name,
            ing.price,
            ing.unit,
            ing.category,
            change,
            width = width
        );
    }

    println!();
}

/// Display recipes with their cost per portion and margin status.
pub fn display_recipes(recipes: &[&Recipe], thresholds: &TierThresholds) {
    if recipes.is_empty() {
        println!("Recipes: (none)");
        return;
    }

    println!();
    println!("=== Recipes ({} items) ===", recipes.len());
    println!();

    let width = recipes.iter().map(|r| r.name.len()).max().unwrap_or(10);

    for recipe in recipes {
        let summary = match recompute(&CostingInput::for_recipe(recipe, *thresholds)) {
            Ok(d) => format!(
                "total {:>10.2} | {:>2} portions | HPP {:>9.2} | {}",
                d.total_cost,
                recipe.portions,
                d.cost_per_portion,
                d.margin.display()
            ),
            Err(e) => format!("invalid: {}", e),
        };
        println!(
            "  {:<8} {:<width$}  {}",
            recipe.id,
            recipe.name,
            summary,
            width = width
        );
    }

    println!();
}

/// Display an itemized cost breakdown for one recipe.
pub fn display_costing(recipe: &Recipe, derived: &DerivedCosting) {
    println!();
    println!("=== {} ({}) ===", recipe.name, recipe.id);
    println!();

    let width = recipe
        .ingredients
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(10);

    for line in &recipe.ingredients {
        println!(
            "  {:<width$}  {:>8.2} {:<3} x {:>9.2} = {:>11.2}",
            line.name,
            line.quantity,
            line.unit,
            line.unit_price,
            line.cost(),
            width = width
        );
    }

    println!();
    println!("Total cost:       {:.2}", derived.total_cost);
    println!("Portions:         {}", recipe.portions);
    println!("Cost per portion: {:.2}", derived.cost_per_portion);
    match derived.selling_price {
        Some(price) => println!("Selling price:    {:.2}", price),
        None => println!("Selling price:    -"),
    }
    println!("Margin:           {}", derived.margin.display());
    println!();
}

/// Display menu items or packages with cost, price and margin.
pub fn display_items(title: &str, items: &[&SellableItem], thresholds: &TierThresholds) {
    if items.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, items.len());
    println!();

    let width = items.iter().map(|i| i.name.len()).max().unwrap_or(10);

    for item in items {
        let summary = item
            .total_cost()
            .and_then(|cost| {
                let status = MarginStatus::evaluate(cost, item.selling_price, thresholds)?;
                Ok(format!(
                    "cost {:>10.2} | price {:>10.2} | {}",
                    cost,
                    item.selling_price,
                    status.display()
                ))
            })
            .unwrap_or_else(|e| format!("invalid: {}", e));

        println!(
            "  {:<8} {:<width$}  {}",
            item.id,
            item.name,
            summary,
            width = width
        );
    }

    println!();
}

/// Display a price simulation, with per-portion figures when `portions > 0`.
pub fn display_simulation(simulation: &Simulation, portions: f64) {
    println!();
    println!("=== Price Simulation ===");
    println!();

    let width = simulation
        .lines
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(10);

    for line in &simulation.lines {
        let marker = if line.simulated_price != line.current_price {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<width$}  {:>9.2} -> {:>9.2} ({:>8}) | cost {:>11.2} -> {:>11.2} ({})",
            marker,
            line.name,
            line.current_price,
            line.simulated_price,
            signed_percent(line.change_percent),
            line.current_cost,
            line.simulated_cost,
            signed(line.impact),
            width = width
        );
    }

    println!();
    println!("Baseline cost:  {:.2}", simulation.baseline_cost);
    println!("Simulated cost: {:.2}", simulation.total_cost);
    println!(
        "Delta:          {} ({})",
        signed(simulation.delta),
        signed_percent(simulation.delta_percent)
    );
    if let (Ok(before), Ok(after)) = (
        per_portion(simulation.baseline_cost, portions),
        per_portion(simulation.total_cost, portions),
    ) {
        println!("Per portion:    {:.2} -> {:.2}", before, after);
    }
    println!();
}
