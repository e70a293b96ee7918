use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hpp_calc_rs::cli::{Cli, Command};
use hpp_calc_rs::config::{load_policy, TierPolicy};
use hpp_calc_rs::costing::{
    recompute, simulate, CostingInput, PriceSimulator, Pricing, MENU_PROFILE, PACKAGE_PROFILE,
    RECIPE_PROFILE,
};
use hpp_calc_rs::error::Result;
use hpp_calc_rs::interface::{
    display_costing, display_ingredients, display_items, display_recipes, display_simulation,
    resolve_recipe, run_simulation_session,
};
use hpp_calc_rs::models::{ItemKind, Recipe};
use hpp_calc_rs::report::{write_items_csv, write_simulation_csv, write_simulation_json};
use hpp_calc_rs::state::{load_catalog, Catalog, Repository, Store};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let catalog = match &cli.file {
        Some(path) => load_catalog(path)?,
        None => Catalog::sample(),
    };
    let store = Store::from_catalog(catalog)?;

    let policy = match &cli.config {
        Some(path) => load_policy(path)?,
        None => TierPolicy::default(),
    };

    match cli.command.unwrap_or_default() {
        Command::Ingredients => {
            display_ingredients(&store.ingredients.list());
            Ok(())
        }
        Command::Recipes => {
            display_recipes(&store.recipes.list(), policy.get(RECIPE_PROFILE)?);
            Ok(())
        }
        Command::Cost {
            recipe,
            selling_price,
            current_prices,
        } => cmd_cost(&store, &policy, &recipe, selling_price, current_prices),
        Command::Price { recipe, margin } => cmd_price(&store, &policy, &recipe, margin),
        Command::Menus { csv } => cmd_items(&store, &policy, ItemKind::Menu, csv.as_deref()),
        Command::Packages { csv } => cmd_items(&store, &policy, ItemKind::Package, csv.as_deref()),
        Command::Simulate {
            recipe,
            overrides,
            csv,
            json,
        } => cmd_simulate(&store, &recipe, overrides, csv, json),
    }
}

/// Look up a recipe, optionally re-pricing its lines from the ingredient list.
fn find_recipe(store: &Store, query: &str, current_prices: bool) -> Result<Recipe> {
    let recipes = store.recipes.list();
    let recipe = resolve_recipe(query, &recipes)?;
    if current_prices {
        store.priced_recipe(&recipe.id)
    } else {
        Ok(recipe.clone())
    }
}

/// Show the cost breakdown and margin of one recipe.
fn cmd_cost(
    store: &Store,
    policy: &TierPolicy,
    query: &str,
    selling_price: Option<f64>,
    current_prices: bool,
) -> Result<()> {
    let recipe = find_recipe(store, query, current_prices)?;
    let thresholds = *policy.get(RECIPE_PROFILE)?;

    let mut input = CostingInput::for_recipe(&recipe, thresholds);
    if let Some(price) = selling_price {
        input.pricing = Pricing::SellingPrice(price);
    }

    let derived = recompute(&input)?;
    display_costing(&recipe, &derived);
    Ok(())
}

/// Solve the selling price for a target margin.
fn cmd_price(store: &Store, policy: &TierPolicy, query: &str, margin: f64) -> Result<()> {
    let recipe = find_recipe(store, query, false)?;
    let input = CostingInput {
        lines: &recipe.ingredients,
        portions: recipe.portions as f64,
        pricing: Pricing::TargetMargin(margin),
        thresholds: *policy.get(RECIPE_PROFILE)?,
    };

    let derived = recompute(&input)?;
    display_costing(&recipe, &derived);
    Ok(())
}

/// List (and optionally export) menu items or packages.
fn cmd_items(store: &Store, policy: &TierPolicy, kind: ItemKind, csv: Option<&Path>) -> Result<()> {
    let (title, profile) = match kind {
        ItemKind::Menu => ("Menus", MENU_PROFILE),
        ItemKind::Package => ("Packages", PACKAGE_PROFILE),
    };
    let thresholds = policy.get(profile)?;
    let items = store.items(kind).list();

    display_items(title, &items, thresholds);

    if let Some(path) = csv {
        write_items_csv(&items, thresholds, path)?;
        println!("Wrote {} {} to {:?}", items.len(), title.to_lowercase(), path);
    }
    Ok(())
}

/// Run a price simulation, interactively unless overrides were given.
fn cmd_simulate(
    store: &Store,
    query: &str,
    overrides: Vec<(String, f64)>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let recipe = find_recipe(store, query, true)?;
    let portions = recipe.portions as f64;

    println!("Simulating prices for {} ({})", recipe.name, recipe.id);

    let simulation = if overrides.is_empty() {
        let mut simulator = PriceSimulator::new();
        simulator.load(recipe.ingredients.clone())?;
        run_simulation_session(&mut simulator, portions)?;
        simulator.result()?
    } else {
        let overrides: HashMap<String, f64> = overrides.into_iter().collect();
        let simulation = simulate(&recipe.ingredients, &overrides)?;
        display_simulation(&simulation, portions);
        simulation
    };

    if let Some(path) = csv {
        write_simulation_csv(&simulation, &path)?;
        println!("Wrote simulation to {:?}", path);
    }
    if let Some(path) = json {
        write_simulation_json(&simulation, &path)?;
        println!("Wrote simulation to {:?}", path);
    }
    Ok(())
}
