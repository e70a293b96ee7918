use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HPP Calc — recipe costing, menu margins and ingredient price simulation.
#[derive(Parser, Debug)]
#[command(name = "hpp_calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a catalog JSON file (built-in sample data if omitted).
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Path to a TOML file with margin tier profiles.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// List the ingredient price list.
    Ingredients,

    /// List recipes with cost per portion and margin.
    #[default]
    Recipes,

    /// Show an itemized cost breakdown for one recipe.
    Cost {
        /// Recipe id or name.
        recipe: String,

        /// Selling price per portion to evaluate instead of the stored one.
        #[arg(long)]
        selling_price: Option<f64>,

        /// Use current ingredient prices instead of the recipe's snapshot.
        #[arg(long)]
        current_prices: bool,
    },

    /// Solve the selling price per portion for a target margin.
    Price {
        /// Recipe id or name.
        recipe: String,

        /// Target margin in percent.
        #[arg(short, long)]
        margin: f64,
    },

    /// List menu items with cost, price and margin.
    Menus {
        /// Export the list to CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List packages with cost, price and margin.
    Packages {
        /// Export the list to CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Simulate ingredient price changes on a recipe.
    Simulate {
        /// Recipe id or name.
        recipe: String,

        /// Price override as INGREDIENT_ID=PRICE (repeatable); skips the prompt.
        #[arg(long = "set", value_parser = parse_override)]
        overrides: Vec<(String, f64)>,

        /// Export the final simulation to CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Export the final simulation to JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

/// Parse `ID=PRICE` into an override pair.
pub fn parse_override(s: &str) -> Result<(String, f64), String> {
    let (id, price) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INGREDIENT_ID=PRICE, got '{}'", s))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing ingredient id in '{}'", s));
    }

    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| format!("invalid price in '{}'", s))?;

    Ok((id.to_string(), price))
}
