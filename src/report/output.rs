use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::costing::{MarginStatus, Simulation, TierThresholds};
use crate::error::Result;
use crate::models::SellableItem;

/// Round a float to n decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_default()
}

/// Write a simulation as CSV, one row per ingredient line.
pub fn write_simulation_csv(simulation: &Simulation, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "ingredient_id",
        "name",
        "quantity",
        "unit",
        "current_price",
        "simulated_price",
        "change_percent",
        "current_cost",
        "simulated_cost",
        "impact",
    ])?;

    for line in &simulation.lines {
        wtr.write_record([
            line.ingredient_id.clone(),
            line.name.clone(),
            format!("{}", line.quantity),
            line.unit.clone(),
            format!("{:.2}", line.current_price),
            format!("{:.2}", line.simulated_price),
            optional(line.change_percent, 2),
            format!("{:.2}", line.current_cost),
            format!("{:.2}", line.simulated_cost),
            format!("{:.2}", line.impact),
        ])?;
    }

    wtr.flush()?;
    tracing::debug!("Wrote simulation CSV to {:?}", path);
    Ok(())
}

/// Write a simulation summary and its lines as JSON, rounded to 2 decimals.
pub fn write_simulation_json(simulation: &Simulation, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "baselineCost": round_to(simulation.baseline_cost, 2),
        "totalCost": round_to(simulation.total_cost, 2),
        "delta": round_to(simulation.delta, 2),
        "deltaPercent": simulation.delta_percent.map(|v| round_to(v, 2)),
        "lines": simulation.lines.iter().map(|l| {
            serde_json::json!({
                "ingredientId": l.ingredient_id,
                "name": l.name,
                "quantity": l.quantity,
                "unit": l.unit,
                "currentPrice": round_to(l.current_price, 2),
                "simulatedPrice": round_to(l.simulated_price, 2),
                "changePercent": l.change_percent.map(|v| round_to(v, 2)),
                "currentCost": round_to(l.current_cost, 2),
                "simulatedCost": round_to(l.simulated_cost, 2),
                "impact": round_to(l.impact, 2),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    tracing::debug!("Wrote simulation JSON to {:?}", path);
    Ok(())
}

/// Write menu items or packages with cost, price, margin and tier as CSV.
///
/// Unpriced items get empty margin and tier cells. Items that cannot be
/// costed get empty figures, tier `invalid`, and the reason in `note`.
pub fn write_items_csv(items: &[&SellableItem], thresholds: &TierThresholds, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "id",
        "name",
        "kind",
        "total_cost",
        "selling_price",
        "margin",
        "tier",
        "note",
    ])?;

    for item in items {
        let evaluated = item.total_cost().and_then(|cost| {
            let status = MarginStatus::evaluate(cost, item.selling_price, thresholds)?;
            Ok((cost, status))
        });

        let (cost, margin, tier, note) = match evaluated {
            Ok((cost, status)) => (
                format!("{:.2}", cost),
                optional(status.margin(), 2),
                status.tier().map(|t| t.label().to_string()).unwrap_or_default(),
                String::new(),
            ),
            Err(e) => {
                tracing::warn!(item = %item.id, "cannot cost item: {}", e);
                (String::new(), String::new(), "invalid".to_string(), e.to_string())
            }
        };

        wtr.write_record([
            item.id.clone(),
            item.name.clone(),
            item.kind.label().to_lowercase(),
            cost,
            format!("{:.2}", item.selling_price),
            margin,
            tier,
            note,
        ])?;
    }

    wtr.flush()?;
    tracing::debug!("Wrote {} items to {:?}", items.len(), path);
    Ok(())
}
