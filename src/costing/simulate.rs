use std::collections::HashMap;

use serde::Serialize;

use crate::costing::aggregate::validate_lines;
use crate::error::{CostError, Result};
use crate::models::IngredientLine;

/// A baseline ingredient line with its simulated price applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedLine {
    pub ingredient_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub current_price: f64,
    pub simulated_price: f64,
    pub current_cost: f64,
    pub simulated_cost: f64,
    /// Price change in percent; `None` when the current price is 0 and the
    /// simulated price is not.
    pub change_percent: Option<f64>,
    /// `simulated_cost - current_cost`.
    pub impact: f64,
}

/// Result of applying price overrides to a baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub lines: Vec<SimulatedLine>,
    pub baseline_cost: f64,
    pub total_cost: f64,
    pub delta: f64,
    pub delta_percent: Option<f64>,
}

impl Simulation {
    /// Lines whose simulated price differs from the current price.
    pub fn changed_lines(&self) -> impl Iterator<Item = &SimulatedLine> {
        self.lines
            .iter()
            .filter(|l| l.simulated_price != l.current_price)
    }
}

/// Percentage change from `current` to `simulated`.
fn percent_change(current: f64, simulated: f64) -> Option<f64> {
    if current > 0.0 {
        Some((simulated - current) / current * 100.0)
    } else if simulated == current {
        Some(0.0)
    } else {
        None
    }
}

/// Apply sparse per-ingredient price overrides to a baseline without mutating it.
///
/// Overrides are keyed by ingredient id. Ids that do not appear in the
/// baseline are ignored. The output depends only on the arguments.
pub fn simulate(baseline: &[IngredientLine], overrides: &HashMap<String, f64>) -> Result<Simulation> {
    validate_lines(baseline)?;

    for (id, price) in overrides {
        CostError::check_amount(id, "simulatedPrice", *price)?;
        if !baseline.iter().any(|l| &l.ingredient_id == id) {
            tracing::warn!(ingredient_id = %id, "override does not match any baseline line; ignored");
        }
    }

    let lines: Vec<SimulatedLine> = baseline
        .iter()
        .map(|line| {
            let simulated_price = overrides
                .get(&line.ingredient_id)
                .copied()
                .unwrap_or(line.unit_price);
            let current_cost = line.cost();
            let simulated_cost = line.quantity * simulated_price;

            SimulatedLine {
                ingredient_id: line.ingredient_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                unit: line.unit.clone(),
                current_price: line.unit_price,
                simulated_price,
                current_cost,
                simulated_cost,
                change_percent: percent_change(line.unit_price, simulated_price),
                impact: simulated_cost - current_cost,
            }
        })
        .collect();

    let baseline_cost: f64 = lines.iter().map(|l| l.current_cost).sum();
    let total_cost: f64 = lines.iter().map(|l| l.simulated_cost).sum();
    let delta = total_cost - baseline_cost;

    tracing::debug!(
        lines = lines.len(),
        overrides = overrides.len(),
        baseline_cost,
        total_cost,
        "recomputed simulation"
    );

    Ok(Simulation {
        lines,
        baseline_cost,
        total_cost,
        delta,
        delta_percent: percent_change(baseline_cost, total_cost),
    })
}

/// Where a simulation session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// No recipe selected.
    Idle,
    /// Baseline populated, no overrides.
    Loaded,
    /// One or more overrides present.
    Modified,
}

/// Interactive price simulation over a single baseline.
///
/// Holds the baseline and the override map; every result is recomputed
/// from those two through [`simulate`].
#[derive(Debug, Clone, Default)]
pub struct PriceSimulator {
    baseline: Option<Vec<IngredientLine>>,
    overrides: HashMap<String, f64>,
}

impl PriceSimulator {
    /// Create an idle simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a baseline, discarding any previous overrides.
    pub fn load(&mut self, baseline: Vec<IngredientLine>) -> Result<()> {
        validate_lines(&baseline)?;
        self.baseline = Some(baseline);
        self.overrides.clear();
        Ok(())
    }

    /// Drop the baseline and go back to idle.
    pub fn unload(&mut self) {
        self.baseline = None;
        self.overrides.clear();
    }

    pub fn state(&self) -> SimulationState {
        match (&self.baseline, self.overrides.is_empty()) {
            (None, _) => SimulationState::Idle,
            (Some(_), true) => SimulationState::Loaded,
            (Some(_), false) => SimulationState::Modified,
        }
    }

    pub fn baseline(&self) -> Option<&[IngredientLine]> {
        self.baseline.as_deref()
    }

    /// Set a simulated price for one ingredient of the loaded baseline.
    pub fn set_override(&mut self, ingredient_id: &str, price: f64) -> Result<()> {
        let baseline = self
            .baseline
            .as_ref()
            .ok_or_else(|| CostError::InvalidInput("no recipe loaded".to_string()))?;

        CostError::check_amount(ingredient_id, "simulatedPrice", price)?;
        if !baseline.iter().any(|l| l.ingredient_id == ingredient_id) {
            return Err(CostError::IngredientNotFound(ingredient_id.to_string()));
        }

        self.overrides.insert(ingredient_id.to_string(), price);
        Ok(())
    }

    /// Remove one override. Returns the removed price, if any.
    pub fn clear_override(&mut self, ingredient_id: &str) -> Option<f64> {
        self.overrides.remove(ingredient_id)
    }

    /// Restore every simulated price to its current price.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }

    /// Recompute the simulation for the current baseline and overrides.
    pub fn result(&self) -> Result<Simulation> {
        let baseline = self
            .baseline
            .as_ref()
            .ok_or_else(|| CostError::InvalidInput("no recipe loaded".to_string()))?;
        simulate(baseline, &self.overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Vec<IngredientLine> {
        vec![
            IngredientLine::new("ING-001", "Daging Sapi", 300.0, "g", 45.0),
            IngredientLine::new("ING-002", "Santan", 100.0, "g", 12.0),
        ]
    }

    #[test]
    fn test_simulate_without_overrides_is_zero_delta() {
        let sim = simulate(&baseline(), &HashMap::new()).unwrap();
        assert_eq!(sim.delta, 0.0);
        assert_eq!(sim.delta_percent, Some(0.0));
        assert!(sim.lines.iter().all(|l| l.change_percent == Some(0.0)));
        assert!(sim.lines.iter().all(|l| l.impact == 0.0));
        assert_eq!(sim.changed_lines().count(), 0);
    }

    #[test]
    fn test_simulate_override() {
        let overrides = HashMap::from([("ING-001".to_string(), 50.0)]);
        let sim = simulate(&baseline(), &overrides).unwrap();

        let beef = &sim.lines[0];
        assert!((beef.simulated_cost - 15000.0).abs() < 0.001);
        assert!((beef.impact - 1500.0).abs() < 0.001);
        assert!((beef.change_percent.unwrap() - 11.111).abs() < 0.01);

        assert!((sim.baseline_cost - 14700.0).abs() < 0.001);
        assert!((sim.total_cost - 16200.0).abs() < 0.001);
        assert!((sim.delta - 1500.0).abs() < 0.001);
        assert_eq!(sim.changed_lines().count(), 1);
    }

    #[test]
    fn test_simulate_does_not_mutate_baseline() {
        let lines = baseline();
        let overrides = HashMap::from([("ING-002".to_string(), 99.0)]);
        simulate(&lines, &overrides).unwrap();
        assert_eq!(lines, baseline());
    }

    #[test]
    fn test_change_percent_from_zero_price() {
        let lines = vec![IngredientLine::new("ING-009", "Air", 500.0, "ml", 0.0)];
        let overrides = HashMap::from([("ING-009".to_string(), 2.0)]);
        let sim = simulate(&lines, &overrides).unwrap();
        assert_eq!(sim.lines[0].change_percent, None);
        assert_eq!(sim.delta_percent, None);
        assert!((sim.delta - 1000.0).abs() < 0.001);
    }

    #[test]
    fn test_negative_override_rejected() {
        let overrides = HashMap::from([("ING-001".to_string(), -1.0)]);
        assert!(matches!(
            simulate(&baseline(), &overrides),
            Err(CostError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_unknown_override_ignored() {
        let overrides = HashMap::from([("ING-404".to_string(), 10.0)]);
        let sim = simulate(&baseline(), &overrides).unwrap();
        assert_eq!(sim.delta, 0.0);
    }

    #[test]
    fn test_session_state_machine() {
        let mut sim = PriceSimulator::new();
        assert_eq!(sim.state(), SimulationState::Idle);
        assert!(sim.result().is_err());
        assert!(sim.set_override("ING-001", 50.0).is_err());

        sim.load(baseline()).unwrap();
        assert_eq!(sim.state(), SimulationState::Loaded);
        assert_eq!(sim.result().unwrap().delta, 0.0);

        sim.set_override("ING-001", 50.0).unwrap();
        assert_eq!(sim.state(), SimulationState::Modified);
        assert!(sim.result().unwrap().delta > 0.0);

        sim.reset();
        assert_eq!(sim.state(), SimulationState::Loaded);
        assert_eq!(sim.result().unwrap().delta, 0.0);

        sim.unload();
        assert_eq!(sim.state(), SimulationState::Idle);
    }

    #[test]
    fn test_session_rejects_unknown_ingredient() {
        let mut sim = PriceSimulator::new();
        sim.load(baseline()).unwrap();
        assert!(matches!(
            sim.set_override("ING-404", 1.0),
            Err(CostError::IngredientNotFound(_))
        ));
        assert_eq!(sim.state(), SimulationState::Loaded);
    }

    #[test]
    fn test_session_rejects_non_finite_price_and_stays_usable() {
        let mut sim = PriceSimulator::new();
        sim.load(baseline()).unwrap();
        sim.set_override("ING-002", 20.0).unwrap();

        assert!(matches!(
            sim.set_override("ING-001", f64::INFINITY),
            Err(CostError::NonFinite { .. })
        ));
        assert!(matches!(
            sim.set_override("ING-001", f64::NAN),
            Err(CostError::NonFinite { .. })
        ));

        // The earlier override survives and the session still recomputes
        assert_eq!(sim.state(), SimulationState::Modified);
        let result = sim.result().unwrap();
        assert!((result.delta - 800.0).abs() < 0.001);
        assert_eq!(result.lines[0].simulated_price, 45.0);
    }

    #[test]
    fn test_clear_last_override_returns_to_loaded() {
        let mut sim = PriceSimulator::new();
        sim.load(baseline()).unwrap();
        sim.set_override("ING-002", 20.0).unwrap();
        assert_eq!(sim.clear_override("ING-002"), Some(20.0));
        assert_eq!(sim.state(), SimulationState::Loaded);
    }
}
