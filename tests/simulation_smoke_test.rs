use std::collections::HashMap;

use assert_float_eq::*;

use hpp_calc_rs::costing::{simulate, PriceSimulator, SimulationState};
use hpp_calc_rs::error::CostError;
use hpp_calc_rs::state::{Catalog, Repository, Store};

fn store() -> Store {
    Store::from_catalog(Catalog::sample()).unwrap()
}

#[test]
fn test_simulate_is_idempotent() {
    let store = store();
    let recipe = store.priced_recipe("RCP-003").unwrap();
    let overrides = HashMap::from([
        ("ING-005".to_string(), 80.0),
        ("ING-007".to_string(), 18.5),
    ]);

    let first = simulate(&recipe.ingredients, &overrides).unwrap();
    let second = simulate(&recipe.ingredients, &overrides).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_overrides_give_zero_delta() {
    let store = store();
    for recipe in store.recipes.list() {
        let sim = simulate(&recipe.ingredients, &HashMap::new()).unwrap();
        assert_eq!(sim.delta, 0.0, "recipe {}", recipe.id);
        for line in &sim.lines {
            assert_eq!(line.change_percent, Some(0.0), "line {}", line.name);
            assert_eq!(line.simulated_price, line.current_price);
        }
    }
}

#[test]
fn test_chili_price_spike() {
    let store = store();
    let recipe = store.priced_recipe("rcp-003").unwrap();

    let mut simulator = PriceSimulator::new();
    simulator.load(recipe.ingredients.clone()).unwrap();
    simulator.set_override("ING-005", 90.0).unwrap();

    let sim = simulator.result().unwrap();
    // 200 g of chili going from 60 to 90 per gram
    assert_float_absolute_eq!(sim.delta, 6000.0, 1e-9);
    assert_float_absolute_eq!(sim.delta_percent.unwrap(), 6000.0 / 17000.0 * 100.0, 1e-9);

    let chili = sim.changed_lines().next().unwrap();
    assert_eq!(chili.ingredient_id, "ING-005");
    assert_float_absolute_eq!(chili.change_percent.unwrap(), 50.0, 1e-9);
}

#[test]
fn test_session_walkthrough() {
    let store = store();
    let recipe = store.priced_recipe("RCP-001").unwrap();

    let mut simulator = PriceSimulator::new();
    assert_eq!(simulator.state(), SimulationState::Idle);

    simulator.load(recipe.ingredients.clone()).unwrap();
    assert_eq!(simulator.state(), SimulationState::Loaded);
    let loaded = simulator.result().unwrap();

    simulator.set_override("ING-001", 40.0).unwrap();
    simulator.set_override("ING-002", 15.0).unwrap();
    assert_eq!(simulator.state(), SimulationState::Modified);
    let modified = simulator.result().unwrap();
    assert_float_absolute_eq!(modified.total_cost, 300.0 * 40.0 + 100.0 * 15.0, 1e-9);

    assert!(matches!(
        simulator.set_override("ING-001", -1.0),
        Err(CostError::NegativeValue { .. })
    ));

    simulator.reset();
    assert_eq!(simulator.state(), SimulationState::Loaded);
    assert_eq!(simulator.result().unwrap(), loaded);

    // The baseline itself never changes
    assert_eq!(simulator.baseline().unwrap(), recipe.ingredients.as_slice());
}
