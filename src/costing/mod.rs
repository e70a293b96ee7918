pub mod aggregate;
pub mod constants;
pub mod margin;
pub mod portion;
pub mod recompute;
pub mod simulate;

pub use aggregate::{aggregate, validate_lines};
pub use constants::*;
pub use margin::{classify, margin_from_price, price_from_margin, MarginStatus, MarginTier, TierThresholds};
pub use portion::per_portion;
pub use recompute::{recompute, CostingInput, DerivedCosting, Pricing};
pub use simulate::{simulate, PriceSimulator, SimulatedLine, Simulation, SimulationState};
