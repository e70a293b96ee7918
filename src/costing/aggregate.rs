use crate::error::{CostError, Result};
use crate::models::IngredientLine;

/// Check that every line has a finite, non-negative quantity and unit price.
///
/// Reports the first offending line; nothing is clamped.
pub fn validate_lines(lines: &[IngredientLine]) -> Result<()> {
    for line in lines {
        CostError::check_amount(&line.name, "quantity", line.quantity)?;
        CostError::check_amount(&line.name, "unitPrice", line.unit_price)?;
    }
    Ok(())
}

/// Total cost of a list of ingredient lines.
///
/// Returns 0 for an empty list.
pub fn aggregate(lines: &[IngredientLine]) -> Result<f64> {
    validate_lines(lines)?;
    Ok(lines.iter().map(IngredientLine::cost).sum())
}
