use crate::error::{CostError, Result};

/// Cost per portion (HPP): `total_cost / portions`, unrounded.
///
/// Fails with `InvalidPortion` when `portions <= 0` (or is not a number).
pub fn per_portion(total_cost: f64, portions: f64) -> Result<f64> {
    if !(portions > 0.0) || !portions.is_finite() {
        return Err(CostError::InvalidPortion(portions));
    }
    Ok(total_cost / portions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_portion() {
        assert!((per_portion(14700.0, 3.0).unwrap() - 4900.0).abs() < 0.001);
    }

    #[test]
    fn test_per_portion_is_not_rounded() {
        let cost = per_portion(100.0, 3.0).unwrap();
        assert!((cost * 3.0 - 100.0).abs() < 1e-9);
        assert!(cost.fract() != 0.0);
    }

    #[test]
    fn test_non_positive_portions_rejected() {
        assert!(matches!(per_portion(100.0, 0.0), Err(CostError::InvalidPortion(_))));
        assert!(matches!(per_portion(100.0, -1.0), Err(CostError::InvalidPortion(_))));
        assert!(matches!(per_portion(100.0, f64::NAN), Err(CostError::InvalidPortion(_))));
    }
}
