use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result};

/// Margin percentage from cost and selling price: `(price - cost) / price * 100`.
///
/// Fails with `UndefinedMargin` when `selling_price <= 0`; callers show
/// "not priced" instead of 0% or infinity.
pub fn margin_from_price(cost: f64, selling_price: f64) -> Result<f64> {
    CostError::check_amount("margin", "cost", cost)?;
    if !(selling_price > 0.0) || !selling_price.is_finite() {
        return Err(CostError::UndefinedMargin(selling_price));
    }
    Ok((selling_price - cost) / selling_price * 100.0)
}

/// Selling price that yields `target_margin` percent: `cost / (1 - target / 100)`.
///
/// Fails with `UnreachableMargin` when `target_margin >= 100`.
pub fn price_from_margin(cost: f64, target_margin: f64) -> Result<f64> {
    CostError::check_amount("price", "cost", cost)?;
    if target_margin.is_nan() {
        return Err(CostError::InvalidInput("target margin is not a number".to_string()));
    }
    if target_margin >= 100.0 {
        return Err(CostError::UnreachableMargin(target_margin));
    }
    Ok(cost / (1.0 - target_margin / 100.0))
}

/// Margin health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginTier {
    Healthy,
    Moderate,
    Low,
}

impl MarginTier {
    pub fn label(&self) -> &'static str {
        match self {
            MarginTier::Healthy => "healthy",
            MarginTier::Moderate => "moderate",
            MarginTier::Low => "low",
        }
    }
}

/// Lower bounds (inclusive, in percent) for the healthy and moderate tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub healthy: f64,
    pub moderate: f64,
}

impl TierThresholds {
    pub fn new(healthy: f64, moderate: f64) -> Result<Self> {
        let thresholds = Self { healthy, moderate };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Thresholds must be finite with `healthy >= moderate`.
    pub fn validate(&self) -> Result<()> {
        if !self.healthy.is_finite() || !self.moderate.is_finite() {
            return Err(CostError::InvalidConfig(format!(
                "thresholds must be finite (healthy={}, moderate={})",
                self.healthy, self.moderate
            )));
        }
        if self.healthy < self.moderate {
            return Err(CostError::InvalidConfig(format!(
                "healthy threshold {} is below moderate threshold {}",
                self.healthy, self.moderate
            )));
        }
        Ok(())
    }
}

/// Classify a margin percentage against a threshold set.
pub fn classify(margin: f64, thresholds: &TierThresholds) -> MarginTier {
    if margin >= thresholds.healthy {
        MarginTier::Healthy
    } else if margin >= thresholds.moderate {
        MarginTier::Moderate
    } else {
        MarginTier::Low
    }
}

/// Margin of an item as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarginStatus {
    Priced { margin: f64, tier: MarginTier },
    NotPriced,
}

impl MarginStatus {
    /// Evaluate margin and tier. A selling price of exactly 0 is `NotPriced`;
    /// a negative one is a validation error.
    pub fn evaluate(cost: f64, selling_price: f64, thresholds: &TierThresholds) -> Result<Self> {
        if selling_price < 0.0 {
            return Err(CostError::negative("selling price", "sellingPrice", selling_price));
        }
        if selling_price == 0.0 {
            return Ok(MarginStatus::NotPriced);
        }
        let margin = margin_from_price(cost, selling_price)?;
        Ok(MarginStatus::Priced {
            margin,
            tier: classify(margin, thresholds),
        })
    }

    pub fn margin(&self) -> Option<f64> {
        match self {
            MarginStatus::Priced { margin, .. } => Some(*margin),
            MarginStatus::NotPriced => None,
        }
    }

    pub fn tier(&self) -> Option<MarginTier> {
        match self {
            MarginStatus::Priced { tier, .. } => Some(*tier),
            MarginStatus::NotPriced => None,
        }
    }

    /// Display text, e.g. "45.56% (moderate)" or "not priced".
    pub fn display(&self) -> String {
        match self {
            MarginStatus::Priced { margin, tier } => format!("{:.2}% ({})", margin, tier.label()),
            MarginStatus::NotPriced => "not priced".to_string(),
        }
    }
}
