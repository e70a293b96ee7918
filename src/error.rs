use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostError {
    #[error("Invalid portions: {0} (must be a positive number)")]
    InvalidPortion(f64),

    #[error("Margin is undefined for selling price {0} (not priced)")]
    UndefinedMargin(f64),

    #[error("Target margin {0}% is unreachable (must be below 100%)")]
    UnreachableMargin(f64),

    #[error("Negative value for {field} on '{item}': {value}")]
    NegativeValue {
        item: String,
        field: &'static str,
        value: f64,
    },

    #[error("Non-finite value for {field} on '{item}': {value}")]
    NonFinite {
        item: String,
        field: &'static str,
        value: f64,
    },

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Unknown margin profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CostError {
    /// Shorthand for a negative-value validation failure.
    pub fn negative(item: impl Into<String>, field: &'static str, value: f64) -> Self {
        CostError::NegativeValue {
            item: item.into(),
            field,
            value,
        }
    }

    /// Validate an amount that must be finite and non-negative.
    pub fn check_amount(item: impl Into<String>, field: &'static str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(CostError::NonFinite {
                item: item.into(),
                field,
                value,
            });
        }
        if value < 0.0 {
            return Err(CostError::negative(item, field, value));
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, CostError>;
