//! Margin tier policy: named threshold profiles shared by every screen.
//!
//! Built-in profiles cover recipes (50/30) and menus/packages (30/15).
//! A TOML file may override or add profiles:
//!
//! ```toml
//! [profiles.recipe]
//! healthy = 55.0
//! moderate = 35.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::costing::constants::*;
use crate::costing::TierThresholds;
use crate::error::{CostError, Result};

#[derive(Debug, Default, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    profiles: BTreeMap<String, TierThresholds>,
}

/// Named tier threshold profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TierPolicy {
    profiles: BTreeMap<String, TierThresholds>,
}

impl Default for TierPolicy {
    fn default() -> Self {
        let menu = TierThresholds {
            healthy: MENU_HEALTHY_MARGIN,
            moderate: MENU_MODERATE_MARGIN,
        };
        let mut profiles = BTreeMap::new();
        profiles.insert(
            RECIPE_PROFILE.to_string(),
            TierThresholds {
                healthy: RECIPE_HEALTHY_MARGIN,
                moderate: RECIPE_MODERATE_MARGIN,
            },
        );
        profiles.insert(MENU_PROFILE.to_string(), menu);
        profiles.insert(PACKAGE_PROFILE.to_string(), menu);
        Self { profiles }
    }
}

impl TierPolicy {
    /// Thresholds for a named profile (case-insensitive).
    pub fn get(&self, profile: &str) -> Result<&TierThresholds> {
        self.profiles
            .get(&profile.to_lowercase())
            .ok_or_else(|| CostError::UnknownProfile(profile.to_string()))
    }

    /// Add or replace a profile.
    pub fn set(&mut self, profile: &str, thresholds: TierThresholds) -> Result<()> {
        thresholds.validate()?;
        self.profiles.insert(profile.to_lowercase(), thresholds);
        Ok(())
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Parse a TOML policy and merge its profiles over the built-in ones.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: PolicyFile = toml::from_str(contents)?;
        let mut policy = Self::default();
        for (name, thresholds) in file.profiles {
            policy.set(&name, thresholds).map_err(|e| {
                CostError::InvalidConfig(format!("profile '{}': {}", name, e))
            })?;
        }
        Ok(policy)
    }
}

/// Load a tier policy from a TOML file.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<TierPolicy> {
    let path = path.as_ref();
    tracing::debug!("Loading tier policy from {:?}", path);
    let contents = fs::read_to_string(path)?;
    let policy = TierPolicy::from_toml_str(&contents)?;
    tracing::debug!(profiles = ?policy.names().collect::<Vec<_>>(), "tier policy loaded");
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let policy = TierPolicy::default();
        assert_eq!(policy.get("recipe").unwrap().healthy, 50.0);
        assert_eq!(policy.get("recipe").unwrap().moderate, 30.0);
        assert_eq!(policy.get("menu").unwrap().healthy, 30.0);
        assert_eq!(policy.get("PACKAGE").unwrap().moderate, 15.0);
    }

    #[test]
    fn test_unknown_profile() {
        let policy = TierPolicy::default();
        assert!(matches!(policy.get("catering"), Err(CostError::UnknownProfile(_))));
    }

    #[test]
    fn test_toml_overrides_and_adds() {
        let toml_str = r#"
            [profiles.recipe]
            healthy = 55.0
            moderate = 35.0

            [profiles.catering]
            healthy = 40.0
            moderate = 20.0
        "#;

        let policy = TierPolicy::from_toml_str(toml_str).unwrap();
        assert_eq!(policy.get("recipe").unwrap().healthy, 55.0);
        assert_eq!(policy.get("catering").unwrap().moderate, 20.0);
        // Untouched built-ins survive the merge
        assert_eq!(policy.get("menu").unwrap().healthy, 30.0);
    }

    #[test]
    fn test_toml_rejects_inverted_thresholds() {
        let toml_str = r#"
            [profiles.menu]
            healthy = 10.0
            moderate = 20.0
        "#;
        assert!(matches!(
            TierPolicy::from_toml_str(toml_str),
            Err(CostError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_toml_is_defaults() {
        assert_eq!(TierPolicy::from_toml_str("").unwrap(), TierPolicy::default());
    }
}
