/// Profile name used for recipe-level margins.
pub const RECIPE_PROFILE: &str = "recipe";

/// Profile name used for single menu items.
pub const MENU_PROFILE: &str = "menu";

/// Profile name used for packages (bundles of menu items).
pub const PACKAGE_PROFILE: &str = "package";

// ─────────────────────────────────────────────────────────────────────────────
// Default tier thresholds (margin percentages)
// ─────────────────────────────────────────────────────────────────────────────

/// Recipe margin at or above which the recipe is considered healthy.
pub const RECIPE_HEALTHY_MARGIN: f64 = 50.0;

/// Recipe margin at or above which the recipe is considered moderate.
pub const RECIPE_MODERATE_MARGIN: f64 = 30.0;

/// Menu/package margin at or above which the item is considered healthy.
pub const MENU_HEALTHY_MARGIN: f64 = 30.0;

/// Menu/package margin at or above which the item is considered moderate.
pub const MENU_MODERATE_MARGIN: f64 = 15.0;

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Changes smaller than this (in currency units) are shown as unchanged.
pub const DISPLAY_EPSILON: f64 = 0.005;

/// Minimum Jaro-Winkler score for a fuzzy recipe match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;
