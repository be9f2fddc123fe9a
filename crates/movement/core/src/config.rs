/// Optional rule toggles consulted while compiling a path.
///
/// Every toggle defaults to the base ruleset; optional rules are opt-in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Enables the sprint tiers above running.
    pub sprint: bool,
    /// Allows reversing beyond walking budget (at the cost of a stability check).
    pub expanded_backward: bool,
    /// Allows Meks to leap down drops larger than their normal level change.
    pub leaping: bool,
    /// Allows the careful-stand action for prone Meks.
    pub careful_stand: bool,
    /// Allows Meks and vehicles to go hull-down.
    pub hull_down: bool,
    /// Aerospace units use vector movement instead of facing-based movement.
    pub vector_movement: bool,
    /// A unit may always move one hex with its entire budget.
    pub minimum_movement: bool,
    /// Paths are careful unless the caller opts out.
    pub careful_by_default: bool,
    /// Highest elevation a VTOL may climb to.
    pub max_vtol_elevation: i32,
}

impl RulesConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_VTOL_ELEVATION: i32 = 50;

    pub fn new() -> Self {
        Self {
            sprint: false,
            expanded_backward: false,
            leaping: false,
            careful_stand: true,
            hull_down: true,
            vector_movement: false,
            minimum_movement: true,
            careful_by_default: true,
            max_vtol_elevation: Self::DEFAULT_MAX_VTOL_ELEVATION,
        }
    }

    /// Base ruleset plus every optional movement rule.
    pub fn advanced() -> Self {
        Self {
            sprint: true,
            expanded_backward: true,
            leaping: true,
            ..Self::new()
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
