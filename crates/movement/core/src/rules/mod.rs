//! Pure rule functions: budgets, costs, terrain access and classification.
pub mod aero;
pub mod budget;
pub mod cost;
pub mod legality;
pub mod terrain;

pub use budget::{MoveBudget, Pace, TierMatch};
pub use cost::{CostBreakdown, CostInput, LEAP_COST, movement_cost};
