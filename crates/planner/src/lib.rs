//! Route search and interactive path building on top of `movement-core`.
//!
//! [`BestFirstPathfinder`] is the stock [`movement_core::Pathfinder`]: it
//! expands candidate paths through the real step compiler, so every route it
//! returns already respects the unit's budgets and terrain. [`PlanningSession`]
//! owns one path for one unit and logs every change made to it.
mod error;
mod search;
mod session;

pub use error::SearchError;
pub use search::BestFirstPathfinder;
pub use session::PlanningSession;
