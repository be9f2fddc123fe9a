//! Content loaders for reading snapshots from files.
//!
//! Each loader parses one file format into movement-core types. File-level
//! errors carry the offending path so the binary can report them as-is.

pub mod board;
pub mod rules;
pub mod scenario;
pub mod unit;

pub use board::BoardLoader;
pub use rules::RulesLoader;
pub use scenario::{Scenario, ScenarioLoader};
pub use unit::UnitLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
