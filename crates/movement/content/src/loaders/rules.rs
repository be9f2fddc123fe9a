//! Rule toggle loader.

use std::path::Path;

use movement_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule toggles from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rule toggles from a TOML file.
    ///
    /// Toggles missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_toggles_keep_defaults() {
        let rules = RulesLoader::parse("sprint = true\nmax_vtol_elevation = 12\n").unwrap();
        assert!(rules.sprint);
        assert_eq!(rules.max_vtol_elevation, 12);
        assert_eq!(rules.careful_by_default, RulesConfig::default().careful_by_default);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(RulesLoader::parse("sprint = \"yes\"").is_err());
    }
}
