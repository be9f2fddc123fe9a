//! Support code for the `movec` binary: environment configuration and plan reports.
pub mod config;
pub mod report;

pub use config::{CliConfig, OutputFormat};
pub use report::Report;
