//! CLI library components for the reconciliation tool.

pub mod config;
pub mod logging;
