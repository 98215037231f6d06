//! Runtime configuration for the checkpoint tool.

use strata_core::constants::NetworkType;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Network whose checkpoint table is active.
    pub network: NetworkType,
    /// Log level filter string (e.g. "info", "strata_consensus=debug").
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
