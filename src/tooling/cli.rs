//! CLI Tooling
//!
//! Command-line interface: reconstruct the hierarchy from a sidecar
//! directory and print it, summarise it, or inspect a single node.

use crate::config::{ConfigLoader, RemassConfig};
use crate::error::ApiError;
use crate::format::{
    format_node_text, format_summary_text, format_tree_json, format_tree_text, TreeSummary,
};
use crate::reconstruct::{reconstruct, Reconstruction};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Remass CLI - rebuild a tablet's document hierarchy from metadata sidecar files
#[derive(Parser)]
#[command(name = "remass")]
#[command(about = "Rebuild a tablet's document hierarchy from metadata sidecar files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the sidecar files
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the reconstructed hierarchy
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Do not descend below this depth (root is 0)
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Show node counts, orphans and unreadable records
    Summary {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one node's metadata and location
    Show {
        /// Node identifier
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI execution context
pub struct CliContext {
    dir: PathBuf,
    config: RemassConfig,
    color: bool,
}

impl CliContext {
    /// Load configuration and bind to a sidecar directory.
    pub fn new(dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::with_config(dir, config))
    }

    pub fn with_config(dir: PathBuf, config: RemassConfig) -> Self {
        let color = config.logging.color;
        Self { dir, config, color }
    }

    pub fn config(&self) -> &RemassConfig {
        &self.config
    }

    /// Fold logging flags from the command line into the loaded config.
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        let logging = &mut self.config.logging;
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        if cli.no_color {
            logging.color = false;
            self.color = false;
        }
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = ?command, dir = %self.dir.display(), "Executing command");
        match command {
            Commands::Tree { format, max_depth } => {
                let reconstruction = self.reconstruct()?;
                match parse_format(format)? {
                    OutputFormat::Json => format_tree_json(&reconstruction.tree),
                    OutputFormat::Text => Ok(format_tree_text(
                        &reconstruction.tree,
                        *max_depth,
                        self.color,
                    )),
                }
            }
            Commands::Summary { format } => {
                let reconstruction = self.reconstruct()?;
                let summary = TreeSummary::from_reconstruction(&reconstruction);
                match parse_format(format)? {
                    OutputFormat::Json => to_json(&summary),
                    OutputFormat::Text => Ok(format_summary_text(&summary)),
                }
            }
            Commands::Show { id, format } => {
                let reconstruction = self.reconstruct()?;
                let path = reconstruction
                    .tree
                    .path_to(id)
                    .ok_or_else(|| ApiError::NodeNotFound(id.clone()))?;
                match parse_format(format)? {
                    OutputFormat::Json => {
                        let location: Vec<&str> = path.iter().map(|n| n.id()).collect();
                        let node = path[path.len() - 1];
                        to_json(&json!({
                            "node": node.meta(),
                            "collection": node.is_collection(),
                            "path": location,
                        }))
                    }
                    OutputFormat::Text => Ok(format_node_text(&path)),
                }
            }
            Commands::Config => self.config.to_toml_string(),
        }
    }

    fn reconstruct(&self) -> Result<Reconstruction, ApiError> {
        reconstruct(&self.dir, &self.config.scan, &self.config.build)
    }
}

enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}
