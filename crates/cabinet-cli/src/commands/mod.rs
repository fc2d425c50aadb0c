//! CLI command definitions and dispatch.

pub mod admin;
pub mod file;
pub mod folder;

use clap::{Parser, Subcommand};

use cabinet_core::config::AppConfig;
use cabinet_core::error::AppError;
use cabinet_entity::order::ReorderItem;
use cabinet_store::TreeStore;

use crate::output::OutputFormat;

/// Cabinet: hierarchical file metadata store
#[derive(Debug, Parser)]
#[command(name = "cabinet", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay to load (config/<env>.toml)
    #[arg(short, long, default_value = "default")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Folder management
    Folder(folder::FolderArgs),
    /// File metadata management
    File(file::FileArgs),
    /// Administrative operations
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Folder(args) => folder::execute(args, config, self.format).await,
            Commands::File(args) => file::execute(args, config, self.format).await,
            Commands::Admin(args) => admin::execute(args, config, self.format).await,
        }
    }
}

/// Helper: open the configured backend and build a store over it.
pub async fn open_store(config: &AppConfig) -> Result<TreeStore, AppError> {
    let backend = cabinet_persist::open_backend(&config.persistence).await?;
    Ok(TreeStore::new(backend))
}

/// Helper: parse an `id=order` reorder argument.
pub fn parse_assignment<I>(raw: &str) -> Result<ReorderItem<I>, AppError>
where
    I: std::str::FromStr,
    I::Err: std::fmt::Display,
{
    let (id, order) = raw
        .split_once('=')
        .ok_or_else(|| AppError::validation(format!("Expected ID=ORDER, got '{raw}'")))?;
    let id = id
        .trim()
        .parse::<I>()
        .map_err(|e| AppError::validation(format!("Invalid id in '{raw}': {e}")))?;
    let order = order
        .trim()
        .parse::<u32>()
        .map_err(|e| AppError::validation(format!("Invalid order in '{raw}': {e}")))?;
    Ok(ReorderItem { id, order })
}
