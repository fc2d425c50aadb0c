//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use cabinet_core::config::AppConfig;
use cabinet_core::error::AppError;
use cabinet_core::types::FolderId;
use cabinet_entity::folder::CreateFolder;

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders under a parent (omit for roots)
    List {
        /// Parent folder ID
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Delete a folder and everything under it
    Delete {
        /// Folder ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Reorder sibling folders
    Reorder {
        /// Assignments in ID=ORDER form (repeatable)
        #[arg(short, long = "item", value_name = "ID=ORDER")]
        items: Vec<String>,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Parent
    parent: String,
    /// Order
    order: u32,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_store(config).await?;

    match &args.command {
        FolderCommand::List { parent_id } => {
            let parent_id = parent_id
                .as_deref()
                .map(parse_folder_id)
                .transpose()?;

            let folders = store.list_folders(parent_id).await?;
            let rows: Vec<FolderRow> = folders
                .iter()
                .map(|f| FolderRow {
                    id: f.id.to_string(),
                    name: f.name.clone(),
                    parent: f
                        .parent_id
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    order: f.order,
                })
                .collect();

            output::print_list(&rows, format);
        }
        FolderCommand::Create { name, parent_id } => {
            let parent_id = parent_id
                .as_deref()
                .map(parse_folder_id)
                .transpose()?;

            let folder = store
                .create_folder(CreateFolder {
                    name: name.clone(),
                    parent_id,
                })
                .await?;

            output::print_success(&format!("Folder '{}' created (id: {})", name, folder.id));
        }
        FolderCommand::Delete { id, force } => {
            let folder_id = parse_folder_id(id)?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "This will delete folder {} and everything under it. Continue?",
                        id
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            store.delete_folder(folder_id).await?;
            output::print_success("Folder subtree deleted.");
        }
        FolderCommand::Reorder { items } => {
            let items = items
                .iter()
                .map(|raw| super::parse_assignment::<FolderId>(raw))
                .collect::<Result<Vec<_>, _>>()?;

            store.reorder_folders(&items).await?;
            output::print_success("Folders reordered.");
        }
    }

    Ok(())
}

fn parse_folder_id(raw: &str) -> Result<FolderId, AppError> {
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid folder id '{raw}': {e}")))
}
