//! File metadata CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use cabinet_core::config::AppConfig;
use cabinet_core::error::AppError;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::file::CreateFile;

use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files in a folder
    List {
        /// Folder ID
        #[arg(short, long)]
        folder_id: String,
    },
    /// Record an already-stored file in a folder
    Add {
        /// Original filename
        #[arg(short, long)]
        name: String,
        /// Folder ID
        #[arg(short, long)]
        folder_id: String,
        /// Opaque payload location (relative path or URL)
        #[arg(short, long)]
        location: String,
        /// Optional annotation
        #[arg(short, long)]
        remark: Option<String>,
    },
    /// Delete a file record
    Delete {
        /// File ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Reorder files within a folder
    Reorder {
        /// Assignments in ID=ORDER form (repeatable)
        #[arg(short, long = "item", value_name = "ID=ORDER")]
        items: Vec<String>,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Remark
    remark: String,
    /// Location
    location: String,
    /// Uploaded at
    uploaded_at: String,
    /// Order
    order: u32,
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_store(config).await?;

    match &args.command {
        FileCommand::List { folder_id } => {
            let folder_id = parse_folder_id(folder_id)?;

            let files = store.list_files(folder_id).await?;
            let rows: Vec<FileRow> = files
                .iter()
                .map(|f| FileRow {
                    id: f.id.to_string(),
                    name: f.name.clone(),
                    remark: f.remark.clone().unwrap_or_else(|| "-".to_string()),
                    location: f.location.clone(),
                    uploaded_at: f.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
                    order: f.order,
                })
                .collect();

            output::print_list(&rows, format);
        }
        FileCommand::Add {
            name,
            folder_id,
            location,
            remark,
        } => {
            let folder_id = parse_folder_id(folder_id)?;

            let file = store
                .create_file(CreateFile {
                    name: name.clone(),
                    folder_id,
                    remark: remark.clone(),
                    location: location.clone(),
                })
                .await?;

            output::print_success(&format!("File '{}' recorded (id: {})", name, file.id));
        }
        FileCommand::Delete { id, force } => {
            let file_id: FileId = id
                .parse()
                .map_err(|e| AppError::validation(format!("Invalid file id '{id}': {e}")))?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete file record {}?", id))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            store.delete_file(file_id).await?;
            output::print_success("File record deleted.");
        }
        FileCommand::Reorder { items } => {
            let items = items
                .iter()
                .map(|raw| super::parse_assignment::<FileId>(raw))
                .collect::<Result<Vec<_>, _>>()?;

            store.reorder_files(&items).await?;
            output::print_success("Files reordered.");
        }
    }

    Ok(())
}

fn parse_folder_id(raw: &str) -> Result<FolderId, AppError> {
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid folder id '{raw}': {e}")))
}
