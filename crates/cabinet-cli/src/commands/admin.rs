//! Administrative CLI commands.

use clap::{Args, Subcommand};

use cabinet_core::config::AppConfig;
use cabinet_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Replace the whole snapshot with an empty one
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Check the persistence substrate
    Health,
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config: &AppConfig,
    _format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_store(config).await?;

    match &args.command {
        AdminCommand::Reset { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("This will erase every folder and file record. Continue?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            store.reset().await?;
            output::print_success("Snapshot reset.");
        }
        AdminCommand::Health => {
            let healthy = store.health_check().await?;
            output::print_kv("backend", store.backend_type());
            output::print_kv("healthy", if healthy { "yes" } else { "no" });
        }
    }

    Ok(())
}
