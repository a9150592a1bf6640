mod cli;
mod tools;

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use serde_json::json;

use autospec_core::{Category, Priority, RequirementUpdate, Status};

use crate::cli::{Cli, Command};
use crate::tools::ToolStore;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(payload) => {
            // Payloads are JSON so callers can parse the result
            println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
        }
        Err(err) => {
            eprintln!("{} {}", "Error:".red(), err);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<serde_json::Value> {
    let store = match cli.documents_dir {
        Some(dir) => ToolStore::new(dir),
        None => ToolStore::default_location()?,
    };

    match cli.command {
        Command::ListDocuments => {
            let documents = store.list_documents()?;
            Ok(json!({
                "documents": documents,
                "count": documents.len(),
            }))
        }
        Command::ReadDocument { document } => {
            let document = store.read_document(&document)?;
            Ok(serde_json::to_value(document)?)
        }
        Command::CreateRequirement {
            document,
            text,
            category,
            priority,
        } => {
            let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;
            let priority: Priority = priority.parse().map_err(|e: String| anyhow!(e))?;

            let requirement = store.create_requirement(&document, &text, category, priority)?;
            Ok(json!({
                "success": true,
                "requirement": requirement,
            }))
        }
        Command::UpdateRequirement {
            document,
            requirement_id,
            text,
            status,
            priority,
        } => {
            let update = RequirementUpdate {
                text,
                status: status
                    .map(|s| s.parse::<Status>().map_err(|e| anyhow!(e)))
                    .transpose()?,
                priority: priority
                    .map(|p| p.parse::<Priority>().map_err(|e| anyhow!(e)))
                    .transpose()?,
                ..Default::default()
            };

            let requirement = store.update_requirement(&document, &requirement_id, update)?;
            Ok(json!({
                "success": true,
                "requirement": requirement,
            }))
        }
        Command::ExportDocument { document, output } => {
            let path = store.export_document(&document, output)?;
            Ok(json!({
                "success": true,
                "path": path,
            }))
        }
    }
}
