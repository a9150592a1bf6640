use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "autospec", version, about = "Tool surface for AutoSpec requirements documents")]
pub struct Cli {
    /// Directory holding the per-document JSON files
    /// (defaults to ~/.autospec/documents)
    #[clap(long)]
    pub documents_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all available requirements documents
    ListDocuments,

    /// Read a requirements document, returning its full content and
    /// requirements
    ReadDocument {
        /// Name of the document to read
        document: String,
    },

    /// Create a new requirement in a document
    CreateRequirement {
        /// Name of the document (created if it does not exist)
        document: String,

        /// Requirement text
        #[clap(long)]
        text: String,

        /// Requirement category (functional, non-functional, constraint,
        /// acceptance)
        #[clap(long)]
        category: String,

        /// Requirement priority (high, medium, low)
        #[clap(long)]
        priority: String,
    },

    /// Update an existing requirement
    UpdateRequirement {
        /// Name of the document
        document: String,

        /// Id of the requirement to update
        requirement_id: String,

        /// New requirement text
        #[clap(long)]
        text: Option<String>,

        /// New status (draft, review, approved, implemented)
        #[clap(long)]
        status: Option<String>,

        /// New priority (high, medium, low)
        #[clap(long)]
        priority: Option<String>,
    },

    /// Export a requirements document to markdown
    ExportDocument {
        /// Name of the document to export
        document: String,

        /// Path for the exported markdown file (defaults to
        /// <document>.md in the current directory)
        #[clap(long)]
        output: Option<PathBuf>,
    },
}
