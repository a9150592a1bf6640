//! The on-disk document store behind the tool surface.
//!
//! Each document lives in its own `<name>.json` file under the documents
//! directory. This store is independent of the editor's persisted
//! envelope: files are rewritten whole on every mutation, and the
//! editor's version/timestamp bumping does not apply here. Numbering
//! uses the same per-category counting scheme as the editor.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use autospec_core::{
    default_data_dir, generate_id, next_number, Category, Document, Priority, Requirement,
    RequirementUpdate, Status, StorageError,
};

/// Error type for tool-surface operations
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Requirement not found: {0}")]
    RequirementNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Per-document JSON files under a fixed directory
pub struct ToolStore {
    documents_dir: PathBuf,
}

impl ToolStore {
    /// Creates a store over the given directory
    pub fn new<P: AsRef<Path>>(documents_dir: P) -> Self {
        Self {
            documents_dir: documents_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a store at the default location, `<data dir>/documents`
    pub fn default_location() -> Result<Self, ToolError> {
        Ok(Self::new(default_data_dir()?.join("documents")))
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.documents_dir.join(format!("{}.json", name))
    }

    fn ensure_documents_dir(&self) -> Result<(), ToolError> {
        fs::create_dir_all(&self.documents_dir)?;
        Ok(())
    }

    fn write_document(&self, name: &str, document: &Document) -> Result<(), ToolError> {
        self.ensure_documents_dir()?;
        let json = serde_json::to_string_pretty(document)?;
        fs::write(self.document_path(name), json)?;
        Ok(())
    }

    /// Lists the names of all stored documents, sorted
    pub fn list_documents(&self) -> Result<Vec<String>, ToolError> {
        self.ensure_documents_dir()?;

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.documents_dir)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(name) = file_name.strip_suffix(".json") {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Reads a document by name
    pub fn read_document(&self, name: &str) -> Result<Document, ToolError> {
        let path = self.document_path(name);
        if !path.exists() {
            return Err(ToolError::DocumentNotFound(name.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Creates a requirement in the named document, creating the document
    /// file when it does not exist yet. Returns the new requirement.
    pub fn create_requirement(
        &self,
        name: &str,
        text: &str,
        category: Category,
        priority: Priority,
    ) -> Result<Requirement, ToolError> {
        let mut document = match self.read_document(name) {
            Ok(document) => document,
            Err(ToolError::DocumentNotFound(_)) => {
                let now = Utc::now();
                Document {
                    id: generate_id(),
                    name: name.to_string(),
                    intent: String::new(),
                    context: String::new(),
                    content: String::new(),
                    requirements: Vec::new(),
                    created_at: now,
                    updated_at: now,
                    version: 1,
                }
            }
            Err(err) => return Err(err),
        };

        let requirement = Requirement {
            id: generate_id(),
            number: next_number(&document.requirements, category),
            text: text.to_string(),
            category,
            priority,
            status: Status::Draft,
            dependencies: Vec::new(),
            comments: Vec::new(),
        };

        document.requirements.push(requirement.clone());
        self.write_document(name, &document)?;

        Ok(requirement)
    }

    /// Applies a partial update to a requirement and rewrites the
    /// document file. Returns the updated requirement.
    pub fn update_requirement(
        &self,
        name: &str,
        requirement_id: &str,
        update: RequirementUpdate,
    ) -> Result<Requirement, ToolError> {
        let mut document = self.read_document(name)?;

        let requirement = document
            .requirements
            .iter_mut()
            .find(|r| r.id == requirement_id)
            .ok_or_else(|| ToolError::RequirementNotFound(requirement_id.to_string()))?;
        update.apply(requirement);
        let updated = requirement.clone();

        self.write_document(name, &document)?;
        Ok(updated)
    }

    /// Exports a document to markdown, returning the written path.
    ///
    /// Without an explicit output path the file lands in the current
    /// directory, named by the `{name}.md` pattern.
    pub fn export_document(
        &self,
        name: &str,
        output: Option<PathBuf>,
    ) -> Result<PathBuf, ToolError> {
        let document = self.read_document(name)?;
        let markdown = autospec_core::document_to_markdown(&document, false);

        let path = output
            .unwrap_or_else(|| PathBuf::from(autospec_core::export_file_name("{name}.md", name)));
        fs::write(&path, markdown)?;

        Ok(path)
    }
}
