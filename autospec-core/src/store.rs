use chrono::Utc;
use thiserror::Error;

use crate::export;
use crate::id::generate_id;
use crate::models::{
    next_number, Document, DocumentUpdate, NewRequirement, Requirement, RequirementUpdate, Status,
};
use crate::storage::{Persistence, StorageError};

/// Error type for store operations.
///
/// Missing ids are always a typed error, never a silent no-op, so callers
/// can decide how to present them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Requirement not found: {0}")]
    RequirementNotFound(String),

    #[error("No document is currently selected")]
    NoCurrentDocument,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Single source of truth for all requirements documents.
///
/// Every mutation passes through the store so versioning, timestamps, and
/// persistence stay consistent: each committed update bumps the document
/// version by one, resets `updated_at`, and synchronously writes the whole
/// collection through the injected [`Persistence`] backend.
pub struct DocumentStore {
    documents: Vec<Document>,
    current_id: Option<String>,
    templates: Vec<Document>,
    persistence: Box<dyn Persistence>,
}

impl DocumentStore {
    /// Opens a store over the given persistence backend, loading any
    /// previously saved collection
    pub fn open(persistence: Box<dyn Persistence>) -> Result<Self, StoreError> {
        let documents = persistence.load()?;
        Ok(Self {
            documents,
            current_id: None,
            templates: Vec::new(),
            persistence,
        })
    }

    /// Installs the template catalog. Templates are immutable seeds used
    /// only at document-creation time
    pub fn load_templates(&mut self, templates: Vec<Document>) {
        self.templates = templates;
    }

    /// All documents, in creation order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The installed templates
    pub fn templates(&self) -> &[Document] {
        &self.templates
    }

    /// The currently selected document, if any
    pub fn current_document(&self) -> Option<&Document> {
        let id = self.current_id.as_deref()?;
        self.documents.iter().find(|d| d.id == id)
    }

    /// Looks up a document by id
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Creates a new document, appends it to the collection, selects it,
    /// and persists the collection. Returns the new document's id.
    ///
    /// When `template_id` is given, the template's narrative sections and
    /// requirements are copied into the new document; an unknown template
    /// id falls back to a blank document rather than an error.
    pub fn create_document(
        &mut self,
        name: &str,
        template_id: Option<&str>,
    ) -> Result<String, StoreError> {
        let template = template_id.and_then(|id| self.templates.iter().find(|t| t.id == id));

        let now = Utc::now();
        let document = Document {
            id: generate_id(),
            name: name.to_string(),
            intent: template.map(|t| t.intent.clone()).unwrap_or_default(),
            context: template.map(|t| t.context.clone()).unwrap_or_default(),
            content: template.map(|t| t.content.clone()).unwrap_or_default(),
            requirements: template.map(|t| t.requirements.clone()).unwrap_or_default(),
            created_at: now,
            updated_at: now,
            version: 1,
        };
        let id = document.id.clone();

        self.documents.push(document);
        self.current_id = Some(id.clone());
        self.persistence.save(&self.documents)?;

        Ok(id)
    }

    /// Sets the current-document pointer.
    ///
    /// On an unknown id the pointer is cleared and `DocumentNotFound` is
    /// returned. No persistence side effect.
    pub fn select_document(&mut self, id: &str) -> Result<(), StoreError> {
        if self.documents.iter().any(|d| d.id == id) {
            self.current_id = Some(id.to_string());
            Ok(())
        } else {
            self.current_id = None;
            Err(StoreError::DocumentNotFound(id.to_string()))
        }
    }

    /// Merges the given fields into the target document, resets
    /// `updated_at`, increments `version` by one, and persists the full
    /// collection.
    ///
    /// The mutation is applied before the save attempt: on a persistence
    /// failure the in-memory state remains authoritative but unsaved until
    /// the next successful write.
    pub fn update_document(&mut self, id: &str, update: DocumentUpdate) -> Result<(), StoreError> {
        let document = self
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;

        update.apply(document);
        document.updated_at = Utc::now();
        document.version += 1;

        self.persistence.save(&self.documents)?;
        Ok(())
    }

    /// Adds a requirement to the current document and returns its assigned
    /// id.
    ///
    /// The display number is the count of live same-category requirements
    /// plus one; sequence gaps left by deletions are expected and never
    /// reclaimed.
    pub fn add_requirement(&mut self, new: NewRequirement) -> Result<String, StoreError> {
        let current = self
            .current_document()
            .ok_or(StoreError::NoCurrentDocument)?;
        let document_id = current.id.clone();

        let requirement = Requirement {
            id: generate_id(),
            number: next_number(&current.requirements, new.category),
            text: new.text,
            category: new.category,
            priority: new.priority,
            status: Status::Draft,
            dependencies: new.dependencies,
            comments: Vec::new(),
        };
        let requirement_id = requirement.id.clone();

        let mut requirements = current.requirements.clone();
        requirements.push(requirement);

        self.update_document(
            &document_id,
            DocumentUpdate {
                requirements: Some(requirements),
                ..Default::default()
            },
        )?;

        Ok(requirement_id)
    }

    /// Merges the given fields into a requirement of the current document
    pub fn update_requirement(
        &mut self,
        id: &str,
        update: RequirementUpdate,
    ) -> Result<(), StoreError> {
        let current = self
            .current_document()
            .ok_or(StoreError::NoCurrentDocument)?;
        let document_id = current.id.clone();

        let mut requirements = current.requirements.clone();
        let requirement = requirements
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))?;
        update.apply(requirement);

        self.update_document(
            &document_id,
            DocumentUpdate {
                requirements: Some(requirements),
                ..Default::default()
            },
        )
    }

    /// Removes a requirement from the current document.
    ///
    /// Remaining requirements keep their ids and numbers; the freed
    /// sequence number is not reclaimed.
    pub fn delete_requirement(&mut self, id: &str) -> Result<(), StoreError> {
        let current = self
            .current_document()
            .ok_or(StoreError::NoCurrentDocument)?;
        let document_id = current.id.clone();

        let mut requirements = current.requirements.clone();
        let before = requirements.len();
        requirements.retain(|r| r.id != id);
        if requirements.len() == before {
            return Err(StoreError::RequirementNotFound(id.to_string()));
        }

        self.update_document(
            &document_id,
            DocumentUpdate {
                requirements: Some(requirements),
                ..Default::default()
            },
        )
    }

    /// Renders a document as canonical markdown. Never mutates state
    pub fn export_markdown(&self, id: &str, include_metadata: bool) -> Result<String, StoreError> {
        let document = self
            .document(id)
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
        Ok(export::document_to_markdown(document, include_metadata))
    }
}
