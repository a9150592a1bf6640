pub mod buffer;
pub mod export;
pub mod id;
pub mod models;
pub mod prefs;
pub mod storage;
pub mod store;
pub mod templates;

// Re-export commonly used types
pub use buffer::{Discipline, DisciplineBuffers};
pub use export::{document_to_markdown, export_file_name};
pub use id::generate_id;
pub use models::{
    next_number, Category, Comment, Document, DocumentUpdate, NewRequirement, Priority,
    Requirement, RequirementUpdate, Status,
};
pub use prefs::{
    AiProvider, EditorFontSize, EditorLineSpacing, PreferenceStore, Preferences, Theme,
};
pub use storage::{
    default_data_dir, FileStorage, MemoryStorage, Persistence, StorageError, STORAGE_VERSION,
};
pub use store::{DocumentStore, StoreError};
pub use templates::builtin_templates;
