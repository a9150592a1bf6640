//! Canonical markdown rendering of a requirements document.
//!
//! Rendering is a pure function of the document state and the metadata
//! flag: identical input yields byte-identical output.

use crate::models::{Category, Document};

/// Fixed placeholder when a document has no intent statement
const INTENT_PLACEHOLDER: &str = "_No intent statement has been captured for this document yet._";

/// Fixed placeholder when a document has no curated context
const CONTEXT_PLACEHOLDER: &str = "_No curated context has been added for this document yet._";

/// Renders a document to canonical markdown.
///
/// Section order is fixed: title, optional metadata, intent, context, then
/// the specification body with one subsection per non-empty requirement
/// category. Requirements appear in document order within their category.
pub fn document_to_markdown(document: &Document, include_metadata: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", document.name));

    if include_metadata {
        output.push_str(&format!("**Version:** {}  \n", document.version));
        // Date format is pinned so exports are reproducible
        output.push_str(&format!(
            "**Last Updated:** {}\n\n",
            document.updated_at.format("%Y-%m-%d")
        ));
    }

    output.push_str("---\n\n");

    output.push_str("## Intent Engineering (Strategy)\n\n");
    if document.intent.is_empty() {
        output.push_str(INTENT_PLACEHOLDER);
    } else {
        output.push_str(&document.intent);
    }
    output.push_str("\n\n");

    output.push_str("## Context Engineering\n\n");
    if document.context.is_empty() {
        output.push_str(CONTEXT_PLACEHOLDER);
    } else {
        output.push_str(&document.context);
    }
    output.push_str("\n\n");

    output.push_str("## Specification Engineering\n\n");
    if !document.content.trim().is_empty() {
        output.push_str(&document.content);
        output.push_str("\n\n");
    }

    for category in Category::ALL {
        let requirements: Vec<_> = document
            .requirements
            .iter()
            .filter(|r| r.category == category)
            .collect();
        if requirements.is_empty() {
            continue;
        }

        output.push_str(&format!("### {} Requirements\n\n", category.label()));
        for req in requirements {
            output.push_str(&format!("#### {}: {}\n\n", req.number, req.text));
            output.push_str(&format!("- **Priority:** {}\n", req.priority));
            output.push_str(&format!("- **Status:** {}\n", req.status));
            if !req.dependencies.is_empty() {
                output.push_str(&format!(
                    "- **Dependencies:** {}\n",
                    req.dependencies.join(", ")
                ));
            }
            output.push('\n');
        }
    }

    output
}

/// Derives an export file name from a configurable pattern, substituting
/// the `{name}` placeholder with the document's name
pub fn export_file_name(pattern: &str, name: &str) -> String {
    pattern.replace("{name}", name)
}
