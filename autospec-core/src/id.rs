use uuid::Uuid;

/// Generates a globally-unique string identifier.
///
/// Used for document, requirement, and comment ids.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
