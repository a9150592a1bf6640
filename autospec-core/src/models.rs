use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the category of a requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Functional,
    NonFunctional,
    Constraint,
    Acceptance,
}

impl Category {
    /// All categories, in the fixed order used for numbering prefixes and
    /// export sections
    pub const ALL: [Category; 4] = [
        Category::Functional,
        Category::NonFunctional,
        Category::Constraint,
        Category::Acceptance,
    ];

    /// The prefix used when numbering requirements of this category
    pub fn initial(&self) -> &'static str {
        match self {
            Category::Functional => "F",
            Category::NonFunctional => "NF",
            Category::Constraint => "C",
            Category::Acceptance => "A",
        }
    }

    /// Human-readable section label: first letter capitalized, hyphen
    /// replaced by a space
    pub fn label(&self) -> &'static str {
        match self {
            Category::Functional => "Functional",
            Category::NonFunctional => "Non functional",
            Category::Constraint => "Constraint",
            Category::Acceptance => "Acceptance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Functional => write!(f, "functional"),
            Category::NonFunctional => write!(f, "non-functional"),
            Category::Constraint => write!(f, "constraint"),
            Category::Acceptance => write!(f, "acceptance"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "functional" => Ok(Category::Functional),
            "non-functional" => Ok(Category::NonFunctional),
            "constraint" => Ok(Category::Constraint),
            "acceptance" => Ok(Category::Acceptance),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Represents the priority of a requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

/// Represents the review status of a requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Review,
    Approved,
    Implemented,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Draft => write!(f, "draft"),
            Status::Review => write!(f, "review"),
            Status::Approved => write!(f, "approved"),
            Status::Implemented => write!(f, "implemented"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Status::Draft),
            "review" => Ok(Status::Review),
            "approved" => Ok(Status::Approved),
            "implemented" => Ok(Status::Implemented),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

/// A review comment attached to a requirement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// A single tracked requirement within a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Requirement {
    /// Unique identifier, assigned at creation and immutable thereafter
    pub id: String,

    /// Display label, e.g. "F-3" or "NF-1". Assigned at creation; never
    /// renumbered when other requirements are deleted
    pub number: String,

    /// Free-form requirement statement
    pub text: String,

    /// Category of the requirement. Fixed at creation: the numbering
    /// scheme counts per category, so a later category change would
    /// desynchronize the display labels
    pub category: Category,

    /// Priority level of the requirement
    pub priority: Priority,

    /// Current review status
    pub status: Status,

    /// Ids of requirements this requirement depends on. Referential
    /// integrity is not enforced; dangling ids are tolerated
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Review comments, in the order they were added
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A named requirements document: narrative sections plus an ordered list
/// of requirements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier for the document
    pub id: String,

    /// Display title, supplied by the user at creation
    pub name: String,

    /// Intent/strategy narrative. Defaults to empty when absent in
    /// persisted data, supporting documents saved before this field existed
    #[serde(default)]
    pub intent: String,

    /// Curated-context narrative. Same backfill rule as `intent`
    #[serde(default)]
    pub context: String,

    /// Specification body, rendered separately from the structured
    /// requirements list
    pub content: String,

    /// Requirements in insertion order; the engine never reorders them
    pub requirements: Vec<Requirement>,

    /// Set once at creation, never mutated
    pub created_at: DateTime<Utc>,

    /// Reset to "now" on every mutation
    pub updated_at: DateTime<Utc>,

    /// Starts at 1; incremented by exactly 1 on every committed update
    pub version: u32,
}

/// Input for creating a requirement. The id, number, and initial status
/// are assigned by the engine
#[derive(Debug, Clone)]
pub struct NewRequirement {
    pub text: String,
    pub category: Category,
    pub priority: Priority,
    pub dependencies: Vec<String>,
}

impl NewRequirement {
    /// Convenience constructor with no dependencies
    pub fn new(text: impl Into<String>, category: Category, priority: Priority) -> Self {
        Self {
            text: text.into(),
            category,
            priority,
            dependencies: Vec::new(),
        }
    }
}

/// The set of document fields that may be changed after creation.
///
/// Identity fields (`id`, `created_at`) and the versioning metadata are
/// deliberately absent so a partial update can never overwrite them.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub name: Option<String>,
    pub intent: Option<String>,
    pub context: Option<String>,
    pub content: Option<String>,
    pub requirements: Option<Vec<Requirement>>,
}

impl DocumentUpdate {
    /// Merges the set fields into the target document
    pub fn apply(self, document: &mut Document) {
        if let Some(name) = self.name {
            document.name = name;
        }
        if let Some(intent) = self.intent {
            document.intent = intent;
        }
        if let Some(context) = self.context {
            document.context = context;
        }
        if let Some(content) = self.content {
            document.content = content;
        }
        if let Some(requirements) = self.requirements {
            document.requirements = requirements;
        }
    }
}

/// The set of requirement fields that may be changed after creation.
///
/// `id`, `number`, and `category` are deliberately absent: the first two
/// are identity, and category is fixed at creation (see [`Requirement`]).
#[derive(Debug, Clone, Default)]
pub struct RequirementUpdate {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub dependencies: Option<Vec<String>>,
    pub comments: Option<Vec<Comment>>,
}

impl RequirementUpdate {
    /// Merges the set fields into the target requirement
    pub fn apply(self, requirement: &mut Requirement) {
        if let Some(text) = self.text {
            requirement.text = text;
        }
        if let Some(priority) = self.priority {
            requirement.priority = priority;
        }
        if let Some(status) = self.status {
            requirement.status = status;
        }
        if let Some(dependencies) = self.dependencies {
            requirement.dependencies = dependencies;
        }
        if let Some(comments) = self.comments {
            requirement.comments = comments;
        }
    }
}

/// Computes the display label for the next requirement of the given
/// category: the count of live same-category requirements plus one,
/// prefixed with the category initial.
///
/// Numbers are monotonically increasing per category at assignment time
/// but are not unique over the document's lifetime once requirements are
/// deleted and the count is reused. They are display labels, not keys;
/// `id` is the only guaranteed-unique identifier.
pub fn next_number(requirements: &[Requirement], category: Category) -> String {
    let count = requirements
        .iter()
        .filter(|r| r.category == category)
        .count();
    format!("{}-{}", category.initial(), count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(id: &str, number: &str, category: Category) -> Requirement {
        Requirement {
            id: id.to_string(),
            number: number.to_string(),
            text: String::new(),
            category,
            priority: Priority::Medium,
            status: Status::Draft,
            dependencies: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_next_number_counts_per_category() {
        let reqs = vec![
            requirement("a", "F-1", Category::Functional),
            requirement("b", "NF-1", Category::NonFunctional),
            requirement("c", "F-2", Category::Functional),
        ];

        assert_eq!(next_number(&reqs, Category::Functional), "F-3");
        assert_eq!(next_number(&reqs, Category::NonFunctional), "NF-2");
        assert_eq!(next_number(&reqs, Category::Constraint), "C-1");
        assert_eq!(next_number(&reqs, Category::Acceptance), "A-1");
    }

    #[test]
    fn test_next_number_reuses_freed_count() {
        // Deleting F-2 and adding a new functional requirement produces a
        // second F-2. Accepted property of the display-label scheme.
        let reqs = vec![requirement("a", "F-1", Category::Functional)];
        assert_eq!(next_number(&reqs, Category::Functional), "F-2");
    }

    #[test]
    fn test_category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::NonFunctional).unwrap();
        assert_eq!(json, "\"non-functional\"");

        let parsed: Category = serde_json::from_str("\"acceptance\"").unwrap();
        assert_eq!(parsed, Category::Acceptance);
    }

    #[test]
    fn test_enum_round_trip_from_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("implemented".parse::<Status>(), Ok(Status::Implemented));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_document_update_cannot_touch_identity() {
        let mut doc = Document {
            id: "doc-1".to_string(),
            name: "Original".to_string(),
            intent: String::new(),
            context: String::new(),
            content: String::new(),
            requirements: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            version: 1,
        };
        let created_at = doc.created_at;

        DocumentUpdate {
            name: Some("Renamed".to_string()),
            intent: Some("Ship it".to_string()),
            ..Default::default()
        }
        .apply(&mut doc);

        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.created_at, created_at);
        assert_eq!(doc.name, "Renamed");
        assert_eq!(doc.intent, "Ship it");
        assert_eq!(doc.content, "");
    }

    #[test]
    fn test_requirement_update_merges_partial_fields() {
        let mut req = requirement("r-1", "F-1", Category::Functional);
        req.text = "Old text".to_string();

        RequirementUpdate {
            status: Some(Status::Approved),
            ..Default::default()
        }
        .apply(&mut req);

        assert_eq!(req.status, Status::Approved);
        assert_eq!(req.text, "Old text");
        assert_eq!(req.number, "F-1");
        assert_eq!(req.category, Category::Functional);
    }
}
