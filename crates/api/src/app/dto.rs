use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use courseware_core::ContentNode;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct DepthQuery {
    pub depth: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseListQuery {
    /// Comma-separated course ids.
    pub course_id: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// One content node, optionally with its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedContent {
    pub id: String,
    pub uri: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Present only on course roots.
    #[serde(flatten)]
    pub course_fields: Option<CourseFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SerializedContent>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseFields {
    pub course: String,
    pub org: String,
    pub run: String,
}

/// Course representation for the list and detail endpoints.
///
/// Same as `SerializedContent` but the subtree is exposed as `content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseData {
    #[serde(flatten)]
    pub summary: SerializedContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<SerializedContent>>,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedContent {
    pub id: String,
    pub name: Option<String>,
    pub format: Option<String>,
    pub problems: Vec<ProblemSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemSummary {
    pub id: String,
    pub name: Option<String>,
    pub category: String,
}

impl From<&ContentNode> for ProblemSummary {
    fn from(node: &ContentNode) -> Self {
        Self {
            id: node.location.to_string(),
            name: node.display_name.clone(),
            category: node.category().to_string(),
        }
    }
}
