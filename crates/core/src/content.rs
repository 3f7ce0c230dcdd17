//! Course content tree records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::keys::{CourseKey, UsageKey};

/// Well-known content categories.
pub mod category {
    pub const COURSE: &str = "course";
    pub const CHAPTER: &str = "chapter";
    pub const SEQUENTIAL: &str = "sequential";
    pub const VERTICAL: &str = "vertical";
    pub const PROBLEM: &str = "problem";
    pub const HTML: &str = "html";
    pub const VIDEO: &str = "video";
}

/// One addressable unit of course content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    pub location: UsageKey,
    pub display_name: Option<String>,
    pub due: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Counts towards the learner's grade.
    pub graded: bool,
    /// Assignment type label (e.g. "Homework"); course-dependent.
    pub format: Option<String>,
    /// Ordered child locations.
    pub children: Vec<UsageKey>,
}

impl ContentNode {
    pub fn new(location: UsageKey) -> Self {
        Self {
            location,
            display_name: None,
            due: None,
            start: None,
            end: None,
            graded: false,
            format: None,
            children: Vec::new(),
        }
    }

    pub fn category(&self) -> &str {
        self.location.block_type()
    }

    pub fn is_problem(&self) -> bool {
        self.category() == category::PROBLEM
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl Entity for ContentNode {
    type Id = UsageKey;

    fn id(&self) -> &UsageKey {
        &self.location
    }
}

/// A course: its root block plus course-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseKey,
    pub root: ContentNode,
    pub course_image: Option<String>,
    pub grading_policy: Vec<GraderEntry>,
}

impl Course {
    pub fn new(id: CourseKey) -> Self {
        let root = ContentNode::new(id.root_usage_key());
        Self {
            id,
            root,
            course_image: None,
            grading_policy: Vec::new(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.root.display_name.as_deref()
    }
}

impl Entity for Course {
    type Id = CourseKey;

    fn id(&self) -> &CourseKey {
        &self.id
    }
}

/// Raw grader entry as stored with the course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraderEntry {
    #[serde(rename = "type")]
    pub assignment_type: String,
    pub min_count: u32,
    pub drop_count: u32,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,
}

/// Public view of a grader entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingPolicyEntry {
    pub assignment_type: String,
    pub count: u32,
    pub dropped: u32,
    pub weight: f64,
}

impl From<&GraderEntry> for GradingPolicyEntry {
    fn from(raw: &GraderEntry) -> Self {
        Self {
            assignment_type: raw.assignment_type.clone(),
            count: raw.min_count,
            dropped: raw.drop_count,
            weight: raw.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_key() -> CourseKey {
        "course-v1:edX+DemoX+2014".parse().unwrap()
    }

    #[test]
    fn new_course_has_course_root() {
        let course = Course::new(course_key());
        assert_eq!(course.root.category(), category::COURSE);
        assert_eq!(course.root.id(), &course.id.root_usage_key());
        assert!(!course.root.has_children());
        assert_eq!(course.display_name(), None);
    }

    #[test]
    fn node_category_comes_from_location() {
        let node = ContentNode::new(course_key().make_usage_key("problem", "p1").unwrap());
        assert_eq!(node.category(), "problem");
        assert!(node.is_problem());
    }

    #[test]
    fn grader_entry_maps_to_policy_entry() {
        let raw: GraderEntry = serde_json::from_value(serde_json::json!({
            "type": "Homework",
            "min_count": 12,
            "drop_count": 2,
            "weight": 0.15,
            "short_label": "HW"
        }))
        .unwrap();

        let entry = GradingPolicyEntry::from(&raw);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({
                "assignment_type": "Homework",
                "count": 12,
                "dropped": 2,
                "weight": 0.15
            })
        );
    }
}
