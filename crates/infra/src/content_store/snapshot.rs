//! JSON snapshot format for seeding the in-memory store.
//!
//! Blocks are nested the way they appear in the course outline; locations are
//! derived from the course key plus each block's `category` and `block_id`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use courseware_core::{ContentNode, Course, CourseKey, DomainError, DomainResult, GraderEntry, UsageKey};

use super::in_memory::InMemoryContentStore;
use super::r#trait::StoreError;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid snapshot content: {0}")]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub courses: Vec<CourseSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseSnapshot {
    pub id: CourseKey,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub course_image: Option<String>,
    #[serde(default)]
    pub grading_policy: Vec<GraderEntry>,
    #[serde(default)]
    pub children: Vec<BlockSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockSnapshot {
    pub category: String,
    pub block_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub graded: bool,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub children: Vec<BlockSnapshot>,
}

impl CourseSnapshot {
    /// Split into the course record and its flattened blocks.
    pub fn into_parts(self) -> DomainResult<(Course, Vec<ContentNode>)> {
        let mut course = Course::new(self.id);
        course.root.display_name = self.display_name;
        course.root.start = self.start;
        course.root.end = self.end;
        course.course_image = self.course_image;
        course.grading_policy = self.grading_policy;

        let mut blocks = Vec::new();
        for child in self.children {
            let location = flatten(&course.id, child, &mut blocks)?;
            course.root.children.push(location);
        }
        Ok((course, blocks))
    }
}

fn flatten(
    course_key: &CourseKey,
    block: BlockSnapshot,
    out: &mut Vec<ContentNode>,
) -> DomainResult<UsageKey> {
    let mut node = ContentNode::new(course_key.make_usage_key(block.category, block.block_id)?);
    node.display_name = block.display_name;
    node.due = block.due;
    node.start = block.start;
    node.end = block.end;
    node.graded = block.graded;
    node.format = block.format;

    for child in block.children {
        node.children.push(flatten(course_key, child, out)?);
    }

    let location = node.location.clone();
    out.push(node);
    Ok(location)
}

impl InMemoryContentStore {
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let store = Self::new();
        for course in snapshot.courses {
            let (course, blocks) = course.into_parts()?;
            store.insert_course(course, blocks)?;
        }
        Ok(store)
    }

    /// Load a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Self::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use courseware_core::category;

    use super::*;
    use crate::content_store::ContentStore;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "courses": [{
                "id": "edX/DemoX/2014",
                "display_name": "Demo Course",
                "start": "2014-02-05T05:00:00Z",
                "course_image": "logo.png",
                "grading_policy": [
                    {"type": "Homework", "min_count": 12, "drop_count": 2, "weight": 0.15},
                    {"type": "Final Exam", "min_count": 1, "drop_count": 0, "weight": 0.4}
                ],
                "children": [{
                    "category": "chapter",
                    "block_id": "week1",
                    "display_name": "Week 1",
                    "children": [{
                        "category": "sequential",
                        "block_id": "hw1",
                        "graded": true,
                        "format": "Homework",
                        "due": "2014-03-01T00:00:00Z",
                        "children": [
                            {"category": "problem", "block_id": "p1"},
                            {"category": "problem", "block_id": "p2"}
                        ]
                    }]
                }]
            }]
        })
    }

    #[test]
    fn snapshot_builds_course_tree() {
        let snapshot: Snapshot = serde_json::from_value(sample_json()).unwrap();
        let store = InMemoryContentStore::from_snapshot(snapshot).unwrap();

        let key: CourseKey = "edX/DemoX/2014".parse().unwrap();
        let course = store.get_course(&key).unwrap().unwrap();
        assert_eq!(course.display_name(), Some("Demo Course"));
        assert_eq!(course.grading_policy.len(), 2);
        assert_eq!(course.root.children.len(), 1);

        let chapter = store.get_item(&course.root.children[0]).unwrap().unwrap();
        assert_eq!(chapter.category(), category::CHAPTER);
        assert_eq!(chapter.location.to_string(), "i4x://edX/DemoX/chapter/week1");

        let graded = store.get_graded_items(&key).unwrap();
        assert_eq!(graded.len(), 1);
        assert_eq!(graded[0].format.as_deref(), Some("Homework"));
        assert_eq!(graded[0].children.len(), 2);
    }

    #[test]
    fn snapshot_rejects_bad_block_ids() {
        let mut json = sample_json();
        json["courses"][0]["children"][0]["block_id"] = serde_json::json!("week 1");
        let snapshot: Snapshot = serde_json::from_value(json).unwrap();

        let err = InMemoryContentStore::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Invalid(_)));
    }

    #[test]
    fn snapshot_rejects_duplicate_blocks() {
        let mut json = sample_json();
        json["courses"][0]["children"][0]["children"][0]["children"][1]["block_id"] =
            serde_json::json!("p1");
        let snapshot: Snapshot = serde_json::from_value(json).unwrap();

        let err = InMemoryContentStore::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Store(StoreError::Integrity(_))));
    }

    #[test]
    fn load_reads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json()).unwrap();

        let store = InMemoryContentStore::load(file.path()).unwrap();
        assert_eq!(store.course_count(), 1);

        let missing = InMemoryContentStore::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(SnapshotError::Io(_))));
    }
}
