use std::sync::Arc;

use thiserror::Error;

use courseware_core::{ContentNode, Course, CourseKey, UsageKey};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("content store unavailable: {0}")]
    Unavailable(String),

    /// The stored tree is inconsistent (dangling child, shared node, ...).
    #[error("content store integrity violation: {0}")]
    Integrity(String),
}

/// Read access to course content.
///
/// Implementations must be safe to share across request handlers.
pub trait ContentStore: Send + Sync {
    fn get_course(&self, key: &CourseKey) -> Result<Option<Course>, StoreError>;

    fn get_courses(&self) -> Result<Vec<Course>, StoreError>;

    /// Look up any block, course roots included.
    fn get_item(&self, location: &UsageKey) -> Result<Option<ContentNode>, StoreError>;

    /// Blocks of `course` flagged as graded, in course-tree pre-order.
    fn get_graded_items(&self, course: &CourseKey) -> Result<Vec<ContentNode>, StoreError>;

    /// Resolve the children of `node`, in order.
    fn get_children(&self, node: &ContentNode) -> Result<Vec<ContentNode>, StoreError> {
        node.children
            .iter()
            .map(|location| {
                self.get_item(location)?.ok_or_else(|| {
                    StoreError::Integrity(format!(
                        "{} references missing child {location}",
                        node.location
                    ))
                })
            })
            .collect()
    }
}

impl<S> ContentStore for Arc<S>
where
    S: ContentStore + ?Sized,
{
    fn get_course(&self, key: &CourseKey) -> Result<Option<Course>, StoreError> {
        (**self).get_course(key)
    }

    fn get_courses(&self) -> Result<Vec<Course>, StoreError> {
        (**self).get_courses()
    }

    fn get_item(&self, location: &UsageKey) -> Result<Option<ContentNode>, StoreError> {
        (**self).get_item(location)
    }

    fn get_graded_items(&self, course: &CourseKey) -> Result<Vec<ContentNode>, StoreError> {
        (**self).get_graded_items(course)
    }

    fn get_children(&self, node: &ContentNode) -> Result<Vec<ContentNode>, StoreError> {
        (**self).get_children(node)
    }
}
