use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use courseware_core::{ContentNode, Course, CourseKey, Entity, UsageKey};

use super::r#trait::{ContentStore, StoreError};

/// In-memory content store.
///
/// Intended for tests/dev. Every inserted course is validated to be a proper
/// tree, so readers can walk it without cycle checks.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    courses: RwLock<BTreeMap<CourseKey, Course>>,
    items: RwLock<HashMap<UsageKey, ContentNode>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a course together with all of its non-root blocks.
    pub fn insert_course(&self, course: Course, blocks: Vec<ContentNode>) -> Result<(), StoreError> {
        validate_tree(&course, &blocks)?;
        let block_count = blocks.len();

        let mut courses = self.courses.write().map_err(|_| poisoned())?;
        let mut items = self.items.write().map_err(|_| poisoned())?;

        items.retain(|location, _| location.course_key() != &course.id);
        items.insert(course.root.location.clone(), course.root.clone());
        for block in blocks {
            items.insert(block.id().clone(), block);
        }

        tracing::debug!(course_id = %course.id, blocks = block_count, "course loaded");
        courses.insert(course.id.clone(), course);
        Ok(())
    }

    pub fn course_count(&self) -> usize {
        self.courses.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl ContentStore for InMemoryContentStore {
    fn get_course(&self, key: &CourseKey) -> Result<Option<Course>, StoreError> {
        let courses = self.courses.read().map_err(|_| poisoned())?;
        Ok(courses.get(key).cloned())
    }

    fn get_courses(&self) -> Result<Vec<Course>, StoreError> {
        let courses = self.courses.read().map_err(|_| poisoned())?;
        Ok(courses.values().cloned().collect())
    }

    fn get_item(&self, location: &UsageKey) -> Result<Option<ContentNode>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(location).cloned())
    }

    fn get_graded_items(&self, course: &CourseKey) -> Result<Vec<ContentNode>, StoreError> {
        let courses = self.courses.read().map_err(|_| poisoned())?;
        let items = self.items.read().map_err(|_| poisoned())?;
        let Some(root) = courses
            .get(course)
            .and_then(|course| items.get(&course.root.location))
        else {
            return Ok(Vec::new());
        };

        let mut graded = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.graded {
                graded.push(node.clone());
            }
            for child in node.children.iter().rev() {
                let child = items.get(child).ok_or_else(|| {
                    StoreError::Integrity(format!("{} references missing child {child}", node.location))
                })?;
                stack.push(child);
            }
        }
        Ok(graded)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

/// Check that `course.root` plus `blocks` form a single tree.
///
/// Every block belongs to the course, is referenced by exactly one parent and
/// is reachable from the root.
fn validate_tree(course: &Course, blocks: &[ContentNode]) -> Result<(), StoreError> {
    let root = &course.root.location;
    if root != &course.id.root_usage_key() {
        return Err(StoreError::Integrity(format!(
            "course {} has root {root}",
            course.id
        )));
    }

    let mut by_location: HashMap<&UsageKey, &ContentNode> = HashMap::new();
    by_location.insert(root, &course.root);
    for block in blocks {
        if block.location.course_key() != &course.id {
            return Err(StoreError::Integrity(format!(
                "{} does not belong to course {}",
                block.location, course.id
            )));
        }
        if by_location.insert(&block.location, block).is_some() {
            return Err(StoreError::Integrity(format!("duplicate block {}", block.location)));
        }
    }

    let mut seen: HashSet<&UsageKey> = HashSet::from([root]);
    let mut stack = vec![&course.root];
    while let Some(node) = stack.pop() {
        for child in &node.children {
            let Some(child_node) = by_location.get(child) else {
                return Err(StoreError::Integrity(format!(
                    "{} references missing child {child}",
                    node.location
                )));
            };
            if !seen.insert(child) {
                return Err(StoreError::Integrity(format!(
                    "{child} has more than one parent"
                )));
            }
            stack.push(*child_node);
        }
    }

    if seen.len() != by_location.len() {
        return Err(StoreError::Integrity(format!(
            "course {} has {} blocks unreachable from its root",
            course.id,
            by_location.len() - seen.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_key() -> CourseKey {
        "course-v1:edX+DemoX+2014".parse().unwrap()
    }

    fn block(category: &str, id: &str, children: &[&ContentNode]) -> ContentNode {
        let mut node = ContentNode::new(course_key().make_usage_key(category, id).unwrap());
        node.children = children.iter().map(|c| c.location.clone()).collect();
        node
    }

    /// course -> chapter -> (graded sequential -> problem, html)
    fn sample() -> (Course, Vec<ContentNode>) {
        let problem = block("problem", "p1", &[]);
        let html = block("html", "h1", &[]);
        let mut seq = block("sequential", "s1", &[&problem]);
        seq.graded = true;
        seq.format = Some("Homework".to_string());
        let chapter = block("chapter", "c1", &[&seq, &html]);

        let mut course = Course::new(course_key());
        course.root.children = vec![chapter.location.clone()];
        (course, vec![chapter, seq, problem, html])
    }

    #[test]
    fn insert_and_read_back() {
        let store = InMemoryContentStore::new();
        let (course, blocks) = sample();
        store.insert_course(course.clone(), blocks).unwrap();

        let slashed: CourseKey = "edX/DemoX/2014".parse().unwrap();
        let found = store.get_course(&slashed).unwrap().unwrap();
        assert_eq!(found.id.to_string(), "course-v1:edX+DemoX+2014");

        let root = store.get_item(&course.id.root_usage_key()).unwrap().unwrap();
        let chapters = store.get_children(&root).unwrap();
        assert_eq!(chapters.len(), 1);
        let units = store.get_children(&chapters[0]).unwrap();
        let ids: Vec<_> = units.iter().map(|n| n.location.block_id().to_string()).collect();
        assert_eq!(ids, vec!["s1", "h1"]);
    }

    #[test]
    fn graded_items_in_tree_order() {
        let store = InMemoryContentStore::new();
        let (course, blocks) = sample();
        store.insert_course(course.clone(), blocks).unwrap();

        let graded = store.get_graded_items(&course.id).unwrap();
        assert_eq!(graded.len(), 1);
        assert_eq!(graded[0].location.block_id(), "s1");

        let other: CourseKey = "course-v1:edX+Other+2014".parse().unwrap();
        assert!(store.get_graded_items(&other).unwrap().is_empty());
    }

    #[test]
    fn rejects_dangling_children() {
        let store = InMemoryContentStore::new();
        let (course, mut blocks) = sample();
        blocks.retain(|b| b.location.block_id() != "p1");

        let err = store.insert_course(course, blocks).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
        assert_eq!(store.course_count(), 0);
    }

    #[test]
    fn rejects_shared_and_unreachable_blocks() {
        let store = InMemoryContentStore::new();

        let (mut course, blocks) = sample();
        course.root.children.push(blocks[0].location.clone());
        assert!(store.insert_course(course, blocks).is_err());

        let (course, mut blocks) = sample();
        blocks.push(block("html", "orphan", &[]));
        assert!(store.insert_course(course, blocks).is_err());
    }

    #[test]
    fn replacing_a_course_drops_its_old_blocks() {
        let store = InMemoryContentStore::new();
        let (course, blocks) = sample();
        store.insert_course(course.clone(), blocks).unwrap();

        store.insert_course(Course::new(course_key()), Vec::new()).unwrap();
        let gone = course_key().make_usage_key("chapter", "c1").unwrap();
        assert!(store.get_item(&gone).unwrap().is_none());
        assert_eq!(store.course_count(), 1);
    }
}
