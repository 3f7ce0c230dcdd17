//! Content serialization and depth-limited tree walking.

use courseware_core::{ContentNode, Course, CourseKey};
use courseware_infra::{ContentStore, StoreError};

use crate::app::dto::{CourseData, CourseFields, GradedContent, ProblemSummary, SerializedContent};
use crate::context::RequestContext;

/// What is being serialized.
///
/// Course roots are identified and addressed by their course key; every other
/// block by its own location, addressed through the owning course key.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Course(&'a Course),
    Block {
        course_key: &'a CourseKey,
        node: &'a ContentNode,
    },
}

impl<'a> Subject<'a> {
    pub fn node(&self) -> &'a ContentNode {
        match *self {
            Self::Course(course) => &course.root,
            Self::Block { node, .. } => node,
        }
    }

    pub fn course_key(&self) -> &'a CourseKey {
        match *self {
            Self::Course(course) => &course.id,
            Self::Block { course_key, .. } => course_key,
        }
    }
}

pub struct TreeWalker<'a> {
    store: &'a dyn ContentStore,
    ctx: &'a RequestContext,
}

impl<'a> TreeWalker<'a> {
    pub fn new(store: &'a dyn ContentStore, ctx: &'a RequestContext) -> Self {
        Self { store, ctx }
    }

    /// Serialize a single node, without children.
    pub fn serialize(&self, subject: Subject<'_>) -> SerializedContent {
        let node = subject.node();
        let (id, uri, course_fields) = match subject {
            Subject::Course(course) => (
                course.id.to_string(),
                self.ctx.course_uri(&course.id),
                Some(CourseFields {
                    course: course.id.course().to_string(),
                    org: course.id.org().to_string(),
                    run: course.id.run().to_string(),
                }),
            ),
            Subject::Block { course_key, node } => (
                node.location.to_string(),
                self.ctx.content_uri(course_key, &node.location),
                None,
            ),
        };

        SerializedContent {
            id,
            uri,
            category: node.category().to_string(),
            name: node.display_name.clone(),
            due: node.due,
            start: node.start,
            end: node.end,
            course_fields,
            children: None,
        }
    }

    /// Serialize `subject` and its descendants down to `depth` further levels.
    ///
    /// Depth 0 emits no `children` key; a leaf walked with depth > 0 gets an
    /// empty list.
    pub fn walk(&self, subject: Subject<'_>, depth: u32) -> Result<SerializedContent, StoreError> {
        let mut data = self.serialize(subject);
        if depth > 0 {
            let course_key = subject.course_key();
            let children = self.store.get_children(subject.node())?;
            let walked = children
                .iter()
                .map(|node| self.walk(Subject::Block { course_key, node }, depth - 1))
                .collect::<Result<Vec<_>, _>>()?;
            data.children = Some(walked);
        }
        Ok(data)
    }

    /// Course representation: subtree under `content`, plus `image_url`.
    pub fn course_data(&self, course: &Course, depth: u32) -> Result<CourseData, StoreError> {
        let mut summary = self.walk(Subject::Course(course), depth)?;
        let content = summary.children.take();
        let image_url = course
            .course_image
            .as_deref()
            .filter(|image| !image.is_empty())
            .map(|image| course.id.asset_url(image))
            .unwrap_or_default();

        Ok(CourseData {
            summary,
            content,
            image_url,
        })
    }

    /// Graded item with the problems found anywhere beneath it.
    pub fn graded_content(&self, item: &ContentNode) -> Result<GradedContent, StoreError> {
        let problems = filter_problems(self.store, item)?;
        Ok(GradedContent {
            id: item.location.to_string(),
            name: item.display_name.clone(),
            format: item.format.clone(),
            problems: problems.iter().map(ProblemSummary::from).collect(),
        })
    }
}

/// Problems in `node`'s subtree, in tree order.
///
/// A problem is returned as-is; its own children are not searched.
pub fn filter_problems(store: &dyn ContentStore, node: &ContentNode) -> Result<Vec<ContentNode>, StoreError> {
    if node.is_problem() {
        return Ok(vec![node.clone()]);
    }
    if !node.has_children() {
        return Ok(Vec::new());
    }

    let mut problems = Vec::new();
    for child in store.get_children(node)? {
        problems.extend(filter_problems(store, &child)?);
    }
    Ok(problems)
}
