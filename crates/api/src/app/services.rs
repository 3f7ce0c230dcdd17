//! Course lookup on top of the content store.

use std::sync::Arc;

use courseware_core::{ContentNode, Course, CourseKey, KeyFormat, UsageKey};
use courseware_infra::{AppConfig, ContentStore};

use crate::app::errors::ApiError;
use crate::app::tree::{Subject, TreeWalker};
use crate::context::RequestContext;

/// Request-independent limits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Limits {
    pub max_depth: u32,
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for Limits {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            page_size: config.page_size,
            max_page_size: config.max_page_size,
        }
    }
}

/// Content resolved inside a course.
#[derive(Debug, Clone)]
pub enum CourseChild {
    /// The id addressed the course root itself.
    Root,
    Block(ContentNode),
}

impl CourseChild {
    pub fn subject<'a>(&'a self, course: &'a Course) -> Subject<'a> {
        match self {
            Self::Root => Subject::Course(course),
            Self::Block(node) => Subject::Block {
                course_key: &course.id,
                node,
            },
        }
    }
}

pub struct AppServices {
    store: Arc<dyn ContentStore>,
    limits: Limits,
}

impl AppServices {
    pub fn new(store: Arc<dyn ContentStore>, limits: Limits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn walker<'a>(&'a self, ctx: &'a RequestContext) -> TreeWalker<'a> {
        TreeWalker::new(self.store(), ctx)
    }

    /// Parse the `depth` query parameter, clamped to the configured maximum.
    pub fn parse_depth(&self, raw: Option<&str>, default: u32) -> Result<u32, ApiError> {
        let Some(raw) = raw else {
            return Ok(default.min(self.limits.max_depth));
        };

        let depth: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ApiError::bad_request("invalid_depth", format!("depth '{raw}' is not an integer")))?;
        if depth < 0 {
            return Err(ApiError::bad_request("invalid_depth", "depth must not be negative"));
        }

        Ok(u32::try_from(depth)
            .unwrap_or(u32::MAX)
            .min(self.limits.max_depth))
    }

    pub fn course_or_404(&self, course_id: &str) -> Result<Course, ApiError> {
        let key: CourseKey = course_id
            .parse()
            .map_err(|_| ApiError::not_found(format!("course '{course_id}' not found")))?;

        self.store
            .get_course(&key)?
            .ok_or_else(|| ApiError::not_found(format!("course '{course_id}' not found")))
    }

    /// Resolve `content_id` inside `course`.
    pub fn course_child_or_404(&self, course: &Course, content_id: &str) -> Result<CourseChild, ApiError> {
        let not_found = || ApiError::not_found(format!("content '{content_id}' not found"));

        let location = UsageKey::parse_in_course(content_id, &course.id).map_err(|_| not_found())?;
        if is_course_root(&location, course) {
            return Ok(CourseChild::Root);
        }

        self.store
            .get_item(&location)?
            .map(CourseChild::Block)
            .ok_or_else(not_found)
    }

    /// Courses named by a comma-separated filter, or every course.
    ///
    /// Ids that parse but are unknown are skipped.
    pub fn courses(&self, filter: Option<&str>) -> Result<Vec<Course>, ApiError> {
        let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) else {
            return Ok(self.store.get_courses()?);
        };

        let keys = filter
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<CourseKey>()
                    .map_err(|e| ApiError::bad_request("invalid_course_id", e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut courses = Vec::with_capacity(keys.len());
        for key in keys {
            match self.store.get_course(&key)? {
                Some(course) => courses.push(course),
                None => tracing::debug!(course_id = %key, "requested course not found; skipping"),
            }
        }
        Ok(courses)
    }
}

/// The root's block id differs between key formats, so match either.
fn is_course_root(location: &UsageKey, course: &Course) -> bool {
    location == &course.root.location
        || [KeyFormat::Slashed, KeyFormat::V1]
            .iter()
            .any(|format| location == &course.id.with_format(*format).root_usage_key())
}
