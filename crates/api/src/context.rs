use courseware_core::{CourseKey, UsageKey};

/// Per-request context used to build absolute URIs.
///
/// Inserted by `middleware::request_context_middleware`; `base_url` is scheme,
/// host and mount prefix without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// URI of the course list.
    pub fn list_uri(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// URI of the course-detail route.
    pub fn course_uri(&self, course_key: &CourseKey) -> String {
        format!("{}/{course_key}/", self.base_url)
    }

    /// URI of the content-detail route.
    ///
    /// Always addressed through the course key, never through the course
    /// part of the content location.
    pub fn content_uri(&self, course_key: &CourseKey, content: &UsageKey) -> String {
        format!("{}/{course_key}/content/{content}/", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use courseware_core::KeyFormat;

    use super::*;

    #[test]
    fn builds_uris_from_course_key() {
        let ctx = RequestContext::new("http://lms.test/api/v0/");
        let course: CourseKey = "course-v1:edX+DemoX+2014".parse().unwrap();
        let slashed_location = course
            .with_format(KeyFormat::Slashed)
            .make_usage_key("chapter", "week1")
            .unwrap();

        assert_eq!(ctx.list_uri(), "http://lms.test/api/v0/");
        assert_eq!(
            ctx.course_uri(&course),
            "http://lms.test/api/v0/course-v1:edX+DemoX+2014/"
        );
        assert_eq!(
            ctx.content_uri(&course, &slashed_location),
            "http://lms.test/api/v0/course-v1:edX+DemoX+2014/content/i4x://edX/DemoX/chapter/week1/"
        );
    }
}
