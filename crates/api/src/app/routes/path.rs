//! Matching of course-scoped paths.
//!
//! Course and content ids may contain `/`, so these routes cannot be expressed
//! as ordinary path segments and are parsed from the wildcard remainder.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseRoute {
    Detail,
    Content,
    ContentDetail(String),
    GradedContent,
    GradingPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePath {
    pub course_id: String,
    pub route: CourseRoute,
}

const SEPARATORS: [char; 2] = ['/', '+'];

/// Parse `org{/|+}course{/|+}run[/remainder]`; `None` when nothing matches.
pub fn parse(path: &str) -> Option<CoursePath> {
    let path = path.trim_start_matches('/');

    let org_end = component_end(path, 0)?;
    let course_end = component_end(path, org_end + 1)?;
    let run_start = course_end + 1;
    let run_end = path[run_start..]
        .find(['/', '?'])
        .map_or(path.len(), |i| run_start + i);
    if run_end == run_start {
        return None;
    }

    let route = parse_route(&path[run_end..])?;
    Some(CoursePath {
        course_id: path[..run_end].to_string(),
        route,
    })
}

/// Index of the separator closing a non-empty component starting at `start`.
fn component_end(path: &str, start: usize) -> Option<usize> {
    let rest = path.get(start..)?;
    match rest.find(SEPARATORS) {
        Some(0) | None => None,
        Some(i) => Some(start + i),
    }
}

fn parse_route(rest: &str) -> Option<CourseRoute> {
    let rest = rest.trim_start_matches('/').trim_end_matches('/');
    let route = match rest {
        "" => CourseRoute::Detail,
        "content" => CourseRoute::Content,
        "graded_content" => CourseRoute::GradedContent,
        "grading_policy" => CourseRoute::GradingPolicy,
        _ => {
            let content_id = rest.strip_prefix("content/")?;
            if content_id.is_empty() {
                return None;
            }
            CourseRoute::ContentDetail(content_id.to_string())
        }
    };
    Some(route)
}
