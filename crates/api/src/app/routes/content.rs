use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::app::tree::Subject;
use crate::context::RequestContext;

/// Direct children of the course root, each walked one level shallower than
/// requested.
pub fn content_list(
    services: &AppServices,
    ctx: &RequestContext,
    course_id: &str,
    depth: Option<&str>,
) -> Result<Response, ApiError> {
    let depth = services.parse_depth(depth, 1)?;
    let course = services.course_or_404(course_id)?;

    let walker = services.walker(ctx);
    let children = services.store().get_children(&course.root)?;
    let content = children
        .iter()
        .map(|node| {
            walker.walk(
                Subject::Block {
                    course_key: &course.id,
                    node,
                },
                depth.saturating_sub(1),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(content).into_response())
}

pub fn content_detail(
    services: &AppServices,
    ctx: &RequestContext,
    course_id: &str,
    content_id: &str,
    depth: Option<&str>,
) -> Result<Response, ApiError> {
    let depth = services.parse_depth(depth, 0)?;
    let course = services.course_or_404(course_id)?;
    let child = services.course_child_or_404(&course, content_id)?;

    let data = services.walker(ctx).walk(child.subject(&course), depth)?;
    Ok(Json(data).into_response())
}
