use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::{IntoResponse, Response},
    Json,
};

use crate::app::dto::CourseListQuery;
use crate::app::errors::ApiError;
use crate::app::pagination::{self, Page, PageRequest};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub async fn list_courses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<CourseListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let mut courses = services.courses(query.course_id.as_deref())?;
    courses.sort_by_cached_key(|course| course.id.to_string());

    let req = PageRequest::from_query(
        query.page.as_deref(),
        query.page_size.as_deref(),
        services.limits(),
    )?;
    let list_uri = ctx.list_uri();
    let page = pagination::paginate(courses, &req, |n| {
        pagination::page_link(
            &list_uri,
            n,
            &[
                ("course_id", query.course_id.as_deref()),
                ("page_size", query.page_size.as_deref()),
            ],
        )
    })?;

    let walker = services.walker(&ctx);
    let results = page
        .results
        .iter()
        .map(|course| walker.course_data(course, 0))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = page.count, returned = results.len(), "listed courses");

    Ok(Json(Page {
        count: page.count,
        num_pages: page.num_pages,
        next: page.next,
        previous: page.previous,
        results,
    })
    .into_response())
}

pub fn course_detail(
    services: &AppServices,
    ctx: &RequestContext,
    course_id: &str,
    depth: Option<&str>,
) -> Result<Response, ApiError> {
    let depth = services.parse_depth(depth, 0)?;
    let course = services.course_or_404(course_id)?;

    let data = services.walker(ctx).course_data(&course, depth)?;
    Ok(Json(data).into_response())
}
