use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    response::Response,
    routing::get,
    Router,
};

use crate::app::dto::DepthQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub mod content;
pub mod courses;
pub mod grading;
pub mod path;
pub mod system;

use path::CourseRoute;

/// Router for all API-key protected endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(courses::list_courses))
        .route("/*path", get(course_scoped))
}

/// Dispatch `/{course_id}/...` once the course id has been split off.
pub async fn course_scoped(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<DepthQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Path(path) = path?;
    let Query(query) = query?;

    let Some(matched) = path::parse(&path) else {
        return Err(ApiError::not_found(format!("no route for /{path}")));
    };

    let depth = query.depth.as_deref();
    let course_id = matched.course_id.as_str();
    match matched.route {
        CourseRoute::Detail => courses::course_detail(&services, &ctx, course_id, depth),
        CourseRoute::Content => content::content_list(&services, &ctx, course_id, depth),
        CourseRoute::ContentDetail(content_id) => {
            content::content_detail(&services, &ctx, course_id, &content_id, depth)
        }
        CourseRoute::GradedContent => grading::graded_content(&services, &ctx, course_id),
        CourseRoute::GradingPolicy => grading::grading_policy(&services, course_id),
    }
}
