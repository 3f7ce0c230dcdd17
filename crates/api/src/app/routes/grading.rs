use axum::{
    response::{IntoResponse, Response},
    Json,
};

use courseware_core::GradingPolicyEntry;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn graded_content(
    services: &AppServices,
    ctx: &RequestContext,
    course_id: &str,
) -> Result<Response, ApiError> {
    let course = services.course_or_404(course_id)?;

    let walker = services.walker(ctx);
    let graded = services
        .store()
        .get_graded_items(&course.id)?
        .iter()
        .map(|item| walker.graded_content(item))
        .collect::<Result<Vec<_>, _>>()?;

    if graded.is_empty() {
        return Err(ApiError::not_found_with(
            "no_graded_content",
            format!("course '{course_id}' has no graded content"),
        ));
    }
    Ok(Json(graded).into_response())
}

pub fn grading_policy(services: &AppServices, course_id: &str) -> Result<Response, ApiError> {
    let course = services.course_or_404(course_id)?;

    let policy: Vec<GradingPolicyEntry> = course
        .grading_policy
        .iter()
        .map(GradingPolicyEntry::from)
        .collect();

    if policy.is_empty() {
        return Err(ApiError::not_found_with(
            "no_grading_policy",
            format!("course '{course_id}' has no grading policy"),
        ));
    }
    Ok(Json(policy).into_response())
}
