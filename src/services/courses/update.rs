use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::resolve::{ResolveOptions, resolve_course};
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::policy::{Operation, ensure_access};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    ensure_access(storage.as_ref(), &user, &course, Operation::UpdateCourse).await?;

    let update = update_data.validate()?;
    let updated = storage
        .update_course(course_id, update)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    info!("Course {} updated by {}", course_id, user.id);

    let resolved = resolve_course(storage.as_ref(), updated, ResolveOptions::MEMBERS).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(resolved)))
}
