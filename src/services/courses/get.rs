use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use super::resolve::{ResolveOptions, resolve_course};
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::policy::{Operation, ensure_access};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    ensure_access(storage.as_ref(), &user, &course, Operation::ViewCourse).await?;

    let resolved = resolve_course(storage.as_ref(), course, ResolveOptions::FULL).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(resolved)))
}
