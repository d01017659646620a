use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::resolve::{ResolveOptions, resolve_course};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::courses::requests::CreateCourseRequest;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;

    let new_course = course_data.validate()?;
    let course = storage.create_course(user.id, new_course).await?;

    info!("Course {} ({}) created by {}", course.code, course.id, user.id);

    let resolved = resolve_course(storage.as_ref(), course, ResolveOptions::MEMBERS).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(resolved)))
}
