use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::resolve::{ResolveOptions, resolve_course};
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;

pub async fn enroll(
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

    // 唯一索引保证并发选课只成功一次
    if !storage.enroll_student(course.id, user.id).await? {
        return Err(LmsError::already_enrolled("Already enrolled in this course").into());
    }

    info!("Student {} enrolled in course {}", user.id, course.id);

    let resolved = resolve_course(storage.as_ref(), course, ResolveOptions::MEMBERS).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        resolved,
        "Successfully enrolled in course",
    )))
}
