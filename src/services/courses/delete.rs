use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::policy::{Operation, ensure_access};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;
    let file_store = service.get_file_store(request)?;

    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    ensure_access(storage.as_ref(), &user, &course, Operation::DeleteCourse).await?;

    let removed = storage
        .delete_course(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    // 记录删除后再清理文件
    for material in &removed {
        if let Some(file) = material.content.stored_file() {
            file_store.remove(&file.url);
        }
    }

    info!(
        "Course {} deleted by {} with {} materials",
        course_id,
        user.id,
        removed.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        serde_json::json!({}),
        "Course deleted successfully",
    )))
}
