use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::materials::responses::MaterialResponse;
use crate::models::users::responses::TeacherSummary;
use crate::policy::{Operation, ensure_access};

pub async fn list_for_course(
    service: &MaterialService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    ensure_access(storage.as_ref(), &user, &course, Operation::ListMaterials).await?;

    // 资料的教师即课程的教师
    let teacher = storage
        .get_user_by_id(course.teacher_id)
        .await?
        .map(|u| TeacherSummary::from_user(&u, false))
        .unwrap_or_else(|| TeacherSummary::unknown(course.teacher_id));

    let materials: Vec<MaterialResponse> = storage
        .list_materials_by_course(course_id)
        .await?
        .into_iter()
        .map(|m| MaterialResponse::new(m, teacher.clone()))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::list(materials)))
}
