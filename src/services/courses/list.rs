use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use super::resolve::{ResolveOptions, resolve_courses};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::courses::requests::CourseListQuery;
use crate::models::users::entities::UserRole;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;

    let query = match user.role {
        UserRole::Teacher => CourseListQuery {
            teacher_id: Some(user.id),
            ..Default::default()
        },
        UserRole::Student => CourseListQuery {
            student_id: Some(user.id),
            ..Default::default()
        },
    };

    let courses = storage.list_courses(query).await?;
    let resolved = resolve_courses(storage.as_ref(), courses, ResolveOptions::MEMBERS).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(resolved)))
}

pub async fn list_available(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let courses = storage.list_courses(CourseListQuery::default()).await?;
    let resolved = resolve_courses(storage.as_ref(), courses, ResolveOptions::CATALOG).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(resolved)))
}
