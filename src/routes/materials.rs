use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;

// 懒加载的全局 MATERIAL_SERVICE 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// HTTP处理程序
pub async fn list_for_course(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_for_course(&req, course_id.into_inner())
        .await
}

pub async fn get_material(
    req: HttpRequest,
    material_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .get_material(&req, material_id.into_inner())
        .await
}

pub async fn create_material(req: HttpRequest, payload: web::Payload) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.create_material(&req, payload).await
}

pub async fn update_material(
    req: HttpRequest,
    material_id: web::Path<i64>,
    payload: web::Payload,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, material_id.into_inner(), payload)
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, material_id.into_inner())
        .await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                // multipart 上传或 JSON
                web::resource("").route(
                    web::post()
                        .to(create_material)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/course/{course_id}").route(web::get().to(list_for_course)),
            )
            .service(
                web::resource("/{material_id}")
                    .route(web::get().to(get_material))
                    .route(
                        web::put()
                            .to(update_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
