use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::UploadService;

static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn serve_material(
    req: HttpRequest,
    file_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .serve_material(&req, file_name.into_inner())
        .await
}

// 配置路由，上传文件公开访问
pub fn configure_uploads_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/uploads/materials").route("/{file_name}", web::get().to(serve_material)),
    );
}
