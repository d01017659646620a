use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::policy::{Operation, ensure_access};

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;
    let file_store = service.get_file_store(request)?;

    let material = storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Material not found"))?;

    ensure_access(storage.as_ref(), &user, &material, Operation::DeleteMaterial).await?;

    if !storage.delete_material(material_id).await? {
        return Err(LmsError::not_found("Material not found").into());
    }

    // 记录删除后再清理文件
    if let Some(file) = material.content.stored_file() {
        file_store.remove(&file.url);
    }

    info!("Material {} deleted by {}", material_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        serde_json::json!({}),
        "Material deleted successfully",
    )))
}
