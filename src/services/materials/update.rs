use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::info;

use super::form::read_material_form;
use super::{MaterialService, discard_upload, teacher_summary};
use crate::errors::{LmsError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::materials::{
    entities::Material,
    requests::{MaterialForm, MaterialUpdate},
    responses::MaterialResponse,
};
use crate::models::users::entities::User;
use crate::policy::{Operation, ensure_access};
use crate::storage::Storage;

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    payload: web::Payload,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;
    let file_store = service.get_file_store(request)?;

    let form = read_material_form(request, payload, &file_store).await?;

    let (updated, previous) = match update_from_form(storage.as_ref(), &user, material_id, &form).await {
        Ok(result) => result,
        Err(e) => {
            discard_upload(&file_store, &form);
            return Err(e.into());
        }
    };

    // 旧文件被替换或内容不再是文件时删除旧文件
    if let Some(old) = previous.content.stored_file() {
        let still_used = updated
            .content
            .stored_file()
            .is_some_and(|current| current.url == old.url);
        if !still_used {
            file_store.remove(&old.url);
        }
    }

    info!("Material {} updated by {}", material_id, user.id);

    let teacher = teacher_summary(storage.as_ref(), &updated).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(MaterialResponse::new(updated, teacher))))
}

// 返回 (更新后的资料, 更新前的资料)
async fn update_from_form(
    storage: &dyn Storage,
    user: &User,
    material_id: i64,
    form: &MaterialForm,
) -> Result<(Material, Material)> {
    let material = storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Material not found"))?;

    ensure_access(storage, user, &material, Operation::UpdateMaterial).await?;

    let update = MaterialUpdate {
        title: form.title.clone(),
        description: form.description_update(),
        content: form.resolve_content_update(material.content.material_type())?,
    };

    let updated = storage
        .update_material(material_id, update)
        .await?
        .ok_or_else(|| LmsError::not_found("Material not found"))?;

    Ok((updated, material))
}
