use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, teacher_summary};
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::materials::responses::MaterialResponse;
use crate::policy::{Operation, ensure_access};

pub async fn get_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;

    let material = storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Material not found"))?;

    ensure_access(storage.as_ref(), &user, &material, Operation::ViewMaterial).await?;

    let teacher = teacher_summary(storage.as_ref(), &material).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(MaterialResponse::new(material, teacher))))
}
