use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::info;

use super::form::read_material_form;
use super::{MaterialService, discard_upload};
use crate::errors::{LmsError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::materials::{
    entities::Material,
    requests::{MaterialForm, NewMaterial},
    responses::MaterialResponse,
};
use crate::models::users::{entities::User, responses::TeacherSummary};
use crate::policy::{Operation, ensure_access};
use crate::storage::Storage;

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    payload: web::Payload,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;
    let storage = service.get_storage(request)?;
    let file_store = service.get_file_store(request)?;

    let form = read_material_form(request, payload, &file_store).await?;

    match create_from_form(storage.as_ref(), &user, &form).await {
        Ok(material) => {
            info!(
                "Material {} ({}) created in course {} by {}",
                material.id,
                material.content.material_type(),
                material.course_id,
                user.id
            );
            let teacher = TeacherSummary::from_user(&user, false);
            Ok(HttpResponse::Created().json(ApiResponse::ok(MaterialResponse::new(material, teacher))))
        }
        Err(e) => {
            discard_upload(&file_store, &form);
            Err(e.into())
        }
    }
}

async fn create_from_form(
    storage: &dyn Storage,
    user: &User,
    form: &MaterialForm,
) -> Result<Material> {
    let (Some(title), Some(course_id)) = (form.title.clone(), form.course_id) else {
        return Err(LmsError::validation("Please provide a title and courseId"));
    };

    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    ensure_access(storage, user, &course, Operation::CreateMaterial).await?;

    let content = form.resolve_content()?;

    storage
        .create_material(NewMaterial {
            course_id,
            teacher_id: course.teacher_id,
            title,
            description: form.new_description(),
            content,
        })
        .await
}
