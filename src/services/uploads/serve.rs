use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::io::ErrorKind;

use super::UploadService;
use crate::errors::LmsError;
use crate::utils::mime::{is_active_content, mime_from_path, served_content_type};

pub async fn serve_material(
    service: &UploadService,
    request: &HttpRequest,
    file_name: String,
) -> ActixResult<HttpResponse> {
    let file_store = service.get_file_store(request)?;

    let path = file_store
        .resolve_name(&file_name)
        .ok_or_else(|| LmsError::not_found("File not found"))?;

    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LmsError::not_found("File not found").into());
        }
        Err(e) => {
            return Err(LmsError::file_operation(format!("File read failed: {e}")).into());
        }
    };

    let mut response = HttpResponse::Ok();
    response
        .insert_header((header::CONTENT_TYPE, served_content_type(&file_name)))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"));
    if is_active_content(mime_from_path(&file_name)) {
        response.insert_header((header::CONTENT_DISPOSITION, "attachment"));
    }

    Ok(response.body(data))
}
