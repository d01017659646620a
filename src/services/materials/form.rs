//! 读取资料表单
//!
//! `multipart/form-data` 时流式保存 `file` 字段并读取文本字段，其余情况按 JSON 解析。

use actix_multipart::{Field, Multipart};
use actix_web::{
    HttpRequest,
    http::header::CONTENT_TYPE,
    web::{self, BytesMut},
};
use futures_util::{StreamExt, TryStreamExt};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::{LmsError, Result};
use crate::models::materials::{
    entities::{MaterialType, StoredFile},
    requests::MaterialForm,
};
use crate::storage::FileStore;
use crate::utils::mime::mime_from_path;

// 单个文本字段的最大字节数
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;
// JSON 请求体的最大字节数
const MAX_JSON_SIZE: usize = 256 * 1024;

fn invalid_multipart(err: impl std::fmt::Display) -> LmsError {
    LmsError::validation(format!("Invalid multipart payload: {err}"))
}

pub async fn read_material_form(
    request: &HttpRequest,
    payload: web::Payload,
    file_store: &FileStore,
) -> Result<MaterialForm> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

    let form = if is_multipart {
        let mut saved = None;
        let multipart = Multipart::new(request.headers(), payload);
        match read_multipart(multipart, file_store, &mut saved).await {
            Ok(form) => form,
            Err(e) => {
                if let Some(file) = saved {
                    file_store.remove(&file.url);
                }
                return Err(e);
            }
        }
    } else {
        read_json(payload).await?
    };

    Ok(form.normalize())
}

async fn read_multipart(
    mut multipart: Multipart,
    file_store: &FileStore,
    saved: &mut Option<StoredFile>,
) -> Result<MaterialForm> {
    let mut form = MaterialForm::default();

    while let Some(mut field) = multipart.try_next().await.map_err(invalid_multipart)? {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "file" => {
                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // 浏览器在未选择文件时也会发送空的 file 字段
                if original_name.is_empty() {
                    drain(&mut field).await?;
                    continue;
                }
                if saved.is_some() {
                    return Err(LmsError::validation(
                        "Only one file can be uploaded at a time",
                    ));
                }

                *saved = Some(save_file(&mut field, file_store, original_name).await?);
            }
            "title" => form.title = Some(read_text(&mut field).await?),
            "description" => form.description = Some(read_text(&mut field).await?),
            "linkUrl" => form.link_url = Some(read_text(&mut field).await?),
            "courseId" => {
                let value = read_text(&mut field).await?;
                let value = value.trim();
                if !value.is_empty() {
                    form.course_id = Some(
                        value
                            .parse::<i64>()
                            .map_err(|_| LmsError::validation(format!("Invalid course id: '{value}'")))?,
                    );
                }
            }
            "materialType" => {
                let value = read_text(&mut field).await?;
                let value = value.trim();
                if !value.is_empty() {
                    form.material_type =
                        Some(value.parse::<MaterialType>().map_err(LmsError::validation)?);
                }
            }
            _ => drain(&mut field).await?,
        }
    }

    form.file = saved.clone();
    Ok(form)
}

// 流式写入磁盘，超过大小限制或写入失败时删除半成品
async fn save_file(
    field: &mut Field,
    file_store: &FileStore,
    original_name: String,
) -> Result<StoredFile> {
    file_store.ensure_dirs()?;

    let mime = field
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| mime_from_path(&original_name).to_string());

    let stored_name = FileStore::generate_name(&original_name);
    let path = file_store.materials_dir().join(&stored_name);

    if let Err(e) = write_field(field, &path, file_store.max_size()).await {
        let _ = fs::remove_file(&path);
        return Err(e);
    }

    tracing::debug!("Saved upload {} as {}", original_name, stored_name);

    Ok(StoredFile {
        url: FileStore::public_url(&stored_name),
        name: original_name,
        mime,
    })
}

async fn write_field(field: &mut Field, path: &Path, max_size: usize) -> Result<()> {
    let mut f = File::create(path)
        .map_err(|e| LmsError::file_operation(format!("文件创建失败: {e}")))?;

    let mut total_size: usize = 0;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(invalid_multipart)?;
        total_size += data.len();
        // 校验大小
        if total_size > max_size {
            return Err(LmsError::validation(format!(
                "File size exceeds the limit of {max_size} bytes"
            )));
        }
        f.write_all(&data)?;
    }
    Ok(())
}

async fn read_text(field: &mut Field) -> Result<String> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(invalid_multipart)?;
        if buf.len() + data.len() > MAX_TEXT_FIELD_SIZE {
            return Err(LmsError::validation("Form field is too large"));
        }
        buf.extend_from_slice(&data);
    }
    String::from_utf8(buf.to_vec())
        .map_err(|_| LmsError::validation("Form field must be valid UTF-8"))
}

async fn drain(field: &mut Field) -> Result<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(invalid_multipart)?;
    }
    Ok(())
}

async fn read_json(mut payload: web::Payload) -> Result<MaterialForm> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk =
            chunk.map_err(|e| LmsError::validation(format!("Invalid request body: {e}")))?;
        if body.len() + chunk.len() > MAX_JSON_SIZE {
            return Err(LmsError::validation("Request body is too large"));
        }
        body.extend_from_slice(&chunk);
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MaterialForm::default());
    }

    serde_json::from_slice(&body)
        .map_err(|e| LmsError::validation(format!("Invalid JSON payload: {e}")))
}
