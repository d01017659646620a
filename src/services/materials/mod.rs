pub mod create;
pub mod delete;
pub mod form;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::materials::{entities::Material, requests::MaterialForm};
use crate::models::users::responses::TeacherSummary;
use crate::storage::{FileStore, Storage};

pub struct MaterialService;

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        super::storage_from(request)
    }

    pub(crate) fn get_file_store(&self, request: &HttpRequest) -> Result<web::Data<FileStore>> {
        super::file_store_from(request)
    }

    // 课程下的资料列表，最新的在前
    pub async fn list_for_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_for_course(self, request, course_id).await
    }

    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_material(self, request, material_id).await
    }

    // 创建资料，支持 multipart 上传或 JSON
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        payload: web::Payload,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, payload).await
    }

    pub async fn update_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
        payload: web::Payload,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, request, material_id, payload).await
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, material_id).await
    }
}

// 查询资料所属教师的展示信息
pub(crate) async fn teacher_summary(storage: &dyn Storage, material: &Material) -> Result<TeacherSummary> {
    Ok(storage
        .get_user_by_id(material.teacher_id)
        .await?
        .map(|u| TeacherSummary::from_user(&u, false))
        .unwrap_or_else(|| TeacherSummary::unknown(material.teacher_id)))
}

// 请求失败时丢弃本次上传的文件
pub(crate) fn discard_upload(file_store: &FileStore, form: &MaterialForm) {
    if let Some(file) = &form.file {
        file_store.remove(&file.url);
    }
}
