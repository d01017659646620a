pub mod serve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::errors::Result;
use crate::storage::FileStore;

pub struct UploadService;

impl UploadService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_file_store(&self, request: &HttpRequest) -> Result<web::Data<FileStore>> {
        super::file_store_from(request)
    }

    // 公开访问已上传的资料文件
    pub async fn serve_material(
        &self,
        request: &HttpRequest,
        file_name: String,
    ) -> ActixResult<HttpResponse> {
        serve::serve_material(self, request, file_name).await
    }
}
