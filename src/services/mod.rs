pub mod auth;
pub mod courses;
pub mod materials;
pub mod system;
pub mod uploads;

pub use auth::AuthService;
pub use courses::CourseService;
pub use materials::MaterialService;
pub use system::SystemService;
pub use uploads::UploadService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use crate::storage::{FileStore, Storage};

// 从应用数据中取出存储
pub(crate) fn storage_from(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| LmsError::database_connection("Storage not found in app data"))
}

// 从应用数据中取出配置
pub(crate) fn config_from(request: &HttpRequest) -> Result<web::Data<AppConfig>> {
    request
        .app_data::<web::Data<AppConfig>>()
        .cloned()
        .ok_or_else(|| LmsError::token("AppConfig not found in app data"))
}

// 从应用数据中取出文件存储
pub(crate) fn file_store_from(request: &HttpRequest) -> Result<web::Data<FileStore>> {
    request
        .app_data::<web::Data<FileStore>>()
        .cloned()
        .ok_or_else(|| LmsError::file_operation("FileStore not found in app data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::create_storage;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_services_use_storage_from_app_data() {
        let request = TestRequest::default().to_http_request();
        assert!(CourseService::new_lazy().get_storage(&request).is_err());

        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}?mode=rwc", dir.path().join("lms.db").display());
        config.database.pool_size = 1;
        let storage = create_storage(&config.database).await.unwrap();

        let request = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        let courses = CourseService::new_lazy().get_storage(&request).unwrap();
        let materials = MaterialService::new_lazy().get_storage(&request).unwrap();
        let auth = AuthService::new_lazy().get_storage(&request).unwrap();
        assert!(Arc::ptr_eq(&courses, &storage));
        assert!(Arc::ptr_eq(&materials, &storage));
        assert!(Arc::ptr_eq(&auth, &storage));
    }
}
