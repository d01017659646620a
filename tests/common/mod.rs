//! 集成测试公共工具
//!
//! 每个测试使用独立的临时 SQLite 数据库和上传目录。

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::header;
use serde_json::Value;
use tempfile::TempDir;

use rust_lms::config::AppConfig;
use rust_lms::storage::{FileStore, Storage, create_storage};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BOUNDARY: &str = "----lms-test-boundary";

pub struct TestContext {
    _dir: TempDir,
    pub config: AppConfig,
    pub storage: Arc<dyn Storage>,
    pub file_store: FileStore,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_max_upload(1024 * 1024).await
    }

    pub async fn with_max_upload(max_size: usize) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");

        let mut config = AppConfig::default();
        config.jwt.secret = TEST_SECRET.to_string();
        config.database.url = format!("sqlite://{}?mode=rwc", dir.path().join("lms.db").display());
        config.database.pool_size = 1;
        config.upload.dir = dir.path().join("uploads").display().to_string();
        config.upload.max_size = max_size;

        let file_store = FileStore::new(&config.upload);
        file_store.ensure_dirs().expect("create upload dir");
        let storage = create_storage(&config.database)
            .await
            .expect("create storage");

        Self {
            _dir: dir,
            config,
            storage,
            file_store,
        }
    }

    /// 上传 URL 在磁盘上的路径
    pub fn upload_path(&self, url: &str) -> PathBuf {
        self.file_store.resolve_url(url).expect("valid upload url")
    }

    /// 资料目录中的文件数
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.file_store.materials_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// 用与 main 相同的应用数据和路由初始化服务
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(rust_lms::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(rust_lms::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::PathConfig::default()
                        .error_handler(rust_lms::utils::path_error_handler),
                )
                .app_data(actix_web::web::Data::new($ctx.config.clone()))
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.file_store.clone()))
                .configure(rust_lms::routes::configure_routes),
        )
        .await
    };
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// 注册账号，返回 (token, user id)
#[macro_export]
macro_rules! register {
    ($app:expr, $role:expr, $name:expr, $email:expr) => {
        $crate::register!($app, $role, $name, $email, serde_json::json!({}))
    };
    ($app:expr, $role:expr, $name:expr, $email:expr, $extra:expr) => {{
        let mut body = serde_json::json!({
            "name": $name,
            "email": $email,
            "password": "secret123",
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), $extra.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        let req = actix_web::test::TestRequest::post()
            .uri(&format!("/api/auth/register/{}", $role))
            .set_json(&body)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let json: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (
            json["token"].as_str().expect("token").to_string(),
            json["user"]["id"].as_i64().expect("user id"),
        )
    }};
}

/// 发送请求并解析 JSON 响应，返回 (状态码, JSON)
#[macro_export]
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        let json: serde_json::Value = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, json)
    }};
}

/// 构造 multipart 请求体，`file` 为 (文件名, MIME, 内容)
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, mime, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> (header::HeaderName, String) {
    (
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

/// 从列表响应中取出 id
pub fn ids(json: &Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["id"].as_i64()).collect())
        .unwrap_or_default()
}
