use actix_web::{HttpResponse, Result as ActixResult};
use serde::Serialize;

pub struct SystemService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 健康检查
    pub async fn health(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(HealthResponse {
            status: "OK",
            message: "LMS API is running",
        }))
    }
}
