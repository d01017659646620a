pub mod require_jwt;
pub mod require_role;

pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

use actix_web::{HttpResponse, ResponseError};

use crate::errors::LmsError;

// 辅助函数：中间件中把错误渲染为统一的错误响应
fn create_error_response(err: &LmsError) -> HttpResponse {
    err.error_response()
}
