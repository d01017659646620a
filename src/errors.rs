//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，每个变体携带 HTTP 状态码和类型名称，
//! 并通过 `ResponseError` 渲染为统一的错误响应。

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::models::ErrorResponse;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - status() 方法 - 返回 HTTP 状态码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($status:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                let code: u16 = match self {
                    $(LmsError::$variant(_) => $status,)*
                };
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    Validation(400, "ValidationError"),
    AlreadyEnrolled(400, "AlreadyEnrolled"),
    Unauthenticated(401, "Unauthenticated"),
    InvalidCredentials(401, "InvalidCredentials"),
    Forbidden(403, "Forbidden"),
    NotFound(404, "NotFound"),
    DatabaseConfig(500, "Internal"),
    DatabaseConnection(500, "Internal"),
    DatabaseOperation(500, "Internal"),
    FileOperation(500, "Internal"),
    Serialization(500, "Internal"),
    Token(500, "Internal"),
    PasswordHash(500, "Internal"),
}

impl LmsError {
    /// 是否为服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

impl ResponseError for LmsError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.status()).json(ErrorResponse::new(self.message(), self.error_type()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        LmsError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LmsError {
    fn from(err: std::io::Error) -> Self {
        LmsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for LmsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        LmsError::Token(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;
