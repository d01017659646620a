use serde::Deserialize;

use super::entities::UserRole;

// 注册请求（来自HTTP请求），学生与教师共用
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub student_id: Option<String>,
    pub department: Option<String>,
}

// 创建用户请求（用于存储层，password 已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub student_id: Option<String>,
    pub department: Option<String>,
}
