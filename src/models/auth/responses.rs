use serde::Serialize;

use crate::models::users::responses::UserResponse;

// 登录与注册成功后的响应
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(token: String, user: UserResponse) -> Self {
        Self {
            success: true,
            token,
            user,
        }
    }
}

// 当前用户信息响应
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub success: bool,
    pub user: UserResponse,
}
