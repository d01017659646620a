use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::LmsError;
use crate::models::auth::{AuthResponse, LoginRequest};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::normalize_email;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config(request)?;

    let email = normalize_email(&login_request.email);
    if email.is_empty() || login_request.password.is_empty() {
        return Err(LmsError::validation("Please provide email and password").into());
    }
    let role = login_request
        .role
        .ok_or_else(|| LmsError::validation("Please provide a role"))?;

    // 用户不存在与密码错误返回相同的错误
    let user = storage
        .get_user_by_email_and_role(&email, role)
        .await?
        .filter(|user| verify_password(&login_request.password, &user.password_hash))
        .ok_or_else(|| LmsError::invalid_credentials("Invalid credentials"))?;

    let token = JwtUtils::new(&config.jwt)
        .issue_token(user.id)
        .map_err(LmsError::from)?;

    tracing::info!("User {} logged in successfully as {}", user.id, user.role);

    Ok(HttpResponse::Ok().json(AuthResponse::new(token, user.into())))
}
