use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::LmsError;
use crate::models::auth::AuthResponse;
use crate::models::users::{
    entities::UserRole,
    requests::{CreateUserRequest, RegisterRequest},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_name, validate_password};

use super::AuthService;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn handle_register(
    service: &AuthService,
    role: UserRole,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config(request)?;

    let email = normalize_email(&register_request.email);

    // 校验输入
    validate_name(&register_request.name).map_err(LmsError::validation)?;
    validate_email(&email).map_err(LmsError::validation)?;
    validate_password(&register_request.password).map_err(LmsError::validation)?;

    // 检查邮箱是否已注册
    if storage.get_user_by_email(&email).await?.is_some() {
        return Err(LmsError::validation("User already exists with this email").into());
    }

    let create_request = CreateUserRequest {
        name: register_request.name.trim().to_string(),
        email,
        password: hash_password(&register_request.password)?,
        role,
        // 学号只属于学生
        student_id: match role {
            UserRole::Student => non_empty(register_request.student_id),
            UserRole::Teacher => None,
        },
        department: non_empty(register_request.department),
    };

    let user = storage.create_user(create_request).await?;
    let token = JwtUtils::new(&config.jwt)
        .issue_token(user.id)
        .map_err(LmsError::from)?;

    tracing::info!("Registered {} {} ({})", user.role, user.id, user.email);

    Ok(HttpResponse::Created().json(AuthResponse::new(token, user.into())))
}
