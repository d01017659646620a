use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::UserInfoResponse;

use super::AuthService;

pub async fn handle_me(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(request)?;

    Ok(HttpResponse::Ok().json(UserInfoResponse {
        success: true,
        user: user.into(),
    }))
}
