/*!
 * JWT 认证中间件
 *
 * 此中间件用于验证 JWT 令牌的有效性，确保只有经过身份验证的用户才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/courses")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_courses)),
 * )
 * ```
 *
 * 2. 在处理程序中提取用户信息：
 * ```rust,ignore
 * async fn handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let user = RequireJWT::extract_user(&req)
 *         .ok_or_else(|| LmsError::unauthenticated("Not authorized"))?;
 *     ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件验证令牌签名与有效期，并根据 subject 查询用户
 * 3. 验证通过时将用户存入请求扩展，继续处理请求
 * 4. 令牌缺失、无效、过期或用户不存在时返回 401
 *
 * 签名密钥来自 `web::Data<AppConfig>`，用户来自 `web::Data<Arc<dyn Storage>>`。
 */

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 根据 Authorization 头认证用户
///
/// 缺失、格式错误、签名错误、过期以及用户不存在都返回 `Unauthenticated`。
pub async fn authenticate(
    storage: &dyn Storage,
    jwt: &JwtUtils,
    authorization: Option<&str>,
) -> Result<User> {
    let token = authorization
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LmsError::unauthenticated("Not authorized, no token"))?;

    let claims = jwt.verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        LmsError::unauthenticated("Not authorized, token failed")
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| LmsError::unauthenticated("Not authorized, token failed"))?;

    storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| LmsError::unauthenticated("Not authorized, user not found"))
}

// 辅助函数：从应用数据中取出依赖并认证
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User> {
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| LmsError::token("AppConfig not found in app data"))?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| LmsError::database_connection("Storage not found in app data"))?
        .get_ref()
        .clone();

    let authorization = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok());

    let jwt = JwtUtils::new(&config.jwt);
    authenticate(storage.as_ref(), &jwt, authorization).await
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            // 验证 JWT token
            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(create_error_response(&err).map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 提取当前用户，未认证时返回 Unauthenticated
    pub fn require_user(req: &actix_web::HttpRequest) -> Result<User> {
        Self::extract_user(req).ok_or_else(|| LmsError::unauthenticated("Not authorized"))
    }
}
