pub mod auth;

pub mod courses;

pub mod materials;

pub mod system;

pub mod uploads;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use materials::configure_materials_routes;
pub use system::configure_system_routes;
pub use uploads::configure_uploads_routes;

use actix_web::web;

// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_courses_routes)
        .configure(configure_materials_routes)
        .configure(configure_uploads_routes)
        .configure(configure_system_routes);
}
