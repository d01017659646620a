use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    courses::{
        entities::{Course, Enrollment},
        requests::{CourseListQuery, CourseUpdate, NewCourse},
    },
    materials::{
        entities::Material,
        requests::{MaterialUpdate, NewMaterial},
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod file_store;
pub mod sea_orm_storage;

pub use file_store::FileStore;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Validation 错误
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过邮箱和角色获取用户信息（登录使用）
    async fn get_user_by_email_and_role(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<User>>;
    // 批量获取用户信息
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;

    /// 课程管理方法
    // 创建课程，课程代码重复时返回 Validation 错误
    async fn create_course(&self, teacher_id: i64, course: NewCourse) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程信息
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 列出课程，按创建时间倒序
    async fn list_courses(&self, query: CourseListQuery) -> Result<Vec<Course>>;
    // 更新课程信息
    async fn update_course(&self, course_id: i64, update: CourseUpdate)
    -> Result<Option<Course>>;
    // 删除课程及其资料、选课记录，返回被删除的资料
    async fn delete_course(&self, course_id: i64) -> Result<Option<Vec<Material>>>;

    /// 选课管理方法
    // 学生选课，已选过时返回 false
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 学生是否已选该课程
    async fn is_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 列出若干课程的选课记录，按选课时间排序
    async fn list_enrollments(&self, course_ids: &[i64]) -> Result<Vec<Enrollment>>;

    /// 资料管理方法
    // 创建资料
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    // 通过ID获取资料信息
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>>;
    // 列出课程资料，按创建时间倒序
    async fn list_materials_by_course(&self, course_id: i64) -> Result<Vec<Material>>;
    // 更新资料信息
    async fn update_material(
        &self,
        material_id: i64,
        update: MaterialUpdate,
    ) -> Result<Option<Material>>;
    // 删除资料
    async fn delete_material(&self, material_id: i64) -> Result<bool>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
