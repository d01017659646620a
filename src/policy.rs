//! 资源访问策略
//!
//! 所有课程与资料操作共用同一套归属判断，每个操作在策略表中对应
//! `Owner`（仅授课教师）或 `Member`（授课教师或已选课学生）。

use crate::errors::{LmsError, Result};
use crate::models::courses::entities::Course;
use crate::models::materials::entities::Material;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 归属于某门课程、某位教师的资源
pub trait Owned {
    /// 资源所属教师
    fn owner_id(&self) -> i64;
    /// 资源所属课程
    fn course_id(&self) -> i64;
}

impl Owned for Course {
    fn owner_id(&self) -> i64 {
        self.teacher_id
    }

    fn course_id(&self) -> i64 {
        self.id
    }
}

impl Owned for Material {
    fn owner_id(&self) -> i64 {
        self.teacher_id
    }

    fn course_id(&self) -> i64 {
        self.course_id
    }
}

/// 用户是否为资源的授课教师
pub fn owns_resource<R: Owned + ?Sized>(user: &User, resource: &R) -> bool {
    user.is_teacher() && user.id == resource.owner_id()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Owner,
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ViewCourse,
    UpdateCourse,
    DeleteCourse,
    ListMaterials,
    ViewMaterial,
    CreateMaterial,
    UpdateMaterial,
    DeleteMaterial,
}

impl Operation {
    /// 策略表
    pub fn access(self) -> Access {
        match self {
            Operation::ViewCourse | Operation::ListMaterials | Operation::ViewMaterial => {
                Access::Member
            }
            Operation::UpdateCourse
            | Operation::DeleteCourse
            | Operation::CreateMaterial
            | Operation::UpdateMaterial
            | Operation::DeleteMaterial => Access::Owner,
        }
    }

    fn denial_message(self, user: &User) -> &'static str {
        if self.access() == Access::Member && user.is_student() {
            return "Not enrolled in this course";
        }
        match self {
            Operation::ViewCourse => "Not authorized to view this course",
            Operation::UpdateCourse => "Not authorized to update this course",
            Operation::DeleteCourse => "Not authorized to delete this course",
            Operation::ListMaterials => "Not authorized to view materials for this course",
            Operation::ViewMaterial => "Not authorized to view this material",
            Operation::CreateMaterial => "Not authorized to add materials to this course",
            Operation::UpdateMaterial => "Not authorized to update this material",
            Operation::DeleteMaterial => "Not authorized to delete this material",
        }
    }
}

/// 纯判断：给定归属与选课情况，操作是否允许
pub fn permits(op: Operation, is_owner: bool, is_enrolled: bool) -> bool {
    match op.access() {
        Access::Owner => is_owner,
        Access::Member => is_owner || is_enrolled,
    }
}

/// 检查用户能否对资源执行操作，不允许时返回 Forbidden
pub async fn ensure_access<R: Owned + Sync + ?Sized>(
    storage: &dyn Storage,
    user: &User,
    resource: &R,
    op: Operation,
) -> Result<()> {
    let is_owner = owns_resource(user, resource);

    // 只有学生在需要成员身份时才查询选课记录
    let is_enrolled = !is_owner
        && op.access() == Access::Member
        && user.is_student()
        && storage.is_enrolled(resource.course_id(), user.id).await?;

    if permits(op, is_owner, is_enrolled) {
        Ok(())
    } else {
        Err(LmsError::forbidden(op.denial_message(user)))
    }
}
