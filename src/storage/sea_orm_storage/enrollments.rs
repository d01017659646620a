//! 选课存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::course_students::{ActiveModel, Column, Entity as CourseStudents};
use crate::errors::{LmsError, Result};
use crate::models::courses::entities::Enrollment;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生选课
    ///
    /// 依赖 (course_id, student_id) 唯一索引保证原子性，重复选课返回 false。
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(LmsError::database_operation(format!("选课失败: {e}"))),
        }
    }

    /// 检查学生是否已选课
    pub async fn is_enrolled_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let count = CourseStudents::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出课程的选课记录
    pub async fn list_enrollments_impl(&self, course_ids: &[i64]) -> Result<Vec<Enrollment>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = CourseStudents::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }
}
