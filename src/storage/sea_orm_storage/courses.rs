//! 课程存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::course_students::{Column as EnrollmentColumn, Entity as CourseStudents};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::materials::{Column as MaterialColumn, Entity as Materials};
use crate::errors::{LmsError, Result};
use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CourseUpdate, NewCourse},
    },
    materials::entities::Material,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

fn map_write_error(action: &str, e: sea_orm::DbErr) -> LmsError {
    if is_unique_violation(&e) {
        LmsError::validation("Course code already exists")
    } else {
        LmsError::database_operation(format!("{action}失败: {e}"))
    }
}

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, teacher_id: i64, req: NewCourse) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            code: Set(req.code),
            teacher_id: Set(teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error("创建课程", e))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程代码获取课程
    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出课程
    pub async fn list_courses_impl(&self, query: CourseListQuery) -> Result<Vec<Course>> {
        let mut select = Courses::find();

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 学生筛选：只返回已选课程
        if let Some(student_id) = query.student_id {
            let course_ids: Vec<i64> = CourseStudents::find()
                .select_only()
                .column(EnrollmentColumn::CourseId)
                .filter(EnrollmentColumn::StudentId.eq(student_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| LmsError::database_operation(format!("查询选课记录失败: {e}")))?;

            if course_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::Id.is_in(course_ids));
        }

        let courses = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: CourseUpdate,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| map_write_error("更新课程", e))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程，同一事务内删除其资料与选课记录
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<Option<Vec<Material>>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Courses::find_by_id(course_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let materials = Materials::find()
            .filter(MaterialColumn::CourseId.eq(course_id))
            .all(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程资料失败: {e}")))?;

        Materials::delete_many()
            .filter(MaterialColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除课程资料失败: {e}")))?;

        CourseStudents::delete_many()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除选课记录失败: {e}")))?;

        Courses::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(
            materials.into_iter().map(|m| m.into_material()).collect(),
        ))
    }
}
