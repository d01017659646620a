use serde::Serialize;

use crate::models::courses::entities::Course;
use crate::models::users::responses::{StudentSummary, TeacherSummary};

// 解析了教师与学生信息的课程
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub teacher: TeacherSummary,
    // 可选课程列表不返回选课学生
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_students: Option<Vec<StudentSummary>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl CourseResponse {
    pub fn new(
        course: Course,
        teacher: TeacherSummary,
        enrolled_students: Option<Vec<StudentSummary>>,
    ) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            code: course.code,
            teacher,
            enrolled_students,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}
