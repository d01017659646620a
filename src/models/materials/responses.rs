use serde::Serialize;

use super::entities::{Material, MaterialContent};
use crate::models::users::responses::TeacherSummary;

// 资料响应，内容字段随类型展开
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course: i64,
    pub teacher: TeacherSummary,
    #[serde(flatten)]
    pub content: MaterialContent,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl MaterialResponse {
    pub fn new(material: Material, teacher: TeacherSummary) -> Self {
        Self {
            id: material.id,
            title: material.title,
            description: material.description,
            course: material.course_id,
            teacher,
            content: material.content,
            created_at: material.created_at,
            updated_at: material.updated_at,
        }
    }
}
