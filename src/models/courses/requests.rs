use serde::Deserialize;

use crate::errors::{LmsError, Result};

// 创建课程请求
#[derive(Debug, Default, Deserialize)]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

// 更新课程请求，只允许修改这三个字段
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

// 校验后的新课程（用于存储层）
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub code: String,
}

// 校验后的课程更新（用于存储层）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub code: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// 课程代码统一为大写
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn normalize_description(description: String) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CreateCourseRequest {
    pub fn validate(self) -> Result<NewCourse> {
        let title = self.title.map(|t| t.trim().to_string()).unwrap_or_default();
        let code = self.code.as_deref().map(normalize_code).unwrap_or_default();

        if title.is_empty() || code.is_empty() {
            return Err(LmsError::validation(
                "Please provide a course title and code",
            ));
        }

        Ok(NewCourse {
            title,
            description: self.description.and_then(normalize_description),
            code,
        })
    }
}

impl UpdateCourseRequest {
    pub fn validate(self) -> Result<CourseUpdate> {
        let title = self.title.map(|t| t.trim().to_string());
        if title.as_deref() == Some("") {
            return Err(LmsError::validation("Course title cannot be empty"));
        }

        let code = self.code.as_deref().map(normalize_code);
        if code.as_deref() == Some("") {
            return Err(LmsError::validation("Course code cannot be empty"));
        }

        Ok(CourseUpdate {
            title,
            description: self.description.map(normalize_description),
            code,
        })
    }
}
