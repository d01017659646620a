//! 为课程补全教师与选课学生信息

use std::collections::{HashMap, HashSet};

use crate::errors::{LmsError, Result};
use crate::models::courses::{entities::Course, responses::CourseResponse};
use crate::models::users::{
    entities::User,
    responses::{StudentSummary, TeacherSummary},
};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    // 是否返回选课学生
    pub with_students: bool,
    // 教师信息是否包含院系
    pub with_department: bool,
}

impl ResolveOptions {
    pub const FULL: Self = Self {
        with_students: true,
        with_department: true,
    };
    pub const MEMBERS: Self = Self {
        with_students: true,
        with_department: false,
    };
    pub const CATALOG: Self = Self {
        with_students: false,
        with_department: true,
    };
}

/// 批量补全课程信息，保持输入顺序
pub async fn resolve_courses(
    storage: &dyn Storage,
    courses: Vec<Course>,
    options: ResolveOptions,
) -> Result<Vec<CourseResponse>> {
    let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();

    let enrollments = if options.with_students {
        storage.list_enrollments(&course_ids).await?
    } else {
        Vec::new()
    };

    let mut user_ids: HashSet<i64> = courses.iter().map(|c| c.teacher_id).collect();
    user_ids.extend(enrollments.iter().map(|e| e.student_id));
    let user_ids: Vec<i64> = user_ids.into_iter().collect();

    let users: HashMap<i64, User> = storage
        .get_users_by_ids(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut students: HashMap<i64, Vec<StudentSummary>> = HashMap::new();
    for enrollment in &enrollments {
        if let Some(user) = users.get(&enrollment.student_id) {
            students
                .entry(enrollment.course_id)
                .or_default()
                .push(StudentSummary::from(user));
        }
    }

    Ok(courses
        .into_iter()
        .map(|course| {
            let teacher = users
                .get(&course.teacher_id)
                .map(|u| TeacherSummary::from_user(u, options.with_department))
                .unwrap_or_else(|| TeacherSummary::unknown(course.teacher_id));
            let enrolled = options
                .with_students
                .then(|| students.remove(&course.id).unwrap_or_default());
            CourseResponse::new(course, teacher, enrolled)
        })
        .collect())
}

/// 补全单个课程
pub async fn resolve_course(
    storage: &dyn Storage,
    course: Course,
    options: ResolveOptions,
) -> Result<CourseResponse> {
    resolve_courses(storage, vec![course], options)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| LmsError::serialization("Failed to resolve course"))
}
