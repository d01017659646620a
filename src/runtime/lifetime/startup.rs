use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::courses::requests::NewCourse;
use crate::models::materials::{entities::MaterialContent, requests::NewMaterial};
use crate::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use crate::storage::{FileStore, Storage};
use crate::utils::password::hash_password;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub file_store: FileStore,
}

/// 示例账号
struct SampleUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: UserRole,
    student_id: Option<&'static str>,
}

const SAMPLE_STUDENT: SampleUser = SampleUser {
    name: "John Student",
    email: "student@example.com",
    password: "student123",
    role: UserRole::Student,
    student_id: Some("STU001"),
};

const SAMPLE_TEACHER: SampleUser = SampleUser {
    name: "Dr. Jane Teacher",
    email: "teacher@example.com",
    password: "teacher123",
    role: UserRole::Teacher,
    student_id: None,
};

const SAMPLE_DEPARTMENT: &str = "Computer Science";
const SAMPLE_COURSE_CODE: &str = "CS101";

/// 已存在则直接返回，否则创建
async fn ensure_user(storage: &Arc<dyn Storage>, sample: &SampleUser) -> Result<User> {
    if let Some(user) = storage.get_user_by_email(sample.email).await? {
        debug!("Sample user {} already exists, skipping", sample.email);
        return Ok(user);
    }

    let user = storage
        .create_user(CreateUserRequest {
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            password: hash_password(sample.password)?,
            role: sample.role,
            student_id: sample.student_id.map(str::to_string),
            department: Some(SAMPLE_DEPARTMENT.to_string()),
        })
        .await?;
    info!("Sample {} account created (ID: {})", sample.role, user.id);
    Ok(user)
}

/// 写入示例数据，可重复执行
pub async fn seed_sample_data(storage: &Arc<dyn Storage>) -> Result<()> {
    ensure_user(storage, &SAMPLE_STUDENT).await?;
    let teacher = ensure_user(storage, &SAMPLE_TEACHER).await?;

    if storage
        .get_course_by_code(SAMPLE_COURSE_CODE)
        .await?
        .is_some()
    {
        debug!("Sample course {} already exists, skipping", SAMPLE_COURSE_CODE);
        return Ok(());
    }

    let course = storage
        .create_course(
            teacher.id,
            NewCourse {
                title: "Introduction to Programming".to_string(),
                description: Some(
                    "Learn the fundamentals of programming with examples and practical exercises."
                        .to_string(),
                ),
                code: SAMPLE_COURSE_CODE.to_string(),
            },
        )
        .await?;

    storage
        .create_material(NewMaterial {
            course_id: course.id,
            teacher_id: teacher.id,
            title: "Course Syllabus".to_string(),
            description: Some(
                "Overview of topics covered in this course, grading criteria, and important dates."
                    .to_string(),
            ),
            content: MaterialContent::Text,
        })
        .await?;

    info!("Sample course {} created (ID: {})", course.code, course.id);
    Ok(())
}

/// 准备服务器启动的上下文
/// 包括上传目录、存储和示例数据
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let file_store = FileStore::new(&config.upload);
    file_store.ensure_dirs()?;
    debug!(
        "Upload directory ready: {}",
        file_store.materials_dir().display()
    );

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    if config.app.seed_sample_data {
        // 示例数据失败不影响启动
        if let Err(e) = seed_sample_data(&storage).await {
            warn!("Failed to seed sample data: {}", e);
        }
    }

    Ok(StartupContext {
        storage,
        file_store,
    })
}
