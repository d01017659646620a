//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub material_type: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub link_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 资料内容拆分为数据库列：(material_type, file_url, file_name, file_type, link_url)
pub type ContentColumns = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

pub fn content_columns(
    content: &crate::models::materials::entities::MaterialContent,
) -> ContentColumns {
    use crate::models::materials::entities::MaterialContent;

    let kind = content.material_type().to_string();
    match content {
        MaterialContent::File(file) => (
            kind,
            Some(file.url.clone()),
            Some(file.name.clone()),
            Some(file.mime.clone()),
            None,
        ),
        MaterialContent::Link { url } => (kind, None, None, None, Some(url.clone())),
        MaterialContent::Text => (kind, None, None, None, None),
    }
}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::{
            Material, MaterialContent, MaterialType, StoredFile,
        };
        use chrono::{DateTime, Utc};

        // 列不完整时按文本资料处理
        let content = match self.material_type.parse::<MaterialType>() {
            Ok(MaterialType::File) => match (self.file_url, self.file_name, self.file_type) {
                (Some(url), Some(name), mime) => MaterialContent::File(StoredFile {
                    url,
                    name,
                    mime: mime.unwrap_or_else(|| "application/octet-stream".to_string()),
                }),
                _ => MaterialContent::Text,
            },
            Ok(MaterialType::Link) => match self.link_url {
                Some(url) => MaterialContent::Link { url },
                None => MaterialContent::Text,
            },
            _ => MaterialContent::Text,
        };

        Material {
            id: self.id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            title: self.title,
            description: self.description,
            content,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
