//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials, content_columns};
use crate::errors::{LmsError, Result};
use crate::models::materials::{
    entities::Material,
    requests::{MaterialUpdate, NewMaterial},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建资料
    pub async fn create_material_impl(&self, req: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();
        let (material_type, file_url, file_name, file_type, link_url) =
            content_columns(&req.content);

        let model = ActiveModel {
            course_id: Set(req.course_id),
            teacher_id: Set(req.teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            material_type: Set(material_type),
            file_url: Set(file_url),
            file_name: Set(file_name),
            file_type: Set(file_type),
            link_url: Set(link_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出课程资料，最新的在前
    pub async fn list_materials_by_course_impl(&self, course_id: i64) -> Result<Vec<Material>> {
        let result = Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新资料信息
    pub async fn update_material_impl(
        &self,
        material_id: i64,
        update: MaterialUpdate,
    ) -> Result<Option<Material>> {
        // 先检查资料是否存在
        let existing = self.get_material_by_id_impl(material_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(material_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        // 替换内容时其余内容列一并清空
        if let Some(content) = update.content {
            let (material_type, file_url, file_name, file_type, link_url) =
                content_columns(&content);
            model.material_type = Set(material_type);
            model.file_url = Set(file_url);
            model.file_name = Set(file_name);
            model.file_type = Set(file_type);
            model.link_url = Set(link_url);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新资料失败: {e}")))?;

        self.get_material_by_id_impl(material_id).await
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
