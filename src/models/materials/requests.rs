use serde::Deserialize;

use super::entities::{MaterialContent, MaterialType, StoredFile};
use crate::errors::{LmsError, Result};

// 资料表单，可来自 JSON 或 multipart 文本字段
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialForm {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub course_id: Option<i64>,
    pub link_url: Option<String>,
    pub material_type: Option<MaterialType>,
    // 上传的文件只来自 multipart
    #[serde(skip)]
    pub file: Option<StoredFile>,
}

// 校验后的新资料（用于存储层）
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub course_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: MaterialContent,
}

// 校验后的资料更新（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct MaterialUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub content: Option<MaterialContent>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 描述去除首尾空白，空串视为清空
pub fn trimmed_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl MaterialForm {
    /// 新资料的描述
    pub fn new_description(&self) -> Option<String> {
        self.description.as_deref().and_then(trimmed_description)
    }

    /// 更新时的描述，`Some(None)` 表示清空
    pub fn description_update(&self) -> Option<Option<String>> {
        self.description.as_deref().map(trimmed_description)
    }

    /// 空字符串字段视为未提供
    pub fn normalize(mut self) -> Self {
        self.title = non_empty(self.title);
        self.link_url = non_empty(self.link_url);
        self
    }

    /// 创建时确定资料内容
    ///
    /// 显式类型优先，且对应字段必须存在；否则按 文件 > 链接 > 文本 推断。
    pub fn resolve_content(&self) -> Result<MaterialContent> {
        if self.file.is_some() && self.link_url.is_some() {
            return Err(LmsError::validation(
                "A material can carry either a file or a link, not both",
            ));
        }

        let inferred = match (&self.file, &self.link_url) {
            (Some(file), None) => MaterialContent::File(file.clone()),
            (None, Some(url)) => MaterialContent::Link { url: url.clone() },
            _ => MaterialContent::Text,
        };

        match self.material_type {
            Some(explicit) if explicit != inferred.material_type() => {
                Err(Self::mismatch(explicit))
            }
            _ => Ok(inferred),
        }
    }

    /// 更新时确定新的资料内容，`None` 表示保持原内容
    ///
    /// 未提供文件或链接时，显式类型与当前类型一致即视为保持原内容。
    pub fn resolve_content_update(
        &self,
        current: MaterialType,
    ) -> Result<Option<MaterialContent>> {
        if self.file.is_some() && self.link_url.is_some() {
            return Err(LmsError::validation(
                "A material can carry either a file or a link, not both",
            ));
        }

        let replacement = match (&self.file, &self.link_url) {
            (Some(file), None) => Some(MaterialContent::File(file.clone())),
            (None, Some(url)) => Some(MaterialContent::Link { url: url.clone() }),
            _ => match self.material_type {
                Some(MaterialType::Text) => Some(MaterialContent::Text),
                Some(explicit) if explicit == current => None,
                Some(explicit) => return Err(Self::mismatch(explicit)),
                None => None,
            },
        };

        match (self.material_type, &replacement) {
            (Some(explicit), Some(content)) if explicit != content.material_type() => {
                Err(Self::mismatch(explicit))
            }
            _ => Ok(replacement),
        }
    }

    fn mismatch(explicit: MaterialType) -> LmsError {
        match explicit {
            MaterialType::File => LmsError::validation("A file material requires an uploaded file"),
            MaterialType::Link => LmsError::validation("A link material requires a linkUrl"),
            MaterialType::Text => {
                LmsError::validation("A text material cannot carry a file or a link")
            }
        }
    }
}

// 支持数字或字符串形式的课程 ID
fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Int(id)) => Ok(Some(id)),
        Some(RawId::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(RawId::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid course id: '{s}'"))),
    }
}
