use serde::{Deserialize, Serialize};

// 资料类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    File, // 上传的文件
    Link, // 外部链接
    Text, // 纯文本，正文保存在 description 中
}

impl MaterialType {
    pub const FILE: &'static str = "file";
    pub const LINK: &'static str = "link";
    pub const TEXT: &'static str = "text";
}

impl<'de> Deserialize<'de> for MaterialType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<MaterialType>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialType::File => write!(f, "{}", MaterialType::FILE),
            MaterialType::Link => write!(f, "{}", MaterialType::LINK),
            MaterialType::Text => write!(f, "{}", MaterialType::TEXT),
        }
    }
}

impl std::str::FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MaterialType::FILE => Ok(MaterialType::File),
            MaterialType::LINK => Ok(MaterialType::Link),
            MaterialType::TEXT => Ok(MaterialType::Text),
            _ => Err(format!(
                "Invalid material type: '{s}'. Supported types: file, link, text"
            )),
        }
    }
}

// 已保存到磁盘的上传文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    // 服务端相对路径，例如 /uploads/materials/1700000000000-123.pdf
    #[serde(rename = "fileUrl")]
    pub url: String,
    // 原始文件名
    #[serde(rename = "fileName")]
    pub name: String,
    // MIME 类型
    #[serde(rename = "fileType")]
    pub mime: String,
}

/// 资料内容，三种形式只能选其一
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "materialType", rename_all = "lowercase")]
pub enum MaterialContent {
    File(StoredFile),
    Link {
        #[serde(rename = "linkUrl")]
        url: String,
    },
    Text,
}

impl MaterialContent {
    pub fn material_type(&self) -> MaterialType {
        match self {
            MaterialContent::File(_) => MaterialType::File,
            MaterialContent::Link { .. } => MaterialType::Link,
            MaterialContent::Text => MaterialType::Text,
        }
    }

    pub fn stored_file(&self) -> Option<&StoredFile> {
        match self {
            MaterialContent::File(file) => Some(file),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Material {
    pub id: i64,
    pub course_id: i64,
    // 始终等于所属课程的教师
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: MaterialContent,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
