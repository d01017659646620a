//! 资料文件存储
//!
//! 上传的文件保存在 `<upload.dir>/materials/` 下，对外路径为 `/uploads/materials/<name>`。

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::config::UploadConfig;
use crate::errors::{LmsError, Result};

/// 资料文件对外访问前缀
pub const MATERIALS_URL_PREFIX: &str = "/uploads/materials/";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_size: usize,
}

impl FileStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.dir),
            max_size: config.max_size,
        }
    }

    /// 单文件最大字节数
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// 资料文件目录
    pub fn materials_dir(&self) -> PathBuf {
        self.root.join("materials")
    }

    /// 确保资料目录存在
    pub fn ensure_dirs(&self) -> Result<()> {
        let dir = self.materials_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|e| LmsError::file_operation(format!("创建上传目录失败: {e}")))?;
        }
        Ok(())
    }

    /// 生成存储文件名：`<毫秒时间戳>-<随机数><原扩展名>`
    pub fn generate_name(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let suffix: u32 = rand::rng().random_range(0..1_000_000_000);

        format!(
            "{}-{}{}",
            chrono::Utc::now().timestamp_millis(),
            suffix,
            extension
        )
    }

    /// 存储文件名对应的对外路径
    pub fn public_url(name: &str) -> String {
        format!("{MATERIALS_URL_PREFIX}{name}")
    }

    /// 校验存储文件名并返回磁盘路径，拒绝任何目录穿越
    pub fn resolve_name(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
            || name.starts_with('.')
        {
            return None;
        }
        Some(self.materials_dir().join(name))
    }

    /// 对外路径对应的磁盘路径
    pub fn resolve_url(&self, url: &str) -> Option<PathBuf> {
        url.strip_prefix(MATERIALS_URL_PREFIX)
            .and_then(|name| self.resolve_name(name))
    }

    /// 删除对外路径对应的文件，失败只记录日志
    pub fn remove(&self, url: &str) {
        let Some(path) = self.resolve_url(url) else {
            tracing::warn!("忽略无法识别的文件路径: {}", url);
            return;
        };

        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!("已删除资料文件: {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("删除资料文件失败 {}: {}", path.display(), e),
        }
    }
}
