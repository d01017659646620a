use serde::{Deserialize, Serialize};

/// 开发环境默认 JWT 密钥，生产环境禁止使用
pub const DEFAULT_JWT_SECRET: &str = "default_secret";

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
    pub seed_sample_data: bool, // 启动时写入示例账号与课程
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry_days: i64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,     // 上传目录，资料文件存放在其 materials 子目录
    pub max_size: usize, // 单文件最大字节数
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                system_name: "LMS".to_string(),
                environment: "development".to_string(),
                log_level: "info".to_string(),
                seed_sample_data: false,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                unix_socket_path: String::new(),
                workers: 0,
                max_workers: 16,
                timeouts: TimeoutConfig {
                    client_request: 5000,
                    client_disconnect: 1000,
                    keep_alive: 30,
                },
                limits: LimitConfig {
                    max_payload_size: 16 * 1024 * 1024,
                },
            },
            jwt: JwtConfig {
                secret: DEFAULT_JWT_SECRET.to_string(),
                token_expiry_days: 7,
            },
            database: DatabaseConfig {
                url: "lms.db".to_string(),
                pool_size: 8,
                timeout: 30,
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
                max_age: 3600,
            },
            upload: UploadConfig {
                dir: "uploads".to_string(),
                max_size: 10 * 1024 * 1024,
            },
        }
    }
}
