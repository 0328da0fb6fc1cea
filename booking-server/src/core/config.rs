use std::path::PathBuf;

/// 服务器配置 - 预约后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/koenji/booking | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | debug | 运行环境 (debug \| release) |
/// | AVAILABILITY_URL | (无) | 外部空位检查服务地址，缺省用内嵌库存计算 |
/// | REQUEST_TIMEOUT_MS | 30000 | 外部检查请求超时(毫秒) |
/// | TABLE_COUNT | 12 | 内嵌库存: 总桌数 |
/// | SEATS_PER_TABLE | 4 | 内嵌库存: 每桌座位数 |
/// | DEFAULT_ADMIN_EMAIL | matteo.koenji@gmail.com | 受保护的默认管理员邮箱 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/koenji ENVIRONMENT=release cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境，决定预约文档写入哪张表
    pub environment: Environment,
    /// 外部空位检查服务地址 (缺省 → 内嵌库存后端)
    pub availability_url: Option<String>,
    /// 外部检查请求超时 (毫秒)
    pub request_timeout_ms: u64,
    /// 内嵌库存: 总桌数
    pub table_count: u32,
    /// 内嵌库存: 每桌座位数
    pub seats_per_table: u32,
    /// 受保护的默认管理员邮箱，不可经接口移除
    pub default_admin_email: String,
}

/// 运行环境: debug 写测试表，release 写正式表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Debug,
    Release,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value {
            "release" | "production" => Environment::Release,
            _ => Environment::Debug,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/koenji/booking".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: Environment::parse(
                &std::env::var("ENVIRONMENT").unwrap_or_else(|_| "debug".into()),
            ),
            availability_url: std::env::var("AVAILABILITY_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            table_count: std::env::var("TABLE_COUNT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(12),
            seats_per_table: std::env::var("SEATS_PER_TABLE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4),
            default_admin_email: std::env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "matteo.koenji@gmail.com".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否调试环境
    pub fn is_debug(&self) -> bool {
        self.environment == Environment::Debug
    }

    /// 预约文档表名 — 由环境决定，组件自身不再感知环境
    pub fn reservation_table(&self) -> &'static str {
        match self.environment {
            Environment::Debug => "reservations",
            Environment::Release => "reservations_release",
        }
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 允许名单数据库路径
    pub fn allowlist_path(&self) -> PathBuf {
        self.database_dir().join("admins.redb")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
