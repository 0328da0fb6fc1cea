//! Koenji Booking Server - 餐厅网上预约后端
//!
//! # 架构概述
//!
//! 本模块是预约服务的主入口，提供以下核心功能：
//!
//! - **时段表** (`timetable`): 午餐/晚餐可选时段与结束时间计算
//! - **空位检查** (`availability`): 外部/内嵌后端 + 表单会话协调器
//! - **预约域** (`reservations`): 校验 → 复查 → 落库的提交编排
//! - **数据库** (`db`): 嵌入式 SurrealDB 预约文档存储
//! - **管理端** (`admin`): redb 授权邮箱允许名单与接口门禁
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── timetable.rs   # 时段与结束时间
//! ├── availability/  # 空位后端与协调器
//! ├── reservations/  # 提交编排
//! ├── admin/         # 允许名单
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod admin;
pub mod api;
pub mod availability;
pub mod core;
pub mod db;
pub mod reservations;
pub mod timetable;
pub mod utils;

// Re-export 公共类型
pub use admin::AllowlistStore;
pub use availability::{AvailabilityBackend, AvailabilityCoordinator};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置进程环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __ __                 _ _
   / //_/___  ___  ____  (_|_)
  / ,< / __ \/ _ \/ __ \/ / /
 / /| / /_/ /  __/ / / / / /
/_/ |_\____/\___/_/ /_/ /_/
    ____                __   _
   / __ )____  ____  __/ /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/_/ /_/\__, /
                                 /____/
    "#
    );
}
