use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::admin::AllowlistStore;
use crate::availability::{
    AvailabilityBackend, HttpAvailabilityBackend, InventoryBackend, SessionRegistry,
};
use crate::core::Config;
use crate::db;
use crate::db::repository::ReservationRepository;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是预约后端的核心数据结构。使用 Arc 实现浅拷贝，
/// 所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 (预约文档) |
/// | allowlist | Arc<AllowlistStore> | 管理员邮箱允许名单 (redb) |
/// | backend | Arc<dyn AvailabilityBackend> | 空位检查后端 (启动时注入) |
/// | sessions | Arc<SessionRegistry> | 表单会话 → 协调器 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 管理员邮箱允许名单
    pub allowlist: Arc<AllowlistStore>,
    /// 空位检查后端
    pub backend: Arc<dyn AvailabilityBackend>,
    /// 表单会话注册表
    pub sessions: Arc<SessionRegistry>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 预约文档数据库 (work_dir/database/koenji.db)
    /// 3. 允许名单数据库 (work_dir/database/admins.redb)
    /// 4. 空位检查后端 — 配置了 AVAILABILITY_URL 用远端服务，
    ///    否则用内嵌库存计算
    ///
    /// 存储打不开属于配置错误，由调用方报一次后退出，不重试。
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        // 1. Reservation document store
        let db_path = config.database_dir().join("koenji.db");
        let db = db::open(&db_path).await?;

        // 2. Admin allowlist
        let allowlist = Arc::new(AllowlistStore::open(
            config.allowlist_path(),
            &config.default_admin_email,
        )?);

        // 3. Availability backend (startup-time injection)
        let backend: Arc<dyn AvailabilityBackend> = match &config.availability_url {
            Some(url) => {
                tracing::info!("Availability backend: remote ({url})");
                Arc::new(HttpAvailabilityBackend::new(
                    url.clone(),
                    config.request_timeout_ms,
                )?)
            }
            None => {
                tracing::info!(
                    "Availability backend: embedded inventory ({} tables x {} seats)",
                    config.table_count,
                    config.seats_per_table
                );
                Arc::new(InventoryBackend::new(
                    ReservationRepository::new(db.clone(), config.reservation_table()),
                    config.table_count,
                    config.seats_per_table,
                ))
            }
        };

        Ok(Self {
            config: config.clone(),
            db,
            allowlist,
            backend,
            sessions: Arc::new(SessionRegistry::new()),
        })
    }

    /// 预约仓库 — 表名由环境决定，在此统一注入
    pub fn reservation_repository(&self) -> ReservationRepository {
        ReservationRepository::new(self.db.clone(), self.config.reservation_table())
    }

    /// 取指定表单会话的协调器，没有则新建
    pub fn coordinator_for(&self, session: &str) -> Arc<crate::availability::AvailabilityCoordinator> {
        self.sessions
            .get_or_create(session, self.backend.clone(), self.config.is_debug())
    }
}
