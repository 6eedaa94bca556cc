//! 启动流程
//! 写入默认权限目录，组装协调器并订阅事件总线

use std::sync::Arc;
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    catalog::BundleKind,
    error::{AppError, Result},
    events::{EventBus, EventDispatcher},
    repository::store::{GroupStore, RoleStore, ShopStore},
    services::{
        GroupCreationReconciler, GroupService, GroupUpdateReconciler, RoleSyncService,
        TenantInheritanceResolver,
    },
};

/// 组装好的同步组件
pub struct SyncComponents {
    pub event_bus: Arc<EventBus>,
    pub role_sync: Arc<RoleSyncService>,
    pub group_service: Arc<GroupService>,
    pub dispatcher: EventDispatcher,
}

impl SyncComponents {
    pub fn build(
        roles: Arc<dyn RoleStore>,
        groups: Arc<dyn GroupStore>,
        shops: Arc<dyn ShopStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let role_sync = Arc::new(RoleSyncService::new(roles));
        let group_service = Arc::new(GroupService::new(groups.clone(), event_bus.clone()));
        let resolver = Arc::new(TenantInheritanceResolver::new(shops, groups));

        let dispatcher = EventDispatcher::new(
            GroupCreationReconciler::new(resolver, group_service.clone(), role_sync.clone()),
            GroupUpdateReconciler::new(role_sync.clone()),
        );

        Self {
            event_bus,
            role_sync,
            group_service,
            dispatcher,
        }
    }

    /// 取出总线接收端并在后台运行分发循环
    pub fn spawn(self) -> Result<(Arc<RoleSyncService>, Arc<GroupService>, DispatcherHandle)> {
        let receiver = self
            .event_bus
            .take_receiver()
            .ok_or_else(|| AppError::Internal("Event bus receiver already taken".to_string()))?;
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.dispatcher.run(receiver, shutdown_rx));

        Ok((
            self.role_sync,
            self.group_service,
            DispatcherHandle { shutdown, task },
        ))
    }
}

/// 后台分发任务句柄
pub struct DispatcherHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl DispatcherHandle {
    /// 通知分发器停止，等待它处理完已排队的事件；超时后中止任务
    pub async fn shutdown(mut self, timeout: Duration) {
        if self.shutdown.send(true).is_err() {
            tracing::debug!("Dispatcher already stopped");
        }

        match tokio::time::timeout(timeout, &mut self.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Dispatcher task failed"),
            Err(_) => {
                tracing::warn!(
                    timeout_secs = timeout.as_secs(),
                    "Dispatcher did not drain in time, aborting"
                );
                self.task.abort();
            }
        }
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

/// 把四类默认权限目录写入注册表，返回新注册条目数
pub async fn seed_default_roles(role_sync: &RoleSyncService) -> Result<usize> {
    let mut inserted = 0;

    for kind in BundleKind::ALL {
        inserted += role_sync.ensure_roles(kind.default_permissions()).await?;
    }

    tracing::info!(inserted, "Default roles ensured");
    Ok(inserted)
}
