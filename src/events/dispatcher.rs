//! 事件分发
//! 从总线接收分组事件并交给对应的协调器

use tokio::sync::{mpsc::UnboundedReceiver, watch};
use tracing::Instrument;

use crate::{
    error::Result,
    events::GroupEvent,
    services::reconciler::{GroupCreationReconciler, GroupUpdateReconciler},
};

pub struct EventDispatcher {
    on_created: GroupCreationReconciler,
    on_updated: GroupUpdateReconciler,
}

impl EventDispatcher {
    pub fn new(on_created: GroupCreationReconciler, on_updated: GroupUpdateReconciler) -> Self {
        Self {
            on_created,
            on_updated,
        }
    }

    /// 处理单个事件
    pub async fn dispatch(&self, event: &GroupEvent) -> Result<()> {
        match event {
            GroupEvent::Created { group } => {
                self.on_created.handle(group).await?;
            }
            GroupEvent::Updated {
                group,
                updated_fields,
            } => {
                self.on_updated.handle(group, updated_fields).await?;
            }
        }
        Ok(())
    }

    /// 事件循环：逐个处理直到总线关闭或收到停止信号。
    /// 收到停止信号后先处理完队列中剩余的事件再退出；失败只记录，不重试。
    pub async fn run(
        self,
        mut receiver: UnboundedReceiver<GroupEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        tracing::info!("Group event dispatcher started");

        loop {
            tokio::select! {
                event = receiver.recv() => match event {
                    Some(event) => self.process(event).await,
                    None => break,
                },
                _ = shutdown.changed() => {
                    self.drain(&mut receiver).await;
                    break;
                }
            }
        }

        tracing::info!("Group event dispatcher stopped");
    }

    /// 处理队列中剩余事件，包括处理过程中新发布的事件
    async fn drain(&self, receiver: &mut UnboundedReceiver<GroupEvent>) {
        let mut drained = 0usize;
        while let Ok(event) = receiver.try_recv() {
            self.process(event).await;
            drained += 1;
        }
        tracing::info!(drained, "Pending group events drained");
    }

    async fn process(&self, event: GroupEvent) {
        let name = event.event_name();
        let span = tracing::info_span!(
            "reconcile",
            event = name,
            group_id = %event.group().id,
        );

        metrics::counter!("reconcile.events", "event" => name).increment(1);

        if let Err(e) = self.dispatch(&event).instrument(span).await {
            metrics::counter!("reconcile.failed", "event" => name).increment(1);
            tracing::error!(
                event = name,
                group_id = %event.group().id,
                error = %e,
                "Reconciliation failed"
            );
        }
    }
}
