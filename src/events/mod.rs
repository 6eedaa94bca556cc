//! 分组事件总线
//! 分组创建/更新后发布事件，协调器订阅处理

use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

use crate::models::group::{Group, GroupField};

pub mod dispatcher;

pub use dispatcher::EventDispatcher;

/// 分组事件
#[derive(Debug, Clone)]
pub enum GroupEvent {
    /// 分组已创建
    Created { group: Group },
    /// 分组字段已更新
    Updated {
        group: Group,
        updated_fields: Vec<GroupField>,
    },
}

impl GroupEvent {
    /// 获取事件名称
    pub fn event_name(&self) -> &'static str {
        match self {
            GroupEvent::Created { .. } => "group created",
            GroupEvent::Updated { .. } => "group updated",
        }
    }

    pub fn group(&self) -> &Group {
        match self {
            GroupEvent::Created { group } | GroupEvent::Updated { group, .. } => group,
        }
    }
}

/// 事件总线
///
/// 单消费者无界队列：分发器落后时事件在队列中等待，不会被覆盖。
pub struct EventBus {
    sender: mpsc::UnboundedSender<GroupEvent>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<GroupEvent>>>,
}

impl EventBus {
    /// 创建新的事件总线
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    /// 发布事件。接收端已关闭（分发器已退出）时返回 false。
    pub fn publish(&self, event: GroupEvent) -> bool {
        let name = event.event_name();
        let group_id = event.group().id;

        match self.sender.send(event) {
            Ok(()) => {
                metrics::counter!("events.published", "event" => name).increment(1);
                tracing::debug!(event = name, group_id = %group_id, "Event published");
                true
            }
            Err(_) => {
                tracing::warn!(event = name, group_id = %group_id, "Event dropped: dispatcher stopped");
                false
            }
        }
    }

    /// 取出接收端，只能取一次
    pub fn take_receiver(&self) -> Option<mpsc::UnboundedReceiver<GroupEvent>> {
        self.receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
