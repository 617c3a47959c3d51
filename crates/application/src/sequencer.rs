//! 消息计数服务
//!
//! 外部协作者：提供从 0 开始严格递增的消息编号。部署时先创建
//! 计数器，再把所有权一次性移交给留言板服务；移交后只有持有
//! 句柄的一方能推进计数。独占写入由移动语义保证，无需运行时检查。

use domain::MessageId;
use serde::{Deserialize, Serialize};

/// 消息计数器。部署形态，尚未绑定任何持有者。
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MessageSequence {
    next: u64,
}

impl MessageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 移交所有权。消耗计数器本身，返回唯一的推进句柄；
    /// 此后不再存在其他访问路径。
    pub fn transfer_ownership(self) -> SequencerHandle {
        SequencerHandle { inner: self }
    }
}

/// 计数器的独占句柄。不可克隆、不可复制，只能被移动进持有方。
#[derive(Debug, Serialize, Deserialize)]
pub struct SequencerHandle {
    inner: MessageSequence,
}

impl SequencerHandle {
    /// 取下一个编号并推进计数
    pub fn next(&mut self) -> MessageId {
        let id = MessageId::new(self.inner.next);
        self.inner.next += 1;
        id
    }

    /// 已分配的编号数量
    pub fn issued(&self) -> u64 {
        self.inner.next
    }
}
