//! 留言板相关的领域事件
//!
//! 每个成功的变更操作把产生的事件作为显式输出返回给调用方，
//! 由外部环境负责投递；失败的操作不产生任何事件。

use serde::{Deserialize, Serialize};

use crate::entities::Message;
use crate::value_objects::{AccountId, Amount, MessageId};

/// 已读回执：一条消息与读它的参与者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadReceipt {
    pub message: Message,
    pub reader: AccountId,
}

/// 留言板领域事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// 消息发布事件
    MessagePosted {
        id: MessageId,
        author: AccountId,
        content: String,
    },

    /// 已读状态批量更新事件
    ReadStateUpdated { entries: Vec<ReadReceipt> },

    /// 余额提取事件
    BalanceWithdrawn {
        recipient: AccountId,
        amount: Amount,
    },

    /// 昵称变更事件
    NameChanged { account: AccountId, name: String },

    /// 参与者停用事件
    UserDisabled { account: AccountId },

    /// 注册费调整事件
    FeeChanged { fee: Amount },
}

impl BoardEvent {
    /// 创建消息发布事件
    pub fn message_posted(id: MessageId, author: AccountId, content: impl Into<String>) -> Self {
        BoardEvent::MessagePosted {
            id,
            author,
            content: content.into(),
        }
    }

    /// 创建已读状态更新事件
    pub fn read_state_updated(entries: Vec<ReadReceipt>) -> Self {
        BoardEvent::ReadStateUpdated { entries }
    }

    /// 创建余额提取事件
    pub fn balance_withdrawn(recipient: AccountId, amount: Amount) -> Self {
        BoardEvent::BalanceWithdrawn { recipient, amount }
    }

    /// 创建昵称变更事件
    pub fn name_changed(account: AccountId, name: impl Into<String>) -> Self {
        BoardEvent::NameChanged {
            account,
            name: name.into(),
        }
    }

    /// 创建参与者停用事件
    pub fn user_disabled(account: AccountId) -> Self {
        BoardEvent::UserDisabled { account }
    }

    /// 创建注册费调整事件
    pub fn fee_changed(fee: Amount) -> Self {
        BoardEvent::FeeChanged { fee }
    }

    /// 获取事件类型名称
    pub fn event_type(&self) -> &'static str {
        match self {
            BoardEvent::MessagePosted { .. } => "MessagePosted",
            BoardEvent::ReadStateUpdated { .. } => "ReadStateUpdated",
            BoardEvent::BalanceWithdrawn { .. } => "BalanceWithdrawn",
            BoardEvent::NameChanged { .. } => "NameChanged",
            BoardEvent::UserDisabled { .. } => "UserDisabled",
            BoardEvent::FeeChanged { .. } => "FeeChanged",
        }
    }

    /// 检查事件是否涉及特定参与者
    pub fn involves_account(&self, account: AccountId) -> bool {
        match self {
            BoardEvent::MessagePosted { author, .. } => *author == account,
            BoardEvent::ReadStateUpdated { entries } => entries
                .iter()
                .any(|e| e.reader == account || e.message.author == account),
            BoardEvent::BalanceWithdrawn { recipient, .. } => *recipient == account,
            BoardEvent::NameChanged { account: a, .. }
            | BoardEvent::UserDisabled { account: a } => *a == account,
            BoardEvent::FeeChanged { .. } => false,
        }
    }
}
