//! 消息账本
//!
//! 持有只追加的消息序列和每个参与者的已读集合。消息编号与序列
//! 下标一一对应：无空洞、不复用，删除只翻转标志位而不移除记录。
//! 已读集合只通过"全部标记已读"操作变更，删除消息不会触碰任何
//! 参与者的已读位。

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::entities::Message;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AccountId, MessageId};

/// 消息账本
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// 全部消息，按发布顺序存放；下标即编号
    messages: Vec<Message>,
    /// 每个参与者显式标记过已读的消息编号
    read_state: HashMap<AccountId, BTreeSet<MessageId>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条消息。编号必须等于当前序列长度。
    pub fn append(&mut self, message: Message) -> MessageId {
        debug_assert_eq!(message.id.index(), self.messages.len());
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// 按编号取消息
    pub fn get(&self, id: MessageId) -> DomainResult<&Message> {
        self.messages
            .get(id.index())
            .ok_or(DomainError::MessageNotFound { id })
    }

    /// 标记删除。目标必须存在且尚未删除。
    pub fn mark_deleted(&mut self, id: MessageId) -> DomainResult<()> {
        let message = self
            .messages
            .get_mut(id.index())
            .ok_or(DomainError::MessageNotFound { id })?;
        message.mark_deleted()
    }

    /// 全部消息（含已删除），发布顺序
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// 指定参与者的未读消息：未删除且不在其已读集合中，编号升序。
    pub fn unread_for(&self, account: AccountId) -> Vec<&Message> {
        let read = self.read_state.get(&account);
        self.messages
            .iter()
            .filter(|m| m.is_visible())
            .filter(|m| read.map_or(true, |set| !set.contains(&m.id)))
            .collect()
    }

    /// 某条消息对某参与者是否已读
    pub fn is_read(&self, account: AccountId, id: MessageId) -> bool {
        self.read_state
            .get(&account)
            .map_or(false, |set| set.contains(&id))
    }

    /// 把当前全部未读的未删除消息一次性标记为该参与者已读，
    /// 返回本次新标记的编号（升序）。
    pub fn mark_all_read(&mut self, account: AccountId) -> Vec<MessageId> {
        let newly_read: Vec<MessageId> = self
            .unread_for(account)
            .iter()
            .map(|m| m.id)
            .collect();

        if !newly_read.is_empty() {
            let set = self.read_state.entry(account).or_default();
            set.extend(newly_read.iter().copied());
        }
        newly_read
    }

    /// 历史消息总数（含已删除）
    pub fn total(&self) -> usize {
        self.messages.len()
    }
}
