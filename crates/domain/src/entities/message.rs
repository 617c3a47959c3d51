//! 消息实体定义
//!
//! 消息一经写入账本就不再移动：编号不可变，删除只翻转标志位，
//! 序列中的位置保持稳定。

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AccountId, MessageId, Timestamp};

/// 单条消息的最大长度（字符数）
pub const MAX_MESSAGE_LENGTH: usize = 300;

/// 消息实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// 消息编号，按发布顺序分配
    pub id: MessageId,
    /// 发布者身份
    pub author: AccountId,
    /// 消息内容
    pub content: String,
    /// 删除标志；一旦为 true 不可恢复
    pub deleted: bool,
    /// 发布时间
    pub created_at: Timestamp,
}

impl Message {
    /// 创建新消息。内容校验先于一切状态变更。
    pub fn new(
        id: MessageId,
        author: AccountId,
        content: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<Self> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id,
            author,
            content,
            deleted: false,
            created_at: now,
        })
    }

    /// 验证消息内容长度
    pub fn validate_content(content: &str) -> DomainResult<()> {
        let length = content.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(DomainError::MessageTooLong {
                length,
                limit: MAX_MESSAGE_LENGTH,
            });
        }
        Ok(())
    }

    /// 标记删除。重复删除是错误，删除不可撤销。
    pub fn mark_deleted(&mut self) -> DomainResult<()> {
        if self.deleted {
            return Err(DomainError::MessageAlreadyDeleted { id: self.id });
        }
        self.deleted = true;
        Ok(())
    }

    /// 检查消息是否可见（未删除）
    pub fn is_visible(&self) -> bool {
        !self.deleted
    }
}
