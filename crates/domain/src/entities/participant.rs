//! 参与者实体定义
//!
//! 包含参与者的核心信息和相关操作。

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AccountId, Timestamp};

/// 参与者实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// 身份地址
    pub id: AccountId,
    /// 昵称（注册时全局唯一）
    pub name: String,
    /// 是否有效；false 表示已被管理员停用，失去全部读写能力
    pub active: bool,
    /// 是否为管理员；部署时唯一指定，之后不转移
    pub is_administrator: bool,
    /// 注册时间
    pub created_at: Timestamp,
    /// 更新时间
    pub updated_at: Timestamp,
}

impl Participant {
    /// 创建新参与者。昵称必须非空。
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        is_administrator: bool,
        now: Timestamp,
    ) -> DomainResult<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            active: true,
            is_administrator,
            created_at: now,
            updated_at: now,
        })
    }

    /// 覆盖昵称。唯一性由调用方决定是否检查。
    pub fn rename(&mut self, new_name: impl Into<String>, now: Timestamp) {
        self.name = new_name.into();
        self.updated_at = now;
    }

    /// 停用参与者。返回状态是否真的发生了翻转，
    /// 对已停用的参与者重复调用是无操作。
    pub fn disable(&mut self, now: Timestamp) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.updated_at = now;
        true
    }

    /// 检查参与者是否有效
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 验证昵称
    fn validate_name(name: &str) -> DomainResult<()> {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(())
    }
}
