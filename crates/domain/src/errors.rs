//! 领域模型错误定义
//!
//! 定义了系统中所有可能的错误类型。每个失败都会在任何状态变更之前
//! 同步返回，调用方可以依据具体的错误种类进行分支处理。

use thiserror::Error;

use crate::value_objects::{AccountId, Amount, MessageId};

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 昵称为空
    #[error("昵称不能为空")]
    EmptyName,

    /// 昵称已被占用
    #[error("用户已存在: {name}")]
    DuplicateName { name: String },

    /// 支付金额不足
    #[error("支付金额不足: 需要 {required}, 实际 {paid}")]
    InsufficientPayment { required: Amount, paid: Amount },

    /// 消息内容超长
    #[error("消息超过 {limit} 个字符: 实际 {length}")]
    MessageTooLong { length: usize, limit: usize },

    /// 消息不存在
    #[error("消息不存在: {id}")]
    MessageNotFound { id: MessageId },

    /// 消息已被删除
    #[error("消息已删除: {id}")]
    MessageAlreadyDeleted { id: MessageId },

    /// 用户不存在
    #[error("用户不存在: {account}")]
    UserNotFound { account: AccountId },

    /// 未通过授权检查
    #[error("未授权: {reason}")]
    Unauthorized { reason: String },

    /// 余额为零，无可提取金额
    #[error("余额为空，无可提取金额")]
    EmptyBalance,
}

impl DomainError {
    /// 创建昵称占用错误
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// 创建支付不足错误
    pub fn insufficient_payment(required: Amount, paid: Amount) -> Self {
        Self::InsufficientPayment { required, paid }
    }

    /// 创建授权错误
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// 创建用户不存在错误
    pub fn user_not_found(account: AccountId) -> Self {
        Self::UserNotFound { account }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
