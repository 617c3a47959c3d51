//! 费用与金库
//!
//! 注册费可由管理员调整；改名费在构造时固定。余额只通过付费
//! 操作增加，只通过全额提取清零。

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::Amount;

/// 金库状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasury {
    /// 注册所需的最低支付额，管理员可调整
    registration_fee: Amount,
    /// 改名所需的最低支付额，固定不变
    name_change_fee: Amount,
    /// 已累积的费用余额
    balance: Amount,
}

impl Treasury {
    pub fn new(registration_fee: Amount, name_change_fee: Amount) -> Self {
        Self {
            registration_fee,
            name_change_fee,
            balance: Amount::ZERO,
        }
    }

    pub fn registration_fee(&self) -> Amount {
        self.registration_fee
    }

    pub fn name_change_fee(&self) -> Amount {
        self.name_change_fee
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// 校验注册支付额
    pub fn check_registration_payment(&self, paid: Amount) -> DomainResult<()> {
        if paid < self.registration_fee {
            return Err(DomainError::insufficient_payment(
                self.registration_fee,
                paid,
            ));
        }
        Ok(())
    }

    /// 校验改名支付额
    pub fn check_rename_payment(&self, paid: Amount) -> DomainResult<()> {
        if paid < self.name_change_fee {
            return Err(DomainError::insufficient_payment(self.name_change_fee, paid));
        }
        Ok(())
    }

    /// 把支付额记入余额
    pub fn credit(&mut self, paid: Amount) {
        self.balance = self.balance.saturating_add(paid);
    }

    /// 无条件替换注册费
    pub fn set_registration_fee(&mut self, fee: Amount) {
        self.registration_fee = fee;
    }

    /// 全额提取。余额为零时失败；成功后余额归零。
    pub fn withdraw_all(&mut self) -> DomainResult<Amount> {
        if self.balance.is_zero() {
            return Err(DomainError::EmptyBalance);
        }
        let amount = self.balance;
        self.balance = Amount::ZERO;
        Ok(amount)
    }
}
