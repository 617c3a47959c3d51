//! 参与者注册表
//!
//! 持有全部参与者状态以及部署时指定的管理员身份。所有变更操作
//! 先经过这里的授权检查。注册表作为显式传递的状态结构存在，
//! 不依赖任何全局单例。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::Participant;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AccountId, Timestamp};

/// 授权失败时携带的原因分类。调用方依据错误种类分支，
/// 原因字符串用于区分"未注册"与"已停用"两类。
pub const REASON_NOT_AUTHORIZED: &str = "sender is not authorized";
pub const REASON_USER_INACTIVE: &str = "user inactive";

/// 参与者注册表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    /// 部署时指定的管理员身份，之后不再变更
    administrator: AccountId,
    /// 全部参与者，按身份地址索引；记录只增不删
    participants: HashMap<AccountId, Participant>,
}

impl Registry {
    /// 创建空注册表，绑定部署时管理员身份。
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            participants: HashMap::new(),
        }
    }

    /// 管理员身份
    pub fn administrator(&self) -> AccountId {
        self.administrator
    }

    /// 注册前置检查：昵称非空、昵称未被占用、身份未注册。
    /// 单独暴露，便于调用方把费用检查排在这些检查之后、
    /// 任何状态变更之前。
    pub fn check_registration(&self, id: AccountId, name: &str) -> DomainResult<()> {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }

        if self.participants.values().any(|p| p.name == name) {
            return Err(DomainError::duplicate_name(name));
        }

        if let Some(existing) = self.participants.get(&id) {
            // 身份已注册：按占用昵称处理，记录永不回收
            return Err(DomainError::duplicate_name(existing.name.clone()));
        }

        Ok(())
    }

    /// 注册新参与者。检查同 [`Self::check_registration`]。
    pub fn register(
        &mut self,
        id: AccountId,
        name: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<&Participant> {
        let name = name.into();
        self.check_registration(id, &name)?;

        let is_administrator = id == self.administrator;
        let participant = Participant::new(id, name, is_administrator, now)?;
        Ok(self.participants.entry(id).or_insert(participant))
    }

    /// 覆盖参与者昵称。不重新检查唯一性。
    pub fn rename(
        &mut self,
        id: AccountId,
        new_name: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<()> {
        let participant = self
            .participants
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound { account: id })?;
        participant.rename(new_name, now);
        Ok(())
    }

    /// 停用参与者。返回状态是否真的翻转；重复停用是无操作成功。
    pub fn disable(&mut self, target: AccountId, now: Timestamp) -> DomainResult<bool> {
        let participant = self
            .participants
            .get_mut(&target)
            .ok_or(DomainError::UserNotFound { account: target })?;
        Ok(participant.disable(now))
    }

    /// 按身份查找参与者。已停用的参与者仍然可以被找到。
    pub fn lookup(&self, id: AccountId) -> DomainResult<&Participant> {
        self.participants
            .get(&id)
            .ok_or(DomainError::UserNotFound { account: id })
    }

    /// 授权门：要求身份是已注册且有效的参与者。
    /// 未注册与已停用都返回 `Unauthorized`，但原因分类不同。
    pub fn require_active(&self, id: AccountId) -> DomainResult<&Participant> {
        let participant = self
            .participants
            .get(&id)
            .ok_or_else(|| DomainError::unauthorized(REASON_NOT_AUTHORIZED))?;

        if !participant.is_active() {
            return Err(DomainError::unauthorized(REASON_USER_INACTIVE));
        }
        Ok(participant)
    }

    /// 授权门：要求身份是部署时指定的管理员。
    /// 只比较身份，不要求管理员本人已注册。
    pub fn require_administrator(&self, id: AccountId) -> DomainResult<()> {
        if id != self.administrator {
            return Err(DomainError::unauthorized(REASON_NOT_AUTHORIZED));
        }
        Ok(())
    }

    /// 已注册参与者数量
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn registry() -> (Registry, AccountId) {
        let admin = AccountId::random();
        (Registry::new(admin), admin)
    }

    #[test]
    fn test_register_sets_administrator_flag() {
        let (mut registry, admin) = registry();
        let user = AccountId::random();

        let owner = registry.register(admin, "owner", Utc::now()).unwrap();
        assert!(owner.is_administrator);

        let regular = registry.register(user, "user2", Utc::now()).unwrap();
        assert!(!regular.is_administrator);
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let (mut registry, _) = registry();
        let result = registry.register(AccountId::random(), "", Utc::now());
        assert_eq!(result.unwrap_err(), DomainError::EmptyName);
    }

    #[test]
    fn test_register_rejects_duplicate_name() {
        let (mut registry, _) = registry();
        registry
            .register(AccountId::random(), "user2", Utc::now())
            .unwrap();

        let result = registry.register(AccountId::random(), "user2", Utc::now());
        assert_eq!(result.unwrap_err(), DomainError::duplicate_name("user2"));
    }

    #[test]
    fn test_register_rejects_registered_identity() {
        let (mut registry, _) = registry();
        let id = AccountId::random();
        registry.register(id, "alice", Utc::now()).unwrap();

        let result = registry.register(id, "alice-again", Utc::now());
        assert_eq!(result.unwrap_err(), DomainError::duplicate_name("alice"));
    }

    #[test]
    fn test_duplicate_check_includes_disabled_participants() {
        let (mut registry, _) = registry();
        let id = AccountId::random();
        registry.register(id, "alice", Utc::now()).unwrap();
        registry.disable(id, Utc::now()).unwrap();

        // 已停用参与者的昵称仍然占用
        let result = registry.register(AccountId::random(), "alice", Utc::now());
        assert_eq!(result.unwrap_err(), DomainError::duplicate_name("alice"));
    }

    #[test]
    fn test_rename_does_not_recheck_uniqueness() {
        let (mut registry, _) = registry();
        let a = AccountId::random();
        let b = AccountId::random();
        registry.register(a, "alice", Utc::now()).unwrap();
        registry.register(b, "bob", Utc::now()).unwrap();

        // 改名不检查唯一性，允许出现昵称冲突
        registry.rename(b, "alice", Utc::now()).unwrap();
        assert_eq!(registry.lookup(b).unwrap().name, "alice");
        assert_eq!(registry.lookup(a).unwrap().name, "alice");
    }

    #[test]
    fn test_lookup_not_found() {
        let (registry, _) = registry();
        let unknown = AccountId::random();
        assert_eq!(
            registry.lookup(unknown).unwrap_err(),
            DomainError::UserNotFound { account: unknown }
        );
    }

    #[test]
    fn test_lookup_finds_disabled_participant() {
        let (mut registry, _) = registry();
        let id = AccountId::random();
        registry.register(id, "alice", Utc::now()).unwrap();
        registry.disable(id, Utc::now()).unwrap();

        let found = registry.lookup(id).unwrap();
        assert_eq!(found.name, "alice");
        assert!(!found.is_active());
    }

    #[test]
    fn test_disable_unknown_target() {
        let (mut registry, _) = registry();
        let unknown = AccountId::random();
        assert_eq!(
            registry.disable(unknown, Utc::now()).unwrap_err(),
            DomainError::UserNotFound { account: unknown }
        );
    }

    #[test]
    fn test_disable_twice_is_noop() {
        let (mut registry, _) = registry();
        let id = AccountId::random();
        registry.register(id, "alice", Utc::now()).unwrap();

        assert!(registry.disable(id, Utc::now()).unwrap());
        assert!(!registry.disable(id, Utc::now()).unwrap());
    }

    #[test]
    fn test_require_active_distinguishes_reasons() {
        let (mut registry, _) = registry();
        let id = AccountId::random();

        // 未注册
        assert_eq!(
            registry.require_active(id).unwrap_err(),
            DomainError::unauthorized(REASON_NOT_AUTHORIZED)
        );

        // 已注册但停用
        registry.register(id, "alice", Utc::now()).unwrap();
        registry.disable(id, Utc::now()).unwrap();
        assert_eq!(
            registry.require_active(id).unwrap_err(),
            DomainError::unauthorized(REASON_USER_INACTIVE)
        );
    }

    #[test]
    fn test_require_administrator() {
        let (registry, admin) = registry();

        assert!(registry.require_administrator(admin).is_ok());
        assert_eq!(
            registry
                .require_administrator(AccountId::random())
                .unwrap_err(),
            DomainError::unauthorized(REASON_NOT_AUTHORIZED)
        );
    }
}
