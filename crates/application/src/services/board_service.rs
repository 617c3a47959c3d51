//! 留言板服务
//!
//! 实现留言板的全部公开操作：注册、改名、停用、发布、未读查询、
//! 全部标记已读、删除、费用与余额管理。每个操作都按同一顺序执行：
//! 先过授权门，再做输入校验，然后变更状态，最后产生事件。任何
//! 失败都在变更之前返回，不留下部分效果，也不产生事件。
//!
//! 执行模型是单线程串行的：变更操作以 `&mut self` 进入，天然
//! 一次只有一个操作在改共享状态，外部并发提交由调用环境排队。

use std::sync::Arc;

use tracing::{debug, info};

use domain::{
    AccountId, Amount, BoardEvent, Ledger, Message, MessageId, Participant, ReadReceipt, Registry,
    Treasury,
};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::errors::ApplicationResult;
use crate::sequencer::SequencerHandle;

/// 未读查询的返回项：消息与其发布者。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageWithAuthor {
    pub message: Message,
    pub author: Participant,
}

/// 留言板服务。独占持有注册表、账本、金库与计数器句柄。
pub struct BoardService {
    registry: Registry,
    ledger: Ledger,
    treasury: Treasury,
    sequencer: SequencerHandle,
    clock: Arc<dyn Clock>,
}

impl BoardService {
    /// 创建留言板服务。计数器句柄在这里被移交，此后只有本服务
    /// 能推进消息编号。
    pub fn new(
        administrator: AccountId,
        registration_fee: Amount,
        name_change_fee: Amount,
        sequencer: SequencerHandle,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry: Registry::new(administrator),
            ledger: Ledger::new(),
            treasury: Treasury::new(registration_fee, name_change_fee),
            sequencer,
            clock,
        }
    }

    /// 注册新参与者。昵称非空且唯一，支付额不低于注册费；
    /// 成功后支付额记入金库。
    pub fn register(
        &mut self,
        caller: AccountId,
        name: impl Into<String>,
        paid: Amount,
    ) -> ApplicationResult<Participant> {
        let name = name.into();
        // 昵称检查在前，支付检查在后
        self.registry.check_registration(caller, &name)?;
        self.treasury.check_registration_payment(paid)?;

        let now = self.clock.now();
        let participant = self.registry.register(caller, name, now)?.clone();
        self.treasury.credit(paid);

        info!("参与者 {} 注册为 {:?}", caller, participant.name);
        Ok(participant)
    }

    /// 覆盖调用者自己的昵称。要求调用者是有效参与者，支付额不低于
    /// 改名费。不重新检查昵称唯一性。
    pub fn rename(
        &mut self,
        caller: AccountId,
        new_name: impl Into<String>,
        paid: Amount,
    ) -> ApplicationResult<Vec<BoardEvent>> {
        self.registry.require_active(caller)?;
        self.treasury.check_rename_payment(paid)?;

        let new_name = new_name.into();
        let now = self.clock.now();
        self.registry.rename(caller, new_name.clone(), now)?;
        self.treasury.credit(paid);

        info!("参与者 {} 改名为 {:?}", caller, new_name);
        Ok(vec![BoardEvent::name_changed(caller, new_name)])
    }

    /// 停用参与者。管理员专用；目标必须已注册。重复停用是
    /// 无操作成功，不再产生事件。
    pub fn disable(
        &mut self,
        caller: AccountId,
        target: AccountId,
    ) -> ApplicationResult<Vec<BoardEvent>> {
        self.registry.require_administrator(caller)?;

        let now = self.clock.now();
        let changed = self.registry.disable(target, now)?;
        if !changed {
            debug!("参与者 {} 已处于停用状态", target);
            return Ok(Vec::new());
        }

        info!("参与者 {} 被管理员停用", target);
        Ok(vec![BoardEvent::user_disabled(target)])
    }

    /// 按身份查找参与者。已停用的参与者仍然可以被找到。
    pub fn lookup(&self, identity: AccountId) -> ApplicationResult<Participant> {
        Ok(self.registry.lookup(identity)?.clone())
    }

    /// 发布消息。内容校验先于计数器推进，失败时编号不被消耗。
    /// 新消息对所有参与者（包括发布者本人）都是未读。
    pub fn post_message(
        &mut self,
        caller: AccountId,
        content: impl Into<String>,
    ) -> ApplicationResult<(MessageId, Vec<BoardEvent>)> {
        self.registry.require_active(caller)?;

        let content = content.into();
        Message::validate_content(&content)?;

        let id = self.sequencer.next();
        let now = self.clock.now();
        let message = Message::new(id, caller, content.clone(), now)?;
        self.ledger.append(message);

        info!("参与者 {} 发布消息 {}", caller, id);
        Ok((id, vec![BoardEvent::message_posted(id, caller, content)]))
    }

    /// 全部消息（含已删除），发布顺序。任何有效参与者可读。
    pub fn list_all(&self, caller: AccountId) -> ApplicationResult<Vec<Message>> {
        self.registry.require_active(caller)?;
        Ok(self.ledger.all().to_vec())
    }

    /// 调用者的未读消息：未删除且未被其标记已读，编号升序，
    /// 每条消息附带发布者记录。
    pub fn unread_for(&self, caller: AccountId) -> ApplicationResult<Vec<MessageWithAuthor>> {
        self.registry.require_active(caller)?;

        self.ledger
            .unread_for(caller)
            .into_iter()
            .map(|message| {
                let author = self.registry.lookup(message.author)?.clone();
                Ok(MessageWithAuthor {
                    message: message.clone(),
                    author,
                })
            })
            .collect()
    }

    /// 调用者的未读消息数量。与 [`Self::unread_for`] 共享过滤逻辑。
    pub fn unread_count_for(&self, caller: AccountId) -> ApplicationResult<usize> {
        self.registry.require_active(caller)?;
        Ok(self.ledger.unread_for(caller).len())
    }

    /// 把当前全部未读的未删除消息一次性标记为调用者已读，并产生
    /// 一个批量事件，把每条被标记的消息与读者配对。没有可标记的
    /// 消息时是无操作成功，不产生事件。
    pub fn mark_all_read(&mut self, caller: AccountId) -> ApplicationResult<Vec<BoardEvent>> {
        self.registry.require_active(caller)?;

        let newly_read = self.ledger.mark_all_read(caller);
        if newly_read.is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<ReadReceipt> = newly_read
            .iter()
            .map(|id| {
                let message = self.ledger.get(*id)?.clone();
                Ok(ReadReceipt {
                    message,
                    reader: caller,
                })
            })
            .collect::<ApplicationResult<_>>()?;

        info!("参与者 {} 标记 {} 条消息已读", caller, entries.len());
        Ok(vec![BoardEvent::read_state_updated(entries)])
    }

    /// 删除消息。调用者必须是有效参与者，且是消息发布者或管理员。
    /// 删除不触碰任何参与者的已读状态。
    pub fn delete_message(&mut self, caller: AccountId, id: MessageId) -> ApplicationResult<()> {
        self.registry.require_active(caller)?;

        let message = self.ledger.get(id)?;
        if message.deleted {
            return Err(domain::DomainError::MessageAlreadyDeleted { id }.into());
        }
        if message.author != caller && caller != self.registry.administrator() {
            return Err(
                domain::DomainError::unauthorized(domain::REASON_NOT_AUTHORIZED).into(),
            );
        }

        self.ledger.mark_deleted(id)?;
        info!("参与者 {} 删除消息 {}", caller, id);
        Ok(())
    }

    /// 历史消息总数（含已删除）。公开可读。
    pub fn total_messages(&self) -> usize {
        self.ledger.total()
    }

    /// 当前注册费
    pub fn registration_fee(&self) -> Amount {
        self.treasury.registration_fee()
    }

    /// 当前金库余额
    pub fn balance(&self) -> Amount {
        self.treasury.balance()
    }

    /// 无条件替换注册费。管理员专用。
    pub fn set_fee(
        &mut self,
        caller: AccountId,
        new_fee: Amount,
    ) -> ApplicationResult<Vec<BoardEvent>> {
        self.registry.require_administrator(caller)?;

        self.treasury.set_registration_fee(new_fee);
        info!("注册费调整为 {}", new_fee);
        Ok(vec![BoardEvent::fee_changed(new_fee)])
    }

    /// 全额提取金库余额。管理员专用；余额为零时失败。
    pub fn withdraw(
        &mut self,
        caller: AccountId,
    ) -> ApplicationResult<(Amount, Vec<BoardEvent>)> {
        self.registry.require_administrator(caller)?;

        let amount = self.treasury.withdraw_all()?;
        info!("管理员 {} 提取余额 {}", caller, amount);
        Ok((amount, vec![BoardEvent::balance_withdrawn(caller, amount)]))
    }
}
