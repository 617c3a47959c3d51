//! 主应用程序入口
//!
//! 装配留言板核心并演示一次完整会话：加载配置、初始化日志、
//! 创建消息计数器并把所有权移交给留言板服务，然后注册参与者、
//! 发布消息、标记已读、提取余额，把产生的事件逐条打到日志。

use std::sync::Arc;

use application::{BoardService, MessageSequence, SystemClock};
use config::BoardConfig;
use domain::{AccountId, Amount, BoardEvent};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // 读取配置
    let config = BoardConfig::load()?;

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.filter.clone())),
        )
        .init();

    let administrator = config
        .administrator
        .map(AccountId::new)
        .unwrap_or_else(AccountId::random);
    let registration_fee = Amount::new(config.fees.registration);
    let name_change_fee = Amount::new(config.fees.name_change);

    tracing::info!(
        "部署留言板: 管理员 {}, 注册费 {}, 改名费 {}",
        administrator,
        registration_fee,
        name_change_fee
    );

    // 先部署计数器，再把所有权移交给留言板服务
    let counter = MessageSequence::new();
    let mut board = BoardService::new(
        administrator,
        registration_fee,
        name_change_fee,
        counter.transfer_ownership(),
        Arc::new(SystemClock),
    );

    // 演示会话
    let user2 = AccountId::random();
    board.register(administrator, "owner", registration_fee)?;
    board.register(user2, "user2", registration_fee)?;

    let (id, events) = board.post_message(administrator, "Hola, este es un mensaje de prueba")?;
    deliver(&events);
    tracing::info!("消息 {} 已发布, 历史总数 {}", id, board.total_messages());

    tracing::info!("user2 未读数: {}", board.unread_count_for(user2)?);
    deliver(&board.mark_all_read(user2)?);
    tracing::info!("user2 未读数: {}", board.unread_count_for(user2)?);

    let (amount, events) = board.withdraw(administrator)?;
    deliver(&events);
    tracing::info!("已提取余额 {}", amount);

    Ok(())
}

/// 事件投递由外部环境负责；这里把每个事件打到日志。
fn deliver(events: &[BoardEvent]) {
    for event in events {
        tracing::info!("事件 {}: {:?}", event.event_type(), event);
    }
}
