//! 领域事件

pub mod board_event;

pub use board_event::{BoardEvent, ReadReceipt};
