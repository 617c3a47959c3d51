//! 核心实体定义

pub mod message;
pub mod participant;

pub use message::{Message, MAX_MESSAGE_LENGTH};
pub use participant::Participant;
