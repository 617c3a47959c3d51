//! 留言板系统核心领域模型
//!
//! 包含参与者、消息、账本等核心实体，以及注册、已读跟踪、
//! 费用记账相关的业务规则。

pub mod entities;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod treasury;
pub mod value_objects;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use ledger::*;
pub use registry::*;
pub use treasury::*;
pub use value_objects::*;
