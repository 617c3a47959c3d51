//! 应用层错误定义

use domain::DomainError;
use thiserror::Error;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 领域层错误
    #[error("领域错误: {0}")]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// 取底层领域错误，供调用方按错误种类分支。
    pub fn domain(&self) -> &DomainError {
        match self {
            ApplicationError::Domain(err) => err,
        }
    }
}

/// 应用层结果类型
pub type ApplicationResult<T> = Result<T, ApplicationError>;
