//! 统一配置中心
//!
//! 提供留言板的部署配置，包括：
//! - 管理员身份
//! - 费用表（注册费、改名费）
//! - 日志过滤
//!
//! 加载顺序：内置默认值 → 可选的 board.toml → `BOARD_*` 环境变量，
//! 后者覆盖前者。

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 默认注册费（0.01 个基础单位）
pub const DEFAULT_REGISTRATION_FEE: u128 = 10_000_000_000_000_000;
/// 默认改名费（0.001 个基础单位）
pub const DEFAULT_NAME_CHANGE_FEE: u128 = 1_000_000_000_000_000;

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// 部署时的管理员身份；缺省时由启动方生成
    pub administrator: Option<Uuid>,
    /// 费用表
    pub fees: FeeConfig,
    /// 日志配置
    pub log: LogConfig,
}

/// 费用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    /// 注册所需的最低支付额
    pub registration: u128,
    /// 改名所需的最低支付额
    pub name_change: u128,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing 过滤表达式
    pub filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            administrator: None,
            fees: FeeConfig {
                registration: DEFAULT_REGISTRATION_FEE,
                name_change: DEFAULT_NAME_CHANGE_FEE,
            },
            log: LogConfig {
                filter: "info".to_string(),
            },
        }
    }
}

impl BoardConfig {
    /// 按默认值 → board.toml → 环境变量的顺序加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("board.toml"))
            .merge(Env::prefixed("BOARD_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 改名费是比注册费更低的一档门槛
        if self.fees.name_change > self.fees.registration {
            return Err(ConfigError::InvalidFees(format!(
                "name change fee {} exceeds registration fee {}",
                self.fees.name_change, self.fees.registration
            )));
        }

        if self.log.filter.is_empty() {
            return Err(ConfigError::InvalidLogFilter(
                "log filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid fee schedule: {0}")]
    InvalidFees(String),
    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
    #[error("Configuration extraction failed: {0}")]
    Extraction(#[from] figment::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fees.registration, DEFAULT_REGISTRATION_FEE);
        assert_eq!(config.fees.name_change, DEFAULT_NAME_CHANGE_FEE);
        assert!(config.administrator.is_none());
    }

    #[test]
    fn test_name_change_fee_must_not_exceed_registration_fee() {
        let mut config = BoardConfig::default();
        config.fees.name_change = config.fees.registration + 1;
        assert!(config.validate().is_err());

        // 相等是允许的边界
        config.fees.name_change = config.fees.registration;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_log_filter_rejected() {
        let mut config = BoardConfig::default();
        config.log.filter = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BOARD_FEES__REGISTRATION", "42");
            jail.set_env("BOARD_FEES__NAME_CHANGE", "7");

            let config = BoardConfig::load().expect("config should load");
            assert_eq!(config.fees.registration, 42);
            assert_eq!(config.fees.name_change, 7);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "board.toml",
                r#"
                    [fees]
                    registration = 1000
                    name_change = 10

                    [log]
                    filter = "debug"
                "#,
            )?;

            let config = BoardConfig::load().expect("config should load");
            assert_eq!(config.fees.registration, 1000);
            assert_eq!(config.fees.name_change, 10);
            assert_eq!(config.log.filter, "debug");
            Ok(())
        });
    }
}
