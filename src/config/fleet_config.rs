// ==========================================
// 地铁车辆检修管理 - 系统配置
// ==========================================
// 职责: 配置加载、默认值、校验
// 存储: JSON 文件 (路径由 METRO_FLEET_CONFIG 指定)
// ==========================================

use crate::error::{FleetError, FleetResult};
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// 配置键 / 默认值
// ==========================================
pub mod config_keys {
    /// 配置文件路径的环境变量
    pub const CONFIG_PATH_ENV: &str = "METRO_FLEET_CONFIG";

    pub const DEFAULT_CURRENCY: &str = "CNY";
    pub const DEFAULT_UPCOMING_HORIZON_DAYS: i64 = 30;
    pub const MAX_UPCOMING_HORIZON_DAYS: i64 = 3650;
    pub const DEFAULT_STATISTICS_UPCOMING_LIMIT: usize = 5;
}

// ==========================================
// FleetConfig - 系统配置
// ==========================================
/// 缺失的键取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub default_locale: Locale,           // 默认界面语言
    pub default_currency: String,         // 默认币种
    pub upcoming_horizon_days: i64,       // 即将开始计划的时间窗口 (天)
    pub statistics_upcoming_limit: usize, // 统计摘要中即将开始计划条数
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            default_currency: config_keys::DEFAULT_CURRENCY.to_string(),
            upcoming_horizon_days: config_keys::DEFAULT_UPCOMING_HORIZON_DAYS,
            statistics_upcoming_limit: config_keys::DEFAULT_STATISTICS_UPCOMING_LIMIT,
        }
    }
}

impl FleetConfig {
    /// 从 JSON 文件加载配置并校验
    pub fn load(path: impl AsRef<Path>) -> FleetResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| FleetError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: FleetConfig =
            serde_json::from_str(&raw).map_err(|e| FleetError::ConfigParse(e.to_string()))?;
        config.validate()?;

        tracing::info!(path = %path.display(), "配置加载完成");
        Ok(config)
    }

    /// 读取 METRO_FLEET_CONFIG 指定的文件; 未设置时使用默认配置
    pub fn from_env() -> FleetResult<Self> {
        match std::env::var(config_keys::CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => {
                tracing::debug!("未设置 {}, 使用默认配置", config_keys::CONFIG_PATH_ENV);
                Ok(Self::default())
            }
        }
    }

    /// 校验配置
    ///
    /// - upcoming_horizon_days 取值 0..=MAX_UPCOMING_HORIZON_DAYS
    /// - statistics_upcoming_limit 不能为 0
    /// - default_currency 不能为空
    pub fn validate(&self) -> FleetResult<()> {
        if self.upcoming_horizon_days < 0 {
            return Err(FleetError::ConfigParse(format!(
                "upcoming_horizon_days 不能为负: {}",
                self.upcoming_horizon_days
            )));
        }
        if self.upcoming_horizon_days > config_keys::MAX_UPCOMING_HORIZON_DAYS {
            return Err(FleetError::ConfigParse(format!(
                "upcoming_horizon_days 超出上限 {}: {}",
                config_keys::MAX_UPCOMING_HORIZON_DAYS,
                self.upcoming_horizon_days
            )));
        }
        if self.statistics_upcoming_limit == 0 {
            return Err(FleetError::ConfigParse(
                "statistics_upcoming_limit 必须大于 0".to_string(),
            ));
        }
        if self.default_currency.trim().is_empty() {
            return Err(FleetError::ConfigParse("default_currency 不能为空".to_string()));
        }
        Ok(())
    }
}
