// ==========================================
// 地铁车辆检修管理 - 核心库
// ==========================================
// 系统定位: 车辆档案、编组编号、大修计划派生指标、易损件磨耗预测
// 红线: 派生字段只计算不入库, 显示语言由调用方显式传入
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日期解析
pub mod dates;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CarriageType, ComponentType, FormationType, ItemStatus, MaintenanceLevel, OverhaulLevel,
    OverhaulStatus, OverhaulType, RiskLevel, SpecialType, TagType, VehicleStatus, VehicleType,
};

// 领域实体
pub use domain::{
    Carriage, ComponentMeasurement, OverhaulItem, OverhaulPlan, OverhaulRecord, OverhaulStandard,
    OverhaulStatistics, PredictionReport, SparePart, TrainFormation, Vehicle, VehicleStatistics,
    WheelsetStatistics,
};

// 引擎
pub use engine::{MetricsEngine, PredictionOptions, StatisticsPeriod};

pub use config::FleetConfig;
pub use error::{FleetError, FleetResult};
pub use i18n::Locale;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "地铁车辆检修管理";

// 项目代码
pub const PROJECT_CODE: &str = "MMM-SL";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(PROJECT_CODE, "MMM-SL");
    }
}
