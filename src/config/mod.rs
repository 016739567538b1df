// ==========================================
// 地铁车辆检修管理 - 配置层
// ==========================================
// 职责: 系统配置加载与校验
// 存储: JSON 文件 + 环境变量
// ==========================================

pub mod fleet_config;

// 重导出核心配置
pub use fleet_config::{config_keys, FleetConfig};
