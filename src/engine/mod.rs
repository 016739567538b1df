// ==========================================
// 地铁车辆检修管理 - 引擎层
// ==========================================
// 职责: 编号生成、枚举标签、派生指标、统计、标准查询、磨耗预测、本地化格式
// 红线: 引擎为纯函数, 不持有可变状态, 不读全局语言设置
// ==========================================

pub mod format;
pub mod identifier;
pub mod labels;
pub mod metrics;
pub mod prediction;
pub mod standards;
pub mod statistics;

// 重导出核心引擎
pub use format::{
    format_currency, format_date, format_date_str, format_number, number_symbols, DateStyle,
    NumberSymbols,
};
pub use identifier::{
    build_train_formation, format_train_number, formation_summary, formation_template,
    generate_carriage_code, generate_formation, maintenance_levels, parse_train_number,
    validate_carriage_number, validate_formation, validate_train_number, MaintenanceLevelOption,
};
pub use labels::{
    carriage_type_label, formation_type_label, label_for, level_tag_type, overhaul_level_label,
    overhaul_status_label, overhaul_type_label, special_type_label, status_tag_type,
    vehicle_status_label, vehicle_type_label, Labeled,
};
pub use metrics::{
    calculate_cost_variance, calculate_duration, derive_plan_metrics, derive_record_fields,
    transition_item, upcoming_plans, validate_plan, with_derived_fields, MetricsEngine,
    PlanMetrics,
};
pub use prediction::{
    latest_wheelset_statistics, predict_component, predict_vehicle, recommend,
    risk_level_for_days, wear_rate, PredictionOptions,
};
pub use standards::{cost_band, find_standard, is_applicable_on, is_overhaul_due, CostBand};
pub use statistics::{
    current_month, filter_plans, overhaul_statistics, vehicle_statistics, StatisticsPeriod,
};
