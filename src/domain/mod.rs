// ==========================================
// 地铁车辆检修管理 - 领域模型层
// ==========================================
// 职责: 定义领域实体、枚举类型、报文形状
// 红线: 不含编号生成与指标计算逻辑 (见 engine)
// ==========================================

pub mod overhaul;
mod payload;
pub mod prediction;
pub mod types;
pub mod vehicle;

// 重导出核心类型
pub use overhaul::{
    OverhaulItem, OverhaulPlan, OverhaulPlanQuery, OverhaulRecord, OverhaulStandard,
    OverhaulStatistics, SparePart, UpcomingPlanSummary, DEFAULT_CURRENCY,
};
pub use prediction::{
    ComponentMeasurement, MaintenanceRecommendation, PredictionReport, WearPrediction,
    WheelsetStatistics,
};
pub use types::{
    CarriageType, ComponentType, EquipmentStatus, FormationType, ItemStatus, MaintenanceLevel,
    OverhaulLevel, OverhaulStatus, OverhaulType, RiskLevel, SpecialType, TagType, VehicleStatus,
    VehicleType,
};
pub use vehicle::{
    BatchAction, BatchOperation, Carriage, Certification, FormationDistribution,
    SpecialEquipment, SpecialMaintenanceVehicle, TrainFormation, TypeDistribution, Vehicle,
    VehicleSearchParams, VehicleStatistics, WorkCapability, is_monotonic_mileage,
};
