// ==========================================
// 地铁车辆检修管理 - 领域类型定义
// ==========================================
// 依据: MMM-SL 车辆数据字典 / 大修管理数据字典
// 红线: 枚举为封闭集合, 报文中的字符串必须逐字匹配
// ==========================================

use crate::error::FleetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 车辆类型 (Vehicle Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Passenger,   // 客运车辆
    Maintenance, // 维护车辆
    Special,     // 特种车辆
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Passenger => "passenger",
            VehicleType::Maintenance => "maintenance",
            VehicleType::Special => "special",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passenger" => Ok(VehicleType::Passenger),
            "maintenance" => Ok(VehicleType::Maintenance),
            "special" => Ok(VehicleType::Special),
            _ => Err(FleetError::unknown_enum("VehicleType", s)),
        }
    }
}

// ==========================================
// 车厢类型 (Carriage Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarriageType {
    MC1, // 带司机室的动车
    MC2, // 带司机室的动车
    M,   // 动车
    MP,  // 带受电弓的动车
    T,   // 拖车
    TC,  // 带司机室的拖车
}

impl CarriageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarriageType::MC1 => "MC1",
            CarriageType::MC2 => "MC2",
            CarriageType::M => "M",
            CarriageType::MP => "MP",
            CarriageType::T => "T",
            CarriageType::TC => "TC",
        }
    }

    /// 是否为动车 (带牵引)
    pub fn is_motorized(&self) -> bool {
        !matches!(self, CarriageType::T | CarriageType::TC)
    }

    /// 是否带司机室
    pub fn has_cab(&self) -> bool {
        matches!(self, CarriageType::MC1 | CarriageType::MC2 | CarriageType::TC)
    }
}

impl fmt::Display for CarriageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CarriageType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MC1" => Ok(CarriageType::MC1),
            "MC2" => Ok(CarriageType::MC2),
            "M" => Ok(CarriageType::M),
            "MP" => Ok(CarriageType::MP),
            "T" => Ok(CarriageType::T),
            "TC" => Ok(CarriageType::TC),
            _ => Err(FleetError::unknown_enum("CarriageType", s)),
        }
    }
}

// ==========================================
// 车辆状态 (Vehicle Status)
// ==========================================
// 车辆与车厢共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    InService,   // 运营中
    Maintenance, // 维护中
    Standby,     // 备用
    Retired,     // 退役
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::InService => "in_service",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Standby => "standby",
            VehicleStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_service" => Ok(VehicleStatus::InService),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            "standby" => Ok(VehicleStatus::Standby),
            "retired" => Ok(VehicleStatus::Retired),
            _ => Err(FleetError::unknown_enum("VehicleStatus", s)),
        }
    }
}

// ==========================================
// 编组类型 (Formation Type)
// ==========================================
// 报文格式: "6编组" / "8编组" / "12编组"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationType {
    #[serde(rename = "6编组")]
    Six,
    #[serde(rename = "8编组")]
    Eight,
    #[serde(rename = "12编组")]
    Twelve,
}

impl FormationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormationType::Six => "6编组",
            FormationType::Eight => "8编组",
            FormationType::Twelve => "12编组",
        }
    }

    /// 编组车厢数
    pub fn size(&self) -> u32 {
        match self {
            FormationType::Six => 6,
            FormationType::Eight => 8,
            FormationType::Twelve => 12,
        }
    }

    /// 按车厢数反查编组类型
    pub fn from_size(size: u32) -> Option<Self> {
        match size {
            6 => Some(FormationType::Six),
            8 => Some(FormationType::Eight),
            12 => Some(FormationType::Twelve),
            _ => None,
        }
    }
}

impl fmt::Display for FormationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormationType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6编组" => Ok(FormationType::Six),
            "8编组" => Ok(FormationType::Eight),
            "12编组" => Ok(FormationType::Twelve),
            _ => Err(FleetError::unknown_enum("FormationType", s)),
        }
    }
}

// ==========================================
// 特种车辆类型 (Special Vehicle Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialType {
    RailGrinding,    // 钢轨打磨
    TrackInspection, // 轨道检测
    Rescue,          // 救援
    Engineering,     // 工程
    Cleaning,        // 清洗
}

impl SpecialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialType::RailGrinding => "rail_grinding",
            SpecialType::TrackInspection => "track_inspection",
            SpecialType::Rescue => "rescue",
            SpecialType::Engineering => "engineering",
            SpecialType::Cleaning => "cleaning",
        }
    }
}

impl fmt::Display for SpecialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpecialType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rail_grinding" => Ok(SpecialType::RailGrinding),
            "track_inspection" => Ok(SpecialType::TrackInspection),
            "rescue" => Ok(SpecialType::Rescue),
            "engineering" => Ok(SpecialType::Engineering),
            "cleaning" => Ok(SpecialType::Cleaning),
            _ => Err(FleetError::unknown_enum("SpecialType", s)),
        }
    }
}

// ==========================================
// 特种设备状态 (Equipment Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Normal,      // 正常
    Maintenance, // 维护中
    Fault,       // 故障
}

// ==========================================
// 大修类型 (Overhaul Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverhaulType {
    Scheduled, // 计划大修
    Emergency, // 紧急大修
    Upgrade,   // 升级改造
    Accident,  // 事故维修
}

impl OverhaulType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverhaulType::Scheduled => "scheduled",
            OverhaulType::Emergency => "emergency",
            OverhaulType::Upgrade => "upgrade",
            OverhaulType::Accident => "accident",
        }
    }
}

impl fmt::Display for OverhaulType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverhaulType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(OverhaulType::Scheduled),
            "emergency" => Ok(OverhaulType::Emergency),
            "upgrade" => Ok(OverhaulType::Upgrade),
            "accident" => Ok(OverhaulType::Accident),
            _ => Err(FleetError::unknown_enum("OverhaulType", s)),
        }
    }
}

// ==========================================
// 大修状态 (Overhaul Status)
// ==========================================
// 生命周期: planning → approved → in_progress ⇄ suspended → completed
//           任意未完成状态 → cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverhaulStatus {
    #[default]
    Planning,   // 规划中
    Approved,   // 已批准
    InProgress, // 进行中
    Suspended,  // 暂停
    Completed,  // 已完成
    Cancelled,  // 已取消
}

impl OverhaulStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverhaulStatus::Planning => "planning",
            OverhaulStatus::Approved => "approved",
            OverhaulStatus::InProgress => "in_progress",
            OverhaulStatus::Suspended => "suspended",
            OverhaulStatus::Completed => "completed",
            OverhaulStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OverhaulStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverhaulStatus {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(OverhaulStatus::Planning),
            "approved" => Ok(OverhaulStatus::Approved),
            "in_progress" => Ok(OverhaulStatus::InProgress),
            "suspended" => Ok(OverhaulStatus::Suspended),
            "completed" => Ok(OverhaulStatus::Completed),
            "cancelled" => Ok(OverhaulStatus::Cancelled),
            _ => Err(FleetError::unknown_enum("OverhaulStatus", s)),
        }
    }
}

// ==========================================
// 大修级别 (Overhaul Level)
// ==========================================
// A 级: 架修/大修/中修; B 级: 检修; C 级: 检修
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OverhaulLevel {
    A1, // A1级大修 (架修)
    A2, // A2级大修 (大修)
    A3, // A3级大修 (中修)
    B1, // B1级检修
    B2, // B2级检修
    C1, // C1级检修
    C2, // C2级检修
}

impl OverhaulLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverhaulLevel::A1 => "A1",
            OverhaulLevel::A2 => "A2",
            OverhaulLevel::A3 => "A3",
            OverhaulLevel::B1 => "B1",
            OverhaulLevel::B2 => "B2",
            OverhaulLevel::C1 => "C1",
            OverhaulLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for OverhaulLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverhaulLevel {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A1" => Ok(OverhaulLevel::A1),
            "A2" => Ok(OverhaulLevel::A2),
            "A3" => Ok(OverhaulLevel::A3),
            "B1" => Ok(OverhaulLevel::B1),
            "B2" => Ok(OverhaulLevel::B2),
            "C1" => Ok(OverhaulLevel::C1),
            "C2" => Ok(OverhaulLevel::C2),
            _ => Err(FleetError::unknown_enum("OverhaulLevel", s)),
        }
    }
}

// ==========================================
// 大修项目进度状态 (Item Status)
// ==========================================
// 报文中以自由字符串存储, 默认 "pending"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,    // 待开始
    InProgress, // 进行中
    Completed,  // 已完成
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::InProgress => "in_progress",
            ItemStatus::Completed => "completed",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "in_progress" => Ok(ItemStatus::InProgress),
            "completed" => Ok(ItemStatus::Completed),
            _ => Err(FleetError::unknown_enum("ItemStatus", s)),
        }
    }
}

// ==========================================
// 日常维护等级 (Maintenance Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceLevel {
    Daily,     // 日检
    Weekly,    // 周检
    Monthly,   // 月检
    Quarterly, // 季检
    Yearly,    // 年检
}

impl MaintenanceLevel {
    pub const ALL: [MaintenanceLevel; 5] = [
        MaintenanceLevel::Daily,
        MaintenanceLevel::Weekly,
        MaintenanceLevel::Monthly,
        MaintenanceLevel::Quarterly,
        MaintenanceLevel::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceLevel::Daily => "daily",
            MaintenanceLevel::Weekly => "weekly",
            MaintenanceLevel::Monthly => "monthly",
            MaintenanceLevel::Quarterly => "quarterly",
            MaintenanceLevel::Yearly => "yearly",
        }
    }

    /// 检修周期 (天)
    pub fn interval_days(&self) -> u32 {
        match self {
            MaintenanceLevel::Daily => 1,
            MaintenanceLevel::Weekly => 7,
            MaintenanceLevel::Monthly => 30,
            MaintenanceLevel::Quarterly => 90,
            MaintenanceLevel::Yearly => 365,
        }
    }
}

// ==========================================
// 易损部件 (Component Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Wheelset,   // 轮对
    BrakePad,   // 闸片
    Pantograph, // 受电弓滑板
}

impl ComponentType {
    pub const ALL: [ComponentType; 3] = [
        ComponentType::Wheelset,
        ComponentType::BrakePad,
        ComponentType::Pantograph,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Wheelset => "wheelset",
            ComponentType::BrakePad => "brake_pad",
            ComponentType::Pantograph => "pantograph",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wheelset" => Ok(ComponentType::Wheelset),
            "brake_pad" => Ok(ComponentType::BrakePad),
            "pantograph" => Ok(ComponentType::Pantograph),
            _ => Err(FleetError::unknown_enum("ComponentType", s)),
        }
    }
}

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,   // 30 天内到限
    Medium, // 90 天内到限
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            _ => Err(FleetError::unknown_enum("RiskLevel", s)),
        }
    }
}

// ==========================================
// 界面标签类型 (Tag Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    Info,
    Warning,
    Primary,
    Danger,
    Success,
}

impl TagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagType::Info => "info",
            TagType::Warning => "warning",
            TagType::Primary => "primary",
            TagType::Danger => "danger",
            TagType::Success => "success",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
