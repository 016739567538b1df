// ==========================================
// 地铁车辆检修管理 - 车辆领域模型
// ==========================================
// 依据: MMM-SL 车辆数据字典
// 报文格式: camelCase (与前端接口一致)
// ==========================================
// 红线: 车厢编号由 列车号 + 位置 确定, 不可独立修改
// ==========================================

use crate::dates::parse_date;
use crate::domain::types::{
    CarriageType, EquipmentStatus, FormationType, SpecialType, VehicleStatus, VehicleType,
};
use crate::domain::payload::{check_enum_field, decode, parse_value};
use crate::error::FleetResult;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// Carriage - 单节车厢
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carriage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub carriage_number: String,     // 车厢编号 (如: SL0101)
    pub carriage_type: CarriageType, // 车厢类型
    pub position: u32,               // 位置 (1-12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    pub status: VehicleStatus,
}

// ==========================================
// TrainFormation - 列车编组
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainFormation {
    pub formation_type: FormationType,
    pub carriages: Vec<Carriage>,
}

impl TrainFormation {
    /// 按位置查找车厢
    pub fn carriage_at(&self, position: u32) -> Option<&Carriage> {
        self.carriages.iter().find(|c| c.position == position)
    }

    /// 动车数量
    pub fn motor_car_count(&self) -> usize {
        self.carriages
            .iter()
            .filter(|c| c.carriage_type.is_motorized())
            .count()
    }
}

// ==========================================
// Vehicle - 列车
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub train_number: String, // 列车编号 (Tr01-Tr16)
    pub project_code: String, // 项目代码 (MMM-SL)
    pub vehicle_type: VehicleType,
    pub formation: TrainFormation,
    pub line: String, // 运营线路
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot: Option<String>, // 车辆段
    pub manufacturer: String,
    pub manufacture_date: String,
    pub commission_date: String, // 投运日期
    pub total_mileage: f64,      // 总里程 (km), 单调不减
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_daily_mileage: Option<f64>,
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_level: Option<String>, // 日检/周检/月检/年检
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // ===== 审计字段 =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl Vehicle {
    /// 从 JSON 报文解码车辆 (含编组与车厢)
    pub fn from_json(raw: &str) -> FleetResult<Self> {
        let value = parse_value(raw)?;
        check_enum_field::<VehicleType>(&value, "vehicleType")?;
        check_enum_field::<VehicleStatus>(&value, "status")?;
        if let Some(formation) = value.get("formation") {
            check_enum_field::<FormationType>(formation, "formationType")?;
            let carriages = formation.get("carriages").and_then(serde_json::Value::as_array);
            for carriage in carriages.into_iter().flatten() {
                check_enum_field::<CarriageType>(carriage, "carriageType")?;
                check_enum_field::<VehicleStatus>(carriage, "status")?;
            }
        }
        decode(value)
    }

    /// 判断是否在运营
    pub fn is_in_service(&self) -> bool {
        self.status == VehicleStatus::InService
    }

    /// 里程更新后是否仍满足单调不减
    pub fn accepts_mileage(&self, new_total_mileage: f64) -> bool {
        is_monotonic_mileage(self.total_mileage, new_total_mileage)
    }
}

/// 里程单调不减: after >= before (NaN 视为不满足)
pub fn is_monotonic_mileage(before: f64, after: f64) -> bool {
    after >= before
}

// ==========================================
// 特种维护车辆
// ==========================================

/// 特种设备
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEquipment {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub install_date: String,
    pub last_inspection_date: String,
    pub next_inspection_date: String,
    pub status: EquipmentStatus,
}

impl SpecialEquipment {
    /// 下次检验是否落在 [today, today + within_days] 内, 或已逾期
    pub fn inspection_due_within(&self, today: NaiveDate, within_days: i64) -> FleetResult<bool> {
        let next = parse_date("nextInspectionDate", &self.next_inspection_date)?;
        Ok(next <= today + Duration::days(within_days))
    }
}

/// 作业能力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkCapability {
    pub max_speed: f64,           // 最高速度 (km/h)
    pub work_speed: f64,          // 作业速度 (km/h)
    pub daily_work_capacity: f64, // 日作业能力
    pub work_range: Vec<String>,  // 作业范围
}

/// 资质证书
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub certificate_number: String,
}

impl Certification {
    /// 指定日期是否在有效期内 (含首尾)
    pub fn is_valid_on(&self, date: NaiveDate) -> FleetResult<bool> {
        let issued = parse_date("issueDate", &self.issue_date)?;
        let expires = parse_date("expiryDate", &self.expiry_date)?;
        Ok(issued <= date && date <= expires)
    }
}

/// 特种维护车辆 (在 Vehicle 基础上扩展)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialMaintenanceVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub special_type: SpecialType,
    pub equipment: Vec<SpecialEquipment>,
    pub work_capability: WorkCapability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
}

impl SpecialMaintenanceVehicle {
    /// 指定日期已过期的证书
    pub fn expired_certifications(&self, date: NaiveDate) -> FleetResult<Vec<&Certification>> {
        let mut expired = Vec::new();
        for cert in self.certifications.iter().flatten() {
            if !cert.is_valid_on(date)? {
                expired.push(cert);
            }
        }
        Ok(expired)
    }
}

// ==========================================
// 查询与统计投影
// ==========================================

/// 车辆搜索参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// 编组分布
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationDistribution {
    pub formation6: u32,
    pub formation8: u32,
    pub formation12: u32,
}

/// 车辆类型分布
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDistribution {
    pub passenger: u32,
    pub maintenance: u32,
    pub special: u32,
}

/// 车辆统计信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatistics {
    pub total_vehicles: u32,
    pub in_service_vehicles: u32,
    pub maintenance_vehicles: u32,
    pub standby_vehicles: u32,
    pub retired_vehicles: u32,
    pub average_mileage: f64,
    pub formation_distribution: FormationDistribution,
    pub type_distribution: TypeDistribution,
}

/// 批量操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchAction {
    UpdateStatus,
    ScheduleMaintenance,
    AssignLine,
}

/// 批量操作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOperation {
    pub action: BatchAction,
    pub vehicle_ids: Vec<String>,
    pub params: serde_json::Value,
}
