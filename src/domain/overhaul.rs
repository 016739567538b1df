// ==========================================
// 地铁车辆检修管理 - 大修领域模型
// ==========================================
// 依据: 大修管理数据字典 (overhaul_plans / overhaul_items /
//       overhaul_spare_parts / overhaul_records / overhaul_standards)
// 报文格式: snake_case
// ==========================================
// 红线: 派生字段 (duration_days / progress_percentage / cost_variance)
//       不是事实来源, 入站时忽略, 由 engine::metrics 重新计算
// ==========================================

use crate::dates::{parse_date, parse_optional_date};
use crate::domain::types::{OverhaulLevel, OverhaulStatus, OverhaulType, VehicleType};
use crate::domain::payload::{check_enum_field, decode, decode_list, parse_value};
use crate::error::FleetResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 默认币种
pub const DEFAULT_CURRENCY: &str = "CNY";

// ==========================================
// OverhaulItem - 大修项目
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverhaulItem {
    pub id: Option<String>,
    pub overhaul_plan_id: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub category: Option<String>,

    // ===== 车厢信息 =====
    pub carriage_number: Option<String>,
    pub component_type: Option<String>,

    // ===== 作业内容 =====
    pub work_content: Option<String>,
    pub technical_standard: Option<String>,
    pub inspection_method: Option<String>,

    // ===== 进度跟踪 =====
    pub status: Option<String>,            // pending / in_progress / completed
    pub progress_percentage: Option<f64>,  // 0-100
    pub started_at: Option<String>,
    pub completed_at: Option<String>,

    // ===== 质量控制 =====
    pub quality_check_status: Option<String>,
    pub quality_inspector: Option<String>,
    pub quality_check_date: Option<String>,
    pub quality_notes: Option<String>,

    // ===== 成本信息 =====
    pub labor_hours: Option<f64>,
    pub material_cost: Option<f64>,
    pub labor_cost: Option<f64>,
    pub total_cost: Option<f64>,

    // ===== 备件信息 =====
    pub spare_parts_used: Option<Vec<serde_json::Value>>,
    pub old_parts_disposal: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// ==========================================
// SparePart - 大修备件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    pub id: Option<String>,
    pub overhaul_plan_id: Option<String>,
    pub part_number: String,
    pub part_name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,

    // ===== 数量 =====
    pub planned_quantity: u32,
    pub actual_quantity: Option<u32>,
    pub unit: Option<String>,

    // ===== 价格 =====
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,

    // ===== 库存 / 采购 =====
    pub stock_quantity: Option<u32>,
    pub warehouse_location: Option<String>,
    pub purchase_order_no: Option<String>,
    pub supplier: Option<String>,
    pub delivery_date: Option<String>,

    // ===== 质量 =====
    pub quality_certificate: Option<String>,
    pub warranty_period: Option<u32>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl SparePart {
    /// 备件金额: 优先 total_price, 否则 单价 × 数量 (实际数量优先)
    pub fn cost(&self) -> f64 {
        if let Some(total) = self.total_price {
            return total;
        }
        let quantity = self.actual_quantity.unwrap_or(self.planned_quantity);
        self.unit_price.unwrap_or(0.0) * f64::from(quantity)
    }

    /// 库存是否不足以覆盖计划数量 (库存未知视为不足)
    pub fn is_short(&self) -> bool {
        self.stock_quantity
            .map(|stock| stock < self.planned_quantity)
            .unwrap_or(true)
    }
}

// ==========================================
// OverhaulPlan - 大修计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhaulPlan {
    pub id: Option<String>,
    pub plan_code: String,
    pub vehicle_id: Option<String>,
    pub train_number: String,
    pub overhaul_type: OverhaulType,
    pub overhaul_level: OverhaulLevel,
    #[serde(default)]
    pub status: OverhaulStatus,

    // ===== 时间计划 =====
    pub planned_start_date: String,
    pub planned_end_date: String,
    pub actual_start_date: Option<String>,
    pub actual_end_date: Option<String>,

    // ===== 里程基准 =====
    pub mileage_at_overhaul: Option<f64>,
    pub next_overhaul_mileage: Option<f64>,

    // ===== 成本预算 =====
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub currency: Option<String>,

    // ===== 承包信息 =====
    pub contractor: Option<String>,
    pub workshop: Option<String>,
    pub responsible_person: Option<String>,
    pub contact_phone: Option<String>,

    // ===== 审批信息 =====
    pub approval_status: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub approval_notes: Option<String>,

    // ===== 其他信息 =====
    pub description: Option<String>,
    pub technical_requirements: Option<String>,
    pub safety_requirements: Option<String>,
    pub quality_standards: Option<String>,

    // ===== 关联数据 (随计划删除) =====
    #[serde(default)]
    pub items: Vec<OverhaulItem>,
    #[serde(default)]
    pub spare_parts: Vec<SparePart>,

    // ===== 派生字段 (只出不进) =====
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub cost_variance: Option<f64>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl OverhaulPlan {
    /// 从 JSON 报文解码单个计划
    pub fn from_json(raw: &str) -> FleetResult<Self> {
        let value = parse_value(raw)?;
        Self::check_enum_tokens(&value)?;
        decode(value)
    }

    /// 从 JSON 报文解码计划列表
    pub fn list_from_json(raw: &str) -> FleetResult<Vec<Self>> {
        decode_list(raw, Self::check_enum_tokens)
    }

    fn check_enum_tokens(value: &serde_json::Value) -> FleetResult<()> {
        check_enum_field::<OverhaulType>(value, "overhaul_type")?;
        check_enum_field::<OverhaulLevel>(value, "overhaul_level")?;
        check_enum_field::<OverhaulStatus>(value, "status")
    }

    /// 计划开始日期
    pub fn planned_start(&self) -> FleetResult<NaiveDate> {
        parse_date("planned_start_date", &self.planned_start_date)
    }

    /// 计划结束日期
    pub fn planned_end(&self) -> FleetResult<NaiveDate> {
        parse_date("planned_end_date", &self.planned_end_date)
    }

    /// 实际开始日期 (未开工为 None)
    pub fn actual_start(&self) -> FleetResult<Option<NaiveDate>> {
        parse_optional_date("actual_start_date", self.actual_start_date.as_deref())
    }

    /// 实际结束日期 (未完工为 None)
    pub fn actual_end(&self) -> FleetResult<Option<NaiveDate>> {
        parse_optional_date("actual_end_date", self.actual_end_date.as_deref())
    }

    /// 币种代码, 缺省 CNY
    pub fn currency_code(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// 备件总金额
    pub fn spare_parts_cost(&self) -> f64 {
        self.spare_parts.iter().map(SparePart::cost).sum()
    }

    pub fn is_planning(&self) -> bool {
        self.status == OverhaulStatus::Planning
    }

    pub fn is_completed(&self) -> bool {
        self.status == OverhaulStatus::Completed
    }
}

// ==========================================
// OverhaulRecord - 大修记录 (不可变快照)
// ==========================================
// 红线: 创建时一次性写入, 之后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhaulRecord {
    pub id: Option<String>,
    pub overhaul_plan_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub train_number: String,
    pub overhaul_level: OverhaulLevel,

    // ===== 执行信息 =====
    pub start_date: String,
    pub end_date: String,
    pub duration_days: Option<i64>,

    // ===== 里程信息 =====
    pub mileage_before: Option<f64>,
    pub mileage_after: Option<f64>,
    pub mileage_interval: Option<f64>,

    // ===== 成本信息 =====
    pub total_cost: Option<f64>,
    pub labor_cost: Option<f64>,
    pub material_cost: Option<f64>,
    pub spare_parts_cost: Option<f64>,

    // ===== 质量评估 =====
    pub quality_score: Option<u8>, // 0-100
    pub performance_improvement: Option<String>,

    // ===== 问题记录 =====
    pub problems_found: Option<String>,
    pub solutions_applied: Option<String>,

    // ===== 文档附件 =====
    pub report_url: Option<String>,
    pub photos: Option<Vec<String>>,
    pub documents: Option<Vec<serde_json::Value>>,

    pub created_at: Option<String>,
    pub created_by: Option<String>,
}

impl OverhaulRecord {
    pub fn from_json(raw: &str) -> FleetResult<Self> {
        let value = parse_value(raw)?;
        check_enum_field::<OverhaulLevel>(&value, "overhaul_level")?;
        decode(value)
    }
}

// ==========================================
// OverhaulStandard - 大修标准 (只读参考表)
// ==========================================
// 键: (vehicle_type, overhaul_level)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhaulStandard {
    pub id: Option<String>,
    pub vehicle_type: VehicleType,
    pub overhaul_level: OverhaulLevel,

    // ===== 周期标准 =====
    pub mileage_interval: Option<f64>, // 里程周期 (km)
    pub time_interval: Option<u32>,    // 时间周期 (天)
    #[serde(default = "default_whichever_first")]
    pub whichever_first: bool, // true: 任一周期先到即到期

    // ===== 作业标准 =====
    pub standard_duration_days: Option<u32>,
    pub required_items: Option<Vec<String>>,
    pub optional_items: Option<Vec<String>>,

    // ===== 成本标准 =====
    pub standard_cost_min: Option<f64>,
    pub standard_cost_max: Option<f64>,

    // ===== 技术标准 =====
    pub technical_requirements: Option<String>,
    pub quality_standards: Option<String>,
    pub acceptance_criteria: Option<String>,

    // ===== 适用范围 =====
    pub applicable_from: Option<String>,
    pub applicable_to: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_whichever_first() -> bool {
    true
}

// ==========================================
// 查询参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhaulPlanQuery {
    pub train_number: Option<String>,
    pub status: Option<OverhaulStatus>,
    pub overhaul_type: Option<OverhaulType>,
    pub overhaul_level: Option<OverhaulLevel>,
    pub contractor: Option<String>,
    pub workshop: Option<String>,
    pub start_date_from: Option<String>,
    pub start_date_to: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl Default for OverhaulPlanQuery {
    fn default() -> Self {
        Self {
            train_number: None,
            status: None,
            overhaul_type: None,
            overhaul_level: None,
            contractor: None,
            workshop: None,
            start_date_from: None,
            start_date_to: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// ==========================================
// 统计信息
// ==========================================

/// 即将开始的计划摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingPlanSummary {
    pub id: Option<String>,
    pub plan_code: String,
    pub train_number: String,
    pub overhaul_level: OverhaulLevel,
    pub planned_start_date: String,
    pub planned_end_date: String,
}

impl From<&OverhaulPlan> for UpcomingPlanSummary {
    fn from(plan: &OverhaulPlan) -> Self {
        Self {
            id: plan.id.clone(),
            plan_code: plan.plan_code.clone(),
            train_number: plan.train_number.clone(),
            overhaul_level: plan.overhaul_level,
            planned_start_date: plan.planned_start_date.clone(),
            planned_end_date: plan.planned_end_date.clone(),
        }
    }
}

/// 大修统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverhaulStatistics {
    pub total_plans: u32,
    pub planning: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub total_cost: f64,
    pub average_duration: f64,
    pub on_time_rate: f64,
    pub cost_variance_rate: f64,
    pub by_level: BTreeMap<String, u32>,
    pub by_type: BTreeMap<String, u32>,
    pub upcoming_plans: Vec<UpcomingPlanSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FleetError;

    const PLAN_JSON: &str = r#"{
        "plan_code": "OH-2024-001",
        "train_number": "Tr05",
        "overhaul_type": "scheduled",
        "overhaul_level": "A2",
        "planned_start_date": "2024-03-01",
        "planned_end_date": "2024-04-15",
        "estimated_cost": 1000000.0,
        "duration_days": 999,
        "cost_variance": 42.0
    }"#;

    #[test]
    fn test_plan_decodes_with_defaults() {
        let plan = OverhaulPlan::from_json(PLAN_JSON).unwrap();
        assert_eq!(plan.status, OverhaulStatus::Planning);
        assert_eq!(plan.currency_code(), "CNY");
        assert!(plan.items.is_empty());
        assert_eq!(
            plan.planned_start().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(plan.actual_start().unwrap(), None);
    }

    #[test]
    fn test_plan_ignores_inbound_derived_fields() {
        let plan = OverhaulPlan::from_json(PLAN_JSON).unwrap();
        assert_eq!(plan.duration_days, None);
        assert_eq!(plan.cost_variance, None);

        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.get("duration_days").is_none());
    }

    #[test]
    fn test_plan_rejects_unknown_enum_token() {
        let raw = PLAN_JSON.replace("\"scheduled\"", "\"routine\"");
        assert_eq!(
            OverhaulPlan::from_json(&raw).unwrap_err(),
            FleetError::UnknownEnumValue {
                kind: "OverhaulType",
                value: "routine".to_string()
            }
        );

        let raw = PLAN_JSON.replace("\"A2\"", "\"D9\"");
        assert!(matches!(
            OverhaulPlan::from_json(&raw),
            Err(FleetError::UnknownEnumValue { kind: "OverhaulLevel", .. })
        ));

        let raw = PLAN_JSON.replace("\"estimated_cost\"", "\"status\": \"paused\", \"estimated_cost\"");
        assert!(matches!(
            OverhaulPlan::from_json(&raw),
            Err(FleetError::UnknownEnumValue { kind: "OverhaulStatus", .. })
        ));
    }

    #[test]
    fn test_plan_structural_errors_stay_malformed() {
        assert!(matches!(
            OverhaulPlan::from_json("{ not json"),
            Err(FleetError::MalformedPayload(_))
        ));
        // 缺少必填字段
        let raw = PLAN_JSON.replace("\"plan_code\": \"OH-2024-001\",", "");
        assert!(matches!(
            OverhaulPlan::from_json(&raw),
            Err(FleetError::MalformedPayload(_))
        ));
        // 枚举字段类型错误
        let raw = PLAN_JSON.replace("\"scheduled\"", "7");
        assert!(matches!(
            OverhaulPlan::from_json(&raw),
            Err(FleetError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_plan_list_reports_unknown_enum_in_any_element() {
        let good = PLAN_JSON.to_string();
        let bad = PLAN_JSON.replace("\"scheduled\"", "\"routine\"");
        let raw = format!("[{}, {}]", good, bad);
        assert!(matches!(
            OverhaulPlan::list_from_json(&raw),
            Err(FleetError::UnknownEnumValue { kind: "OverhaulType", .. })
        ));
        assert_eq!(
            OverhaulPlan::list_from_json(&format!("[{}]", good)).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_record_rejects_unknown_level() {
        let raw = r#"{"train_number": "Tr02", "overhaul_level": "Z1",
            "start_date": "2024-05-01", "end_date": "2024-06-15"}"#;
        assert_eq!(
            OverhaulRecord::from_json(raw).unwrap_err(),
            FleetError::UnknownEnumValue {
                kind: "OverhaulLevel",
                value: "Z1".to_string()
            }
        );
        let ok = raw.replace("Z1", "C2");
        assert_eq!(OverhaulRecord::from_json(&ok).unwrap().overhaul_level, OverhaulLevel::C2);
    }

    #[test]
    fn test_spare_part_cost() {
        let part = SparePart {
            part_number: "BRK-01".to_string(),
            part_name: "制动闸片".to_string(),
            planned_quantity: 8,
            unit_price: Some(150.0),
            ..Default::default()
        };
        assert_eq!(part.cost(), 1200.0);
        assert!(part.is_short());

        let part = SparePart {
            actual_quantity: Some(10),
            stock_quantity: Some(20),
            ..part
        };
        assert_eq!(part.cost(), 1500.0);
        assert!(!part.is_short());

        let part = SparePart {
            total_price: Some(999.0),
            ..part
        };
        assert_eq!(part.cost(), 999.0);
    }

    #[test]
    fn test_standard_whichever_first_defaults_true() {
        let raw = r#"{"vehicle_type": "passenger", "overhaul_level": "A1", "time_interval": 1825}"#;
        let standard: OverhaulStandard = serde_json::from_str(raw).unwrap();
        assert!(standard.whichever_first);
        assert_eq!(standard.time_interval, Some(1825));
    }

    #[test]
    fn test_query_defaults() {
        let query: OverhaulPlanQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, OverhaulPlanQuery::default());
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);
    }
}
