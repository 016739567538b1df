// ==========================================
// 地铁车辆检修管理 - 磨耗预测模型
// ==========================================
// 依据: 轮对检测台账 / 易损件磨耗预测报文
// 报文格式: snake_case (与预测接口一致)
// ==========================================
// 红线: 预测结果只出不进, 不回写车辆档案
// ==========================================

use crate::dates::{parse_date, parse_optional_date};
use crate::domain::payload::{check_enum_field, decode, decode_list, parse_value};
use crate::domain::types::{ComponentType, RiskLevel};
use crate::error::FleetResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_wheelset_status() -> String {
    "normal".to_string()
}

// ==========================================
// WheelsetStatistics - 轮对检测记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelsetStatistics {
    pub id: Option<String>,
    pub vehicle_id: String,        // 车辆 ID 或列车编号
    pub wheelset_position: String, // 轮对位置
    pub current_diameter: f64,     // 当前轮径 (mm)

    // ===== 轮缘参数 =====
    pub flange_thickness: Option<f64>,
    pub flange_height: Option<f64>,
    pub qr_value: Option<f64>,

    // ===== 里程与镟修 =====
    pub mileage_at_measurement: Option<f64>,
    pub last_rewheeling_date: Option<String>,
    pub next_rewheeling_mileage: Option<f64>,
    #[serde(default)]
    pub wear_rate: f64,
    #[serde(default = "default_wheelset_status")]
    pub status: String,

    // ===== 检测信息 =====
    pub inspection_date: String,
    pub inspector: Option<String>,
    pub notes: Option<String>,
}

impl WheelsetStatistics {
    pub fn from_json(raw: &str) -> FleetResult<Self> {
        decode(parse_value(raw)?)
    }

    pub fn list_from_json(raw: &str) -> FleetResult<Vec<Self>> {
        decode_list(raw, |_| Ok(()))
    }

    pub fn inspection(&self) -> FleetResult<NaiveDate> {
        parse_date("inspection_date", &self.inspection_date)
    }

    pub fn last_rewheeling(&self) -> FleetResult<Option<NaiveDate>> {
        parse_optional_date("last_rewheeling_date", self.last_rewheeling_date.as_deref())
    }
}

// ==========================================
// ComponentMeasurement - 部件实测值 (预测输入)
// ==========================================
/// 轮对为轮径, 闸片/受电弓滑板为剩余厚度 (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMeasurement {
    pub component_type: ComponentType,
    #[serde(default)]
    pub component_position: Option<String>,
    pub current_value: f64,
    /// 置信度 0..=1; None 时取预测参数中的默认值
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ComponentMeasurement {
    pub fn new(component_type: ComponentType, current_value: f64) -> Self {
        Self {
            component_type,
            component_position: None,
            current_value,
            confidence: None,
        }
    }

    pub fn list_from_json(raw: &str) -> FleetResult<Vec<Self>> {
        decode_list(raw, |item| {
            check_enum_field::<ComponentType>(item, "component_type")
        })
    }
}

// ==========================================
// WearPrediction - 单部件磨耗预测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearPrediction {
    pub vehicle_id: Option<String>,
    pub component_type: ComponentType,
    pub component_position: String,
    pub current_wear: f64,
    pub predicted_wear: f64,
    pub wear_rate: f64, // mm / 万公里
    pub remaining_life_days: i64,
    pub remaining_life_mileage: f64,
    pub replacement_date: String,
    pub confidence_score: f64,
    pub prediction_horizon_days: i64,
    pub last_rewheeling_date: Option<String>,
    pub current_mileage: f64,
    pub next_rewheeling_mileage: Option<f64>,
}

/// 维护建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecommendation {
    pub priority: RiskLevel,
    pub component: String, // 部件-位置
    pub action: String,
    pub reason: String,
    pub estimated_cost: u32,
    pub estimated_downtime_hours: u32,
}

// ==========================================
// PredictionReport - 整车预测结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub vehicle_id: Option<String>,
    pub train_number: String,
    pub prediction_date: String,
    pub risk_level: RiskLevel,
    pub overall_confidence: f64,
    pub predictions: Vec<WearPrediction>,
    pub maintenance_recommendations: Vec<MaintenanceRecommendation>,
    pub next_maintenance_date: Option<String>,
}

impl PredictionReport {
    pub fn total_predictions(&self) -> usize {
        self.predictions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FleetError;

    const WHEELSET_JSON: &str = r#"{
        "vehicle_id": "Tr05",
        "wheelset_position": "1轴",
        "current_diameter": 852.4,
        "last_rewheeling_date": "2024-02-20",
        "inspection_date": "2024-03-01"
    }"#;

    #[test]
    fn test_wheelset_statistics_defaults() {
        let stats = WheelsetStatistics::from_json(WHEELSET_JSON).unwrap();
        assert_eq!(stats.wear_rate, 0.0);
        assert_eq!(stats.status, "normal");
        assert_eq!(
            stats.inspection().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            stats.last_rewheeling().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 20)
        );
    }

    #[test]
    fn test_wheelset_statistics_bad_dates() {
        let mut stats = WheelsetStatistics::from_json(WHEELSET_JSON).unwrap();
        stats.last_rewheeling_date = Some("上周".to_string());
        assert!(matches!(
            stats.last_rewheeling(),
            Err(FleetError::InvalidDateInput { field: "last_rewheeling_date", .. })
        ));
    }

    #[test]
    fn test_measurement_list_rejects_unknown_component() {
        let raw = r#"[{"component_type": "brake_pad", "current_value": 18.0},
                      {"component_type": "coupler", "current_value": 3.0}]"#;
        assert_eq!(
            ComponentMeasurement::list_from_json(raw).unwrap_err(),
            FleetError::UnknownEnumValue {
                kind: "ComponentType",
                value: "coupler".to_string()
            }
        );

        let ok = ComponentMeasurement::list_from_json(
            r#"[{"component_type": "pantograph", "current_value": 8.5, "confidence": 0.9}]"#,
        )
        .unwrap();
        assert_eq!(ok[0].component_type, ComponentType::Pantograph);
        assert_eq!(ok[0].component_position, None);
        assert_eq!(ok[0].confidence, Some(0.9));
    }
}
