// ==========================================
// 地铁车辆检修管理 - 磨耗预测引擎
// ==========================================
// 职责: 易损件 (轮对 / 闸片 / 受电弓滑板) 剩余寿命、风险等级、维护建议
// 输入: 车辆档案 + 轮对检测记录 + 部件实测值, 当前日期由调用方注入
// 输出: 新的预测结果, 不修改入参
// ==========================================
// 模型:
// - 实测值向最小安全值递减 (轮径 / 剩余厚度, mm)
// - 磨耗率单位 mm / 万公里, 随总里程上浮, 镟修后 30 天内打 8 折
// - 剩余天数 = 剩余里程 / 日均里程, 至少 1 天
// ==========================================

use crate::dates::parse_date;
use crate::domain::prediction::{
    ComponentMeasurement, MaintenanceRecommendation, PredictionReport, WearPrediction,
    WheelsetStatistics,
};
use crate::domain::types::{ComponentType, RiskLevel};
use crate::domain::vehicle::Vehicle;
use crate::error::{FleetError, FleetResult};
use crate::i18n::{t, t_with_args, Locale};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub const DEFAULT_PREDICTION_HORIZON_DAYS: i64 = 180;
pub const DEFAULT_CONFIDENCE: f64 = 0.85;
pub const DEFAULT_DAILY_MILEAGE: f64 = 400.0; // km

const WEAR_RATE_UNIT_KM: f64 = 10_000.0;
const MILEAGE_FACTOR_UNIT_KM: f64 = 100_000.0;
const REWHEELING_RECOVERY_DAYS: i64 = 30;
const REWHEELING_FACTOR: f64 = 0.8;
const HIGH_RISK_DAYS: i64 = 30;
const MEDIUM_RISK_DAYS: i64 = 90;
const BASE_REPLACEMENT_COST: f64 = 2000.0;
const BASE_DOWNTIME_HOURS: f64 = 4.0;

// ==========================================
// 部件参数
// ==========================================
struct ComponentProfile {
    default_position: &'static str,
    default_value: Option<f64>, // 无实测值时的取值; 轮对必须有实测轮径
    base_wear_rate: f64,        // mm / 万公里
    min_threshold: f64,         // 最小安全值 (mm)
    cost_multiplier: f64,
    downtime_multiplier: f64,
}

fn profile(component: ComponentType) -> ComponentProfile {
    match component {
        ComponentType::Wheelset => ComponentProfile {
            default_position: "前左",
            default_value: None,
            base_wear_rate: 0.05,
            min_threshold: 840.0,
            cost_multiplier: 7.5,
            downtime_multiplier: 2.0,
        },
        ComponentType::BrakePad => ComponentProfile {
            default_position: "后左",
            default_value: Some(30.0),
            base_wear_rate: 0.15,
            min_threshold: 5.0,
            cost_multiplier: 1.5,
            downtime_multiplier: 1.0,
        },
        ComponentType::Pantograph => ComponentProfile {
            default_position: "前右",
            default_value: Some(10.0),
            base_wear_rate: 0.25,
            min_threshold: 3.0,
            cost_multiplier: 2.5,
            downtime_multiplier: 1.5,
        },
    }
}

/// 部件最小安全值 (mm)
pub fn min_threshold(component: ComponentType) -> f64 {
    profile(component).min_threshold
}

// ==========================================
// 预测参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionOptions {
    pub horizon_days: i64,  // 预测窗口 (天)
    pub confidence: f64,    // 默认置信度 0..=1
    pub daily_mileage: f64, // 车辆无日均里程时使用 (km)
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_PREDICTION_HORIZON_DAYS,
            confidence: DEFAULT_CONFIDENCE,
            daily_mileage: DEFAULT_DAILY_MILEAGE,
        }
    }
}

impl PredictionOptions {
    pub fn validate(&self) -> FleetResult<()> {
        if self.horizon_days < 0 {
            return Err(invalid("horizon_days", format!("不能为负: {}", self.horizon_days)));
        }
        check_confidence(self.confidence)?;
        if !self.daily_mileage.is_finite() || self.daily_mileage <= 0.0 {
            return Err(invalid(
                "daily_mileage",
                format!("必须为正数: {}", self.daily_mileage),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> FleetError {
    FleetError::InvalidPredictionInput { field, reason }
}

fn check_confidence(confidence: f64) -> FleetResult<()> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(invalid("confidence", format!("取值范围 0..=1: {}", confidence)))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> FleetResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("必须为非负有限数: {}", value)))
    }
}

fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

// ==========================================
// 单项计算
// ==========================================

/// 磨耗率 (mm / 万公里)
///
/// base × 镟修系数 × (1 + 总里程 / 10 万公里 × 0.1)
pub fn wear_rate(component: ComponentType, current_mileage: f64, rewheeled_recently: bool) -> f64 {
    let rewheeling_factor = if rewheeled_recently {
        REWHEELING_FACTOR
    } else {
        1.0
    };
    let mileage_factor = current_mileage / MILEAGE_FACTOR_UNIT_KM;
    profile(component).base_wear_rate * rewheeling_factor * (1.0 + mileage_factor * 0.1)
}

/// 剩余天数 → 风险等级 (<30 高, <90 中, 其余低)
pub fn risk_level_for_days(days: i64) -> RiskLevel {
    if days < HIGH_RISK_DAYS {
        RiskLevel::High
    } else if days < MEDIUM_RISK_DAYS {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// 单部件磨耗预测
///
/// # 参数
/// - measurement: 实测值
/// - current_mileage: 车辆总里程 (km)
/// - wheelset: 最近一次轮对检测记录 (仅对轮对生效)
/// - today: 预测日期
///
/// # 错误
/// - 实测值 / 里程 / 置信度越界 → InvalidPredictionInput
/// - 镟修日期无法解析 → InvalidDateInput
pub fn predict_component(
    measurement: &ComponentMeasurement,
    current_mileage: f64,
    wheelset: Option<&WheelsetStatistics>,
    options: &PredictionOptions,
    today: NaiveDate,
) -> FleetResult<WearPrediction> {
    options.validate()?;
    check_non_negative("current_value", measurement.current_value)?;
    check_non_negative("current_mileage", current_mileage)?;
    let confidence = measurement.confidence.unwrap_or(options.confidence);
    check_confidence(confidence)?;

    let component = measurement.component_type;
    let profile = profile(component);
    let wheelset = wheelset.filter(|_| component == ComponentType::Wheelset);

    let last_rewheeling = match wheelset {
        Some(stats) => stats.last_rewheeling()?,
        None => None,
    };
    let rewheeled_recently = last_rewheeling
        .map_or(false, |date| (today - date).num_days() < REWHEELING_RECOVERY_DAYS);
    let rate = wear_rate(component, current_mileage, rewheeled_recently);

    let current = measurement.current_value;
    let remaining_wear = (current - profile.min_threshold).max(0.0);
    let remaining_mileage = remaining_wear / rate * WEAR_RATE_UNIT_KM;
    let remaining_days = ((remaining_mileage / options.daily_mileage).floor() as i64).max(1);

    let replacement = Duration::try_days(remaining_days)
        .and_then(|d| today.checked_add_signed(d))
        .ok_or_else(|| {
            invalid(
                "current_value",
                format!("剩余寿命 {} 天超出日期范围", remaining_days),
            )
        })?;

    let horizon_mileage = options.horizon_days as f64 * options.daily_mileage;
    let predicted = (current - rate * horizon_mileage / WEAR_RATE_UNIT_KM).max(0.0);

    let position = measurement
        .component_position
        .clone()
        .or_else(|| wheelset.map(|s| s.wheelset_position.clone()))
        .unwrap_or_else(|| profile.default_position.to_string());

    Ok(WearPrediction {
        vehicle_id: None,
        component_type: component,
        component_position: position,
        current_wear: round_to(current, 2),
        predicted_wear: round_to(predicted, 2),
        wear_rate: round_to(rate, 4),
        remaining_life_days: remaining_days,
        remaining_life_mileage: round_to(remaining_mileage, 2),
        replacement_date: replacement.format("%Y-%m-%d").to_string(),
        confidence_score: round_to(confidence, 2),
        prediction_horizon_days: options.horizon_days,
        last_rewheeling_date: wheelset.and_then(|s| s.last_rewheeling_date.clone()),
        current_mileage,
        next_rewheeling_mileage: wheelset.and_then(|s| s.next_rewheeling_mileage),
    })
}

/// 按剩余天数生成维护建议 (文本按 locale 输出)
pub fn recommend(prediction: &WearPrediction, locale: Locale) -> MaintenanceRecommendation {
    let priority = risk_level_for_days(prediction.remaining_life_days);
    let key = match priority {
        RiskLevel::High => "replace_now",
        RiskLevel::Medium => "plan_replacement",
        RiskLevel::Low => "monitor",
    };
    let days = prediction.remaining_life_days.to_string();
    let profile = profile(prediction.component_type);

    MaintenanceRecommendation {
        priority,
        component: format!(
            "{}-{}",
            prediction.component_type.as_str(),
            prediction.component_position
        ),
        action: t(&format!("prediction.action.{}", key), locale),
        reason: t_with_args(
            &format!("prediction.reason.{}", key),
            locale,
            &[("days", days.as_str())],
        ),
        estimated_cost: (BASE_REPLACEMENT_COST * profile.cost_multiplier) as u32,
        estimated_downtime_hours: (BASE_DOWNTIME_HOURS * profile.downtime_multiplier) as u32,
    }
}

// ==========================================
// 整车预测
// ==========================================

/// 车辆最近一次轮对检测 (按 vehicle_id 匹配车辆 ID 或列车编号)
///
/// 检测日期相同时取输入顺序靠前者
pub fn latest_wheelset_statistics<'a>(
    records: &'a [WheelsetStatistics],
    vehicle: &Vehicle,
) -> FleetResult<Option<&'a WheelsetStatistics>> {
    let mut latest: Option<(NaiveDate, &WheelsetStatistics)> = None;
    for record in records {
        let matches = record.vehicle_id == vehicle.train_number
            || vehicle.id.as_deref() == Some(record.vehicle_id.as_str());
        if !matches {
            continue;
        }
        let inspected = record.inspection()?;
        if latest.map_or(true, |(date, _)| inspected > date) {
            latest = Some((inspected, record));
        }
    }
    Ok(latest.map(|(_, record)| record))
}

/// 整车磨耗预测
///
/// 部件顺序: 轮对 → 闸片 → 受电弓滑板
/// - 实测值优先; 同一部件可有多条实测 (多个位置)
/// - 轮对无实测时取最近检测记录的轮径, 均无则跳过
/// - 闸片 / 受电弓滑板无实测时取标称厚度
/// - 日均里程优先取车辆档案
///
/// # 结果
/// - risk_level: 最短剩余天数对应的等级
/// - overall_confidence: 各部件置信度均值 (2 位小数)
/// - next_maintenance_date: 最早更换日期
#[instrument(skip_all, fields(train = %vehicle.train_number))]
pub fn predict_vehicle(
    vehicle: &Vehicle,
    wheelsets: &[WheelsetStatistics],
    measurements: &[ComponentMeasurement],
    options: &PredictionOptions,
    today: NaiveDate,
    locale: Locale,
) -> FleetResult<PredictionReport> {
    options.validate()?;
    let options = PredictionOptions {
        daily_mileage: vehicle
            .average_daily_mileage
            .filter(|m| m.is_finite() && *m > 0.0)
            .unwrap_or(options.daily_mileage),
        ..*options
    };
    let wheelset = latest_wheelset_statistics(wheelsets, vehicle)?;

    let mut predictions = Vec::new();
    for component in ComponentType::ALL {
        let mut inputs: Vec<ComponentMeasurement> = measurements
            .iter()
            .filter(|m| m.component_type == component)
            .cloned()
            .collect();

        if inputs.is_empty() {
            let fallback = match component {
                ComponentType::Wheelset => wheelset
                    .filter(|s| s.current_diameter > 0.0)
                    .map(|s| ComponentMeasurement {
                        component_position: Some(s.wheelset_position.clone()),
                        ..ComponentMeasurement::new(component, s.current_diameter)
                    }),
                _ => profile(component)
                    .default_value
                    .map(|v| ComponentMeasurement::new(component, v)),
            };
            match fallback {
                Some(m) => inputs.push(m),
                None => {
                    tracing::debug!(component = %component, "缺少实测值, 跳过该部件");
                    continue;
                }
            }
        }

        for input in &inputs {
            let mut prediction =
                predict_component(input, vehicle.total_mileage, wheelset, &options, today)?;
            prediction.vehicle_id = vehicle.id.clone();
            predictions.push(prediction);
        }
    }

    let risk_level = predictions
        .iter()
        .map(|p| p.remaining_life_days)
        .min()
        .map_or(RiskLevel::Low, risk_level_for_days);

    let overall_confidence = if predictions.is_empty() {
        0.0
    } else {
        let sum: f64 = predictions.iter().map(|p| p.confidence_score).sum();
        round_to(sum / predictions.len() as f64, 2)
    };

    let mut next_maintenance: Option<NaiveDate> = None;
    for prediction in &predictions {
        let date = parse_date("replacement_date", &prediction.replacement_date)?;
        if next_maintenance.map_or(true, |d| date < d) {
            next_maintenance = Some(date);
        }
    }

    let maintenance_recommendations = predictions.iter().map(|p| recommend(p, locale)).collect();

    tracing::info!(
        risk = %risk_level,
        count = predictions.len(),
        "磨耗预测完成"
    );

    Ok(PredictionReport {
        vehicle_id: vehicle.id.clone(),
        train_number: vehicle.train_number.clone(),
        prediction_date: today.format("%Y-%m-%d").to_string(),
        risk_level,
        overall_confidence,
        predictions,
        maintenance_recommendations,
        next_maintenance_date: next_maintenance.map(|d| d.format("%Y-%m-%d").to_string()),
    })
}
