// ==========================================
// 地铁车辆检修管理 - 统计与查询
// ==========================================
// 职责: 大修统计、车辆统计、计划查询过滤
// 输入: 计划/车辆快照 (只读)
// ==========================================

use crate::dates::{parse_date, parse_optional_date};
use crate::domain::overhaul::{
    OverhaulPlan, OverhaulPlanQuery, OverhaulStatistics, UpcomingPlanSummary,
};
use crate::domain::types::{FormationType, OverhaulStatus, VehicleStatus, VehicleType};
use crate::domain::vehicle::{Vehicle, VehicleStatistics};
use crate::engine::metrics::calculate_cost_variance;
use crate::error::{FleetError, FleetResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 统计摘要中即将开始计划的默认条数
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

// ==========================================
// 统计区间
// ==========================================
/// 按计划开始日期筛选: 整年或某月
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsPeriod {
    pub year: i32,
    pub month: Option<u32>,
}

impl StatisticsPeriod {
    /// 区间起止 (含首尾)
    pub fn bounds(&self) -> FleetResult<(NaiveDate, NaiveDate)> {
        let invalid = || FleetError::InvalidDateInput {
            field: "period",
            value: format!("{}-{:?}", self.year, self.month),
        };

        match self.month {
            Some(month) => {
                let start = NaiveDate::from_ymd_opt(self.year, month, 1).ok_or_else(invalid)?;
                let next_month = if month == 12 {
                    NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(self.year, month + 1, 1)
                }
                .ok_or_else(invalid)?;
                let end = next_month.pred_opt().ok_or_else(invalid)?;
                Ok((start, end))
            }
            None => {
                let start = NaiveDate::from_ymd_opt(self.year, 1, 1).ok_or_else(invalid)?;
                let end = NaiveDate::from_ymd_opt(self.year, 12, 31).ok_or_else(invalid)?;
                Ok((start, end))
            }
        }
    }
}

// ==========================================
// 大修统计
// ==========================================

/// 计算大修统计
///
/// # 参数
/// - plans: 全部计划
/// - period: 统计区间 (按计划开始日期); None 为全部
/// - today: 当前日期, 用于即将开始计划摘要
/// - upcoming_limit: 摘要条数
///
/// # 口径
/// - average_duration: 已完成计划实际工期之和 / 已完成计划数
/// - on_time_rate: 已完成且 实际结束 ≤ 计划结束 的占比 (%)
/// - cost_variance_rate: 已完成且预算、实际成本均非 0 的计划的平均成本偏差 (%)
/// - upcoming_plans: 不受 period 限制, planning 且开始日期 ≥ today
#[instrument(skip(plans), fields(count = plans.len()))]
pub fn overhaul_statistics(
    plans: &[OverhaulPlan],
    period: Option<StatisticsPeriod>,
    today: NaiveDate,
    upcoming_limit: usize,
) -> FleetResult<OverhaulStatistics> {
    let in_period: Vec<&OverhaulPlan> = match period {
        Some(period) => {
            let (from, to) = period.bounds()?;
            let mut selected = Vec::new();
            for plan in plans {
                let start = plan.planned_start()?;
                if start >= from && start <= to {
                    selected.push(plan);
                }
            }
            selected
        }
        None => plans.iter().collect(),
    };

    let mut stats = OverhaulStatistics {
        total_plans: in_period.len() as u32,
        ..Default::default()
    };

    for plan in &in_period {
        match plan.status {
            OverhaulStatus::Planning => stats.planning += 1,
            OverhaulStatus::InProgress => stats.in_progress += 1,
            OverhaulStatus::Completed => stats.completed += 1,
            _ => {}
        }

        if let Some(actual) = plan.actual_cost {
            stats.total_cost += actual;
        }

        *stats
            .by_level
            .entry(plan.overhaul_level.as_str().to_string())
            .or_insert(0) += 1;
        *stats
            .by_type
            .entry(plan.overhaul_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    let completed: Vec<&&OverhaulPlan> = in_period.iter().filter(|p| p.is_completed()).collect();
    if !completed.is_empty() {
        let mut total_duration = 0i64;
        let mut on_time = 0u32;
        for plan in &completed {
            let actual_start = plan.actual_start()?;
            let actual_end = plan.actual_end()?;
            if let (Some(start), Some(end)) = (actual_start, actual_end) {
                total_duration += (end - start).num_days();
            }
            if let Some(end) = actual_end {
                if end <= plan.planned_end()? {
                    on_time += 1;
                }
            }
        }
        stats.average_duration = total_duration as f64 / completed.len() as f64;
        stats.on_time_rate = f64::from(on_time) / completed.len() as f64 * 100.0;

        let variances: Vec<f64> = completed
            .iter()
            .filter_map(|p| match (p.estimated_cost, p.actual_cost) {
                (Some(est), Some(act)) if est != 0.0 && act != 0.0 => {
                    Some(calculate_cost_variance(Some(est), act))
                }
                _ => None,
            })
            .collect();
        if !variances.is_empty() {
            stats.cost_variance_rate = variances.iter().sum::<f64>() / variances.len() as f64;
        }
    }

    let mut upcoming: Vec<(NaiveDate, &OverhaulPlan)> = Vec::new();
    for plan in plans.iter().filter(|p| p.is_planning()) {
        let start = plan.planned_start()?;
        if start >= today {
            upcoming.push((start, plan));
        }
    }
    upcoming.sort_by_key(|(start, _)| *start);
    stats.upcoming_plans = upcoming
        .into_iter()
        .take(upcoming_limit)
        .map(|(_, plan)| UpcomingPlanSummary::from(plan))
        .collect();

    tracing::info!(
        total = stats.total_plans,
        completed = stats.completed,
        upcoming = stats.upcoming_plans.len(),
        "大修统计完成"
    );
    Ok(stats)
}

// ==========================================
// 车辆统计
// ==========================================

/// 计算车辆统计; 空列表时全部为 0
pub fn vehicle_statistics(vehicles: &[Vehicle]) -> VehicleStatistics {
    let mut stats = VehicleStatistics {
        total_vehicles: vehicles.len() as u32,
        ..Default::default()
    };

    for vehicle in vehicles {
        match vehicle.status {
            VehicleStatus::InService => stats.in_service_vehicles += 1,
            VehicleStatus::Maintenance => stats.maintenance_vehicles += 1,
            VehicleStatus::Standby => stats.standby_vehicles += 1,
            VehicleStatus::Retired => stats.retired_vehicles += 1,
        }
        match vehicle.formation.formation_type {
            FormationType::Six => stats.formation_distribution.formation6 += 1,
            FormationType::Eight => stats.formation_distribution.formation8 += 1,
            FormationType::Twelve => stats.formation_distribution.formation12 += 1,
        }
        match vehicle.vehicle_type {
            VehicleType::Passenger => stats.type_distribution.passenger += 1,
            VehicleType::Maintenance => stats.type_distribution.maintenance += 1,
            VehicleType::Special => stats.type_distribution.special += 1,
        }
    }

    if !vehicles.is_empty() {
        let total: f64 = vehicles.iter().map(|v| v.total_mileage).sum();
        stats.average_mileage = total / vehicles.len() as f64;
    }

    stats
}

// ==========================================
// 计划查询
// ==========================================

/// 按查询参数过滤计划并分页 (page 从 1 开始, 0 按 1 处理)
pub fn filter_plans(plans: &[OverhaulPlan], query: &OverhaulPlanQuery) -> FleetResult<Vec<OverhaulPlan>> {
    let from = parse_optional_date("start_date_from", query.start_date_from.as_deref())?;
    let to = parse_optional_date("start_date_to", query.start_date_to.as_deref())?;

    let mut matched = Vec::new();
    for plan in plans {
        if query.train_number.as_ref().is_some_and(|t| t != &plan.train_number) {
            continue;
        }
        if query.status.is_some_and(|s| s != plan.status) {
            continue;
        }
        if query.overhaul_type.is_some_and(|t| t != plan.overhaul_type) {
            continue;
        }
        if query.overhaul_level.is_some_and(|l| l != plan.overhaul_level) {
            continue;
        }
        if query.contractor.is_some() && query.contractor != plan.contractor {
            continue;
        }
        if query.workshop.is_some() && query.workshop != plan.workshop {
            continue;
        }
        if from.is_some() || to.is_some() {
            let start = parse_date("planned_start_date", &plan.planned_start_date)?;
            if from.is_some_and(|f| start < f) || to.is_some_and(|t| start > t) {
                continue;
            }
        }
        matched.push(plan);
    }

    let page = query.page.max(1) as usize;
    let limit = query.limit as usize;
    Ok(matched
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect())
}

/// 统计区间: 当前日期所在月份
pub fn current_month(today: NaiveDate) -> StatisticsPeriod {
    StatisticsPeriod {
        year: today.year(),
        month: Some(today.month()),
    }
}
