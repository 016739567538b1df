// ==========================================
// 地铁车辆检修管理 - 大修标准查询
// ==========================================
// 职责: 按 (车辆类型, 大修级别, 日期) 查找标准; 成本区间判定; 到期判定
// 输入: 标准表快照 (只读参考数据)
// ==========================================

use crate::dates::{parse_date, parse_optional_date};
use crate::domain::overhaul::OverhaulStandard;
use crate::domain::types::{OverhaulLevel, VehicleType};
use crate::error::FleetResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 成本相对标准区间的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBand {
    Below,
    Within,
    Above,
    Unknown, // 标准未给出成本区间
}

/// 标准在指定日期是否适用 (起止均含; 缺失视为不限)
pub fn is_applicable_on(standard: &OverhaulStandard, on: NaiveDate) -> FleetResult<bool> {
    let from = parse_optional_date("applicable_from", standard.applicable_from.as_deref())?;
    let to = parse_optional_date("applicable_to", standard.applicable_to.as_deref())?;
    Ok(from.map_or(true, |f| on >= f) && to.map_or(true, |t| on <= t))
}

/// 查找适用标准
///
/// 多条同时适用时取 applicable_from 最晚的一条 (新标准覆盖旧标准)
pub fn find_standard<'a>(
    standards: &'a [OverhaulStandard],
    vehicle_type: VehicleType,
    level: OverhaulLevel,
    on: NaiveDate,
) -> FleetResult<Option<&'a OverhaulStandard>> {
    let mut best: Option<(Option<NaiveDate>, &OverhaulStandard)> = None;

    for standard in standards
        .iter()
        .filter(|s| s.vehicle_type == vehicle_type && s.overhaul_level == level)
    {
        if !is_applicable_on(standard, on)? {
            continue;
        }
        let from = parse_optional_date("applicable_from", standard.applicable_from.as_deref())?;
        match best {
            Some((best_from, _)) if best_from >= from => {}
            _ => best = Some((from, standard)),
        }
    }

    if best.is_none() {
        tracing::debug!(
            vehicle_type = vehicle_type.as_str(),
            level = level.as_str(),
            %on,
            "未找到适用的大修标准"
        );
    }
    Ok(best.map(|(_, standard)| standard))
}

/// 判定成本所在区间
pub fn cost_band(standard: &OverhaulStandard, cost: f64) -> CostBand {
    match (standard.standard_cost_min, standard.standard_cost_max) {
        (None, None) => CostBand::Unknown,
        (Some(min), _) if cost < min => CostBand::Below,
        (_, Some(max)) if cost > max => CostBand::Above,
        _ => CostBand::Within,
    }
}

/// 判定是否到达大修周期
///
/// # 参数
/// - last_date: 上次大修完成日期
/// - mileage_since: 上次大修以来的运行里程 (km)
/// - today: 当前日期
///
/// # 规则
/// - whichever_first = true: 时间或里程任一达到即到期
/// - whichever_first = false: 已配置的周期全部达到才到期
/// - 未配置任何周期: 不到期
pub fn is_overhaul_due(
    standard: &OverhaulStandard,
    last_date: &str,
    mileage_since: f64,
    today: NaiveDate,
) -> FleetResult<bool> {
    let last = parse_date("last_date", last_date)?;
    let elapsed_days = (today - last).num_days();

    let time_due = standard
        .time_interval
        .map(|days| elapsed_days >= i64::from(days));
    let mileage_due = standard
        .mileage_interval
        .map(|interval| mileage_since >= interval);

    let checks: Vec<bool> = [time_due, mileage_due].into_iter().flatten().collect();
    if checks.is_empty() {
        return Ok(false);
    }

    Ok(if standard.whichever_first {
        checks.iter().any(|due| *due)
    } else {
        checks.iter().all(|due| *due)
    })
}
