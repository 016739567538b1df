// ==========================================
// 地铁车辆检修管理 - 派生指标引擎
// ==========================================
// 职责: 工期、成本偏差、即将开始计划、计划/记录派生字段
// 输入: 计划/记录快照 (只读)
// 输出: 新值, 不修改入参
// ==========================================
// 错误策略:
// - 业务数据缺失 (成本为空、预算为 0、列表为空) → 0 / 空列表
// - 结构性错误 (日期字符串无法解析) → InvalidDateInput
// ==========================================

use crate::config::FleetConfig;
use crate::dates::{parse_date, parse_date_time};
use crate::domain::overhaul::{OverhaulItem, OverhaulPlan, OverhaulRecord, OverhaulStatistics};
use crate::domain::types::{ItemStatus, OverhaulStatus};
use crate::domain::vehicle::is_monotonic_mileage;
use crate::engine::format::format_currency;
use crate::engine::identifier::validate_train_number;
use crate::engine::statistics::{overhaul_statistics, StatisticsPeriod};
use crate::error::{FleetError, FleetResult};
use crate::i18n::Locale;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::instrument;

const MILLIS_PER_DAY: i64 = 86_400_000;

// ==========================================
// 工期
// ==========================================

/// 两个时间点之间的天数 (向上取整, 与参数顺序无关)
pub fn duration_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let millis = (end - start).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// 计算工期
///
/// `ceil(|end - start| / 1 天)`, 参数顺序互换结果相同
///
/// # 示例
/// ```
/// use metro_fleet::engine::metrics::calculate_duration;
/// assert_eq!(calculate_duration("2024-01-01", "2024-01-31").unwrap(), 30);
/// ```
pub fn calculate_duration(start: &str, end: &str) -> FleetResult<i64> {
    let start = parse_date_time("start_date", start)?;
    let end = parse_date_time("end_date", end)?;
    Ok(duration_between(start, end))
}

// ==========================================
// 成本偏差
// ==========================================

/// 计算成本偏差百分比
///
/// `((actual - estimated) / estimated) * 100`; 预算缺失或为 0 时返回 0
pub fn calculate_cost_variance(estimated: Option<f64>, actual: f64) -> f64 {
    let estimated = match estimated {
        Some(e) if e != 0.0 && e.is_finite() => e,
        _ => return 0.0,
    };

    let variance = (actual - estimated) / estimated * 100.0;
    if variance.is_finite() {
        variance
    } else {
        tracing::warn!(estimated, actual, "成本偏差结果非有限值, 按 0 处理");
        0.0
    }
}

// ==========================================
// 即将开始的计划
// ==========================================

/// 获取即将开始的计划
///
/// 条件: status = planning 且 now ≤ planned_start_date ≤ now + horizon_days
/// 排序: planned_start_date 升序 (同日保持输入顺序)
///
/// # 参数
/// - horizon_days: 时间窗口; 超出日期可表示范围时视为不设上限
/// - now: 当前时间 (由调用方注入)
#[instrument(skip(plans), fields(count = plans.len()))]
pub fn upcoming_plans(
    plans: &[OverhaulPlan],
    horizon_days: i64,
    now: NaiveDateTime,
) -> FleetResult<Vec<OverhaulPlan>> {
    if horizon_days < 0 {
        return Ok(Vec::new());
    }
    let until = Duration::try_days(horizon_days).and_then(|d| now.checked_add_signed(d));
    if until.is_none() {
        tracing::debug!(horizon_days, "时间窗口超出日期范围, 不设上限");
    }

    let mut selected: Vec<(NaiveDateTime, &OverhaulPlan)> = Vec::new();
    for plan in plans.iter().filter(|p| p.status == OverhaulStatus::Planning) {
        let start = parse_date_time("planned_start_date", &plan.planned_start_date)?;
        if start >= now && until.map_or(true, |u| start <= u) {
            selected.push((start, plan));
        }
    }
    selected.sort_by_key(|(start, _)| *start);

    tracing::debug!(selected = selected.len(), "即将开始计划筛选完成");
    Ok(selected.into_iter().map(|(_, plan)| plan.clone()).collect())
}

// ==========================================
// 计划派生字段
// ==========================================

/// 计划派生指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanMetrics {
    /// 工期: 有实际起止日期用实际, 否则用计划
    pub duration_days: i64,
    /// 进度: 各项目进度均值; 无项目时为 None
    pub progress_percentage: Option<f64>,
    /// 成本偏差 (%): 有实际成本时才计算
    pub cost_variance: Option<f64>,
}

/// 计算计划派生指标
pub fn derive_plan_metrics(plan: &OverhaulPlan) -> FleetResult<PlanMetrics> {
    let duration_days = match (plan.actual_start()?, plan.actual_end()?) {
        (Some(start), Some(end)) => (end - start).num_days().abs(),
        _ => (plan.planned_end()? - plan.planned_start()?).num_days().abs(),
    };

    let progress_percentage = if plan.items.is_empty() {
        None
    } else {
        let total: f64 = plan
            .items
            .iter()
            .map(|item| item.progress_percentage.unwrap_or(0.0))
            .sum();
        Some(total / plan.items.len() as f64)
    };

    let cost_variance = plan
        .actual_cost
        .map(|actual| calculate_cost_variance(plan.estimated_cost, actual));

    Ok(PlanMetrics {
        duration_days,
        progress_percentage,
        cost_variance,
    })
}

/// 返回带派生字段的计划副本
pub fn with_derived_fields(plan: &OverhaulPlan) -> FleetResult<OverhaulPlan> {
    let metrics = derive_plan_metrics(plan)?;
    Ok(OverhaulPlan {
        duration_days: Some(metrics.duration_days),
        progress_percentage: metrics.progress_percentage,
        cost_variance: metrics.cost_variance,
        ..plan.clone()
    })
}

/// 校验计划: 列车编号、日期可解析、计划起止顺序、实际起止顺序
pub fn validate_plan(plan: &OverhaulPlan) -> FleetResult<()> {
    if !validate_train_number(&plan.train_number) {
        return Err(FleetError::unknown_enum("TrainNumber", &plan.train_number));
    }

    let planned_start = plan.planned_start()?;
    let planned_end = plan.planned_end()?;
    if planned_start > planned_end {
        return Err(FleetError::InvalidDateRange {
            start: plan.planned_start_date.clone(),
            end: plan.planned_end_date.clone(),
        });
    }

    if let (Some(start), Some(end)) = (plan.actual_start()?, plan.actual_end()?) {
        if start > end {
            return Err(FleetError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }

    Ok(())
}

// ==========================================
// 记录派生字段
// ==========================================

/// 生成记录的派生字段 (创建时一次性写入)
///
/// - duration_days = end_date - start_date
/// - mileage_interval = mileage_after - mileage_before (两者均有时)
/// - mileage_after < mileage_before → InvalidMileageRange
pub fn derive_record_fields(record: &OverhaulRecord) -> FleetResult<OverhaulRecord> {
    let start = parse_date("start_date", &record.start_date)?;
    let end = parse_date("end_date", &record.end_date)?;
    if start > end {
        return Err(FleetError::InvalidDateRange {
            start: record.start_date.clone(),
            end: record.end_date.clone(),
        });
    }

    let mileage_interval = match (record.mileage_before, record.mileage_after) {
        (Some(before), Some(after)) => {
            if !is_monotonic_mileage(before, after) {
                return Err(FleetError::InvalidMileageRange { before, after });
            }
            Some(after - before)
        }
        _ => None,
    };

    Ok(OverhaulRecord {
        duration_days: Some((end - start).num_days()),
        mileage_interval,
        ..record.clone()
    })
}

// ==========================================
// 项目进度流转
// ==========================================

/// 项目状态流转
///
/// - 进入 in_progress: 首次进入时写 started_at
/// - 进入 completed: 首次进入时写 completed_at, 进度置 100
pub fn transition_item(item: &OverhaulItem, status: ItemStatus, at: NaiveDateTime) -> OverhaulItem {
    let stamp = at.format("%Y-%m-%dT%H:%M:%S").to_string();
    let mut next = item.clone();
    next.updated_at = Some(stamp.clone());
    next.status = Some(status.as_str().to_string());

    match status {
        ItemStatus::InProgress if next.started_at.is_none() => {
            next.started_at = Some(stamp);
        }
        ItemStatus::Completed if next.completed_at.is_none() => {
            next.completed_at = Some(stamp);
            next.progress_percentage = Some(100.0);
        }
        _ => {}
    }
    next
}

// ==========================================
// MetricsEngine - 绑定配置默认值
// ==========================================
pub struct MetricsEngine {
    config: FleetConfig,
}

impl MetricsEngine {
    /// 创建新的派生指标引擎
    pub fn new(config: FleetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// 按配置的时间窗口筛选即将开始的计划
    pub fn upcoming(&self, plans: &[OverhaulPlan], now: NaiveDateTime) -> FleetResult<Vec<OverhaulPlan>> {
        upcoming_plans(plans, self.config.upcoming_horizon_days, now)
    }

    /// 按配置的摘要条数计算统计
    pub fn statistics(
        &self,
        plans: &[OverhaulPlan],
        period: Option<StatisticsPeriod>,
        today: NaiveDate,
    ) -> FleetResult<OverhaulStatistics> {
        overhaul_statistics(plans, period, today, self.config.statistics_upcoming_limit)
    }

    /// 格式化金额; 未指定币种时用配置的默认币种
    pub fn format_cost(&self, amount: f64, currency: Option<&str>, locale: Locale) -> String {
        let currency = currency.unwrap_or(self.config.default_currency.as_str());
        format_currency(amount, Some(currency), locale)
    }
}
