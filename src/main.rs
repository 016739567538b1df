// ==========================================
// 地铁车辆检修管理 - 大修统计报表
// ==========================================
// 用法:
//   fleet-report <plans.json> [today YYYY-MM-DD]
//
// 读取计划列表 (JSON 数组), 输出大修统计 (JSON)
// 配置: METRO_FLEET_CONFIG 指定配置文件, 未设置时使用默认值
// 日志: METRO_FLEET_LOG_FORMAT=json 时输出 JSON 日志
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Local;
use metro_fleet::dates::parse_date;
use metro_fleet::{logging, FleetConfig, MetricsEngine, OverhaulPlan};

fn main() -> Result<()> {
    logging::init_from_env();

    let mut args = std::env::args().skip(1);
    let plans_path = match args.next() {
        Some(path) => path,
        None => bail!("usage: fleet-report <plans.json> [today YYYY-MM-DD]"),
    };

    let today = match args.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(raw) => parse_date("today", &raw)?,
        None => Local::now().date_naive(),
    };

    let config = FleetConfig::from_env().context("加载配置失败")?;
    tracing::info!(
        version = metro_fleet::VERSION,
        locale = %config.default_locale,
        "{} - 大修统计报表",
        metro_fleet::APP_NAME
    );

    let raw = std::fs::read_to_string(&plans_path)
        .with_context(|| format!("读取计划文件失败: {}", plans_path))?;
    let plans = OverhaulPlan::list_from_json(&raw)
        .with_context(|| format!("解析计划文件失败: {}", plans_path))?;

    let engine = MetricsEngine::new(config);
    let stats = engine.statistics(&plans, None, today)?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
