// ==========================================
// 日期解析工具
// ==========================================
// 报文日期格式:
// - YYYY-MM-DD                  (按当日 00:00:00 处理)
// - YYYY-MM-DDTHH:MM:SS[.fff]   (无时区, 视为 UTC)
// - YYYY-MM-DD HH:MM:SS         (数据库导出格式)
// - RFC 3339                    (带时区, 换算为 UTC)
// ==========================================

use crate::error::{FleetError, FleetResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// 解析日期或日期时间字符串为 UTC 无时区时间
///
/// # 参数
/// - field: 字段名 (写入错误信息)
/// - raw: 原始字符串
pub fn parse_date_time(field: &'static str, raw: &str) -> FleetResult<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    tracing::warn!(field, value = raw, "日期解析失败");
    Err(FleetError::invalid_date(field, raw))
}

/// 解析为日历日期 (丢弃时间部分)
pub fn parse_date(field: &'static str, raw: &str) -> FleetResult<NaiveDate> {
    parse_date_time(field, raw).map(|dt| dt.date())
}

/// 解析可选日期字段; None 保持 None, 非法字符串报错
pub fn parse_optional_date(field: &'static str, raw: Option<&str>) -> FleetResult<Option<NaiveDate>> {
    raw.map(|s| parse_date(field, s)).transpose()
}
