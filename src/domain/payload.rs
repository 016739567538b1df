// ==========================================
// 地铁车辆检修管理 - 报文解码
// ==========================================
// 职责: JSON 报文 → 领域实体
// 红线: 枚举字段的非成员取值报 UnknownEnumValue, 其余结构错误报 MalformedPayload
// ==========================================

use crate::error::{FleetError, FleetResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;

/// 枚举字段预校验: 字段为字符串时必须是封闭集合成员
///
/// 字段缺失或非字符串交给后续解码报 MalformedPayload
pub(crate) fn check_enum_field<T>(object: &Value, field: &str) -> FleetResult<()>
where
    T: FromStr<Err = FleetError>,
{
    if let Some(token) = object.get(field).and_then(Value::as_str) {
        token.parse::<T>()?;
    }
    Ok(())
}

/// 解析报文文本
pub(crate) fn parse_value(raw: &str) -> FleetResult<Value> {
    Ok(serde_json::from_str(raw)?)
}

/// 报文值 → 实体
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> FleetResult<T> {
    Ok(serde_json::from_value(value)?)
}

/// 列表报文: 逐项预校验后整体解码
pub(crate) fn decode_list<T, F>(raw: &str, check: F) -> FleetResult<Vec<T>>
where
    T: DeserializeOwned,
    F: Fn(&Value) -> FleetResult<()>,
{
    let value = parse_value(raw)?;
    if let Some(items) = value.as_array() {
        for item in items {
            check(item)?;
        }
    }
    decode(value)
}
