// ==========================================
// 地铁车辆检修管理 - 核心层错误类型
// ==========================================
// 职责: 定义编号生成、枚举校验、日期解析、里程校验、磨耗预测、配置加载的错误分类
// 原则: 结构性错误立即失败; 业务数据缺失降级为默认值,不走错误通道
// ==========================================

use thiserror::Error;

/// 核心层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FleetError {
    // ==========================================
    // 编号生成错误
    // ==========================================
    /// 列车号或车厢位置越界
    #[error("无效的编号输入: train_number={train_number}, position={position:?}, reason={reason}")]
    InvalidIdentifierInput {
        train_number: u32,
        position: Option<u32>,
        reason: String,
    },

    /// 编组模板未定义 (仅 12 编组有标准模板)
    #[error("编组模板未定义: {formation}")]
    FormationTemplateUnavailable { formation: String },

    // ==========================================
    // 枚举校验错误
    // ==========================================
    #[error("未知枚举值: kind={kind}, value={value}")]
    UnknownEnumValue { kind: &'static str, value: String },

    // ==========================================
    // 日期错误
    // ==========================================
    #[error("无效的日期输入: field={field}, value={value}")]
    InvalidDateInput { field: &'static str, value: String },

    #[error("无效的日期区间: {start} > {end}")]
    InvalidDateRange { start: String, end: String },

    // ==========================================
    // 里程错误
    // ==========================================
    /// 里程单调不减: 检修后里程不得小于检修前里程
    #[error("无效的里程区间: before={before}, after={after}")]
    InvalidMileageRange { before: f64, after: f64 },

    // ==========================================
    // 磨耗预测错误
    // ==========================================
    #[error("无效的预测输入: field={field}, reason={reason}")]
    InvalidPredictionInput { field: &'static str, reason: String },

    // ==========================================
    // 边界解码错误
    // ==========================================
    #[error("报文格式错误: {0}")]
    MalformedPayload(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置文件读取失败: path={path}, {message}")]
    ConfigIo { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ConfigParse(String),
}

impl FleetError {
    pub(crate) fn unknown_enum(kind: &'static str, value: &str) -> Self {
        FleetError::UnknownEnumValue {
            kind,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_date(field: &'static str, value: &str) -> Self {
        FleetError::InvalidDateInput {
            field,
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        FleetError::MalformedPayload(err.to_string())
    }
}

/// 核心层 Result 别名
pub type FleetResult<T> = Result<T, FleetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = FleetError::InvalidIdentifierInput {
            train_number: 17,
            position: Some(3),
            reason: "train_number out of range".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("train_number=17"));
        assert!(msg.contains("Some(3)"));

        let err = FleetError::unknown_enum("OverhaulType", "routine");
        assert_eq!(err.to_string(), "未知枚举值: kind=OverhaulType, value=routine");
    }

    #[test]
    fn test_serde_error_maps_to_malformed_payload() {
        let err: FleetError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, FleetError::MalformedPayload(_)));
    }
}
