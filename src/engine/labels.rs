// ==========================================
// 地铁车辆检修管理 - 枚举标签
// ==========================================
// 职责: 枚举值 → 本地化显示文本 / 界面标签类型
// 规则: 未知值原样返回 (兼容后续新增枚举值), 不报错
// ==========================================

use crate::domain::types::{
    CarriageType, ComponentType, FormationType, OverhaulLevel, OverhaulStatus, OverhaulType,
    RiskLevel, SpecialType, TagType, VehicleStatus, VehicleType,
};
use crate::i18n::{t, Locale};
use std::str::FromStr;

// ==========================================
// Trait: Labeled
// ==========================================
/// 可本地化显示的枚举
pub trait Labeled {
    /// 语言包中的键
    fn label_key(&self) -> String;

    /// 本地化显示文本
    fn label(&self, locale: Locale) -> String {
        t(&self.label_key(), locale)
    }
}

impl Labeled for OverhaulType {
    fn label_key(&self) -> String {
        format!("overhaul.type.{}", self.as_str())
    }
}

impl Labeled for OverhaulStatus {
    fn label_key(&self) -> String {
        format!("overhaul.status.{}", self.as_str())
    }
}

impl Labeled for OverhaulLevel {
    fn label_key(&self) -> String {
        format!("overhaul.level.{}", self.as_str())
    }
}

impl Labeled for VehicleType {
    fn label_key(&self) -> String {
        format!("vehicle.type.{}", self.as_str())
    }
}

impl Labeled for VehicleStatus {
    fn label_key(&self) -> String {
        format!("vehicle.status.{}", self.as_str())
    }
}

impl Labeled for SpecialType {
    fn label_key(&self) -> String {
        format!("vehicle.special_type.{}", self.as_str())
    }
}

impl Labeled for CarriageType {
    fn label_key(&self) -> String {
        format!("carriage.type.{}", self.as_str())
    }
}

impl Labeled for FormationType {
    fn label_key(&self) -> String {
        let key = match self {
            FormationType::Six => "six",
            FormationType::Eight => "eight",
            FormationType::Twelve => "twelve",
        };
        format!("formation.type.{}", key)
    }
}

impl Labeled for ComponentType {
    fn label_key(&self) -> String {
        format!("prediction.component.{}", self.as_str())
    }
}

impl Labeled for RiskLevel {
    fn label_key(&self) -> String {
        format!("prediction.risk.{}", self.as_str())
    }
}

/// 字符串枚举值 → 显示文本; 非成员值原样返回
pub fn label_for<T>(token: &str, locale: Locale) -> String
where
    T: FromStr + Labeled,
{
    match token.parse::<T>() {
        Ok(value) => value.label(locale),
        Err(_) => {
            tracing::debug!(token, kind = std::any::type_name::<T>(), "未知枚举值, 原样显示");
            token.to_string()
        }
    }
}

/// 大修类型标签
pub fn overhaul_type_label(token: &str, locale: Locale) -> String {
    label_for::<OverhaulType>(token, locale)
}

/// 大修状态标签
pub fn overhaul_status_label(token: &str, locale: Locale) -> String {
    label_for::<OverhaulStatus>(token, locale)
}

/// 大修级别标签
pub fn overhaul_level_label(token: &str, locale: Locale) -> String {
    label_for::<OverhaulLevel>(token, locale)
}

/// 车辆类型标签
pub fn vehicle_type_label(token: &str, locale: Locale) -> String {
    label_for::<VehicleType>(token, locale)
}

/// 车辆状态标签
pub fn vehicle_status_label(token: &str, locale: Locale) -> String {
    label_for::<VehicleStatus>(token, locale)
}

/// 车厢类型标签
pub fn carriage_type_label(token: &str, locale: Locale) -> String {
    label_for::<CarriageType>(token, locale)
}

/// 编组类型标签
pub fn formation_type_label(token: &str, locale: Locale) -> String {
    label_for::<FormationType>(token, locale)
}

/// 特种车辆类型标签
pub fn special_type_label(token: &str, locale: Locale) -> String {
    label_for::<SpecialType>(token, locale)
}

// ==========================================
// 界面标签类型
// ==========================================

/// 大修状态 → 标签类型; 未知值为 info
pub fn status_tag_type(token: &str) -> TagType {
    match token.parse::<OverhaulStatus>() {
        Ok(OverhaulStatus::Planning) => TagType::Info,
        Ok(OverhaulStatus::Approved) => TagType::Warning,
        Ok(OverhaulStatus::InProgress) => TagType::Primary,
        Ok(OverhaulStatus::Suspended) => TagType::Danger,
        Ok(OverhaulStatus::Completed) => TagType::Success,
        Ok(OverhaulStatus::Cancelled) => TagType::Info,
        Err(_) => TagType::Info,
    }
}

/// 大修级别 → 标签类型 (按首字母: A → danger, B → warning, 其他 → info)
pub fn level_tag_type(token: &str) -> TagType {
    if token.starts_with('A') {
        TagType::Danger
    } else if token.starts_with('B') {
        TagType::Warning
    } else {
        TagType::Info
    }
}
