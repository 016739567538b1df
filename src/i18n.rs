// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 约束: 不读写 rust-i18n 的全局 locale, 所有查询显式传入 Locale
// ==========================================

use crate::error::{FleetError, FleetResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 界面语言 (Locale)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn, // 简体中文
    #[serde(rename = "en-US")]
    EnUs, // 美式英文
}

impl Locale {
    /// 转换为 rust-i18n 使用的语言代码
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh-CN" | "zh" => Ok(Locale::ZhCn),
            "en-US" | "en" => Ok(Locale::EnUs),
            _ => Err(FleetError::unknown_enum("Locale", s)),
        }
    }
}

/// 解析语言代码
pub fn parse_locale(s: &str) -> FleetResult<Locale> {
    s.parse()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use metro_fleet::i18n::{t, Locale};
/// let msg = t("overhaul.status.planning", Locale::EnUs);
/// ```
pub fn t(key: &str, locale: Locale) -> String {
    rust_i18n::t!(key, locale = locale.as_str()).to_string()
}

/// 翻译消息（带参数）
///
/// 占位符格式: `%{name}`
pub fn t_with_args(key: &str, locale: Locale, args: &[(&str, &str)]) -> String {
    let mut result = t(key, locale);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
