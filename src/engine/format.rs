// ==========================================
// 地铁车辆检修管理 - 本地化格式化
// ==========================================
// 职责: 金额 / 数字 / 日期 的界面显示格式
// 约束: 显示语言由调用方传入 (当前界面语言);
//       记录上的 currency 字段只决定币种代码, 不决定显示语言
// ==========================================

use crate::dates::parse_date;
use crate::domain::overhaul::DEFAULT_CURRENCY;
use crate::error::FleetResult;
use crate::i18n::Locale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 日期显示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    Short, // 2024/01/05, 01/05/2024
    #[default]
    Long, // 2024年1月5日, January 5, 2024
}

// ==========================================
// 数字分组
// ==========================================

/// 数字符号 (千位分隔符, 小数点)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub group: char,
    pub decimal: char,
}

/// 按界面语言取数字符号 (CLDR: zh-CN 与 en-US 均为 "," 与 ".")
pub fn number_symbols(locale: Locale) -> NumberSymbols {
    match locale {
        Locale::ZhCn | Locale::EnUs => NumberSymbols {
            group: ',',
            decimal: '.',
        },
    }
}

/// 整数部分按千位分组
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// 非负数按小数位格式化并分组; trim=true 时去掉末尾 0
fn format_unsigned(
    value: f64,
    fraction_digits: usize,
    trim: bool,
    symbols: NumberSymbols,
) -> String {
    let fixed = format!("{:.*}", fraction_digits, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let frac = if trim {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let grouped = group_thousands(int_part, symbols.group);
    if frac.is_empty() {
        grouped
    } else {
        format!("{}{}{}", grouped, symbols.decimal, frac)
    }
}

/// 舍入后是否为负 (-0.001 按 2 位小数显示为 0.00, 不带负号)
fn is_visibly_negative(value: f64, fraction_digits: usize) -> bool {
    let scale = 10f64.powi(fraction_digits as i32);
    value < 0.0 && (value.abs() * scale).round() > 0.0
}

// ==========================================
// 货币
// ==========================================

/// (币种符号, 小数位)
fn currency_style(code: &str, locale: Locale) -> (String, usize) {
    match (code, locale) {
        ("CNY", Locale::ZhCn) => ("¥".to_string(), 2),
        ("CNY", Locale::EnUs) => ("CN¥".to_string(), 2),
        ("USD", Locale::ZhCn) => ("US$".to_string(), 2),
        ("USD", Locale::EnUs) => ("$".to_string(), 2),
        ("JPY", Locale::ZhCn) => ("JP¥".to_string(), 0),
        ("JPY", Locale::EnUs) => ("¥".to_string(), 0),
        ("EUR", _) => ("€".to_string(), 2),
        ("GBP", _) => ("£".to_string(), 2),
        ("HKD", _) => ("HK$".to_string(), 2),
        // 未收录币种: 代码 + 不换行空格
        (other, _) => (format!("{}\u{a0}", other), 2),
    }
}

/// 格式化金额
///
/// # 参数
/// - amount: 金额
/// - currency: 币种代码, None 时为 CNY
/// - locale: 当前界面语言
///
/// # 示例
/// ```
/// use metro_fleet::engine::format::format_currency;
/// use metro_fleet::i18n::Locale;
/// assert_eq!(format_currency(1234.5, None, Locale::ZhCn), "¥1,234.50");
/// assert_eq!(format_currency(1234.5, Some("USD"), Locale::EnUs), "$1,234.50");
/// ```
pub fn format_currency(amount: f64, currency: Option<&str>, locale: Locale) -> String {
    let code = currency
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let (symbol, digits) = currency_style(&code, locale);

    if amount.is_nan() {
        return format!("{}NaN", symbol);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", sign, symbol);
    }

    let sign = if is_visibly_negative(amount, digits) { "-" } else { "" };
    format!(
        "{}{}{}",
        sign,
        symbol,
        format_unsigned(amount.abs(), digits, false, number_symbols(locale))
    )
}

// ==========================================
// 数字
// ==========================================

/// 格式化数字: 千位分组, 最多 3 位小数, 去掉末尾 0
///
/// 分隔符由 number_symbols(locale) 决定
pub fn format_number(value: f64, locale: Locale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
    }

    let sign = if is_visibly_negative(value, 3) { "-" } else { "" };
    format!(
        "{}{}",
        sign,
        format_unsigned(value.abs(), 3, true, number_symbols(locale))
    )
}

// ==========================================
// 日期
// ==========================================

/// 格式化日期
pub fn format_date(date: NaiveDate, style: DateStyle, locale: Locale) -> String {
    let pattern = match (locale, style) {
        (Locale::ZhCn, DateStyle::Short) => "%Y/%m/%d",
        (Locale::ZhCn, DateStyle::Long) => "%Y年%-m月%-d日",
        (Locale::EnUs, DateStyle::Short) => "%m/%d/%Y",
        (Locale::EnUs, DateStyle::Long) => "%B %-d, %Y",
    };
    date.format(pattern).to_string()
}

/// 格式化日期字符串; 非法日期报 InvalidDateInput
pub fn format_date_str(raw: &str, style: DateStyle, locale: Locale) -> FleetResult<String> {
    Ok(format_date(parse_date("date", raw)?, style, locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0", ','), "0");
        assert_eq!(group_thousands("999", ','), "999");
        assert_eq!(group_thousands("1000", ','), "1,000");
        assert_eq!(group_thousands("1234567", ','), "1,234,567");
        assert_eq!(group_thousands("1234567", '\u{a0}'), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn test_number_symbols_follow_locale() {
        for locale in [Locale::ZhCn, Locale::EnUs] {
            assert_eq!(
                number_symbols(locale),
                NumberSymbols {
                    group: ',',
                    decimal: '.'
                }
            );
        }
        let spaced = NumberSymbols {
            group: ' ',
            decimal: ',',
        };
        assert_eq!(format_unsigned(1234.5, 2, false, spaced), "1 234,50");
        assert_eq!(format_unsigned(1000.0, 3, true, spaced), "1 000");
    }

    #[test]
    fn test_currency_locale_drives_symbol() {
        assert_eq!(format_currency(1234567.891, None, Locale::ZhCn), "¥1,234,567.89");
        assert_eq!(format_currency(1234567.891, Some("CNY"), Locale::EnUs), "CN¥1,234,567.89");
        assert_eq!(format_currency(99.5, Some("USD"), Locale::ZhCn), "US$99.50");
        assert_eq!(format_currency(99.5, Some("usd"), Locale::EnUs), "$99.50");
        assert_eq!(format_currency(1500.0, Some("EUR"), Locale::EnUs), "€1,500.00");
    }

    #[test]
    fn test_currency_zero_fraction_and_unknown_code() {
        assert_eq!(format_currency(1234.6, Some("JPY"), Locale::EnUs), "¥1,235");
        assert_eq!(format_currency(10.0, Some("CHF"), Locale::EnUs), "CHF\u{a0}10.00");
        assert_eq!(format_currency(10.0, Some("  "), Locale::ZhCn), "¥10.00");
    }

    #[test]
    fn test_currency_negative_and_non_finite() {
        assert_eq!(format_currency(-2500.0, None, Locale::ZhCn), "-¥2,500.00");
        assert_eq!(format_currency(-0.001, None, Locale::ZhCn), "¥0.00");
        assert_eq!(format_currency(f64::NAN, None, Locale::ZhCn), "¥NaN");
        assert_eq!(format_currency(f64::NEG_INFINITY, Some("USD"), Locale::EnUs), "-$∞");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.5678, Locale::ZhCn), "1,234.568");
        assert_eq!(format_number(1000.0, Locale::EnUs), "1,000");
        assert_eq!(format_number(0.1, Locale::EnUs), "0.1");
        assert_eq!(format_number(-42.25, Locale::EnUs), "-42.25");
    }

    #[test]
    fn test_format_date_styles() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(d, DateStyle::Short, Locale::ZhCn), "2024/01/05");
        assert_eq!(format_date(d, DateStyle::Long, Locale::ZhCn), "2024年1月5日");
        assert_eq!(format_date(d, DateStyle::Short, Locale::EnUs), "01/05/2024");
        assert_eq!(format_date(d, DateStyle::Long, Locale::EnUs), "January 5, 2024");
    }

    #[test]
    fn test_format_date_str_rejects_garbage() {
        assert_eq!(
            format_date_str("2024-12-25", DateStyle::Short, Locale::EnUs).unwrap(),
            "12/25/2024"
        );
        assert!(format_date_str("tomorrow", DateStyle::Short, Locale::EnUs).is_err());
    }
}
