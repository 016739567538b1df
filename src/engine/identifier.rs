// ==========================================
// 地铁车辆检修管理 - 车厢编号生成
// ==========================================
// 依据: MMM-SL 项目车厢编号规则
// ==========================================
// 规则: "SL" + 两位列车号 + 两位车厢序号
// - 奇数位置 p: n = ceil(p/2), 序号 = 2n-1
// - 偶数位置 p: n = p/2,       序号 = 2n
// 约束: 同一列车内 (列车号, 位置) → 编号 为单射
// ==========================================
// 无状态: 所有函数为纯函数
// ==========================================

use crate::domain::types::{CarriageType, FormationType, MaintenanceLevel, VehicleStatus};
use crate::domain::vehicle::{Carriage, TrainFormation, Vehicle};
use crate::error::{FleetError, FleetResult};
use crate::i18n::{t, Locale};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use tracing::instrument;

/// 列车号下限
pub const MIN_TRAIN_NUMBER: u32 = 1;
/// 列车号上限 (Tr16)
pub const MAX_TRAIN_NUMBER: u32 = 16;

/// 12 编组典型配置: MC1+M+MP+T+T+MP+MP+T+T+MP+M+MC2
pub const TWELVE_CAR_TEMPLATE: [CarriageType; 12] = [
    CarriageType::MC1,
    CarriageType::M,
    CarriageType::MP,
    CarriageType::T,
    CarriageType::T,
    CarriageType::MP,
    CarriageType::MP,
    CarriageType::T,
    CarriageType::T,
    CarriageType::MP,
    CarriageType::M,
    CarriageType::MC2,
];

static TRAIN_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Tr(0[1-9]|1[0-6])$").expect("invalid train number regex"));

static CARRIAGE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^SL\d{4}$").expect("invalid carriage number regex"));

// ==========================================
// 编号校验 (公开契约)
// ==========================================

/// 校验列车编号 (Tr01-Tr16)
pub fn validate_train_number(train_number: &str) -> bool {
    TRAIN_NUMBER_RE.is_match(train_number)
}

/// 校验车厢编号 (SL + 4 位数字)
pub fn validate_carriage_number(carriage_number: &str) -> bool {
    CARRIAGE_NUMBER_RE.is_match(carriage_number)
}

fn check_train_number(train_number: u32) -> FleetResult<()> {
    if (MIN_TRAIN_NUMBER..=MAX_TRAIN_NUMBER).contains(&train_number) {
        Ok(())
    } else {
        Err(FleetError::InvalidIdentifierInput {
            train_number,
            position: None,
            reason: format!(
                "train_number must be within [{}, {}]",
                MIN_TRAIN_NUMBER, MAX_TRAIN_NUMBER
            ),
        })
    }
}

/// 格式化列车编号: 5 → "Tr05"
pub fn format_train_number(train_number: u32) -> FleetResult<String> {
    check_train_number(train_number)?;
    Ok(format!("Tr{:02}", train_number))
}

/// 解析列车编号: "Tr05" → 5
pub fn parse_train_number(train_number: &str) -> FleetResult<u32> {
    if !validate_train_number(train_number) {
        return Err(FleetError::unknown_enum("TrainNumber", train_number));
    }
    // 正则已保证 "Tr" 后为两位数字
    train_number[2..]
        .parse()
        .map_err(|_| FleetError::unknown_enum("TrainNumber", train_number))
}

// ==========================================
// 车厢编号生成
// ==========================================

/// 位置 → 车厢序号
fn sequence_digit(position: u32) -> u32 {
    if position % 2 == 1 {
        let n = position.div_ceil(2);
        2 * n - 1
    } else {
        let n = position / 2;
        2 * n
    }
}

/// 生成车厢编号
///
/// # 参数
/// - train_number: 列车号 (1-16)
/// - position: 车厢位置 (1..=编组车厢数)
/// - formation_type: 编组类型
///
/// # 示例
/// ```
/// use metro_fleet::domain::FormationType;
/// use metro_fleet::engine::identifier::generate_carriage_code;
/// assert_eq!(generate_carriage_code(5, 3, FormationType::Twelve).unwrap(), "SL0503");
/// ```
pub fn generate_carriage_code(
    train_number: u32,
    position: u32,
    formation_type: FormationType,
) -> FleetResult<String> {
    check_train_number(train_number)?;

    let size = formation_type.size();
    if position < 1 || position > size {
        return Err(FleetError::InvalidIdentifierInput {
            train_number,
            position: Some(position),
            reason: format!("position must be within [1, {}] for {}", size, formation_type),
        });
    }

    Ok(format!(
        "SL{:02}{:02}",
        train_number,
        sequence_digit(position)
    ))
}

/// 编组车型模板
///
/// 仅 12 编组有标准模板; 6/8 编组模板需由车辆标准提供, 不做推测
pub fn formation_template(formation_type: FormationType) -> FleetResult<&'static [CarriageType]> {
    match formation_type {
        FormationType::Twelve => Ok(&TWELVE_CAR_TEMPLATE),
        FormationType::Six | FormationType::Eight => {
            Err(FleetError::FormationTemplateUnavailable {
                formation: formation_type.to_string(),
            })
        }
    }
}

/// 批量生成编组车厢
///
/// 所有车厢初始状态为 in_service, 按位置升序
#[instrument]
pub fn generate_formation(
    train_number: u32,
    formation_type: FormationType,
) -> FleetResult<Vec<Carriage>> {
    let template = formation_template(formation_type)?;

    let carriages = template
        .iter()
        .zip(1u32..)
        .map(|(carriage_type, position)| {
            Ok(Carriage {
                id: None,
                carriage_number: generate_carriage_code(train_number, position, formation_type)?,
                carriage_type: *carriage_type,
                position,
                manufacturer: None,
                manufacture_date: None,
                serial_number: None,
                status: VehicleStatus::InService,
            })
        })
        .collect::<FleetResult<Vec<_>>>()?;

    tracing::debug!(train_number, count = carriages.len(), "编组车厢生成完成");
    Ok(carriages)
}

/// 生成完整编组 (含编组类型)
pub fn build_train_formation(
    train_number: u32,
    formation_type: FormationType,
) -> FleetResult<TrainFormation> {
    Ok(TrainFormation {
        formation_type,
        carriages: generate_formation(train_number, formation_type)?,
    })
}

/// 编组摘要 (本地化)
pub fn formation_summary(train_number: u32, formation: &TrainFormation, locale: Locale) -> FleetResult<String> {
    let train = format_train_number(train_number)?;
    let count = formation.carriages.len().to_string();
    Ok(crate::i18n::t_with_args(
        "formation.summary",
        locale,
        &[("train", &train), ("count", &count)],
    ))
}

// ==========================================
// 编组一致性校验
// ==========================================

/// 校验车辆编组: 车厢数、位置唯一且在范围内、编号与 (列车号, 位置) 一致
pub fn validate_formation(vehicle: &Vehicle) -> FleetResult<()> {
    let train_number = parse_train_number(&vehicle.train_number)?;
    let formation = &vehicle.formation;
    let size = formation.formation_type.size();

    if formation.carriages.len() as u32 != size {
        return Err(FleetError::InvalidIdentifierInput {
            train_number,
            position: None,
            reason: format!(
                "{} requires {} carriages, got {}",
                formation.formation_type,
                size,
                formation.carriages.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for carriage in &formation.carriages {
        let expected =
            generate_carriage_code(train_number, carriage.position, formation.formation_type)?;
        if !seen.insert(carriage.position) {
            return Err(FleetError::InvalidIdentifierInput {
                train_number,
                position: Some(carriage.position),
                reason: "duplicate position in formation".to_string(),
            });
        }
        if carriage.carriage_number != expected {
            return Err(FleetError::InvalidIdentifierInput {
                train_number,
                position: Some(carriage.position),
                reason: format!(
                    "carriage_number {} does not match expected {}",
                    carriage.carriage_number, expected
                ),
            });
        }
    }

    Ok(())
}

// ==========================================
// 日常维护等级选项
// ==========================================

/// 维护等级选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceLevelOption {
    pub value: MaintenanceLevel,
    pub label: String,
    pub interval: u32,
}

/// 获取维护等级选项 (日检/周检/月检/季检/年检)
pub fn maintenance_levels(locale: Locale) -> Vec<MaintenanceLevelOption> {
    MaintenanceLevel::ALL
        .iter()
        .map(|level| MaintenanceLevelOption {
            value: *level,
            label: t(&format!("maintenance.level.{}", level.as_str()), locale),
            interval: level.interval_days(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_digit_matches_position() {
        for p in 1..=12 {
            assert_eq!(sequence_digit(p), p);
        }
    }

    #[test]
    fn test_generate_carriage_code_examples() {
        assert_eq!(generate_carriage_code(1, 1, FormationType::Twelve).unwrap(), "SL0101");
        assert_eq!(generate_carriage_code(16, 12, FormationType::Twelve).unwrap(), "SL1612");
        assert_eq!(generate_carriage_code(3, 6, FormationType::Six).unwrap(), "SL0306");
    }

    #[test]
    fn test_generate_carriage_code_out_of_range() {
        assert!(matches!(
            generate_carriage_code(0, 1, FormationType::Twelve),
            Err(FleetError::InvalidIdentifierInput { train_number: 0, position: None, .. })
        ));
        assert!(matches!(
            generate_carriage_code(17, 1, FormationType::Twelve),
            Err(FleetError::InvalidIdentifierInput { .. })
        ));
        assert!(matches!(
            generate_carriage_code(5, 0, FormationType::Twelve),
            Err(FleetError::InvalidIdentifierInput { position: Some(0), .. })
        ));
        assert!(matches!(
            generate_carriage_code(5, 7, FormationType::Six),
            Err(FleetError::InvalidIdentifierInput { position: Some(7), .. })
        ));
    }

    #[test]
    fn test_six_and_eight_templates_unavailable() {
        assert_eq!(
            generate_formation(5, FormationType::Six).unwrap_err(),
            FleetError::FormationTemplateUnavailable {
                formation: "6编组".to_string()
            }
        );
        assert!(generate_formation(5, FormationType::Eight).is_err());
    }

    #[test]
    fn test_train_number_format_and_parse() {
        assert_eq!(format_train_number(5).unwrap(), "Tr05");
        assert_eq!(format_train_number(16).unwrap(), "Tr16");
        assert!(format_train_number(17).is_err());
        assert_eq!(parse_train_number("Tr09").unwrap(), 9);
        assert!(parse_train_number("Tr00").is_err());
        assert!(parse_train_number("tr09").is_err());
    }

    #[test]
    fn test_carriage_number_predicate() {
        assert!(validate_carriage_number("SL0101"));
        assert!(!validate_carriage_number("SL101"));
        assert!(!validate_carriage_number("SL01012"));
        assert!(!validate_carriage_number("sl0101"));
    }

    #[test]
    fn test_maintenance_levels_localized() {
        let zh = maintenance_levels(Locale::ZhCn);
        assert_eq!(zh.len(), 5);
        assert_eq!(zh[0].label, "日检");
        assert_eq!(zh[0].interval, 1);
        assert_eq!(zh[4].label, "年检");
        assert_eq!(zh[4].interval, 365);

        let en = maintenance_levels(Locale::EnUs);
        assert_eq!(en[1].label, "Weekly Inspection");
    }
}
