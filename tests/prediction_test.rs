// ==========================================
// 磨耗预测集成测试
// ==========================================
// 测试目标: 整车预测的部件取值来源、风险等级、置信度、维护建议
// ==========================================

mod helpers;

use helpers::fleet_data_builder::{date, VehicleBuilder, WheelsetBuilder};
use metro_fleet::domain::prediction::ComponentMeasurement;
use metro_fleet::engine::prediction::{latest_wheelset_statistics, predict_vehicle};
use metro_fleet::{ComponentType, FleetError, Locale, PredictionOptions, RiskLevel};

#[test]
fn test_nominal_components_without_measurements() {
    let vehicle = VehicleBuilder::new(5).build();
    let report = predict_vehicle(
        &vehicle,
        &[],
        &[],
        &PredictionOptions::default(),
        date(2024, 3, 1),
        Locale::ZhCn,
    )
    .unwrap();

    // 无轮径数据时跳过轮对
    let components: Vec<_> = report.predictions.iter().map(|p| p.component_type).collect();
    assert_eq!(components, vec![ComponentType::BrakePad, ComponentType::Pantograph]);

    assert_eq!(report.predictions[0].remaining_life_days, 4166);
    assert_eq!(report.predictions[1].remaining_life_days, 700);
    assert_eq!(report.risk_level, RiskLevel::Low);
    assert_eq!(report.overall_confidence, 0.85);
    assert_eq!(report.next_maintenance_date.as_deref(), Some("2026-01-30"));
    assert_eq!(report.prediction_date, "2024-03-01");
    assert_eq!(report.train_number, "Tr05");
    assert_eq!(report.total_predictions(), 2);
    assert!(report
        .maintenance_recommendations
        .iter()
        .all(|r| r.action == "正常监控"));
}

#[test]
fn test_latest_wheelset_record_and_measurement_override() {
    let vehicle = VehicleBuilder::new(5).daily_mileage(300.0).build();
    let wheelsets = vec![
        WheelsetBuilder::new("Tr05", 850.0).inspected("2024-01-10").build(),
        WheelsetBuilder::new("Tr05", 841.0)
            .position("3轴")
            .inspected("2024-02-15")
            .build(),
        WheelsetBuilder::new("Tr06", 900.0).inspected("2024-02-28").build(),
    ];
    let measurements = vec![ComponentMeasurement {
        confidence: Some(0.95),
        ..ComponentMeasurement::new(ComponentType::Pantograph, 3.5)
    }];

    let report = predict_vehicle(
        &vehicle,
        &wheelsets,
        &measurements,
        &PredictionOptions::default(),
        date(2024, 3, 1),
        Locale::EnUs,
    )
    .unwrap();

    let days: Vec<_> = report.predictions.iter().map(|p| p.remaining_life_days).collect();
    assert_eq!(days, vec![666, 5555, 66]);
    assert_eq!(report.predictions[0].component_position, "3轴");
    assert_eq!(report.predictions[0].current_wear, 841.0);

    assert_eq!(report.risk_level, RiskLevel::Medium);
    assert_eq!(report.overall_confidence, 0.88);
    assert_eq!(report.next_maintenance_date.as_deref(), Some("2024-05-06"));

    let pantograph = &report.maintenance_recommendations[2];
    assert_eq!(pantograph.priority, RiskLevel::Medium);
    assert_eq!(pantograph.component, "pantograph-前右");
    assert_eq!(pantograph.action, "Schedule Replacement");
    assert_eq!(pantograph.estimated_cost, 5000);

    let wheelset = &report.maintenance_recommendations[0];
    assert_eq!(wheelset.estimated_cost, 15000);
    assert_eq!(wheelset.estimated_downtime_hours, 8);
}

#[test]
fn test_worn_brake_pads_raise_high_risk() {
    let vehicle = VehicleBuilder::new(7).build();
    let measurements = vec![
        ComponentMeasurement {
            component_position: Some("1位".to_string()),
            ..ComponentMeasurement::new(ComponentType::BrakePad, 5.2)
        },
        ComponentMeasurement {
            component_position: Some("2位".to_string()),
            ..ComponentMeasurement::new(ComponentType::BrakePad, 4.0)
        },
    ];

    let report = predict_vehicle(
        &vehicle,
        &[],
        &measurements,
        &PredictionOptions::default(),
        date(2024, 3, 1),
        Locale::ZhCn,
    )
    .unwrap();

    assert_eq!(report.predictions.len(), 3);
    assert_eq!(report.predictions[0].remaining_life_days, 33);
    assert_eq!(report.predictions[1].remaining_life_days, 1);
    assert_eq!(report.risk_level, RiskLevel::High);
    assert_eq!(report.next_maintenance_date.as_deref(), Some("2024-03-02"));

    let urgent = &report.maintenance_recommendations[1];
    assert_eq!(urgent.priority, RiskLevel::High);
    assert_eq!(urgent.component, "brake_pad-2位");
    assert_eq!(urgent.action, "立即更换");
    assert_eq!(urgent.reason, "预计1天内达到最小安全值");
}

#[test]
fn test_wheelset_matched_by_vehicle_id() {
    let mut vehicle = VehicleBuilder::new(9).build();
    vehicle.id = Some("V-0009".to_string());
    let wheelsets = vec![
        WheelsetBuilder::new("V-0009", 860.0).inspected("2024-02-01").build(),
        WheelsetBuilder::new("V-0009", 845.0).inspected("2024-02-01").build(),
    ];

    // 同日检测取靠前者
    let latest = latest_wheelset_statistics(&wheelsets, &vehicle).unwrap().unwrap();
    assert_eq!(latest.current_diameter, 860.0);

    let report = predict_vehicle(
        &vehicle,
        &wheelsets,
        &[],
        &PredictionOptions::default(),
        date(2024, 3, 1),
        Locale::ZhCn,
    )
    .unwrap();
    assert_eq!(report.predictions[0].component_type, ComponentType::Wheelset);
    assert_eq!(report.predictions[0].vehicle_id.as_deref(), Some("V-0009"));
    assert_eq!(report.vehicle_id.as_deref(), Some("V-0009"));
}

#[test]
fn test_report_serializes_snake_case() {
    let vehicle = VehicleBuilder::new(5).build();
    let report = predict_vehicle(
        &vehicle,
        &[],
        &[],
        &PredictionOptions::default(),
        date(2024, 3, 1),
        Locale::ZhCn,
    )
    .unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["risk_level"], "low");
    assert_eq!(value["predictions"][0]["component_type"], "brake_pad");
    assert_eq!(value["maintenance_recommendations"][1]["priority"], "low");
}

#[test]
fn test_invalid_inputs_are_reported() {
    let vehicle = VehicleBuilder::new(5).build();
    let today = date(2024, 3, 1);

    let broken = vec![WheelsetBuilder::new("Tr05", 850.0).inspected("昨天").build()];
    assert!(matches!(
        predict_vehicle(&vehicle, &broken, &[], &PredictionOptions::default(), today, Locale::ZhCn),
        Err(FleetError::InvalidDateInput { field: "inspection_date", .. })
    ));

    let options = PredictionOptions {
        confidence: -0.1,
        ..PredictionOptions::default()
    };
    assert!(matches!(
        predict_vehicle(&vehicle, &[], &[], &options, today, Locale::ZhCn),
        Err(FleetError::InvalidPredictionInput { field: "confidence", .. })
    ));

    let negative_mileage = VehicleBuilder::new(5).mileage(-10.0).build();
    assert!(matches!(
        predict_vehicle(
            &negative_mileage,
            &[],
            &[],
            &PredictionOptions::default(),
            today,
            Locale::ZhCn
        ),
        Err(FleetError::InvalidPredictionInput { field: "current_mileage", .. })
    ));
}
