// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use metro_fleet::domain::overhaul::{OverhaulItem, OverhaulPlan};
use metro_fleet::domain::prediction::WheelsetStatistics;
use metro_fleet::domain::types::{
    FormationType, OverhaulLevel, OverhaulStatus, OverhaulType, VehicleStatus, VehicleType,
};
use metro_fleet::domain::vehicle::{TrainFormation, Vehicle};
use metro_fleet::engine::identifier::build_train_formation;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// OverhaulPlan 构建器
// ==========================================

pub struct PlanBuilder {
    plan_code: String,
    train_number: String,
    overhaul_type: OverhaulType,
    overhaul_level: OverhaulLevel,
    status: OverhaulStatus,
    planned_start_date: String,
    planned_end_date: String,
    actual_start_date: Option<String>,
    actual_end_date: Option<String>,
    estimated_cost: Option<f64>,
    actual_cost: Option<f64>,
    contractor: Option<String>,
    workshop: Option<String>,
    items: Vec<OverhaulItem>,
}

impl PlanBuilder {
    pub fn new(plan_code: &str) -> Self {
        Self {
            plan_code: plan_code.to_string(),
            train_number: "Tr01".to_string(),
            overhaul_type: OverhaulType::Scheduled,
            overhaul_level: OverhaulLevel::A2,
            status: OverhaulStatus::Planning,
            planned_start_date: "2024-03-01".to_string(),
            planned_end_date: "2024-03-31".to_string(),
            actual_start_date: None,
            actual_end_date: None,
            estimated_cost: None,
            actual_cost: None,
            contractor: None,
            workshop: None,
            items: Vec::new(),
        }
    }

    pub fn train(mut self, train_number: &str) -> Self {
        self.train_number = train_number.to_string();
        self
    }

    pub fn overhaul_type(mut self, overhaul_type: OverhaulType) -> Self {
        self.overhaul_type = overhaul_type;
        self
    }

    pub fn level(mut self, level: OverhaulLevel) -> Self {
        self.overhaul_level = level;
        self
    }

    pub fn status(mut self, status: OverhaulStatus) -> Self {
        self.status = status;
        self
    }

    pub fn planned(mut self, start: &str, end: &str) -> Self {
        self.planned_start_date = start.to_string();
        self.planned_end_date = end.to_string();
        self
    }

    pub fn actual(mut self, start: &str, end: &str) -> Self {
        self.actual_start_date = Some(start.to_string());
        self.actual_end_date = Some(end.to_string());
        self
    }

    pub fn costs(mut self, estimated: f64, actual: f64) -> Self {
        self.estimated_cost = Some(estimated);
        self.actual_cost = Some(actual);
        self
    }

    pub fn estimated_cost(mut self, estimated: f64) -> Self {
        self.estimated_cost = Some(estimated);
        self
    }

    pub fn contractor(mut self, contractor: &str) -> Self {
        self.contractor = Some(contractor.to_string());
        self
    }

    pub fn workshop(mut self, workshop: &str) -> Self {
        self.workshop = Some(workshop.to_string());
        self
    }

    pub fn item(mut self, item_code: &str, progress: Option<f64>) -> Self {
        self.items.push(OverhaulItem {
            item_code: item_code.to_string(),
            item_name: format!("项目 {}", item_code),
            progress_percentage: progress,
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> OverhaulPlan {
        OverhaulPlan {
            id: Some(format!("id-{}", self.plan_code)),
            plan_code: self.plan_code,
            vehicle_id: None,
            train_number: self.train_number,
            overhaul_type: self.overhaul_type,
            overhaul_level: self.overhaul_level,
            status: self.status,
            planned_start_date: self.planned_start_date,
            planned_end_date: self.planned_end_date,
            actual_start_date: self.actual_start_date,
            actual_end_date: self.actual_end_date,
            mileage_at_overhaul: None,
            next_overhaul_mileage: None,
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
            currency: None,
            contractor: self.contractor,
            workshop: self.workshop,
            responsible_person: None,
            contact_phone: None,
            approval_status: None,
            approved_by: None,
            approved_at: None,
            approval_notes: None,
            description: None,
            technical_requirements: None,
            safety_requirements: None,
            quality_standards: None,
            items: self.items,
            spare_parts: Vec::new(),
            duration_days: None,
            progress_percentage: None,
            cost_variance: None,
            created_at: None,
            updated_at: None,
            created_by: None,
            updated_by: None,
        }
    }
}

// ==========================================
// Vehicle 构建器
// ==========================================

pub struct VehicleBuilder {
    train_number: u32,
    vehicle_type: VehicleType,
    status: VehicleStatus,
    total_mileage: f64,
    average_daily_mileage: Option<f64>,
    formation: Option<TrainFormation>,
}

impl VehicleBuilder {
    pub fn new(train_number: u32) -> Self {
        Self {
            train_number,
            vehicle_type: VehicleType::Passenger,
            status: VehicleStatus::InService,
            total_mileage: 0.0,
            average_daily_mileage: None,
            formation: None,
        }
    }

    pub fn vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = vehicle_type;
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn mileage(mut self, km: f64) -> Self {
        self.total_mileage = km;
        self
    }

    pub fn daily_mileage(mut self, km: f64) -> Self {
        self.average_daily_mileage = Some(km);
        self
    }

    /// 使用非标准编组 (跳过模板生成)
    pub fn formation(mut self, formation: TrainFormation) -> Self {
        self.formation = Some(formation);
        self
    }

    pub fn build(self) -> Vehicle {
        let formation = match self.formation {
            Some(formation) => formation,
            None => build_train_formation(self.train_number, FormationType::Twelve).unwrap(),
        };
        Vehicle {
            id: None,
            train_number: format!("Tr{:02}", self.train_number),
            project_code: "MMM-SL".to_string(),
            vehicle_type: self.vehicle_type,
            formation,
            line: "SL".to_string(),
            depot: Some("滨海车辆段".to_string()),
            manufacturer: "CRRC".to_string(),
            manufacture_date: "2021-06-01".to_string(),
            commission_date: "2022-01-15".to_string(),
            total_mileage: self.total_mileage,
            average_daily_mileage: self.average_daily_mileage,
            status: self.status,
            last_maintenance_date: None,
            next_maintenance_date: None,
            maintenance_level: None,
            special_features: None,
            notes: None,
            created_at: None,
            updated_at: None,
            created_by: None,
            updated_by: None,
        }
    }
}

// ==========================================
// WheelsetStatistics 构建器
// ==========================================

pub struct WheelsetBuilder {
    vehicle_id: String,
    position: String,
    diameter: f64,
    inspection_date: String,
    last_rewheeling_date: Option<String>,
}

impl WheelsetBuilder {
    pub fn new(vehicle_id: &str, diameter: f64) -> Self {
        Self {
            vehicle_id: vehicle_id.to_string(),
            position: "1轴".to_string(),
            diameter,
            inspection_date: "2024-01-10".to_string(),
            last_rewheeling_date: None,
        }
    }

    pub fn position(mut self, position: &str) -> Self {
        self.position = position.to_string();
        self
    }

    pub fn inspected(mut self, date: &str) -> Self {
        self.inspection_date = date.to_string();
        self
    }

    pub fn rewheeled(mut self, date: &str) -> Self {
        self.last_rewheeling_date = Some(date.to_string());
        self
    }

    pub fn build(self) -> WheelsetStatistics {
        WheelsetStatistics {
            id: None,
            vehicle_id: self.vehicle_id,
            wheelset_position: self.position,
            current_diameter: self.diameter,
            flange_thickness: None,
            flange_height: None,
            qr_value: None,
            mileage_at_measurement: None,
            last_rewheeling_date: self.last_rewheeling_date,
            next_rewheeling_mileage: None,
            wear_rate: 0.0,
            status: "normal".to_string(),
            inspection_date: self.inspection_date,
            inspector: None,
            notes: None,
        }
    }
}
