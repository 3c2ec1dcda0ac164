//! 学生体检记录

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
    pub enum BloodGroup {
        APositive => "A+",
        ANegative => "A-",
        BPositive => "B+",
        BNegative => "B-",
        AbPositive => "AB+",
        AbNegative => "AB-",
        OPositive => "O+",
        ONegative => "O-",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct HealthRecord {
    pub id: i64,
    pub student_id: i64,
    pub checkup_date: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub blood_group: Option<BloodGroup>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// BMI = 体重(kg) / 身高(m)²，保留一位小数
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<f64, String> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err("height_cm must be greater than 0".to_string());
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err("weight_kg must be greater than 0".to_string());
    }
    let meters = height_cm / 100.0;
    Ok((weight_kg / (meters * meters) * 10.0).round() / 10.0)
}

pub fn validate_checkup_date(date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if date > today {
        return Err("checkup_date must not be in the future".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct CreateHealthRecordRequest {
    pub student_id: i64,
    pub checkup_date: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub blood_group: Option<BloodGroup>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct UpdateHealthRecordRequest {
    pub checkup_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub blood_group: Option<BloodGroup>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct HealthRecordListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct HealthRecordListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub student_ids: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        assert_eq!(compute_bmi(150.0, 45.0).unwrap(), 20.0);
        assert_eq!(compute_bmi(132.0, 28.5).unwrap(), 16.4);
        assert!(compute_bmi(0.0, 45.0).is_err());
        assert!(compute_bmi(150.0, -1.0).is_err());
    }

    #[test]
    fn test_blood_group_strings() {
        assert_eq!(BloodGroup::AbNegative.as_str(), "AB-");
        assert_eq!("O+".parse::<BloodGroup>().unwrap(), BloodGroup::OPositive);
        assert!("C+".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn test_checkup_not_in_future() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert!(validate_checkup_date(today, today).is_ok());
        assert!(validate_checkup_date(today.succ_opt().unwrap(), today).is_err());
    }
}
