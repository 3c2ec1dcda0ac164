use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Gender, StudentStatus};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{require_text, validate_phone};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub class_id: Option<i64>,
    pub roll_number: Option<i32>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i64>,
    pub parent_user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub roll_number: Option<i32>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i64>,
    pub parent_user_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

// 学生列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
    /// 学生/家长角色只能看到关联的学生
    pub only_ids: Option<Vec<i64>>,
}

impl StudentListQuery {
    pub fn from_params(params: StudentListParams, only_ids: Option<Vec<i64>>) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            class_id: params.class_id,
            status: params.status,
            search: params.search,
            only_ids,
        }
    }
}

fn validate_birth_date(date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if date > today {
        return Err("date_of_birth cannot be in the future".to_string());
    }
    Ok(())
}

fn validate_roll_number(roll: Option<i32>) -> Result<(), String> {
    match roll {
        Some(r) if r <= 0 => Err("roll_number must be positive".to_string()),
        _ => Ok(()),
    }
}

fn validate_guardian_phone(phone: Option<&str>) -> Result<(), String> {
    match phone {
        Some(p) if !p.trim().is_empty() => validate_phone(p).map_err(str::to_string),
        _ => Ok(()),
    }
}

impl CreateStudentRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        require_text(&self.admission_number, "admission_number", 30)?;
        require_text(&self.first_name, "first_name", 100)?;
        if self.last_name.chars().count() > 100 {
            return Err("last_name must be at most 100 characters".to_string());
        }
        validate_birth_date(self.date_of_birth, today)?;
        validate_roll_number(self.roll_number)?;
        validate_guardian_phone(self.guardian_phone.as_deref())
    }
}

impl UpdateStudentRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if let Some(first_name) = &self.first_name {
            require_text(first_name, "first_name", 100)?;
        }
        if let Some(dob) = self.date_of_birth {
            validate_birth_date(dob, today)?;
        }
        validate_roll_number(self.roll_number)?;
        validate_guardian_phone(self.guardian_phone.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            admission_number: "ADM-001".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(2012, 5, 17).unwrap(),
            class_id: Some(1),
            roll_number: Some(12),
            guardian_name: Some("Ravi Rao".to_string()),
            guardian_phone: Some("9876543210".to_string()),
            address: None,
            user_id: None,
            parent_user_id: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_student() {
        assert!(request().validate(today()).is_ok());
    }

    #[test]
    fn test_rejects_blank_admission_number() {
        let mut req = request();
        req.admission_number = "  ".to_string();
        assert!(req.validate(today()).is_err());
    }

    #[test]
    fn test_rejects_future_birth_date() {
        let mut req = request();
        req.date_of_birth = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(
            req.validate(today()).unwrap_err(),
            "date_of_birth cannot be in the future"
        );
    }

    #[test]
    fn test_rejects_bad_roll_and_phone() {
        let mut req = request();
        req.roll_number = Some(0);
        assert!(req.validate(today()).is_err());

        let mut req = request();
        req.guardian_phone = Some("12".to_string());
        assert!(req.validate(today()).is_err());
    }
}
