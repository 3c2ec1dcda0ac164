//! 班级与科目

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub section: String,
    pub class_teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub class_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub section: String,
    pub class_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub section: Option<String>,
    pub class_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub search: Option<String>,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<(), String> {
        crate::utils::validate::require_text(&self.name, "name", 50)?;
        crate::utils::validate::require_text(&self.section, "section", 10)
    }
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        crate::utils::validate::require_text(&self.name, "name", 100)?;
        crate::utils::validate::require_text(&self.code, "code", 20)
    }
}
