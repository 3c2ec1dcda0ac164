//! 体检记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "health_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub checkup_date: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub blood_group: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub allergies: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_health_record(self) -> crate::models::health::HealthRecord {
        use crate::models::health::{BloodGroup, HealthRecord};
        use crate::utils::dates::from_timestamp;

        HealthRecord {
            id: self.id,
            student_id: self.student_id,
            checkup_date: super::stored_date(&self.checkup_date),
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            bmi: self.bmi,
            blood_group: self
                .blood_group
                .as_deref()
                .and_then(|g| g.parse::<BloodGroup>().ok()),
            allergies: self.allergies,
            notes: self.notes,
            recorded_by: self.recorded_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
