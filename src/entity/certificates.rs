//! 证书实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub certificate_type: String,
    #[sea_orm(unique)]
    pub certificate_number: String,
    pub issue_date: String,
    pub purpose: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub revoked_reason: Option<String>,
    pub issued_by: Option<i64>,
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
    pub fn into_certificate(self) -> crate::models::certificates::Certificate {
        use crate::models::certificates::{Certificate, CertificateStatus, CertificateType};
        use crate::utils::dates::from_timestamp;

        Certificate {
            id: self.id,
            student_id: self.student_id,
            certificate_type: self
                .certificate_type
                .parse::<CertificateType>()
                .unwrap_or(CertificateType::Bonafide),
            certificate_number: self.certificate_number,
            issue_date: super::stored_date(&self.issue_date),
            purpose: self.purpose,
            remarks: self.remarks,
            status: self
                .status
                .parse::<CertificateStatus>()
                .unwrap_or(CertificateStatus::Issued),
            revoked_reason: self.revoked_reason,
            issued_by: self.issued_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
