//! 证书（转学证明、在读证明等）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
    pub enum CertificateType {
        Transfer => "transfer",
        Bonafide => "bonafide",
        Character => "character",
        Conduct => "conduct",
        Migration => "migration",
    }
}

impl CertificateType {
    /// 证书编号前缀
    pub const fn prefix(&self) -> &'static str {
        match self {
            CertificateType::Transfer => "TC",
            CertificateType::Bonafide => "BC",
            CertificateType::Character => "CC",
            CertificateType::Conduct => "CON",
            CertificateType::Migration => "MC",
        }
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
    pub enum CertificateStatus {
        Issued => "issued",
        Revoked => "revoked",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct Certificate {
    pub id: i64,
    pub student_id: i64,
    pub certificate_type: CertificateType,
    pub certificate_number: String,
    pub issue_date: NaiveDate,
    pub purpose: Option<String>,
    pub remarks: Option<String>,
    pub status: CertificateStatus,
    pub revoked_reason: Option<String>,
    pub issued_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct IssueCertificateRequest {
    pub student_id: i64,
    pub certificate_type: CertificateType,
    pub issue_date: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct UpdateCertificateRequest {
    pub purpose: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct RevokeCertificateRequest {
    pub reason: String,
}

impl RevokeCertificateRequest {
    pub fn validate(&self) -> Result<(), String> {
        crate::utils::validate::require_text(&self.reason, "reason", 500)
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct CertificateListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub certificate_type: Option<CertificateType>,
    pub status: Option<CertificateStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct CertificateListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub certificate_type: Option<CertificateType>,
    pub status: Option<CertificateStatus>,
    pub student_ids: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        let prefixes: Vec<_> = CertificateType::ALL.iter().map(|t| t.prefix()).collect();
        assert_eq!(prefixes, vec!["TC", "BC", "CC", "CON", "MC"]);
    }

    #[test]
    fn test_revoke_needs_reason() {
        let req = RevokeCertificateRequest {
            reason: "  ".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
