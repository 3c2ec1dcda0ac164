//! 证书存储操作

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::certificates::{self, Entity as Certificates};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    certificates::{
        Certificate, CertificateListQuery, CertificateStatus, CertificateType,
        IssueCertificateRequest, UpdateCertificateRequest,
    },
    common::normalize_page,
};
use crate::utils::dates::{format_date, year_bounds};
use crate::utils::numbering::{certificate_number, next_sequence};

/// 下一个证书序号：同类型同年份的最大编号 + 1
async fn next_certificate_seq<C: ConnectionTrait>(
    db: &C,
    certificate_type: CertificateType,
    year: i32,
) -> Result<u64> {
    let (first_day, last_day) = year_bounds(year);
    let numbers = Certificates::find()
        .select_only()
        .column(certificates::Column::CertificateNumber)
        .filter(certificates::Column::CertificateType.eq(certificate_type.as_str()))
        .filter(certificates::Column::IssueDate.between(first_day, last_day))
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(db_err("Failed to read certificate sequence"))?;

    Ok(next_sequence(
        &numbers,
        &format!("{}/{year}/", certificate_type.prefix()),
    ))
}

impl SeaOrmStorage {
    pub async fn issue_certificate_impl(
        &self,
        req: IssueCertificateRequest,
        issued_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<Certificate> {
        let issue_date = req.issue_date.unwrap_or(today);
        if issue_date > today {
            return Err(ErpError::validation("issue_date cannot be in the future"));
        }
        if self.get_student_by_id_impl(req.student_id).await?.is_none() {
            return Err(ErpError::not_found(format!(
                "Student {} not found",
                req.student_id
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin certificate transaction"))?;

        let seq = next_certificate_seq(&txn, req.certificate_type, issue_date.year()).await?;
        let now = now_ts();
        let model = certificates::ActiveModel {
            student_id: Set(req.student_id),
            certificate_type: Set(req.certificate_type.to_string()),
            certificate_number: Set(certificate_number(
                req.certificate_type.prefix(),
                issue_date.year(),
                seq,
            )),
            issue_date: Set(format_date(issue_date)),
            purpose: Set(req.purpose),
            remarks: Set(req.remarks),
            status: Set(CertificateStatus::Issued.to_string()),
            revoked_reason: Set(None),
            issued_by: Set(issued_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to issue certificate"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit certificate"))?;

        Ok(model.into_certificate())
    }

    pub async fn get_certificate_by_id_impl(&self, id: i64) -> Result<Option<Certificate>> {
        let result = Certificates::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query certificate"))?;

        Ok(result.map(|m| m.into_certificate()))
    }

    pub async fn list_certificates_impl(
        &self,
        query: CertificateListQuery,
    ) -> Result<PaginatedResponse<Certificate>> {
        let mut select = Certificates::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(certificates::Column::StudentId.eq(student_id));
        }
        if let Some(certificate_type) = query.certificate_type {
            select = select.filter(certificates::Column::CertificateType.eq(certificate_type.as_str()));
        }
        if let Some(status) = query.status {
            select = select.filter(certificates::Column::Status.eq(status.as_str()));
        }
        if let Some(ref ids) = query.student_ids {
            select = select.filter(certificates::Column::StudentId.is_in(ids.clone()));
        }

        select = select
            .order_by_desc(certificates::Column::IssueDate)
            .order_by_desc(certificates::Column::Id);

        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list certificates",
            |m| m.into_certificate(),
        )
        .await
    }

    pub async fn update_certificate_impl(
        &self,
        id: i64,
        update: UpdateCertificateRequest,
    ) -> Result<Option<Certificate>> {
        let Some(existing) = self.get_certificate_by_id_impl(id).await? else {
            return Ok(None);
        };
        if existing.status == CertificateStatus::Revoked {
            return Err(ErpError::validation("A revoked certificate cannot be modified"));
        }

        let mut model = certificates::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(purpose) = update.purpose {
            model.purpose = Set(Some(purpose));
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update certificate"))?;

        self.get_certificate_by_id_impl(id).await
    }

    /// 吊销证书，吊销后不可恢复
    pub async fn revoke_certificate_impl(
        &self,
        id: i64,
        reason: String,
    ) -> Result<Option<Certificate>> {
        let Some(existing) = self.get_certificate_by_id_impl(id).await? else {
            return Ok(None);
        };
        if existing.status == CertificateStatus::Revoked {
            return Err(ErpError::validation("Certificate is already revoked"));
        }
        if reason.trim().is_empty() {
            return Err(ErpError::validation("reason must not be empty"));
        }

        certificates::ActiveModel {
            id: Set(id),
            status: Set(CertificateStatus::Revoked.to_string()),
            revoked_reason: Set(Some(reason.trim().to_string())),
            updated_at: Set(now_ts()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("Failed to revoke certificate"))?;

        self.get_certificate_by_id_impl(id).await
    }

    pub async fn delete_certificate_impl(&self, id: i64) -> Result<bool> {
        let result = Certificates::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete certificate"))?;

        Ok(result.rows_affected > 0)
    }
}
