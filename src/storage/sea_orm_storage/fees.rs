//! 收费标准、学生费用与缴费存储操作

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::fee_payments::{self, Entity as FeePayments};
use crate::entity::fee_structures::{self, Entity as FeeStructures};
use crate::entity::fees::{self, Entity as Fees};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    fees::{
        derive::{FeeFigures, derive_fee, validate_components},
        entities::{Fee, FeePayment, FeeStructure, PaymentReceipt, PaymentStatus},
        requests::{
            CreateFeeRequest, CreateFeeStructureRequest, CreatePaymentRequest, FeeListQuery,
            UpdateFeeRequest, UpdateFeeStructureRequest,
        },
    },
    school::SchoolListParams,
};
use crate::utils::dates::format_date;
use crate::utils::numbering::{next_sequence, receipt_number};
use crate::utils::{approx_eq, escape_like_pattern, round2};
use crate::utils::dates::year_bounds;

fn apply_fee_filters(mut select: Select<Fees>, query: &FeeListQuery, today: NaiveDate) -> Select<Fees> {
    if let Some(student_id) = query.student_id {
        select = select.filter(fees::Column::StudentId.eq(student_id));
    }
    if let Some(ref ids) = query.student_ids {
        select = select.filter(fees::Column::StudentId.is_in(ids.clone()));
    }
    // 状态按当天日期派生，存量记录中的 pending/partial 可能已逾期
    if let Some(status) = query.status {
        let due = format_date(today);
        select = match status {
            PaymentStatus::Paid => {
                select.filter(fees::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
            }
            PaymentStatus::Overdue => select
                .filter(fees::Column::PaymentStatus.ne(PaymentStatus::Paid.as_str()))
                .filter(fees::Column::DueDate.lt(due)),
            other => select
                .filter(fees::Column::PaymentStatus.eq(other.as_str()))
                .filter(fees::Column::DueDate.gte(due)),
        };
    }
    select
        .order_by_asc(fees::Column::DueDate)
        .order_by_asc(fees::Column::Id)
}

/// 下一个收据序号：取当年同前缀的最大编号 + 1
///
/// 收据年份即缴费日期的年份，先按缴费日期缩小范围，再在内存中按数值比较序号。
async fn next_receipt_seq<C: ConnectionTrait>(db: &C, prefix: &str, year: i32) -> Result<u64> {
    let (first_day, last_day) = year_bounds(year);
    let numbers = FeePayments::find()
        .select_only()
        .column(fee_payments::Column::ReceiptNumber)
        .filter(fee_payments::Column::PaidOn.between(first_day, last_day))
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(db_err("Failed to read receipt sequence"))?;

    Ok(next_sequence(&numbers, &format!("{prefix}-{year}-")))
}

impl SeaOrmStorage {
    pub async fn create_fee_structure_impl(
        &self,
        req: CreateFeeStructureRequest,
    ) -> Result<FeeStructure> {
        validate_components(req.total_amount, &req.components).map_err(ErpError::validation)?;
        let components = serde_json::to_string(&req.components)
            .map_err(|e| ErpError::serialization(format!("Failed to encode components: {e}")))?;

        let now = now_ts();
        let model = fee_structures::ActiveModel {
            name: Set(req.name.trim().to_string()),
            class_id: Set(req.class_id),
            academic_year: Set(req.academic_year.trim().to_string()),
            total_amount: Set(round2(req.total_amount)),
            components: Set(components),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create fee structure"))?;

        Ok(result.into_fee_structure())
    }

    pub async fn get_fee_structure_by_id_impl(&self, id: i64) -> Result<Option<FeeStructure>> {
        let result = FeeStructures::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query fee structure"))?;

        Ok(result.map(|m| m.into_fee_structure()))
    }

    pub async fn list_fee_structures_impl(
        &self,
        params: SchoolListParams,
    ) -> Result<PaginatedResponse<FeeStructure>> {
        let mut select = FeeStructures::find();

        if let Some(class_id) = params.class_id {
            select = select.filter(fee_structures::Column::ClassId.eq(class_id));
        }
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(fee_structures::Column::Name.contains(&escaped));
        }

        select = select
            .order_by_desc(fee_structures::Column::AcademicYear)
            .order_by_asc(fee_structures::Column::Name);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list fee structures",
            |m| m.into_fee_structure(),
        )
        .await
    }

    pub async fn update_fee_structure_impl(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>> {
        let Some(existing) = self.get_fee_structure_by_id_impl(id).await? else {
            return Ok(None);
        };

        // 总额与构成需要一起校验
        let total = update.total_amount.unwrap_or(existing.total_amount);
        let components = update.components.unwrap_or(existing.components);
        validate_components(total, &components).map_err(ErpError::validation)?;
        let encoded = serde_json::to_string(&components)
            .map_err(|e| ErpError::serialization(format!("Failed to encode components: {e}")))?;

        let mut model = fee_structures::ActiveModel {
            id: Set(id),
            total_amount: Set(round2(total)),
            components: Set(encoded),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(year) = update.academic_year {
            model.academic_year = Set(year.trim().to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update fee structure"))?;

        self.get_fee_structure_by_id_impl(id).await
    }

    pub async fn delete_fee_structure_impl(&self, id: i64) -> Result<bool> {
        let result = FeeStructures::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete fee structure"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_fee_impl(&self, req: CreateFeeRequest, today: NaiveDate) -> Result<Fee> {
        let amount = match (req.amount, req.fee_structure_id) {
            (Some(amount), _) => amount,
            (None, Some(structure_id)) => self
                .get_fee_structure_by_id_impl(structure_id)
                .await?
                .map(|s| s.total_amount)
                .ok_or_else(|| {
                    ErpError::validation(format!("Fee structure {structure_id} does not exist"))
                })?,
            (None, None) => {
                return Err(ErpError::validation(
                    "amount is required when no fee structure is given",
                ));
            }
        };

        let figures = FeeFigures {
            amount: round2(amount),
            discount: round2(req.discount_amount),
            fine: round2(req.fine_amount),
            paid: 0.0,
        };
        let (balance, status) =
            derive_fee(figures, req.due_date, today).map_err(ErpError::validation)?;

        let now = now_ts();
        let model = fees::ActiveModel {
            student_id: Set(req.student_id),
            fee_structure_id: Set(req.fee_structure_id),
            title: Set(req.title.trim().to_string()),
            amount: Set(figures.amount),
            discount_amount: Set(figures.discount),
            fine_amount: Set(figures.fine),
            paid_amount: Set(0.0),
            balance_amount: Set(balance),
            payment_status: Set(status.to_string()),
            due_date: Set(format_date(req.due_date)),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create fee"))?;

        Ok(result.into_fee(today))
    }

    pub async fn get_fee_by_id_impl(&self, id: i64, today: NaiveDate) -> Result<Option<Fee>> {
        let result = Fees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query fee"))?;

        Ok(result.map(|m| m.into_fee(today)))
    }

    pub async fn list_fees_impl(
        &self,
        query: FeeListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<Fee>> {
        let select = apply_fee_filters(Fees::find(), &query, today);
        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list fees",
            |m| m.into_fee(today),
        )
        .await
    }

    pub async fn list_all_fees_impl(&self, query: FeeListQuery, today: NaiveDate) -> Result<Vec<Fee>> {
        let models = apply_fee_filters(Fees::find(), &query, today)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list fees"))?;

        Ok(models.into_iter().map(|m| m.into_fee(today)).collect())
    }

    pub async fn update_fee_impl(
        &self,
        id: i64,
        update: UpdateFeeRequest,
        today: NaiveDate,
    ) -> Result<Option<Fee>> {
        let Some(existing) = Fees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query fee"))?
        else {
            return Ok(None);
        };

        let due_date = update
            .due_date
            .unwrap_or_else(|| crate::entity::stored_date(&existing.due_date));
        let figures = FeeFigures {
            amount: round2(update.amount.unwrap_or(existing.amount)),
            discount: round2(update.discount_amount.unwrap_or(existing.discount_amount)),
            fine: round2(update.fine_amount.unwrap_or(existing.fine_amount)),
            paid: existing.paid_amount,
        };
        let (balance, status) = derive_fee(figures, due_date, today).map_err(ErpError::validation)?;

        let mut model = fees::ActiveModel {
            id: Set(id),
            amount: Set(figures.amount),
            discount_amount: Set(figures.discount),
            fine_amount: Set(figures.fine),
            balance_amount: Set(balance),
            payment_status: Set(status.to_string()),
            due_date: Set(format_date(due_date)),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update fee"))?;

        self.get_fee_by_id_impl(id, today).await
    }

    pub async fn delete_fee_impl(&self, id: i64) -> Result<bool> {
        let result = Fees::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete fee"))?;

        Ok(result.rows_affected > 0)
    }

    /// 记录一笔缴费
    ///
    /// 收据写入与费用余额更新在同一事务中完成，付款金额不能超过当前余额。
    pub async fn record_payment_impl(
        &self,
        fee_id: i64,
        req: CreatePaymentRequest,
        received_by: Option<i64>,
        receipt_prefix: &str,
        today: NaiveDate,
    ) -> Result<Option<PaymentReceipt>> {
        req.validate().map_err(ErpError::validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin payment transaction"))?;

        let Some(fee) = Fees::find_by_id(fee_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query fee"))?
        else {
            return Ok(None);
        };

        let amount = round2(req.amount);
        let due_date = crate::entity::stored_date(&fee.due_date);
        let mut figures = FeeFigures {
            amount: fee.amount,
            discount: fee.discount_amount,
            fine: fee.fine_amount,
            paid: fee.paid_amount,
        };
        let outstanding = round2(figures.net() - figures.paid);
        if outstanding <= 0.0 || approx_eq(outstanding, 0.0) {
            return Err(ErpError::validation("Fee is already fully paid"));
        }
        if amount > outstanding && !approx_eq(amount, outstanding) {
            return Err(ErpError::validation(format!(
                "Payment {amount:.2} exceeds outstanding balance {outstanding:.2}"
            )));
        }

        figures.paid = round2(figures.paid + amount.min(outstanding));
        let (balance, status) = derive_fee(figures, due_date, today).map_err(ErpError::validation)?;

        let paid_on = req.paid_on.unwrap_or(today);
        let seq = next_receipt_seq(&txn, receipt_prefix, paid_on.year()).await?;
        let now = now_ts();

        let payment = fee_payments::ActiveModel {
            fee_id: Set(fee_id),
            receipt_number: Set(receipt_number(receipt_prefix, paid_on.year(), seq)),
            amount: Set(amount.min(outstanding)),
            method: Set(req.method.to_string()),
            reference: Set(req.reference.map(|r| r.trim().to_string())),
            paid_on: Set(format_date(paid_on)),
            received_by: Set(received_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to record payment"))?;

        let updated = fees::ActiveModel {
            id: Set(fee_id),
            paid_amount: Set(figures.paid),
            balance_amount: Set(balance),
            payment_status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_err("Failed to update fee balance"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit payment"))?;

        Ok(Some(PaymentReceipt {
            payment: payment.into_payment(),
            fee: updated.into_fee(today),
        }))
    }

    pub async fn list_payments_impl(&self, fee_id: i64) -> Result<Vec<FeePayment>> {
        let models = FeePayments::find()
            .filter(fee_payments::Column::FeeId.eq(fee_id))
            .order_by_asc(fee_payments::Column::CreatedAt)
            .order_by_asc(fee_payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list payments"))?;

        Ok(models.into_iter().map(|m| m.into_payment()).collect())
    }
}
