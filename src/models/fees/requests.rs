use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{FeeComponent, PaymentMethod, PaymentStatus};
use crate::models::common::PaginationQuery;
use crate::utils::validate::require_text;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreateFeeStructureRequest {
    pub name: String,
    pub class_id: Option<i64>,
    pub academic_year: String,
    pub total_amount: f64,
    pub components: Vec<FeeComponent>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct UpdateFeeStructureRequest {
    pub name: Option<String>,
    pub class_id: Option<i64>,
    pub academic_year: Option<String>,
    pub total_amount: Option<f64>,
    pub components: Option<Vec<FeeComponent>>,
}

impl CreateFeeStructureRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "name", 100)?;
        require_text(&self.academic_year, "academic_year", 20)?;
        super::validate_components(self.total_amount, &self.components)
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreateFeeRequest {
    pub student_id: i64,
    pub fee_structure_id: Option<i64>,
    pub title: String,
    /// 未填写时取收费标准的总额
    pub amount: Option<f64>,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub fine_amount: f64,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct UpdateFeeRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub fine_amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreatePaymentRequest {
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_on: Option<NaiveDate>,
}

impl CreatePaymentRequest {
    /// 校验付款本身，余额相关校验在存储层事务内完成
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("payment amount must be greater than 0".to_string());
        }
        let has_reference = self
            .reference
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty());
        if self.method == PaymentMethod::Cheque && !has_reference {
            return Err("cheque payments require the cheque number as reference".to_string());
        }
        Ok(())
    }
}

// 费用列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub status: Option<PaymentStatus>,
}

// 费用列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct FeeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeSummaryParams {
    pub student_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cheque_requires_reference() {
        let mut req = CreatePaymentRequest {
            amount: 500.0,
            method: PaymentMethod::Cheque,
            reference: None,
            paid_on: None,
        };
        assert!(req.validate().is_err());
        req.reference = Some("CHQ-001122".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_payment_amount_positive() {
        let req = CreatePaymentRequest {
            amount: 0.0,
            method: PaymentMethod::Cash,
            reference: None,
            paid_on: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_structure_request_checks_components() {
        let req = CreateFeeStructureRequest {
            name: "Grade 5 Annual".to_string(),
            class_id: Some(5),
            academic_year: "2025-2026".to_string(),
            total_amount: 12000.0,
            components: vec![
                FeeComponent {
                    name: "Tuition".to_string(),
                    amount: 10000.0,
                },
                FeeComponent {
                    name: "Transport".to_string(),
                    amount: 1500.0,
                },
            ],
        };
        assert!(req.validate().unwrap_err().contains("must sum to total"));
    }
}
