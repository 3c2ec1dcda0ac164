use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
    pub enum PaymentStatus {
        Pending => "pending",
        Partial => "partial",
        Paid => "paid",
        Overdue => "overdue",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
    pub enum PaymentMethod {
        Cash => "cash",
        Cheque => "cheque",
        Card => "card",
        Online => "online",
        Upi => "upi",
        BankTransfer => "bank_transfer",
    }
}

// 收费项目构成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeComponent {
    pub name: String,
    pub amount: f64,
}

// 收费标准
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeStructure {
    pub id: i64,
    pub name: String,
    pub class_id: Option<i64>,
    pub academic_year: String,
    pub total_amount: f64,
    pub components: Vec<FeeComponent>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生应缴费用
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct Fee {
    pub id: i64,
    pub student_id: i64,
    pub fee_structure_id: Option<i64>,
    pub title: String,
    pub amount: f64,
    pub discount_amount: f64,
    pub fine_amount: f64,
    pub paid_amount: f64,
    pub balance_amount: f64,
    pub payment_status: PaymentStatus,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 缴费记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeePayment {
    pub id: i64,
    pub fee_id: i64,
    pub receipt_number: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_on: NaiveDate,
    pub received_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 缴费结果：收据 + 更新后的费用
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct PaymentReceipt {
    pub payment: FeePayment,
    pub fee: Fee,
}

// 费用汇总
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeSummary {
    pub total_amount: f64,
    pub total_paid: f64,
    pub total_balance: f64,
    pub pending: u64,
    pub partial: u64,
    pub paid: u64,
    pub overdue: u64,
}

impl FeeSummary {
    pub fn from_fees(fees: &[Fee]) -> Self {
        let mut summary = FeeSummary::default();
        for fee in fees {
            summary.total_amount += fee.amount - fee.discount_amount + fee.fine_amount;
            summary.total_paid += fee.paid_amount;
            summary.total_balance += fee.balance_amount;
            match fee.payment_status {
                PaymentStatus::Pending => summary.pending += 1,
                PaymentStatus::Partial => summary.partial += 1,
                PaymentStatus::Paid => summary.paid += 1,
                PaymentStatus::Overdue => summary.overdue += 1,
            }
        }
        summary.total_amount = crate::utils::round2(summary.total_amount);
        summary.total_paid = crate::utils::round2(summary.total_paid);
        summary.total_balance = crate::utils::round2(summary.total_balance);
        summary
    }
}
