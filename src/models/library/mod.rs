//! 图书馆：图书与借阅

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::utils::round2;
use crate::utils::validate::{require_text, validate_isbn};

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
    pub enum LoanStatus {
        Issued => "issued",
        Returned => "returned",
        Overdue => "overdue",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookLoan {
    pub id: i64,
    pub book_id: i64,
    pub student_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub fine_amount: f64,
    pub status: LoanStatus,
    pub issued_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 借阅状态：已借且超过应还日期时报告为逾期
pub fn loan_status(returned: bool, due_date: NaiveDate, today: NaiveDate) -> LoanStatus {
    if returned {
        LoanStatus::Returned
    } else if due_date < today {
        LoanStatus::Overdue
    } else {
        LoanStatus::Issued
    }
}

/// 罚金 = 逾期天数 × 每日罚金
pub fn overdue_fine(due_date: NaiveDate, return_date: NaiveDate, fine_per_day: f64) -> f64 {
    let days = (return_date - due_date).num_days();
    if days <= 0 {
        return 0.0;
    }
    round2(days as f64 * fine_per_day)
}

/// 去掉连字符和空格后的 ISBN
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
    pub total_copies: i32,
}

impl CreateBookRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.title, "title", 200)?;
        require_text(&self.author, "author", 100)?;
        validate_isbn(&self.isbn).map_err(str::to_string)?;
        if self.total_copies < 1 {
            return Err("total_copies must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub total_copies: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct IssueBookRequest {
    pub book_id: i64,
    pub student_id: i64,
    pub issue_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct ReturnBookRequest {
    pub return_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<String>,
    pub search: Option<String>,
    pub available_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct LoanListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub book_id: Option<i64>,
    /// 只看未归还
    pub open_only: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct LoanListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub book_id: Option<i64>,
    pub open_only: bool,
    pub student_ids: Option<Vec<i64>>,
}

/// 借阅规则（来自配置）
#[derive(Debug, Clone, Copy)]
pub struct LoanPolicy {
    pub loan_days: i64,
    pub fine_per_day: f64,
    pub max_active_loans: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fine_for_late_return() {
        assert_eq!(overdue_fine(date("2026-01-10"), date("2026-01-15"), 2.5), 12.5);
        assert_eq!(overdue_fine(date("2026-01-10"), date("2026-01-10"), 2.5), 0.0);
        assert_eq!(overdue_fine(date("2026-01-10"), date("2026-01-05"), 2.5), 0.0);
    }

    #[test]
    fn test_loan_status() {
        let due = date("2026-01-10");
        assert_eq!(loan_status(false, due, date("2026-01-10")), LoanStatus::Issued);
        assert_eq!(loan_status(false, due, date("2026-01-11")), LoanStatus::Overdue);
        assert_eq!(loan_status(true, due, date("2026-02-01")), LoanStatus::Returned);
    }

    #[test]
    fn test_normalize_isbn() {
        assert_eq!(normalize_isbn("978-0-306-40615-7"), "9780306406157");
        assert_eq!(normalize_isbn("0 8044 2957 x"), "080442957X");
    }

    #[test]
    fn test_book_request_validation() {
        let mut req = CreateBookRequest {
            title: "Wings of Fire".to_string(),
            author: "A. P. J. Abdul Kalam".to_string(),
            isbn: "978-81-7371-146-6".to_string(),
            category: Some("Biography".to_string()),
            total_copies: 3,
        };
        assert!(req.validate().is_ok());
        req.total_copies = 0;
        assert!(req.validate().is_err());
        req.total_copies = 1;
        req.isbn = "12345".to_string();
        assert!(req.validate().is_err());
    }
}
