//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 日期以 `YYYY-MM-DD` 字符串存储，时间戳为 unix 秒。

pub mod prelude;

pub mod book_loans;
pub mod books;
pub mod certificates;
pub mod classes;
pub mod exam_results;
pub mod exam_schedules;
pub mod exams;
pub mod fee_payments;
pub mod fee_structures;
pub mod fees;
pub mod hall_tickets;
pub mod health_records;
pub mod mark_distributions;
pub mod sms_campaigns;
pub mod students;
pub mod subjects;
pub mod transport_fees;
pub mod users;
pub mod vehicles;

/// 读取存储的日期，格式错误时回退到 unix 纪元
pub(crate) fn stored_date(value: &str) -> chrono::NaiveDate {
    crate::utils::dates::parse_date(value).unwrap_or_default()
}
