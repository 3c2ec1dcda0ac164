//! 业务数据模型
//!
//! 按业务域划分：`entities` 为业务实体，`requests` 为请求体，`responses` 为响应体。
//! 纯计算逻辑（费用余额、成绩等级等）放在对应业务域的独立文件中。

pub mod auth;
pub mod certificates;
pub mod common;
pub mod exams;
pub mod fees;
pub mod hall_tickets;
pub mod health;
pub mod library;
pub mod permissions;
pub mod school;
pub mod sms;
pub mod students;
pub mod transport;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone, Serialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    ValidationFailed = 1022,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    UserNotFound = 2004,
    UserAlreadyExists = 2009,
    UserNameInvalid = 2010,
    UserEmailInvalid = 2011,
    UserPasswordInvalid = 2012,
    CanNotDeleteCurrentUser = 2013,
    UserRoleLocked = 2014,

    // 学籍
    StudentNotFound = 3004,
    ClassNotFound = 3104,
    SubjectNotFound = 3204,

    // 费用
    FeeNotFound = 4004,
    FeeStructureNotFound = 4104,
    PaymentRejected = 4110,

    // 考试
    ExamNotFound = 5004,
    ResultNotFound = 5204,
    HallTicketNotFound = 5304,

    // 图书、交通、证书、短信、健康档案
    BookNotFound = 6004,
    LoanNotFound = 6104,
    VehicleNotFound = 6204,
    CertificateNotFound = 6304,
    CampaignNotFound = 6404,
    CampaignNotEditable = 6410,
    HealthRecordNotFound = 6504,
}
