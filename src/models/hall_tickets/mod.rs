//! 准考证

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::exams::entities::ExamSchedule;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
    pub enum HallTicketStatus {
        Issued => "issued",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct HallTicket {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub ticket_number: String,
    pub status: HallTicketStatus,
    pub remarks: Option<String>,
    pub issued_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 准考证详情：附带考试日程
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct HallTicketDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub ticket: HallTicket,
    pub schedules: Vec<ExamSchedule>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct GenerateHallTicketRequest {
    pub exam_id: i64,
    pub student_id: i64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct BulkGenerateRequest {
    pub exam_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct BulkGenerateResponse {
    pub created: usize,
    pub skipped: usize,
    pub tickets: Vec<HallTicket>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct UpdateHallTicketRequest {
    pub status: Option<HallTicketStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hall_ticket.ts")]
pub struct HallTicketListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub exam_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<HallTicketStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct HallTicketListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub exam_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<HallTicketStatus>,
    pub student_ids: Option<Vec<i64>>,
}
