//! 准考证存储操作

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::hall_tickets::{self, Entity as HallTickets};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    exams::entities::{Exam, ExamStatus},
    hall_tickets::{
        BulkGenerateResponse, GenerateHallTicketRequest, HallTicket, HallTicketListQuery,
        HallTicketStatus, UpdateHallTicketRequest,
    },
    students::entities::{Student, StudentStatus},
};
use crate::utils::numbering::hall_ticket_number;

impl SeaOrmStorage {
    async fn require_ticketable_exam(&self, exam_id: i64) -> Result<Exam> {
        let exam = self
            .get_exam_by_id_impl(exam_id)
            .await?
            .ok_or_else(|| ErpError::not_found(format!("Exam {exam_id} not found")))?;
        if exam.status == ExamStatus::Cancelled {
            return Err(ErpError::validation(
                "Cannot issue hall tickets for a cancelled exam",
            ));
        }
        Ok(exam)
    }

    async fn insert_hall_ticket<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
        student: &Student,
        remarks: Option<String>,
        issued_by: Option<i64>,
    ) -> Result<HallTicket> {
        let now = now_ts();
        let model = hall_tickets::ActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(student.id),
            ticket_number: Set(hall_ticket_number(exam_id, &student.admission_number)),
            status: Set(HallTicketStatus::Issued.to_string()),
            remarks: Set(remarks),
            issued_by: Set(issued_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(db)
            .await
            .map_err(db_err("Failed to create hall ticket"))?;

        Ok(result.into_hall_ticket())
    }

    /// 为单个学生生成准考证，重复生成返回冲突
    pub async fn generate_hall_ticket_impl(
        &self,
        req: GenerateHallTicketRequest,
        issued_by: Option<i64>,
    ) -> Result<HallTicket> {
        self.require_ticketable_exam(req.exam_id).await?;

        let student = self
            .get_student_by_id_impl(req.student_id)
            .await?
            .ok_or_else(|| ErpError::not_found(format!("Student {} not found", req.student_id)))?;
        if student.status != StudentStatus::Active {
            return Err(ErpError::validation(format!(
                "Student {} is not active",
                student.id
            )));
        }

        Self::insert_hall_ticket(&self.db, req.exam_id, &student, req.remarks, issued_by).await
    }

    /// 为班级所有在读学生生成准考证，已有准考证的学生跳过
    ///
    /// 全部写入在同一事务中完成，任一学生失败则整批不生效。
    pub async fn bulk_generate_hall_tickets_impl(
        &self,
        exam_id: i64,
        class_id: i64,
        issued_by: Option<i64>,
    ) -> Result<BulkGenerateResponse> {
        self.require_ticketable_exam(exam_id).await?;

        let students = self.list_active_students_in_class_impl(class_id).await?;
        let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();

        let existing: HashSet<i64> = HallTickets::find()
            .select_only()
            .column(hall_tickets::Column::StudentId)
            .filter(hall_tickets::Column::ExamId.eq(exam_id))
            .filter(hall_tickets::Column::StudentId.is_in(student_ids))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query existing hall tickets"))?
            .into_iter()
            .collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin hall ticket transaction"))?;

        let mut tickets = Vec::new();
        for student in students.iter().filter(|s| !existing.contains(&s.id)) {
            tickets.push(Self::insert_hall_ticket(&txn, exam_id, student, None, issued_by).await?);
        }

        txn.commit()
            .await
            .map_err(db_err("Failed to commit hall tickets"))?;

        Ok(BulkGenerateResponse {
            created: tickets.len(),
            skipped: existing.len(),
            tickets,
        })
    }

    pub async fn get_hall_ticket_by_id_impl(&self, id: i64) -> Result<Option<HallTicket>> {
        let result = HallTickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query hall ticket"))?;

        Ok(result.map(|m| m.into_hall_ticket()))
    }

    pub async fn list_hall_tickets_impl(
        &self,
        query: HallTicketListQuery,
    ) -> Result<PaginatedResponse<HallTicket>> {
        let mut select = HallTickets::find();

        if let Some(exam_id) = query.exam_id {
            select = select.filter(hall_tickets::Column::ExamId.eq(exam_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(hall_tickets::Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(hall_tickets::Column::Status.eq(status.as_str()));
        }
        if let Some(ref ids) = query.student_ids {
            select = select.filter(hall_tickets::Column::StudentId.is_in(ids.clone()));
        }

        select = select.order_by_asc(hall_tickets::Column::TicketNumber);

        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list hall tickets",
            |m| m.into_hall_ticket(),
        )
        .await
    }

    pub async fn update_hall_ticket_impl(
        &self,
        id: i64,
        update: UpdateHallTicketRequest,
    ) -> Result<Option<HallTicket>> {
        if self.get_hall_ticket_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = hall_tickets::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update hall ticket"))?;

        self.get_hall_ticket_by_id_impl(id).await
    }

    pub async fn delete_hall_ticket_impl(&self, id: i64) -> Result<bool> {
        let result = HallTickets::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete hall ticket"))?;

        Ok(result.rows_affected > 0)
    }
}
