//! 考试、日程、成绩构成与成绩存储操作

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::exam_results::{self, Entity as ExamResults};
use crate::entity::exam_schedules::{self, Entity as ExamSchedules};
use crate::entity::exams::{self, Entity as Exams};
use crate::entity::mark_distributions::{self, Entity as MarkDistributions};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    exams::{
        compute_result,
        entities::{
            ComponentMark, Exam, ExamResult, ExamSchedule, ExamStatus, MarkDistribution,
        },
        requests::{
            CreateExamRequest, CreateScheduleRequest, ExamListParams, RecordResultRequest,
            ResultListQuery, UpdateExamRequest, UpdateResultRequest,
            UpsertMarkDistributionRequest, validate_exam_range,
        },
        validate_distribution,
    },
};
use crate::utils::dates::format_date;
use crate::utils::{escape_like_pattern, round2};

fn encode_marks(marks: &[ComponentMark]) -> Result<String> {
    serde_json::to_string(marks)
        .map_err(|e| ErpError::serialization(format!("Failed to encode marks: {e}")))
}

impl SeaOrmStorage {
    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        validate_exam_range(req.start_date, req.end_date).map_err(ErpError::validation)?;

        let now = now_ts();
        let model = exams::ActiveModel {
            name: Set(req.name.trim().to_string()),
            exam_type: Set(req.exam_type.to_string()),
            academic_year: Set(req.academic_year.trim().to_string()),
            start_date: Set(format_date(req.start_date)),
            end_date: Set(format_date(req.end_date)),
            status: Set(ExamStatus::Scheduled.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create exam"))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query exam"))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn list_exams_impl(&self, params: ExamListParams) -> Result<PaginatedResponse<Exam>> {
        let mut select = Exams::find();

        if let Some(ref year) = params.academic_year {
            select = select.filter(exams::Column::AcademicYear.eq(year.trim()));
        }
        if let Some(status) = params.status {
            select = select.filter(exams::Column::Status.eq(status.as_str()));
        }
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Condition::any().add(exams::Column::Name.contains(&escaped)));
        }

        select = select
            .order_by_desc(exams::Column::StartDate)
            .order_by_desc(exams::Column::Id);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list exams",
            |m| m.into_exam(),
        )
        .await
    }

    pub async fn update_exam_impl(
        &self,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let Some(existing) = self.get_exam_by_id_impl(id).await? else {
            return Ok(None);
        };

        let start = update.start_date.unwrap_or(existing.start_date);
        let end = update.end_date.unwrap_or(existing.end_date);
        validate_exam_range(start, end).map_err(ErpError::validation)?;

        // 已排的日程必须仍落在新的考试日期范围内
        let outside = ExamSchedules::find()
            .filter(exam_schedules::Column::ExamId.eq(id))
            .filter(
                Condition::any()
                    .add(exam_schedules::Column::ExamDate.lt(format_date(start)))
                    .add(exam_schedules::Column::ExamDate.gt(format_date(end))),
            )
            .one(&self.db)
            .await
            .map_err(db_err("Failed to check exam schedules"))?;
        if let Some(schedule) = outside {
            return Err(ErpError::validation(format!(
                "Schedule on {} falls outside the exam dates {} to {}",
                schedule.exam_date,
                format_date(start),
                format_date(end)
            )));
        }

        let mut model = exams::ActiveModel {
            id: Set(id),
            start_date: Set(format_date(start)),
            end_date: Set(format_date(end)),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(exam_type) = update.exam_type {
            model.exam_type = Set(exam_type.to_string());
        }
        if let Some(year) = update.academic_year {
            model.academic_year = Set(year.trim().to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update exam"))?;

        self.get_exam_by_id_impl(id).await
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete exam"))?;

        Ok(result.rows_affected > 0)
    }

    async fn require_exam(&self, exam_id: i64) -> Result<Exam> {
        self.get_exam_by_id_impl(exam_id)
            .await?
            .ok_or_else(|| ErpError::not_found(format!("Exam {exam_id} not found")))
    }

    pub async fn create_schedule_impl(
        &self,
        exam_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<ExamSchedule> {
        let exam = self.require_exam(exam_id).await?;
        req.validate(exam.start_date, exam.end_date)
            .map_err(ErpError::validation)?;

        let model = exam_schedules::ActiveModel {
            exam_id: Set(exam_id),
            subject_id: Set(req.subject_id),
            exam_date: Set(format_date(req.exam_date)),
            start_time: Set(req.start_time.trim().to_string()),
            end_time: Set(req.end_time.trim().to_string()),
            room: Set(req.room),
            max_marks: Set(round2(req.max_marks)),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create exam schedule"))?;

        Ok(result.into_schedule())
    }

    pub async fn list_schedules_impl(&self, exam_id: i64) -> Result<Vec<ExamSchedule>> {
        let models = ExamSchedules::find()
            .filter(exam_schedules::Column::ExamId.eq(exam_id))
            .order_by_asc(exam_schedules::Column::ExamDate)
            .order_by_asc(exam_schedules::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list exam schedules"))?;

        Ok(models.into_iter().map(|m| m.into_schedule()).collect())
    }

    pub async fn delete_schedule_impl(&self, exam_id: i64, schedule_id: i64) -> Result<bool> {
        let result = ExamSchedules::delete_many()
            .filter(exam_schedules::Column::Id.eq(schedule_id))
            .filter(exam_schedules::Column::ExamId.eq(exam_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete exam schedule"))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_distribution(
        &self,
        exam_id: i64,
        subject_id: i64,
    ) -> Result<Option<mark_distributions::Model>> {
        MarkDistributions::find()
            .filter(mark_distributions::Column::ExamId.eq(exam_id))
            .filter(mark_distributions::Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query mark distribution"))
    }

    /// 创建或替换成绩构成
    pub async fn upsert_mark_distribution_impl(
        &self,
        exam_id: i64,
        req: UpsertMarkDistributionRequest,
        default_pass_percentage: f64,
    ) -> Result<MarkDistribution> {
        self.require_exam(exam_id).await?;

        let pass_percentage = req.pass_percentage.unwrap_or(default_pass_percentage);
        validate_distribution(pass_percentage, &req.components).map_err(ErpError::validation)?;
        let components = serde_json::to_string(&req.components)
            .map_err(|e| ErpError::serialization(format!("Failed to encode components: {e}")))?;

        let now = now_ts();
        let result = match self.find_distribution(exam_id, req.subject_id).await? {
            Some(existing) => mark_distributions::ActiveModel {
                id: Set(existing.id),
                pass_percentage: Set(pass_percentage),
                components: Set(components),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update mark distribution"))?,
            None => mark_distributions::ActiveModel {
                exam_id: Set(exam_id),
                subject_id: Set(req.subject_id),
                pass_percentage: Set(pass_percentage),
                components: Set(components),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create mark distribution"))?,
        };

        Ok(result.into_distribution())
    }

    pub async fn list_mark_distributions_impl(&self, exam_id: i64) -> Result<Vec<MarkDistribution>> {
        let models = MarkDistributions::find()
            .filter(mark_distributions::Column::ExamId.eq(exam_id))
            .order_by_asc(mark_distributions::Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list mark distributions"))?;

        Ok(models.into_iter().map(|m| m.into_distribution()).collect())
    }

    async fn require_distribution(&self, exam_id: i64, subject_id: i64) -> Result<MarkDistribution> {
        self.find_distribution(exam_id, subject_id)
            .await?
            .map(|m| m.into_distribution())
            .ok_or_else(|| {
                ErpError::validation(format!(
                    "No mark distribution defined for subject {subject_id} in exam {exam_id}"
                ))
            })
    }

    /// 录入单科成绩，派生字段按成绩构成计算
    pub async fn record_result_impl(
        &self,
        exam_id: i64,
        req: RecordResultRequest,
    ) -> Result<ExamResult> {
        let exam = self.require_exam(exam_id).await?;
        if exam.status == ExamStatus::Cancelled {
            return Err(ErpError::validation("Cannot record results for a cancelled exam"));
        }

        let distribution = self.require_distribution(exam_id, req.subject_id).await?;
        let computed = compute_result(
            &distribution.components,
            distribution.pass_percentage,
            &req.marks,
            req.is_absent,
        )
        .map_err(ErpError::validation)?;
        let marks = if req.is_absent {
            Vec::new()
        } else {
            req.marks
        };

        let now = now_ts();
        let model = exam_results::ActiveModel {
            student_id: Set(req.student_id),
            exam_id: Set(exam_id),
            subject_id: Set(req.subject_id),
            marks: Set(encode_marks(&marks)?),
            is_absent: Set(req.is_absent),
            total_obtained: Set(computed.total_obtained),
            total_max: Set(computed.total_max),
            percentage: Set(computed.percentage),
            grade: Set(computed.grade),
            grade_point: Set(computed.grade_point),
            status: Set(computed.status.to_string()),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to record result"))?;

        Ok(result.into_result())
    }

    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<ExamResult>> {
        let result = ExamResults::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query result"))?;

        Ok(result.map(|m| m.into_result()))
    }

    pub async fn list_results_impl(
        &self,
        query: ResultListQuery,
    ) -> Result<PaginatedResponse<ExamResult>> {
        let mut select = ExamResults::find();

        if let Some(exam_id) = query.exam_id {
            select = select.filter(exam_results::Column::ExamId.eq(exam_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(exam_results::Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(exam_results::Column::SubjectId.eq(subject_id));
        }
        if let Some(ref ids) = query.student_ids {
            select = select.filter(exam_results::Column::StudentId.is_in(ids.clone()));
        }

        select = select
            .order_by_asc(exam_results::Column::StudentId)
            .order_by_asc(exam_results::Column::SubjectId);

        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list results",
            |m| m.into_result(),
        )
        .await
    }

    pub async fn list_student_exam_results_impl(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<ExamResult>> {
        let models = ExamResults::find()
            .filter(exam_results::Column::ExamId.eq(exam_id))
            .filter(exam_results::Column::StudentId.eq(student_id))
            .order_by_asc(exam_results::Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list student results"))?;

        Ok(models.into_iter().map(|m| m.into_result()).collect())
    }

    /// 修改成绩后按当前成绩构成重新计算
    pub async fn update_result_impl(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ExamResult>> {
        let Some(existing) = self.get_result_by_id_impl(id).await? else {
            return Ok(None);
        };

        let distribution = self
            .require_distribution(existing.exam_id, existing.subject_id)
            .await?;
        let is_absent = update.is_absent.unwrap_or(existing.is_absent);
        let marks = update.marks.unwrap_or(existing.marks);
        let computed = compute_result(
            &distribution.components,
            distribution.pass_percentage,
            &marks,
            is_absent,
        )
        .map_err(ErpError::validation)?;
        let marks = if is_absent { Vec::new() } else { marks };

        let mut model = exam_results::ActiveModel {
            id: Set(id),
            marks: Set(encode_marks(&marks)?),
            is_absent: Set(is_absent),
            total_obtained: Set(computed.total_obtained),
            total_max: Set(computed.total_max),
            percentage: Set(computed.percentage),
            grade: Set(computed.grade),
            grade_point: Set(computed.grade_point),
            status: Set(computed.status.to_string()),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update result"))?;

        self.get_result_by_id_impl(id).await
    }

    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let result = ExamResults::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete result"))?;

        Ok(result.rows_affected > 0)
    }
}

