use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ComponentMark, ExamStatus, ExamType, MarkComponent};
use crate::models::common::PaginationQuery;
use crate::utils::dates::parse_time;
use crate::utils::validate::require_text;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub name: String,
    pub exam_type: ExamType,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CreateExamRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "name", 100)?;
        require_text(&self.academic_year, "academic_year", 20)?;
        validate_exam_range(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub name: Option<String>,
    pub exam_type: Option<ExamType>,
    pub academic_year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ExamStatus>,
}

pub fn validate_exam_range(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        return Err("end_date must not be before start_date".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateScheduleRequest {
    pub subject_id: i64,
    pub exam_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub max_marks: f64,
}

impl CreateScheduleRequest {
    /// 日期需落在考试起止范围内
    pub fn validate(&self, exam_start: NaiveDate, exam_end: NaiveDate) -> Result<(), String> {
        if self.exam_date < exam_start || self.exam_date > exam_end {
            return Err(format!(
                "exam_date must be between {exam_start} and {exam_end}"
            ));
        }
        let start = parse_time(&self.start_time).map_err(|e| e.to_string())?;
        let end = parse_time(&self.end_time).map_err(|e| e.to_string())?;
        if start >= end {
            return Err("start_time must be before end_time".to_string());
        }
        if !self.max_marks.is_finite() || self.max_marks <= 0.0 {
            return Err("max_marks must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpsertMarkDistributionRequest {
    pub subject_id: i64,
    /// 未填写时使用配置中的及格线
    pub pass_percentage: Option<f64>,
    pub components: Vec<MarkComponent>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct RecordResultRequest {
    pub student_id: i64,
    pub subject_id: i64,
    #[serde(default)]
    pub marks: Vec<ComponentMark>,
    #[serde(default)]
    pub is_absent: bool,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateResultRequest {
    pub marks: Option<Vec<ComponentMark>>,
    pub is_absent: Option<bool>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year: Option<String>,
    pub status: Option<ExamStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ResultListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
}

// 成绩列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ResultListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub exam_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExamSummaryParams {
    pub student_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn schedule(exam_date: &str, start: &str, end: &str) -> CreateScheduleRequest {
        CreateScheduleRequest {
            subject_id: 1,
            exam_date: date(exam_date),
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: Some("Hall A".to_string()),
            max_marks: 100.0,
        }
    }

    #[test]
    fn test_exam_range() {
        assert!(validate_exam_range(date("2026-03-01"), date("2026-03-10")).is_ok());
        assert!(validate_exam_range(date("2026-03-01"), date("2026-03-01")).is_ok());
        assert!(validate_exam_range(date("2026-03-10"), date("2026-03-01")).is_err());
    }

    #[test]
    fn test_schedule_within_exam() {
        let (start, end) = (date("2026-03-01"), date("2026-03-10"));
        assert!(schedule("2026-03-05", "09:00", "12:00").validate(start, end).is_ok());
        assert!(schedule("2026-03-11", "09:00", "12:00").validate(start, end).is_err());
        assert!(schedule("2026-03-05", "12:00", "09:00").validate(start, end).is_err());
        assert!(schedule("2026-03-05", "9am", "12:00").validate(start, end).is_err());
    }
}
