use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
    pub enum ExamType {
        UnitTest => "unit_test",
        Midterm => "midterm",
        Final => "final",
        Practical => "practical",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
    pub enum ExamStatus {
        Scheduled => "scheduled",
        Ongoing => "ongoing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
    pub enum ResultStatus {
        Pass => "pass",
        Fail => "fail",
        Absent => "absent",
    }
}

// 考试
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub exam_type: ExamType,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ExamStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 考试日程（每科一场）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSchedule {
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub exam_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub max_marks: f64,
}

// 分项满分与权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct MarkComponent {
    pub name: String,
    pub max_marks: f64,
    pub weightage: f64,
}

// 成绩构成（某场考试某科目）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct MarkDistribution {
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub pass_percentage: f64,
    pub components: Vec<MarkComponent>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生分项得分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ComponentMark {
    pub name: String,
    pub obtained: f64,
}

// 学生单科成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamResult {
    pub id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub marks: Vec<ComponentMark>,
    pub is_absent: bool,
    pub total_obtained: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub grade: String,
    pub grade_point: f64,
    pub status: ResultStatus,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生在一场考试中的汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentExamSummary {
    pub student_id: i64,
    pub exam_id: i64,
    pub subjects: usize,
    pub average_percentage: f64,
    pub grade: String,
    pub grade_point: f64,
    pub status: ResultStatus,
    pub results: Vec<ExamResult>,
}
