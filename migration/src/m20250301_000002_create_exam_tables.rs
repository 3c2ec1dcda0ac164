use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_core_tables::{Students, Subjects, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::Name).string().not_null())
                    .col(ColumnDef::new(Exams::ExamType).string().not_null())
                    .col(ColumnDef::new(Exams::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Exams::StartDate).string().not_null())
                    .col(ColumnDef::new(Exams::EndDate).string().not_null())
                    .col(ColumnDef::new(Exams::Status).string().not_null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Exams::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建考试日程表
        manager
            .create_table(
                Table::create()
                    .table(ExamSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamSchedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamSchedules::ExamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ExamSchedules::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamSchedules::ExamDate).string().not_null())
                    .col(ColumnDef::new(ExamSchedules::StartTime).string().not_null())
                    .col(ColumnDef::new(ExamSchedules::EndTime).string().not_null())
                    .col(ColumnDef::new(ExamSchedules::Room).string().null())
                    .col(ColumnDef::new(ExamSchedules::MaxMarks).double().not_null())
                    .col(
                        ColumnDef::new(ExamSchedules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSchedules::Table, ExamSchedules::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSchedules::Table, ExamSchedules::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩构成表
        manager
            .create_table(
                Table::create()
                    .table(MarkDistributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MarkDistributions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MarkDistributions::ExamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MarkDistributions::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MarkDistributions::PassPercentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MarkDistributions::Components)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MarkDistributions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MarkDistributions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MarkDistributions::Table, MarkDistributions::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MarkDistributions::Table, MarkDistributions::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(ExamResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamResults::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::Marks).text().not_null())
                    .col(
                        ColumnDef::new(ExamResults::IsAbsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamResults::TotalObtained).double().not_null())
                    .col(ColumnDef::new(ExamResults::TotalMax).double().not_null())
                    .col(ColumnDef::new(ExamResults::Percentage).double().not_null())
                    .col(ColumnDef::new(ExamResults::Grade).string().not_null())
                    .col(ColumnDef::new(ExamResults::GradePoint).double().not_null())
                    .col(ColumnDef::new(ExamResults::Status).string().not_null())
                    .col(ColumnDef::new(ExamResults::Remarks).text().null())
                    .col(ColumnDef::new(ExamResults::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建准考证表
        manager
            .create_table(
                Table::create()
                    .table(HallTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HallTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HallTickets::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(HallTickets::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(HallTickets::TicketNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(HallTickets::Status).string().not_null())
                    .col(ColumnDef::new(HallTickets::Remarks).string().null())
                    .col(ColumnDef::new(HallTickets::IssuedBy).big_integer().null())
                    .col(ColumnDef::new(HallTickets::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(HallTickets::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(HallTickets::Table, HallTickets::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HallTickets::Table, HallTickets::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HallTickets::Table, HallTickets::IssuedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_schedules_exam_subject")
                    .table(ExamSchedules::Table)
                    .col(ExamSchedules::ExamId)
                    .col(ExamSchedules::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mark_distributions_exam_subject")
                    .table(MarkDistributions::Table)
                    .col(MarkDistributions::ExamId)
                    .col(MarkDistributions::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_results_student_exam_subject")
                    .table(ExamResults::Table)
                    .col(ExamResults::StudentId)
                    .col(ExamResults::ExamId)
                    .col(ExamResults::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_hall_tickets_exam_student")
                    .table(HallTickets::Table)
                    .col(HallTickets::ExamId)
                    .col(HallTickets::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HallTickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MarkDistributions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    Name,
    ExamType,
    AcademicYear,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamSchedules {
    #[sea_orm(iden = "exam_schedules")]
    Table,
    Id,
    ExamId,
    SubjectId,
    ExamDate,
    StartTime,
    EndTime,
    Room,
    MaxMarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MarkDistributions {
    #[sea_orm(iden = "mark_distributions")]
    Table,
    Id,
    ExamId,
    SubjectId,
    PassPercentage,
    Components,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamResults {
    #[sea_orm(iden = "exam_results")]
    Table,
    Id,
    StudentId,
    ExamId,
    SubjectId,
    Marks,
    IsAbsent,
    TotalObtained,
    TotalMax,
    Percentage,
    Grade,
    GradePoint,
    Status,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HallTickets {
    #[sea_orm(iden = "hall_tickets")]
    Table,
    Id,
    ExamId,
    StudentId,
    TicketNumber,
    Status,
    Remarks,
    IssuedBy,
    CreatedAt,
    UpdatedAt,
}
