use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_core_tables::{Classes, Students, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建图书表
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Title).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().not_null())
                    .col(
                        ColumnDef::new(Books::Isbn)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Books::Category).string().null())
                    .col(ColumnDef::new(Books::TotalCopies).integer().not_null())
                    .col(ColumnDef::new(Books::AvailableCopies).integer().not_null())
                    .col(ColumnDef::new(Books::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Books::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建借阅记录表
        manager
            .create_table(
                Table::create()
                    .table(BookLoans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookLoans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookLoans::BookId).big_integer().not_null())
                    .col(ColumnDef::new(BookLoans::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(BookLoans::IssueDate).string().not_null())
                    .col(ColumnDef::new(BookLoans::DueDate).string().not_null())
                    .col(ColumnDef::new(BookLoans::ReturnDate).string().null())
                    .col(
                        ColumnDef::new(BookLoans::FineAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(BookLoans::Status).string().not_null())
                    .col(ColumnDef::new(BookLoans::IssuedBy).big_integer().null())
                    .col(ColumnDef::new(BookLoans::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(BookLoans::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookLoans::Table, BookLoans::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookLoans::Table, BookLoans::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建车辆表
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::RegistrationNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::VehicleType).string().not_null())
                    .col(ColumnDef::new(Vehicles::Capacity).integer().not_null())
                    .col(ColumnDef::new(Vehicles::DriverName).string().null())
                    .col(ColumnDef::new(Vehicles::DriverPhone).string().null())
                    .col(ColumnDef::new(Vehicles::RouteName).string().null())
                    .col(ColumnDef::new(Vehicles::Status).string().not_null())
                    .col(ColumnDef::new(Vehicles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Vehicles::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建交通费表
        manager
            .create_table(
                Table::create()
                    .table(TransportFees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransportFees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransportFees::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportFees::VehicleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransportFees::Period).string().not_null())
                    .col(ColumnDef::new(TransportFees::Amount).double().not_null())
                    .col(
                        ColumnDef::new(TransportFees::PaidAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(TransportFees::BalanceAmount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportFees::PaymentStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransportFees::DueDate).string().not_null())
                    .col(
                        ColumnDef::new(TransportFees::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportFees::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TransportFees::Table, TransportFees::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TransportFees::Table, TransportFees::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建证书表
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Certificates::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::CertificateType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::CertificateNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Certificates::IssueDate).string().not_null())
                    .col(ColumnDef::new(Certificates::Purpose).string().null())
                    .col(ColumnDef::new(Certificates::Remarks).text().null())
                    .col(ColumnDef::new(Certificates::Status).string().not_null())
                    .col(ColumnDef::new(Certificates::RevokedReason).text().null())
                    .col(ColumnDef::new(Certificates::IssuedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Certificates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Certificates::Table, Certificates::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建短信群发表
        manager
            .create_table(
                Table::create()
                    .table(SmsCampaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SmsCampaigns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SmsCampaigns::Title).string().not_null())
                    .col(ColumnDef::new(SmsCampaigns::Message).text().not_null())
                    .col(ColumnDef::new(SmsCampaigns::Audience).string().not_null())
                    .col(ColumnDef::new(SmsCampaigns::ClassId).big_integer().null())
                    .col(ColumnDef::new(SmsCampaigns::CustomNumbers).text().not_null())
                    .col(ColumnDef::new(SmsCampaigns::Status).string().not_null())
                    .col(ColumnDef::new(SmsCampaigns::Segments).integer().not_null())
                    .col(
                        ColumnDef::new(SmsCampaigns::RecipientCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SmsCampaigns::SentCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SmsCampaigns::FailedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SmsCampaigns::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(SmsCampaigns::SentAt).big_integer().null())
                    .col(
                        ColumnDef::new(SmsCampaigns::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SmsCampaigns::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SmsCampaigns::Table, SmsCampaigns::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SmsCampaigns::Table, SmsCampaigns::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建体检记录表
        manager
            .create_table(
                Table::create()
                    .table(HealthRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HealthRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HealthRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HealthRecords::CheckupDate)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HealthRecords::HeightCm).double().not_null())
                    .col(ColumnDef::new(HealthRecords::WeightKg).double().not_null())
                    .col(ColumnDef::new(HealthRecords::Bmi).double().not_null())
                    .col(ColumnDef::new(HealthRecords::BloodGroup).string().null())
                    .col(ColumnDef::new(HealthRecords::Allergies).text().null())
                    .col(ColumnDef::new(HealthRecords::Notes).text().null())
                    .col(ColumnDef::new(HealthRecords::RecordedBy).big_integer().null())
                    .col(
                        ColumnDef::new(HealthRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HealthRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HealthRecords::Table, HealthRecords::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_book_loans_student_id")
                    .table(BookLoans::Table)
                    .col(BookLoans::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transport_fees_student_id")
                    .table(TransportFees::Table)
                    .col(TransportFees::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_certificates_type_issue_date")
                    .table(Certificates::Table)
                    .col(Certificates::CertificateType)
                    .col(Certificates::IssueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_health_records_student_id")
                    .table(HealthRecords::Table)
                    .col(HealthRecords::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HealthRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SmsCampaigns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransportFees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BookLoans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Books {
    #[sea_orm(iden = "books")]
    Table,
    Id,
    Title,
    Author,
    Isbn,
    Category,
    TotalCopies,
    AvailableCopies,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BookLoans {
    #[sea_orm(iden = "book_loans")]
    Table,
    Id,
    BookId,
    StudentId,
    IssueDate,
    DueDate,
    ReturnDate,
    FineAmount,
    Status,
    IssuedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vehicles {
    #[sea_orm(iden = "vehicles")]
    Table,
    Id,
    RegistrationNumber,
    VehicleType,
    Capacity,
    DriverName,
    DriverPhone,
    RouteName,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TransportFees {
    #[sea_orm(iden = "transport_fees")]
    Table,
    Id,
    StudentId,
    VehicleId,
    Period,
    Amount,
    PaidAmount,
    BalanceAmount,
    PaymentStatus,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Certificates {
    #[sea_orm(iden = "certificates")]
    Table,
    Id,
    StudentId,
    CertificateType,
    CertificateNumber,
    IssueDate,
    Purpose,
    Remarks,
    Status,
    RevokedReason,
    IssuedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SmsCampaigns {
    #[sea_orm(iden = "sms_campaigns")]
    Table,
    Id,
    Title,
    Message,
    Audience,
    ClassId,
    CustomNumbers,
    Status,
    Segments,
    RecipientCount,
    SentCount,
    FailedCount,
    CreatedBy,
    SentAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HealthRecords {
    #[sea_orm(iden = "health_records")]
    Table,
    Id,
    StudentId,
    CheckupDate,
    HeightCm,
    WeightKg,
    Bmi,
    BloodGroup,
    Allergies,
    Notes,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}
