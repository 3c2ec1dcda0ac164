//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod certificates;
mod exams;
mod fees;
mod hall_tickets;
mod health;
mod library;
mod school;
mod sms;
mod students;
mod transport;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::models::{
    PaginatedResponse,
    certificates::{
        Certificate, CertificateListQuery, IssueCertificateRequest, UpdateCertificateRequest,
    },
    exams::{
        entities::{Exam, ExamResult, ExamSchedule, MarkDistribution},
        requests::{
            CreateExamRequest, CreateScheduleRequest, ExamListParams, RecordResultRequest,
            ResultListQuery, UpdateExamRequest, UpdateResultRequest,
            UpsertMarkDistributionRequest,
        },
    },
    fees::{
        entities::{Fee, FeePayment, FeeStructure, PaymentReceipt},
        requests::{
            CreateFeeRequest, CreateFeeStructureRequest, CreatePaymentRequest, FeeListQuery,
            UpdateFeeRequest, UpdateFeeStructureRequest,
        },
    },
    hall_tickets::{
        BulkGenerateResponse, GenerateHallTicketRequest, HallTicket, HallTicketListQuery,
        UpdateHallTicketRequest,
    },
    health::{
        CreateHealthRecordRequest, HealthRecord, HealthRecordListQuery, UpdateHealthRecordRequest,
    },
    library::{
        Book, BookListParams, BookLoan, CreateBookRequest, IssueBookRequest, LoanListQuery,
        LoanPolicy, UpdateBookRequest,
    },
    school::{
        Class, CreateClassRequest, CreateSubjectRequest, SchoolListParams, Subject,
        UpdateClassRequest, UpdateSubjectRequest,
    },
    sms::{
        CampaignListParams, CreateCampaignRequest, DeliveryOutcome, SmsCampaign,
        UpdateCampaignRequest,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    transport::{
        CreateTransportFeeRequest, CreateVehicleRequest, TransportFee, TransportFeeListQuery,
        UpdateTransportFeeRequest, UpdateVehicleRequest, Vehicle, VehicleListParams,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::errors::{ErpError, Result};
use crate::models::PaginationInfo;
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Select,
    SqlErr,
};
use std::time::Duration;
use tracing::info;
use ts_rs::TS;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("Storage initialized, database: {}", db_url);
        Ok(storage)
    }

    /// 基于已有连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ErpError::database_operation(format!("Database migration failed: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ErpError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ErpError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ErpError::database_connection(format!("Unable to connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ErpError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

/// 数据库错误映射：唯一约束冲突为 Conflict，外键约束失败为 Validation
pub(crate) fn db_err(context: &'static str) -> impl Fn(DbErr) -> ErpError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            ErpError::conflict(format!("{context}: duplicate value ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => ErpError::validation(format!(
            "{context}: referenced record does not exist ({detail})"
        )),
        _ => ErpError::database_operation(format!("{context}: {err}")),
    }
}

/// 分页查询并转换为业务模型
pub(crate) async fn fetch_page<E, T>(
    db: &DatabaseConnection,
    select: Select<E>,
    (page, size): (u64, u64),
    context: &'static str,
    convert: impl Fn(E::Model) -> T,
) -> Result<PaginatedResponse<T>>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    T: TS,
{
    let paginator = select.paginate(db, size);
    let total = paginator.num_items().await.map_err(db_err(context))?;
    let pages = paginator.num_pages().await.map_err(db_err(context))?;
    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(db_err(context))?;

    Ok(PaginatedResponse {
        items: items.into_iter().map(convert).collect(),
        pagination: PaginationInfo::new(page, size, total, pages),
    })
}

/// 当前 unix 时间戳（秒）
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 班级与科目
    async fn create_class(&self, req: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(req).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes(&self, params: SchoolListParams) -> Result<PaginatedResponse<Class>> {
        self.list_classes_impl(params).await
    }

    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self, params: SchoolListParams) -> Result<PaginatedResponse<Subject>> {
        self.list_subjects_impl(params).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 学籍管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<PaginatedResponse<Student>> {
        self.list_students_impl(query).await
    }

    async fn list_all_students(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        self.list_all_students_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_student_ids_for_user(&self, user_id: i64, as_parent: bool) -> Result<Vec<i64>> {
        self.list_student_ids_for_user_impl(user_id, as_parent).await
    }

    async fn list_guardian_phones(&self, class_id: Option<i64>) -> Result<Vec<String>> {
        self.list_guardian_phones_impl(class_id).await
    }

    // 收费标准
    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure> {
        self.create_fee_structure_impl(req).await
    }

    async fn get_fee_structure_by_id(&self, id: i64) -> Result<Option<FeeStructure>> {
        self.get_fee_structure_by_id_impl(id).await
    }

    async fn list_fee_structures(
        &self,
        params: SchoolListParams,
    ) -> Result<PaginatedResponse<FeeStructure>> {
        self.list_fee_structures_impl(params).await
    }

    async fn update_fee_structure(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>> {
        self.update_fee_structure_impl(id, update).await
    }

    async fn delete_fee_structure(&self, id: i64) -> Result<bool> {
        self.delete_fee_structure_impl(id).await
    }

    // 学生费用与缴费
    async fn create_fee(&self, req: CreateFeeRequest, today: NaiveDate) -> Result<Fee> {
        self.create_fee_impl(req, today).await
    }

    async fn get_fee_by_id(&self, id: i64, today: NaiveDate) -> Result<Option<Fee>> {
        self.get_fee_by_id_impl(id, today).await
    }

    async fn list_fees(
        &self,
        query: FeeListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<Fee>> {
        self.list_fees_impl(query, today).await
    }

    async fn list_all_fees(&self, query: FeeListQuery, today: NaiveDate) -> Result<Vec<Fee>> {
        self.list_all_fees_impl(query, today).await
    }

    async fn update_fee(
        &self,
        id: i64,
        update: UpdateFeeRequest,
        today: NaiveDate,
    ) -> Result<Option<Fee>> {
        self.update_fee_impl(id, update, today).await
    }

    async fn delete_fee(&self, id: i64) -> Result<bool> {
        self.delete_fee_impl(id).await
    }

    async fn record_payment(
        &self,
        fee_id: i64,
        req: CreatePaymentRequest,
        received_by: Option<i64>,
        receipt_prefix: &str,
        today: NaiveDate,
    ) -> Result<Option<PaymentReceipt>> {
        self.record_payment_impl(fee_id, req, received_by, receipt_prefix, today).await
    }

    async fn list_payments(&self, fee_id: i64) -> Result<Vec<FeePayment>> {
        self.list_payments_impl(fee_id).await
    }

    // 考试
    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(req).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams(&self, params: ExamListParams) -> Result<PaginatedResponse<Exam>> {
        self.list_exams_impl(params).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    async fn create_schedule(
        &self,
        exam_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<ExamSchedule> {
        self.create_schedule_impl(exam_id, req).await
    }

    async fn list_schedules(&self, exam_id: i64) -> Result<Vec<ExamSchedule>> {
        self.list_schedules_impl(exam_id).await
    }

    async fn delete_schedule(&self, exam_id: i64, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(exam_id, schedule_id).await
    }

    async fn upsert_mark_distribution(
        &self,
        exam_id: i64,
        req: UpsertMarkDistributionRequest,
        default_pass_percentage: f64,
    ) -> Result<MarkDistribution> {
        self.upsert_mark_distribution_impl(exam_id, req, default_pass_percentage).await
    }

    async fn list_mark_distributions(&self, exam_id: i64) -> Result<Vec<MarkDistribution>> {
        self.list_mark_distributions_impl(exam_id).await
    }

    // 成绩
    async fn record_result(&self, exam_id: i64, req: RecordResultRequest) -> Result<ExamResult> {
        self.record_result_impl(exam_id, req).await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<ExamResult>> {
        self.get_result_by_id_impl(id).await
    }

    async fn list_results(&self, query: ResultListQuery) -> Result<PaginatedResponse<ExamResult>> {
        self.list_results_impl(query).await
    }

    async fn list_student_exam_results(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<ExamResult>> {
        self.list_student_exam_results_impl(exam_id, student_id).await
    }

    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ExamResult>> {
        self.update_result_impl(id, update).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    // 准考证
    async fn generate_hall_ticket(
        &self,
        req: GenerateHallTicketRequest,
        issued_by: Option<i64>,
    ) -> Result<HallTicket> {
        self.generate_hall_ticket_impl(req, issued_by).await
    }

    async fn bulk_generate_hall_tickets(
        &self,
        exam_id: i64,
        class_id: i64,
        issued_by: Option<i64>,
    ) -> Result<BulkGenerateResponse> {
        self.bulk_generate_hall_tickets_impl(exam_id, class_id, issued_by).await
    }

    async fn get_hall_ticket_by_id(&self, id: i64) -> Result<Option<HallTicket>> {
        self.get_hall_ticket_by_id_impl(id).await
    }

    async fn list_hall_tickets(
        &self,
        query: HallTicketListQuery,
    ) -> Result<PaginatedResponse<HallTicket>> {
        self.list_hall_tickets_impl(query).await
    }

    async fn update_hall_ticket(
        &self,
        id: i64,
        update: UpdateHallTicketRequest,
    ) -> Result<Option<HallTicket>> {
        self.update_hall_ticket_impl(id, update).await
    }

    async fn delete_hall_ticket(&self, id: i64) -> Result<bool> {
        self.delete_hall_ticket_impl(id).await
    }

    // 图书馆
    async fn create_book(&self, req: CreateBookRequest) -> Result<Book> {
        self.create_book_impl(req).await
    }

    async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>> {
        self.get_book_by_id_impl(id).await
    }

    async fn list_books(&self, params: BookListParams) -> Result<PaginatedResponse<Book>> {
        self.list_books_impl(params).await
    }

    async fn update_book(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>> {
        self.update_book_impl(id, update).await
    }

    async fn delete_book(&self, id: i64) -> Result<bool> {
        self.delete_book_impl(id).await
    }

    async fn issue_book(
        &self,
        req: IssueBookRequest,
        policy: LoanPolicy,
        issued_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<BookLoan> {
        self.issue_book_impl(req, policy, issued_by, today).await
    }

    async fn return_book(
        &self,
        loan_id: i64,
        return_date: NaiveDate,
        policy: LoanPolicy,
        today: NaiveDate,
    ) -> Result<Option<BookLoan>> {
        self.return_book_impl(loan_id, return_date, policy, today).await
    }

    async fn get_loan_by_id(&self, id: i64, today: NaiveDate) -> Result<Option<BookLoan>> {
        self.get_loan_by_id_impl(id, today).await
    }

    async fn list_loans(
        &self,
        query: LoanListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<BookLoan>> {
        self.list_loans_impl(query, today).await
    }

    // 交通
    async fn create_vehicle(&self, req: CreateVehicleRequest) -> Result<Vehicle> {
        self.create_vehicle_impl(req).await
    }

    async fn get_vehicle_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        self.get_vehicle_by_id_impl(id).await
    }

    async fn list_vehicles(&self, params: VehicleListParams) -> Result<PaginatedResponse<Vehicle>> {
        self.list_vehicles_impl(params).await
    }

    async fn update_vehicle(
        &self,
        id: i64,
        update: UpdateVehicleRequest,
    ) -> Result<Option<Vehicle>> {
        self.update_vehicle_impl(id, update).await
    }

    async fn delete_vehicle(&self, id: i64) -> Result<bool> {
        self.delete_vehicle_impl(id).await
    }

    async fn create_transport_fee(
        &self,
        req: CreateTransportFeeRequest,
        today: NaiveDate,
    ) -> Result<TransportFee> {
        self.create_transport_fee_impl(req, today).await
    }

    async fn get_transport_fee_by_id(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Option<TransportFee>> {
        self.get_transport_fee_by_id_impl(id, today).await
    }

    async fn list_transport_fees(
        &self,
        query: TransportFeeListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<TransportFee>> {
        self.list_transport_fees_impl(query, today).await
    }

    async fn update_transport_fee(
        &self,
        id: i64,
        update: UpdateTransportFeeRequest,
        today: NaiveDate,
    ) -> Result<Option<TransportFee>> {
        self.update_transport_fee_impl(id, update, today).await
    }

    async fn delete_transport_fee(&self, id: i64) -> Result<bool> {
        self.delete_transport_fee_impl(id).await
    }

    // 证书
    async fn issue_certificate(
        &self,
        req: IssueCertificateRequest,
        issued_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<Certificate> {
        self.issue_certificate_impl(req, issued_by, today).await
    }

    async fn get_certificate_by_id(&self, id: i64) -> Result<Option<Certificate>> {
        self.get_certificate_by_id_impl(id).await
    }

    async fn list_certificates(
        &self,
        query: CertificateListQuery,
    ) -> Result<PaginatedResponse<Certificate>> {
        self.list_certificates_impl(query).await
    }

    async fn update_certificate(
        &self,
        id: i64,
        update: UpdateCertificateRequest,
    ) -> Result<Option<Certificate>> {
        self.update_certificate_impl(id, update).await
    }

    async fn revoke_certificate(&self, id: i64, reason: String) -> Result<Option<Certificate>> {
        self.revoke_certificate_impl(id, reason).await
    }

    async fn delete_certificate(&self, id: i64) -> Result<bool> {
        self.delete_certificate_impl(id).await
    }

    // 短信群发
    async fn create_campaign(
        &self,
        req: CreateCampaignRequest,
        created_by: Option<i64>,
    ) -> Result<SmsCampaign> {
        self.create_campaign_impl(req, created_by).await
    }

    async fn get_campaign_by_id(&self, id: i64) -> Result<Option<SmsCampaign>> {
        self.get_campaign_by_id_impl(id).await
    }

    async fn list_campaigns(
        &self,
        params: CampaignListParams,
    ) -> Result<PaginatedResponse<SmsCampaign>> {
        self.list_campaigns_impl(params).await
    }

    async fn update_campaign(
        &self,
        id: i64,
        update: UpdateCampaignRequest,
        max_message_length: usize,
    ) -> Result<Option<SmsCampaign>> {
        self.update_campaign_impl(id, update, max_message_length).await
    }

    async fn delete_campaign(&self, id: i64) -> Result<bool> {
        self.delete_campaign_impl(id).await
    }

    async fn mark_campaign_sending(&self, id: i64) -> Result<bool> {
        self.mark_campaign_sending_impl(id).await
    }

    async fn finish_campaign(
        &self,
        id: i64,
        outcome: DeliveryOutcome,
    ) -> Result<Option<SmsCampaign>> {
        self.finish_campaign_impl(id, outcome).await
    }

    // 体检记录
    async fn create_health_record(
        &self,
        req: CreateHealthRecordRequest,
        recorded_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<HealthRecord> {
        self.create_health_record_impl(req, recorded_by, today).await
    }

    async fn get_health_record_by_id(&self, id: i64) -> Result<Option<HealthRecord>> {
        self.get_health_record_by_id_impl(id).await
    }

    async fn list_health_records(
        &self,
        query: HealthRecordListQuery,
    ) -> Result<PaginatedResponse<HealthRecord>> {
        self.list_health_records_impl(query).await
    }

    async fn update_health_record(
        &self,
        id: i64,
        update: UpdateHealthRecordRequest,
        today: NaiveDate,
    ) -> Result<Option<HealthRecord>> {
        self.update_health_record_impl(id, update, today).await
    }

    async fn delete_health_record(&self, id: i64) -> Result<bool> {
        self.delete_health_record_impl(id).await
    }
}
