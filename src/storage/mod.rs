use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层接口
///
/// 派生字段（费用余额与状态、成绩等级、BMI、证书编号等）在写入前由存储层计算，
/// 违反业务约束时返回 `ErpError::Validation`，唯一约束冲突返回 `ErpError::Conflict`。
/// 涉及“当前日期”的方法显式接收 `today`，便于测试。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<PaginatedResponse<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 班级与科目
    async fn create_class(&self, req: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn list_classes(&self, params: SchoolListParams) -> Result<PaginatedResponse<Class>>;
    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, params: SchoolListParams)
    -> Result<PaginatedResponse<Subject>>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 学籍管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students(&self, query: StudentListQuery) -> Result<PaginatedResponse<Student>>;
    // 不分页，用于导出
    async fn list_all_students(&self, query: StudentListQuery) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 与用户关联的学生ID（学生本人或家长）
    async fn list_student_ids_for_user(&self, user_id: i64, as_parent: bool) -> Result<Vec<i64>>;
    // 在读学生的监护人电话，class_id 为空时取全校
    async fn list_guardian_phones(&self, class_id: Option<i64>) -> Result<Vec<String>>;

    /// 收费标准
    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure>;
    async fn get_fee_structure_by_id(&self, id: i64) -> Result<Option<FeeStructure>>;
    async fn list_fee_structures(
        &self,
        params: SchoolListParams,
    ) -> Result<PaginatedResponse<FeeStructure>>;
    async fn update_fee_structure(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>>;
    async fn delete_fee_structure(&self, id: i64) -> Result<bool>;

    /// 学生费用与缴费
    async fn create_fee(&self, req: CreateFeeRequest, today: NaiveDate) -> Result<Fee>;
    async fn get_fee_by_id(&self, id: i64, today: NaiveDate) -> Result<Option<Fee>>;
    async fn list_fees(
        &self,
        query: FeeListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<Fee>>;
    // 不分页，用于汇总
    async fn list_all_fees(&self, query: FeeListQuery, today: NaiveDate) -> Result<Vec<Fee>>;
    async fn update_fee(
        &self,
        id: i64,
        update: UpdateFeeRequest,
        today: NaiveDate,
    ) -> Result<Option<Fee>>;
    async fn delete_fee(&self, id: i64) -> Result<bool>;
    // 缴费：写入收据并在同一事务内更新费用
    async fn record_payment(
        &self,
        fee_id: i64,
        req: CreatePaymentRequest,
        received_by: Option<i64>,
        receipt_prefix: &str,
        today: NaiveDate,
    ) -> Result<Option<PaymentReceipt>>;
    async fn list_payments(&self, fee_id: i64) -> Result<Vec<FeePayment>>;

    /// 考试
    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self, params: ExamListParams) -> Result<PaginatedResponse<Exam>>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;
    async fn create_schedule(
        &self,
        exam_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<ExamSchedule>;
    async fn list_schedules(&self, exam_id: i64) -> Result<Vec<ExamSchedule>>;
    async fn delete_schedule(&self, exam_id: i64, schedule_id: i64) -> Result<bool>;
    // 创建或替换某科目的成绩构成
    async fn upsert_mark_distribution(
        &self,
        exam_id: i64,
        req: UpsertMarkDistributionRequest,
        default_pass_percentage: f64,
    ) -> Result<MarkDistribution>;
    async fn list_mark_distributions(&self, exam_id: i64) -> Result<Vec<MarkDistribution>>;

    /// 成绩
    async fn record_result(&self, exam_id: i64, req: RecordResultRequest) -> Result<ExamResult>;
    async fn get_result_by_id(&self, id: i64) -> Result<Option<ExamResult>>;
    async fn list_results(&self, query: ResultListQuery)
    -> Result<PaginatedResponse<ExamResult>>;
    async fn list_student_exam_results(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<ExamResult>>;
    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ExamResult>>;
    async fn delete_result(&self, id: i64) -> Result<bool>;

    /// 准考证
    async fn generate_hall_ticket(
        &self,
        req: GenerateHallTicketRequest,
        issued_by: Option<i64>,
    ) -> Result<HallTicket>;
    async fn bulk_generate_hall_tickets(
        &self,
        exam_id: i64,
        class_id: i64,
        issued_by: Option<i64>,
    ) -> Result<BulkGenerateResponse>;
    async fn get_hall_ticket_by_id(&self, id: i64) -> Result<Option<HallTicket>>;
    async fn list_hall_tickets(
        &self,
        query: HallTicketListQuery,
    ) -> Result<PaginatedResponse<HallTicket>>;
    async fn update_hall_ticket(
        &self,
        id: i64,
        update: UpdateHallTicketRequest,
    ) -> Result<Option<HallTicket>>;
    async fn delete_hall_ticket(&self, id: i64) -> Result<bool>;

    /// 图书馆
    async fn create_book(&self, req: CreateBookRequest) -> Result<Book>;
    async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>>;
    async fn list_books(&self, params: BookListParams) -> Result<PaginatedResponse<Book>>;
    async fn update_book(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>>;
    async fn delete_book(&self, id: i64) -> Result<bool>;
    async fn issue_book(
        &self,
        req: IssueBookRequest,
        policy: LoanPolicy,
        issued_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<BookLoan>;
    async fn return_book(
        &self,
        loan_id: i64,
        return_date: NaiveDate,
        policy: LoanPolicy,
        today: NaiveDate,
    ) -> Result<Option<BookLoan>>;
    async fn get_loan_by_id(&self, id: i64, today: NaiveDate) -> Result<Option<BookLoan>>;
    async fn list_loans(
        &self,
        query: LoanListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<BookLoan>>;

    /// 交通
    async fn create_vehicle(&self, req: CreateVehicleRequest) -> Result<Vehicle>;
    async fn get_vehicle_by_id(&self, id: i64) -> Result<Option<Vehicle>>;
    async fn list_vehicles(&self, params: VehicleListParams)
    -> Result<PaginatedResponse<Vehicle>>;
    async fn update_vehicle(
        &self,
        id: i64,
        update: UpdateVehicleRequest,
    ) -> Result<Option<Vehicle>>;
    async fn delete_vehicle(&self, id: i64) -> Result<bool>;
    async fn create_transport_fee(
        &self,
        req: CreateTransportFeeRequest,
        today: NaiveDate,
    ) -> Result<TransportFee>;
    async fn get_transport_fee_by_id(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Option<TransportFee>>;
    async fn list_transport_fees(
        &self,
        query: TransportFeeListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<TransportFee>>;
    async fn update_transport_fee(
        &self,
        id: i64,
        update: UpdateTransportFeeRequest,
        today: NaiveDate,
    ) -> Result<Option<TransportFee>>;
    async fn delete_transport_fee(&self, id: i64) -> Result<bool>;

    /// 证书
    async fn issue_certificate(
        &self,
        req: IssueCertificateRequest,
        issued_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<Certificate>;
    async fn get_certificate_by_id(&self, id: i64) -> Result<Option<Certificate>>;
    async fn list_certificates(
        &self,
        query: CertificateListQuery,
    ) -> Result<PaginatedResponse<Certificate>>;
    async fn update_certificate(
        &self,
        id: i64,
        update: UpdateCertificateRequest,
    ) -> Result<Option<Certificate>>;
    async fn revoke_certificate(&self, id: i64, reason: String) -> Result<Option<Certificate>>;
    async fn delete_certificate(&self, id: i64) -> Result<bool>;

    /// 短信群发
    async fn create_campaign(
        &self,
        req: CreateCampaignRequest,
        created_by: Option<i64>,
    ) -> Result<SmsCampaign>;
    async fn get_campaign_by_id(&self, id: i64) -> Result<Option<SmsCampaign>>;
    async fn list_campaigns(
        &self,
        params: CampaignListParams,
    ) -> Result<PaginatedResponse<SmsCampaign>>;
    // 仅草稿可修改
    async fn update_campaign(
        &self,
        id: i64,
        update: UpdateCampaignRequest,
        max_message_length: usize,
    ) -> Result<Option<SmsCampaign>>;
    // 仅草稿可删除
    async fn delete_campaign(&self, id: i64) -> Result<bool>;
    // 草稿 -> 发送中，状态不是草稿时返回 false
    async fn mark_campaign_sending(&self, id: i64) -> Result<bool>;
    async fn finish_campaign(
        &self,
        id: i64,
        outcome: DeliveryOutcome,
    ) -> Result<Option<SmsCampaign>>;

    /// 体检记录
    async fn create_health_record(
        &self,
        req: CreateHealthRecordRequest,
        recorded_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<HealthRecord>;
    async fn get_health_record_by_id(&self, id: i64) -> Result<Option<HealthRecord>>;
    async fn list_health_records(
        &self,
        query: HealthRecordListQuery,
    ) -> Result<PaginatedResponse<HealthRecord>>;
    async fn update_health_record(
        &self,
        id: i64,
        update: UpdateHealthRecordRequest,
        today: NaiveDate,
    ) -> Result<Option<HealthRecord>>;
    async fn delete_health_record(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
