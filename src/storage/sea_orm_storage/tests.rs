use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use super::SeaOrmStorage;
use crate::entity::hall_tickets::{self, Entity as HallTickets};
use crate::errors::ErpError;
use crate::models::{
    certificates::{CertificateStatus, CertificateType, IssueCertificateRequest},
    exams::{
        entities::{ComponentMark, ExamStatus, ExamType, MarkComponent, ResultStatus},
        grading::summarize,
        requests::{
            CreateExamRequest, CreateScheduleRequest, RecordResultRequest,
            UpdateExamRequest, UpdateResultRequest, UpsertMarkDistributionRequest,
        },
    },
    fees::{
        entities::{FeeComponent, PaymentMethod, PaymentStatus},
        requests::{
            CreateFeeRequest, CreateFeeStructureRequest, CreatePaymentRequest, FeeListQuery,
            UpdateFeeRequest,
        },
    },
    hall_tickets::GenerateHallTicketRequest,
    health::{CreateHealthRecordRequest, UpdateHealthRecordRequest},
    library::{CreateBookRequest, IssueBookRequest, LoanPolicy, LoanStatus, UpdateBookRequest},
    school::{CreateClassRequest, CreateSubjectRequest},
    sms::{Audience, CampaignStatus, CreateCampaignRequest, DeliveryOutcome, UpdateCampaignRequest},
    students::{
        entities::{Gender, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    transport::{
        CreateTransportFeeRequest, CreateVehicleRequest, UpdateVehicleRequest, VehicleStatus,
        VehicleType,
    },
    users::{entities::UserRole, requests::CreateUserRequest},
};

async fn storage() -> SeaOrmStorage {
    // 内存库每个连接独立，限制为单连接
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory database");
    SeaOrmStorage::from_connection(db)
        .await
        .expect("Failed to run migrations")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn today() -> NaiveDate {
    date("2025-06-15")
}

async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> i64 {
    storage
        .create_user_impl(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password: "hash".to_string(),
            role,
            display_name: None,
            phone: None,
        })
        .await
        .unwrap()
        .id
}

async fn seed_class(storage: &SeaOrmStorage, name: &str) -> i64 {
    storage
        .create_class_impl(CreateClassRequest {
            name: name.to_string(),
            section: "A".to_string(),
            class_teacher_id: None,
        })
        .await
        .unwrap()
        .id
}

fn student_request(admission: &str, class_id: Option<i64>) -> CreateStudentRequest {
    CreateStudentRequest {
        admission_number: admission.to_string(),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        gender: Gender::Female,
        date_of_birth: date("2012-05-17"),
        class_id,
        roll_number: Some(1),
        guardian_name: Some("Ravi Rao".to_string()),
        guardian_phone: Some("98450-12345".to_string()),
        address: None,
        user_id: None,
        parent_user_id: None,
    }
}

async fn seed_student(storage: &SeaOrmStorage, admission: &str, class_id: Option<i64>) -> i64 {
    storage
        .create_student_impl(student_request(admission, class_id))
        .await
        .unwrap()
        .id
}

fn fee_request(student_id: i64, amount: f64, due: &str) -> CreateFeeRequest {
    CreateFeeRequest {
        student_id,
        fee_structure_id: None,
        title: "Term 1 tuition".to_string(),
        amount: Some(amount),
        discount_amount: 0.0,
        fine_amount: 0.0,
        due_date: date(due),
        remarks: None,
    }
}

fn payment(amount: f64) -> CreatePaymentRequest {
    CreatePaymentRequest {
        amount,
        method: PaymentMethod::Cash,
        reference: None,
        paid_on: Some(date("2025-06-10")),
    }
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let storage = storage().await;
    seed_user(&storage, "teacher01", UserRole::Teacher).await;

    let err = storage
        .create_user_impl(CreateUserRequest {
            username: "teacher01".to_string(),
            email: "other@school.test".to_string(),
            password: "hash".to_string(),
            role: UserRole::Teacher,
            display_name: None,
            phone: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Conflict(_)));
    assert_eq!(storage.count_users_impl().await.unwrap(), 1);
}

#[tokio::test]
async fn test_login_lookup_by_username_or_email() {
    let storage = storage().await;
    storage
        .create_user_impl(CreateUserRequest {
            username: "office01".to_string(),
            email: " Office@School.Test ".to_string(),
            password: "hash".to_string(),
            role: UserRole::Clerk,
            display_name: None,
            phone: None,
        })
        .await
        .unwrap();

    let by_email = storage
        .get_user_by_username_or_email_impl("office@school.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.username, "office01");
    assert_eq!(by_email.email, "office@school.test");
    assert!(
        storage
            .get_user_by_username_or_email_impl("office01")
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        storage
            .get_user_by_username_or_email_impl("missing")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_student_links_and_guardian_phones() {
    let storage = storage().await;
    let parent = seed_user(&storage, "parent01", UserRole::Parent).await;
    let class_id = seed_class(&storage, "Grade 5").await;

    let mut req = student_request("ADM-001", Some(class_id));
    req.parent_user_id = Some(parent);
    let first = storage.create_student_impl(req).await.unwrap();
    // 同一监护人号码只发送一次
    let mut req = student_request("ADM-002", Some(class_id));
    req.parent_user_id = Some(parent);
    req.guardian_phone = Some("9845012345".to_string());
    let second = storage.create_student_impl(req).await.unwrap();
    let mut req = student_request("ADM-003", None);
    req.guardian_phone = Some("9900011122".to_string());
    storage.create_student_impl(req).await.unwrap();

    assert_eq!(first.guardian_phone.as_deref(), Some("9845012345"));
    assert_eq!(
        storage.list_student_ids_for_user_impl(parent, true).await.unwrap(),
        vec![first.id, second.id]
    );
    assert!(storage.list_student_ids_for_user_impl(parent, false).await.unwrap().is_empty());

    assert_eq!(
        storage.list_guardian_phones_impl(Some(class_id)).await.unwrap(),
        vec!["9845012345".to_string()]
    );
    assert_eq!(storage.list_guardian_phones_impl(None).await.unwrap().len(), 2);

    storage
        .update_student_impl(
            second.id,
            UpdateStudentRequest {
                status: Some(StudentStatus::Alumni),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        storage.list_active_students_in_class_impl(class_id).await.unwrap().len(),
        1
    );

    let scoped = storage
        .list_students_impl(StudentListQuery {
            only_ids: Some(vec![first.id]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(scoped.pagination.total, 1);
    assert_eq!(scoped.items[0].admission_number, "ADM-001");

    let err = storage
        .create_student_impl(student_request("ADM-001", None))
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Conflict(_)));
}

#[tokio::test]
async fn test_fee_structure_components_must_sum() {
    let storage = storage().await;
    let err = storage
        .create_fee_structure_impl(CreateFeeStructureRequest {
            name: "Grade 5 Annual".to_string(),
            class_id: None,
            academic_year: "2025-2026".to_string(),
            total_amount: 12000.0,
            components: vec![
                FeeComponent {
                    name: "Tuition".to_string(),
                    amount: 10000.0,
                },
                FeeComponent {
                    name: "Lab".to_string(),
                    amount: 1500.0,
                },
            ],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));
    assert!(err.message().contains("must sum to total"));
}

#[tokio::test]
async fn test_fee_from_structure_copies_total() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-010", None).await;
    let structure = storage
        .create_fee_structure_impl(CreateFeeStructureRequest {
            name: "Grade 5 Annual".to_string(),
            class_id: None,
            academic_year: "2025-2026".to_string(),
            total_amount: 5000.0,
            components: vec![
                FeeComponent {
                    name: "Tuition".to_string(),
                    amount: 4000.0,
                },
                FeeComponent {
                    name: "Lab".to_string(),
                    amount: 1000.0,
                },
            ],
        })
        .await
        .unwrap();

    let mut req = fee_request(student_id, 0.0, "2025-07-01");
    req.amount = None;
    req.fee_structure_id = Some(structure.id);
    let fee = storage.create_fee_impl(req, today()).await.unwrap();
    assert_eq!(fee.amount, 5000.0);
    assert_eq!(fee.balance_amount, 5000.0);
    assert_eq!(fee.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn test_payments_update_balance_and_number_receipts() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-011", None).await;
    let fee = storage
        .create_fee_impl(fee_request(student_id, 5000.0, "2025-07-01"), today())
        .await
        .unwrap();

    let first = storage
        .record_payment_impl(fee.id, payment(1250.5), None, "RCP", today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.payment.receipt_number, "RCP-2025-000001");
    assert_eq!(first.fee.balance_amount, 3749.5);
    assert_eq!(first.fee.payment_status, PaymentStatus::Partial);

    // 超过余额的付款被拒绝，费用保持不变
    let err = storage
        .record_payment_impl(fee.id, payment(4000.0), None, "RCP", today())
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));
    let unchanged = storage.get_fee_by_id_impl(fee.id, today()).await.unwrap().unwrap();
    assert_eq!(unchanged.paid_amount, 1250.5);

    let second = storage
        .record_payment_impl(fee.id, payment(3749.5), None, "RCP", today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.payment.receipt_number, "RCP-2025-000002");
    assert_eq!(second.fee.balance_amount, 0.0);
    assert_eq!(second.fee.payment_status, PaymentStatus::Paid);

    let err = storage
        .record_payment_impl(fee.id, payment(1.0), None, "RCP", today())
        .await
        .unwrap_err();
    assert!(err.message().contains("fully paid"));

    assert_eq!(storage.list_payments_impl(fee.id).await.unwrap().len(), 2);
    assert!(
        storage
            .record_payment_impl(9999, payment(1.0), None, "RCP", today())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_receipt_prefix_with_like_wildcards() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-013", None).await;
    let fee = storage
        .create_fee_impl(fee_request(student_id, 900.0, "2025-07-01"), today())
        .await
        .unwrap();

    let mut receipts = Vec::new();
    for _ in 0..3 {
        receipts.push(
            storage
                .record_payment_impl(fee.id, payment(100.0), None, "SCH_RCP", today())
                .await
                .unwrap()
                .unwrap()
                .payment
                .receipt_number,
        );
    }
    assert_eq!(
        receipts,
        ["SCH_RCP-2025-000001", "SCH_RCP-2025-000002", "SCH_RCP-2025-000003"]
    );

    // 其他前缀和年份各自编号
    let other = storage
        .record_payment_impl(fee.id, payment(100.0), None, "RCP%", today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(other.payment.receipt_number, "RCP%-2025-000001");
    let next_year = storage
        .record_payment_impl(
            fee.id,
            CreatePaymentRequest {
                paid_on: Some(date("2026-01-05")),
                ..payment(100.0)
            },
            None,
            "SCH_RCP",
            date("2026-01-05"),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next_year.payment.receipt_number, "SCH_RCP-2026-000001");
}

#[tokio::test]
async fn test_fee_status_ages_into_overdue() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-012", None).await;
    let fee = storage
        .create_fee_impl(fee_request(student_id, 1200.0, "2025-06-20"), today())
        .await
        .unwrap();
    assert_eq!(fee.payment_status, PaymentStatus::Pending);

    let later = date("2025-06-21");
    let aged = storage.get_fee_by_id_impl(fee.id, later).await.unwrap().unwrap();
    assert_eq!(aged.payment_status, PaymentStatus::Overdue);

    let overdue = storage
        .list_fees_impl(
            FeeListQuery {
                status: Some(PaymentStatus::Overdue),
                ..Default::default()
            },
            later,
        )
        .await
        .unwrap();
    assert_eq!(overdue.pagination.total, 1);
    let pending = storage
        .list_fees_impl(
            FeeListQuery {
                status: Some(PaymentStatus::Pending),
                ..Default::default()
            },
            later,
        )
        .await
        .unwrap();
    assert_eq!(pending.pagination.total, 0);
}

#[tokio::test]
async fn test_fee_update_rejects_net_below_paid() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-013", None).await;
    let fee = storage
        .create_fee_impl(fee_request(student_id, 1000.0, "2025-07-01"), today())
        .await
        .unwrap();
    storage
        .record_payment_impl(fee.id, payment(800.0), None, "RCP", today())
        .await
        .unwrap();

    let err = storage
        .update_fee_impl(
            fee.id,
            UpdateFeeRequest {
                discount_amount: Some(300.0),
                ..Default::default()
            },
            today(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let updated = storage
        .update_fee_impl(
            fee.id,
            UpdateFeeRequest {
                discount_amount: Some(200.0),
                ..Default::default()
            },
            today(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.balance_amount, 0.0);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

struct ExamFixture {
    exam_id: i64,
    subject_id: i64,
    student_id: i64,
}

async fn exam_fixture(storage: &SeaOrmStorage) -> ExamFixture {
    let class_id = seed_class(storage, "Grade 8").await;
    let student_id = seed_student(storage, "ADM-100", Some(class_id)).await;
    let subject_id = storage
        .create_subject_impl(CreateSubjectRequest {
            name: "Mathematics".to_string(),
            code: "math8".to_string(),
            class_id: Some(class_id),
        })
        .await
        .unwrap()
        .id;
    let exam_id = storage
        .create_exam_impl(CreateExamRequest {
            name: "Midterm 2025".to_string(),
            exam_type: ExamType::Midterm,
            academic_year: "2025-2026".to_string(),
            start_date: date("2025-09-01"),
            end_date: date("2025-09-10"),
        })
        .await
        .unwrap()
        .id;
    storage
        .upsert_mark_distribution_impl(
            exam_id,
            UpsertMarkDistributionRequest {
                subject_id,
                pass_percentage: None,
                components: vec![
                    MarkComponent {
                        name: "Theory".to_string(),
                        max_marks: 80.0,
                        weightage: 70.0,
                    },
                    MarkComponent {
                        name: "Practical".to_string(),
                        max_marks: 20.0,
                        weightage: 30.0,
                    },
                ],
            },
            33.0,
        )
        .await
        .unwrap();
    ExamFixture {
        exam_id,
        subject_id,
        student_id,
    }
}

fn marks(theory: f64, practical: f64) -> Vec<ComponentMark> {
    vec![
        ComponentMark {
            name: "Theory".to_string(),
            obtained: theory,
        },
        ComponentMark {
            name: "Practical".to_string(),
            obtained: practical,
        },
    ]
}

#[tokio::test]
async fn test_result_grades_are_derived() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;

    let result = storage
        .record_result_impl(
            fx.exam_id,
            RecordResultRequest {
                student_id: fx.student_id,
                subject_id: fx.subject_id,
                marks: marks(72.0, 18.0),
                is_absent: false,
                remarks: None,
            },
        )
        .await
        .unwrap();
    // 72/80*70 + 18/20*30 = 63 + 27
    assert_eq!(result.percentage, 90.0);
    assert_eq!(result.grade, "A+");
    assert_eq!(result.total_obtained, 90.0);
    assert_eq!(result.total_max, 100.0);
    assert_eq!(result.status, ResultStatus::Pass);

    let updated = storage
        .update_result_impl(
            result.id,
            UpdateResultRequest {
                marks: Some(marks(16.0, 4.0)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.percentage, 20.0);
    assert_eq!(updated.grade, "F");
    assert_eq!(updated.status, ResultStatus::Fail);

    let absent = storage
        .update_result_impl(
            result.id,
            UpdateResultRequest {
                is_absent: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(absent.grade, "AB");
    assert_eq!(absent.status, ResultStatus::Absent);
    assert!(absent.marks.is_empty());

    let err = storage
        .record_result_impl(
            fx.exam_id,
            RecordResultRequest {
                student_id: fx.student_id,
                subject_id: fx.subject_id,
                marks: marks(10.0, 10.0),
                is_absent: false,
                remarks: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Conflict(_)));

    let results = storage
        .list_student_exam_results_impl(fx.exam_id, fx.student_id)
        .await
        .unwrap();
    let summary = summarize(fx.student_id, fx.exam_id, results);
    assert_eq!(summary.subjects, 1);
    assert_eq!(summary.status, ResultStatus::Absent);
}

#[tokio::test]
async fn test_result_requires_distribution_and_valid_marks() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;
    let other_subject = storage
        .create_subject_impl(CreateSubjectRequest {
            name: "Science".to_string(),
            code: "SCI8".to_string(),
            class_id: None,
        })
        .await
        .unwrap()
        .id;

    let err = storage
        .record_result_impl(
            fx.exam_id,
            RecordResultRequest {
                student_id: fx.student_id,
                subject_id: other_subject,
                marks: marks(50.0, 10.0),
                is_absent: false,
                remarks: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.message().contains("No mark distribution"));

    let err = storage
        .record_result_impl(
            fx.exam_id,
            RecordResultRequest {
                student_id: fx.student_id,
                subject_id: fx.subject_id,
                marks: marks(81.0, 10.0),
                is_absent: false,
                remarks: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));
}

#[tokio::test]
async fn test_distribution_upsert_replaces_components() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;

    let err = storage
        .upsert_mark_distribution_impl(
            fx.exam_id,
            UpsertMarkDistributionRequest {
                subject_id: fx.subject_id,
                pass_percentage: Some(40.0),
                components: vec![MarkComponent {
                    name: "Theory".to_string(),
                    max_marks: 100.0,
                    weightage: 90.0,
                }],
            },
            33.0,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let replaced = storage
        .upsert_mark_distribution_impl(
            fx.exam_id,
            UpsertMarkDistributionRequest {
                subject_id: fx.subject_id,
                pass_percentage: Some(40.0),
                components: vec![MarkComponent {
                    name: "Theory".to_string(),
                    max_marks: 100.0,
                    weightage: 100.0,
                }],
            },
            33.0,
        )
        .await
        .unwrap();
    assert_eq!(replaced.pass_percentage, 40.0);

    let all = storage.list_mark_distributions_impl(fx.exam_id).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].components.len(), 1);
}

#[tokio::test]
async fn test_schedule_must_fall_within_exam() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;
    let schedule = |exam_date: &str| CreateScheduleRequest {
        subject_id: fx.subject_id,
        exam_date: date(exam_date),
        start_time: "09:00".to_string(),
        end_time: "12:00".to_string(),
        room: Some("Hall A".to_string()),
        max_marks: 100.0,
    };

    let err = storage
        .create_schedule_impl(fx.exam_id, schedule("2025-09-11"))
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let created = storage
        .create_schedule_impl(fx.exam_id, schedule("2025-09-02"))
        .await
        .unwrap();
    let err = storage
        .create_schedule_impl(fx.exam_id, schedule("2025-09-03"))
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Conflict(_)));

    assert!(storage.delete_schedule_impl(fx.exam_id + 1, created.id).await.is_ok_and(|d| !d));
    assert!(storage.delete_schedule_impl(fx.exam_id, created.id).await.unwrap());
}

#[tokio::test]
async fn test_exam_range_cannot_drop_schedules() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;
    storage
        .create_schedule_impl(
            fx.exam_id,
            CreateScheduleRequest {
                subject_id: fx.subject_id,
                exam_date: date("2025-09-09"),
                start_time: "09:00".to_string(),
                end_time: "12:00".to_string(),
                room: None,
                max_marks: 100.0,
            },
        )
        .await
        .unwrap();

    let err = storage
        .update_exam_impl(
            fx.exam_id,
            UpdateExamRequest {
                end_date: Some(date("2025-09-03")),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));
    assert!(err.message().contains("2025-09-09"));

    let err = storage
        .update_exam_impl(
            fx.exam_id,
            UpdateExamRequest {
                start_date: Some(date("2025-09-10")),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let exam = storage.get_exam_by_id_impl(fx.exam_id).await.unwrap().unwrap();
    assert_eq!(exam.end_date, date("2025-09-10"));

    let moved = storage
        .update_exam_impl(
            fx.exam_id,
            UpdateExamRequest {
                start_date: Some(date("2025-09-05")),
                end_date: Some(date("2025-09-09")),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.start_date, date("2025-09-05"));
    assert_eq!(moved.end_date, date("2025-09-09"));
}

#[tokio::test]
async fn test_hall_tickets() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;
    let class_id = storage
        .get_student_by_id_impl(fx.student_id)
        .await
        .unwrap()
        .unwrap()
        .class_id
        .unwrap();
    let second = seed_student(&storage, "adm/101", Some(class_id)).await;
    let inactive = seed_student(&storage, "ADM-102", Some(class_id)).await;
    storage
        .update_student_impl(
            inactive,
            UpdateStudentRequest {
                status: Some(StudentStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let ticket = storage
        .generate_hall_ticket_impl(
            GenerateHallTicketRequest {
                exam_id: fx.exam_id,
                student_id: second,
                remarks: None,
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(ticket.ticket_number, format!("HT-{:04}-adm/101", fx.exam_id));

    let err = storage
        .generate_hall_ticket_impl(
            GenerateHallTicketRequest {
                exam_id: fx.exam_id,
                student_id: second,
                remarks: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Conflict(_)));

    let err = storage
        .generate_hall_ticket_impl(
            GenerateHallTicketRequest {
                exam_id: fx.exam_id,
                student_id: inactive,
                remarks: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let bulk = storage
        .bulk_generate_hall_tickets_impl(fx.exam_id, class_id, None)
        .await
        .unwrap();
    assert_eq!(bulk.created, 1);
    assert_eq!(bulk.skipped, 1);
    assert_eq!(bulk.tickets[0].student_id, fx.student_id);

    storage
        .update_exam_impl(
            fx.exam_id,
            UpdateExamRequest {
                status: Some(ExamStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = storage
        .bulk_generate_hall_tickets_impl(fx.exam_id, class_id, None)
        .await
        .unwrap_err();
    assert!(err.message().contains("cancelled"));
}

#[tokio::test]
async fn test_ticket_numbers_keep_admission_punctuation() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;
    let class_id = storage
        .get_student_by_id_impl(fx.student_id)
        .await
        .unwrap()
        .unwrap()
        .class_id
        .unwrap();
    let lookalike = seed_student(&storage, "ADM100", Some(class_id)).await;

    let first = storage
        .generate_hall_ticket_impl(
            GenerateHallTicketRequest {
                exam_id: fx.exam_id,
                student_id: fx.student_id,
                remarks: None,
            },
            None,
        )
        .await
        .unwrap();
    let second = storage
        .generate_hall_ticket_impl(
            GenerateHallTicketRequest {
                exam_id: fx.exam_id,
                student_id: lookalike,
                remarks: None,
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(first.ticket_number, format!("HT-{:04}-ADM-100", fx.exam_id));
    assert_eq!(second.ticket_number, format!("HT-{:04}-ADM100", fx.exam_id));
}

#[tokio::test]
async fn test_bulk_hall_tickets_roll_back_on_failure() {
    let storage = storage().await;
    let fx = exam_fixture(&storage).await;
    let class_id = storage
        .get_student_by_id_impl(fx.student_id)
        .await
        .unwrap()
        .unwrap()
        .class_id
        .unwrap();
    seed_student(&storage, "ADM-101", Some(class_id)).await;
    let outsider = seed_student(&storage, "ADM-900", None).await;

    // 占用班级第二名学生的准考证号，使批量生成在中途失败
    hall_tickets::ActiveModel {
        exam_id: Set(fx.exam_id),
        student_id: Set(outsider),
        ticket_number: Set(format!("HT-{:04}-ADM-101", fx.exam_id)),
        status: Set("issued".to_string()),
        remarks: Set(None),
        issued_by: Set(None),
        created_at: Set(0),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .unwrap();

    let err = storage
        .bulk_generate_hall_tickets_impl(fx.exam_id, class_id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Conflict(_)));

    let persisted = HallTickets::find()
        .filter(hall_tickets::Column::ExamId.eq(fx.exam_id))
        .count(&storage.db)
        .await
        .unwrap();
    assert_eq!(persisted, 1);
    let first = HallTickets::find()
        .filter(hall_tickets::Column::StudentId.eq(fx.student_id))
        .one(&storage.db)
        .await
        .unwrap();
    assert!(first.is_none());
}

fn policy() -> LoanPolicy {
    LoanPolicy {
        loan_days: 14,
        fine_per_day: 2.5,
        max_active_loans: 2,
    }
}

async fn seed_book(storage: &SeaOrmStorage, isbn: &str, copies: i32) -> i64 {
    storage
        .create_book_impl(CreateBookRequest {
            title: "Wings of Fire".to_string(),
            author: "A. P. J. Abdul Kalam".to_string(),
            isbn: isbn.to_string(),
            category: Some("Biography".to_string()),
            total_copies: copies,
        })
        .await
        .unwrap()
        .id
}

fn issue(book_id: i64, student_id: i64) -> IssueBookRequest {
    IssueBookRequest {
        book_id,
        student_id,
        issue_date: Some(date("2025-06-01")),
    }
}

#[tokio::test]
async fn test_issue_and_return_book() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-200", None).await;
    let book_id = seed_book(&storage, "978-81-7371-146-6", 1).await;

    let book = storage.get_book_by_id_impl(book_id).await.unwrap().unwrap();
    assert_eq!(book.isbn, "9788173711466");

    let loan = storage
        .issue_book_impl(issue(book_id, student_id), policy(), None, today())
        .await
        .unwrap();
    assert_eq!(loan.due_date, date("2025-06-15"));
    assert_eq!(loan.status, LoanStatus::Issued);
    let book = storage.get_book_by_id_impl(book_id).await.unwrap().unwrap();
    assert_eq!(book.available_copies, 0);

    // 无可借副本
    let other = seed_student(&storage, "ADM-201", None).await;
    let err = storage
        .issue_book_impl(issue(book_id, other), policy(), None, today())
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let overdue = storage
        .get_loan_by_id_impl(loan.id, date("2025-06-16"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(overdue.status, LoanStatus::Overdue);

    let returned = storage
        .return_book_impl(loan.id, date("2025-06-19"), policy(), date("2025-06-19"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(returned.fine_amount, 10.0);
    assert_eq!(returned.status, LoanStatus::Returned);
    let book = storage.get_book_by_id_impl(book_id).await.unwrap().unwrap();
    assert_eq!(book.available_copies, 1);

    let err = storage
        .return_book_impl(loan.id, date("2025-06-19"), policy(), date("2025-06-19"))
        .await
        .unwrap_err();
    assert!(err.message().contains("already been returned"));
}

#[tokio::test]
async fn test_loan_limit_and_copy_floor() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-202", None).await;
    let book_id = seed_book(&storage, "0-8044-2957-X", 5).await;

    for _ in 0..2 {
        storage
            .issue_book_impl(issue(book_id, student_id), policy(), None, today())
            .await
            .unwrap();
    }
    let err = storage
        .issue_book_impl(issue(book_id, student_id), policy(), None, today())
        .await
        .unwrap_err();
    assert!(err.message().contains("active loans"));

    let err = storage
        .update_book_impl(
            book_id,
            UpdateBookRequest {
                total_copies: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let book = storage
        .update_book_impl(
            book_id,
            UpdateBookRequest {
                total_copies: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.total_copies, 3);
    assert_eq!(book.available_copies, 1);
}

#[tokio::test]
async fn test_retired_vehicle_cannot_be_assigned() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-300", None).await;
    let vehicle = storage
        .create_vehicle_impl(CreateVehicleRequest {
            registration_number: "ka-01-ab-1234".to_string(),
            vehicle_type: VehicleType::Bus,
            capacity: 40,
            driver_name: Some("Ravi".to_string()),
            driver_phone: None,
            route_name: Some("North Loop".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(vehicle.registration_number, "KA-01-AB-1234");

    let request = || CreateTransportFeeRequest {
        student_id,
        vehicle_id: vehicle.id,
        period: "2025 Q3".to_string(),
        amount: 3000.0,
        paid_amount: 1000.0,
        due_date: date("2025-07-01"),
    };
    let fee = storage
        .create_transport_fee_impl(request(), today())
        .await
        .unwrap();
    assert_eq!(fee.balance_amount, 2000.0);
    assert_eq!(fee.payment_status, PaymentStatus::Partial);

    storage
        .update_vehicle_impl(
            vehicle.id,
            UpdateVehicleRequest {
                status: Some(VehicleStatus::Retired),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = storage
        .create_transport_fee_impl(request(), today())
        .await
        .unwrap_err();
    assert!(err.message().contains("retired"));
}

#[tokio::test]
async fn test_certificate_numbers_and_revocation() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-400", None).await;
    let issue = |certificate_type| IssueCertificateRequest {
        student_id,
        certificate_type,
        issue_date: Some(date("2025-06-01")),
        purpose: Some("Scholarship".to_string()),
        remarks: None,
    };

    let first = storage
        .issue_certificate_impl(issue(CertificateType::Bonafide), None, today())
        .await
        .unwrap();
    let second = storage
        .issue_certificate_impl(issue(CertificateType::Bonafide), None, today())
        .await
        .unwrap();
    let transfer = storage
        .issue_certificate_impl(issue(CertificateType::Transfer), None, today())
        .await
        .unwrap();
    assert_eq!(first.certificate_number, "BC/2025/00001");
    assert_eq!(second.certificate_number, "BC/2025/00002");
    assert_eq!(transfer.certificate_number, "TC/2025/00001");

    let revoked = storage
        .revoke_certificate_impl(first.id, "Issued in error".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(revoked.status, CertificateStatus::Revoked);
    assert_eq!(revoked.revoked_reason.as_deref(), Some("Issued in error"));

    let err = storage
        .revoke_certificate_impl(first.id, "again".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));

    let mut future = issue(CertificateType::Conduct);
    future.issue_date = Some(date("2025-07-01"));
    assert!(
        storage
            .issue_certificate_impl(future, None, today())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_campaign_lifecycle() {
    let storage = storage().await;
    let campaign = storage
        .create_campaign_impl(
            CreateCampaignRequest {
                title: "Holiday notice".to_string(),
                message: "a".repeat(200),
                audience: Audience::Custom,
                class_id: None,
                custom_numbers: vec!["98450 12345".to_string()],
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert_eq!(campaign.segments, 2);
    assert_eq!(campaign.custom_numbers, vec!["9845012345".to_string()]);

    let edited = storage
        .update_campaign_impl(
            campaign.id,
            UpdateCampaignRequest {
                message: Some("School closed tomorrow".to_string()),
                ..Default::default()
            },
            918,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.segments, 1);

    assert!(storage.mark_campaign_sending_impl(campaign.id).await.unwrap());
    assert!(!storage.mark_campaign_sending_impl(campaign.id).await.unwrap());

    let err = storage
        .update_campaign_impl(campaign.id, UpdateCampaignRequest::default(), 918)
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));
    assert!(storage.delete_campaign_impl(campaign.id).await.is_err());

    let finished = storage
        .finish_campaign_impl(
            campaign.id,
            DeliveryOutcome {
                recipients: 3,
                sent: 2,
                failed: 1,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(finished.status, CampaignStatus::PartiallyFailed);
    assert_eq!(finished.recipient_count, 3);
    assert!(finished.sent_at.is_some());
}

#[tokio::test]
async fn test_health_record_bmi() {
    let storage = storage().await;
    let student_id = seed_student(&storage, "ADM-500", None).await;
    let record = storage
        .create_health_record_impl(
            CreateHealthRecordRequest {
                student_id,
                checkup_date: date("2025-06-01"),
                height_cm: 150.0,
                weight_kg: 45.0,
                blood_group: None,
                allergies: None,
                notes: None,
            },
            None,
            today(),
        )
        .await
        .unwrap();
    assert_eq!(record.bmi, 20.0);

    let updated = storage
        .update_health_record_impl(
            record.id,
            UpdateHealthRecordRequest {
                height_cm: Some(132.0),
                weight_kg: Some(28.5),
                ..Default::default()
            },
            today(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.bmi, 16.4);

    let err = storage
        .update_health_record_impl(
            record.id,
            UpdateHealthRecordRequest {
                checkup_date: Some(date("2025-07-01")),
                ..Default::default()
            },
            today(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ErpError::Validation(_)));
}
