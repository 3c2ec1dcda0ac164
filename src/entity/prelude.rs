//! 预导入模块，方便使用

pub use super::book_loans::{ActiveModel as BookLoanActiveModel, Entity as BookLoans};
pub use super::books::{ActiveModel as BookActiveModel, Entity as Books};
pub use super::certificates::{ActiveModel as CertificateActiveModel, Entity as Certificates};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes};
pub use super::exam_results::{ActiveModel as ExamResultActiveModel, Entity as ExamResults};
pub use super::exam_schedules::{ActiveModel as ExamScheduleActiveModel, Entity as ExamSchedules};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams};
pub use super::fee_payments::{ActiveModel as FeePaymentActiveModel, Entity as FeePayments};
pub use super::fee_structures::{
    ActiveModel as FeeStructureActiveModel, Entity as FeeStructures,
};
pub use super::fees::{ActiveModel as FeeActiveModel, Entity as Fees};
pub use super::hall_tickets::{ActiveModel as HallTicketActiveModel, Entity as HallTickets};
pub use super::health_records::{
    ActiveModel as HealthRecordActiveModel, Entity as HealthRecords,
};
pub use super::mark_distributions::{
    ActiveModel as MarkDistributionActiveModel, Entity as MarkDistributions,
};
pub use super::sms_campaigns::{ActiveModel as SmsCampaignActiveModel, Entity as SmsCampaigns};
pub use super::students::{ActiveModel as StudentActiveModel, Entity as Students};
pub use super::subjects::{ActiveModel as SubjectActiveModel, Entity as Subjects};
pub use super::transport_fees::{
    ActiveModel as TransportFeeActiveModel, Entity as TransportFees,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users};
pub use super::vehicles::{ActiveModel as VehicleActiveModel, Entity as Vehicles};
