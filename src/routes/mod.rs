pub mod auth;

pub mod users;

pub mod permissions;

pub mod school;

pub mod students;

pub mod fees;

pub mod exams;

pub mod hall_tickets;

pub mod library;

pub mod transport;

pub mod certificates;

pub mod sms;

pub mod health;

pub use auth::configure_auth_routes;
pub use certificates::configure_certificate_routes;
pub use exams::configure_exam_routes;
pub use fees::configure_fee_routes;
pub use hall_tickets::configure_hall_ticket_routes;
pub use health::configure_health_routes;
pub use library::configure_library_routes;
pub use permissions::configure_permission_routes;
pub use school::configure_school_routes;
pub use sms::configure_sms_routes;
pub use students::configure_student_routes;
pub use transport::configure_transport_routes;
pub use users::configure_user_routes;
