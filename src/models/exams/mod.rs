pub mod entities;
pub mod grading;
pub mod requests;

pub use grading::{ComputedResult, GradeBand, compute_result, grade_for, validate_distribution};
