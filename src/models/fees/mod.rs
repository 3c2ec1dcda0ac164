pub mod derive;
pub mod entities;
pub mod requests;

pub use derive::{FeeFigures, derive_fee, validate_components};
