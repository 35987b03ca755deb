//! Calculation-network consistency checks.
pub mod error;
mod rules;
pub mod validator;

pub use error::{Finding, FindingType};
pub use validator::{CalculationReport, CalculationValidator};
