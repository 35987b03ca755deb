//! Report elements, their lookup table, and facts.
pub mod facts;
pub mod registry;
pub mod types;

pub use facts::{ContextId, Fact, FactId, FactSet};
pub use registry::ReportElementTable;
pub use types::{
    BalanceType, ConceptInfo, ElementBody, ElementKind, Label, PeriodType, QName, Reference, ReportElement,
};
