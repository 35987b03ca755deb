//! Findings reported by the calculation validator.
//!
//! A finding is an outcome, not a failure: validation never returns `Err`.
use crate::store::{ContextId, QName};
use serde::{Deserialize, Serialize};

/// The specific category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    /// An edge weight disagrees with the balance types of its two concepts.
    BalanceMismatch,
    /// A parent fact differs from the weighted sum of its children's facts.
    AggregationMismatch,
    /// A parent fact has no child fact in the same context to sum.
    MissingChildFacts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub finding_type: FindingType,
    /// The summation concept.
    pub parent: QName,
    /// The contributing concept, for edge-level findings.
    pub child: Option<QName>,
    /// The context, for fact-level findings.
    pub context: Option<ContextId>,
    pub message: String,
}
