//! The calculation validator that orchestrates the balance and aggregation rules.
use super::error::Finding;
use super::rules::{aggregation, balance};
use crate::config::ValidationMode;
use crate::graph::{Network, TreeNode};
use crate::linkbase::LinkKind;
use crate::store::{FactSet, ReportElementTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The two verdicts for one calculation network, plus what caused them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub link_role: String,
    pub balance_consistent: bool,
    pub aggregation_consistent: bool,
    /// Every offending edge or context in `Localize` mode; at most one per
    /// failed check in `Summary` mode.
    pub findings: Vec<Finding>,
}

impl CalculationReport {
    pub fn is_consistent(&self) -> bool {
        self.balance_consistent && self.aggregation_consistent
    }
}

/// Evaluates one resolved calculation network.
///
/// Balance needs concept metadata from the report-element table, aggregation
/// needs the facts; both only read. Networks of another kind carry no
/// weights and are vacuously consistent.
pub struct CalculationValidator<'a> {
    network: &'a Network,
    table: &'a ReportElementTable,
    facts: &'a FactSet,
}

impl<'a> CalculationValidator<'a> {
    pub fn new(network: &'a Network, table: &'a ReportElementTable, facts: &'a FactSet) -> Self {
        if network.kind() != LinkKind::Calculation {
            warn!(kind = %network.kind(), link_role = network.link_role(), "validating a non-calculation network");
        }
        Self { network, table, facts }
    }

    pub fn is_balance_consistent(&self) -> bool {
        self.balance_findings(true).is_empty()
    }

    pub fn is_aggregation_consistent(&self) -> bool {
        self.aggregation_findings(true).is_empty()
    }

    /// Runs both checks.
    ///
    /// `Summary` stops each check at its first finding; `Localize` walks the
    /// whole tree so every offending location is reported.
    pub fn validate(&self, mode: ValidationMode) -> CalculationReport {
        let first_only = mode == ValidationMode::Summary;
        let mut findings = self.balance_findings(first_only);
        let balance_consistent = findings.is_empty();
        let aggregation = self.aggregation_findings(first_only);
        let aggregation_consistent = aggregation.is_empty();
        findings.extend(aggregation);

        debug!(
            link_role = self.network.link_role(),
            balance_consistent,
            aggregation_consistent,
            findings = findings.len(),
            "validated calculation network"
        );
        CalculationReport {
            link_role: self.network.link_role().to_string(),
            balance_consistent,
            aggregation_consistent,
            findings,
        }
    }

    fn balance_findings(&self, first_only: bool) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (parent, child) in self.network.edges() {
            if let Some(f) = balance::validate_balance(self.network, self.table, parent, child) {
                findings.push(f);
                if first_only {
                    break;
                }
            }
        }
        findings
    }

    /// Bottom-up, so a parent is only reported after its descendants.
    /// Nodes of one concept sharing one child list are checked once.
    fn aggregation_findings(&self, first_only: bool) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut checked = HashSet::new();
        for id in self.network.postorder() {
            let node = self.network.node(id);
            if !checked.insert((node.element_name(), node.children())) {
                continue;
            }
            findings.extend(aggregation::validate_aggregation(self.network, self.facts, id));
            if first_only && !findings.is_empty() {
                findings.truncate(1);
                break;
            }
        }
        findings
    }
}
