//! A whole filing's worth of input, loadable from JSON.

use super::assembler::{Assembler, AssemblyError, AssemblyReport};
use super::component::StaticRoleResolver;
use crate::config::{Config, ValidationMode};
use crate::linkbase::ExtendedLink;
use crate::store::{Fact, FactSet, ReportElementTable};
use crate::validation::{CalculationReport, CalculationValidator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read filing: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed filing: {0}")]
    Json(#[from] serde_json::Error),
}

/// Report elements, extended-link fragments, facts and role types, as the
/// markup reader would hand them over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filing {
    #[serde(default)]
    pub report_elements: ReportElementTable,
    #[serde(default)]
    pub links: Vec<ExtendedLink>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    #[serde(default)]
    pub roles: StaticRoleResolver,
}

impl Filing {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Resolves all fragments, rewriting `report_elements` in place.
    pub fn assemble(&mut self, config: &Config) -> Result<AssemblyReport, AssemblyError> {
        Assembler::new(config, &self.roles).assemble(&mut self.report_elements, &self.links)
    }

    pub fn fact_set(&self) -> FactSet {
        self.facts.iter().collect()
    }
}

/// Validates the calculation network of every component, keyed by component id.
pub fn validate_components(
    report: &AssemblyReport,
    table: &ReportElementTable,
    facts: &FactSet,
    mode: ValidationMode,
) -> BTreeMap<String, CalculationReport> {
    report
        .components()
        .filter_map(|c| c.calculation().map(|net| (c.id().to_string(), net)))
        .map(|(id, net)| (id, CalculationValidator::new(net, table, facts).validate(mode)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILING: &str = r#"{
        "report_elements": [
            {"name": "t:Assets", "kind": "concept", "balance": "debit", "period_type": "instant"},
            {"name": "t:Cash", "kind": "concept", "balance": "debit", "period_type": "instant"}
        ],
        "links": [{
            "kind": "calculation",
            "link_role": "http://example.com/role/BS",
            "endpoints": [
                {"label": "a", "locator": {"element": "t:Assets"}},
                {"label": "c", "locator": {"element": "t:Cash"}}
            ],
            "edges": [{"from": "a", "to": "c", "arc_role": "http://www.xbrl.org/2003/arcrole/summation-item", "weight": 1.0}]
        }],
        "facts": [
            {"concept": "t:Assets", "context": "FY24", "value": 50.0},
            {"concept": "t:Cash", "context": "FY24", "value": 50.0}
        ],
        "roles": {"http://example.com/role/BS": {"id": "BS"}}
    }"#;

    #[test]
    fn test_load_assemble_validate() {
        let mut filing = Filing::from_json_str(FILING).unwrap();
        assert_eq!(filing.report_elements.count(), 2);
        let report = filing.assemble(&Config::default()).unwrap();
        let verdicts =
            validate_components(&report, &filing.report_elements, &filing.fact_set(), ValidationMode::Summary);
        assert_eq!(verdicts.len(), 1);
        assert!(verdicts["BS"].is_consistent());
    }

    #[test]
    fn test_malformed_filing() {
        assert!(matches!(Filing::from_json_str("{\"links\": 3}"), Err(LoadError::Json(_))));
        assert!(matches!(Filing::from_path("/nonexistent/filing.json"), Err(LoadError::Io(_))));
    }
}
