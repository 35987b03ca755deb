//! Report elements and the vocabulary attached to them.
//!
//! A report element is anything a locator can point at: concepts carrying
//! facts, and the structural placeholders (abstracts, line items, hypercubes,
//! dimensions, members) that organise them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A prefixed qualified name such as `us-gaap:Assets`.
///
/// Namespace resolution happens upstream; within this crate the prefix and
/// local part together are the stable identity of a report element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QName {
    prefix: String,
    local_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid qualified name '{0}': expected 'prefix:local'")]
pub struct QNameError(pub String);

impl QName {
    pub fn new(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), local_name: local_name.into() }
    }

    pub fn prefix(&self) -> &str { &self.prefix }
    pub fn local_name(&self) -> &str { &self.local_name }
}

impl FromStr for QName {
    type Err = QNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() && !local.contains(':') => {
                Ok(Self::new(prefix, local))
            }
            _ => Err(QNameError(s.to_string())),
        }
    }
}

impl TryFrom<String> for QName {
    type Error = QNameError;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<QName> for String {
    fn from(value: QName) -> Self { value.to_string() }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local_name)
    }
}

/// Debit/credit orientation of a monetary concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceType {
    Debit,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Instant,
    Duration,
}

/// Metadata only concepts carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptInfo {
    /// `None` for non-monetary concepts, which are exempt from balance checks.
    #[serde(default)]
    pub balance: Option<BalanceType>,
    pub period_type: PeriodType,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub nillable: bool,
}

/// A human-readable label attached by a label network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub role: String,
    pub language: String,
    pub text: String,
}

/// An authoritative reference attached by a reference network.
///
/// Parts keep document order, e.g. `[("Publisher", "FASB"), ("Topic", "210")]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub role: String,
    pub parts: Vec<(String, String)>,
}

/// The kind-specific payload of a report element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementBody {
    Concept(ConceptInfo),
    Abstract,
    LineItems,
    Hypercube,
    Dimension,
    Member,
}

/// Fieldless tag of [`ElementBody`]; network nodes carry this next to the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Concept,
    Abstract,
    LineItems,
    Hypercube,
    Dimension,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportElement {
    pub name: QName,
    #[serde(flatten)]
    pub body: ElementBody,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl ReportElement {
    pub fn new(name: QName, body: ElementBody) -> Self {
        Self { name, body, labels: Vec::new(), references: Vec::new() }
    }

    pub fn concept(name: QName, info: ConceptInfo) -> Self {
        Self::new(name, ElementBody::Concept(info))
    }

    pub fn kind(&self) -> ElementKind {
        match self.body {
            ElementBody::Concept(_) => ElementKind::Concept,
            ElementBody::Abstract => ElementKind::Abstract,
            ElementBody::LineItems => ElementKind::LineItems,
            ElementBody::Hypercube => ElementKind::Hypercube,
            ElementBody::Dimension => ElementKind::Dimension,
            ElementBody::Member => ElementKind::Member,
        }
    }

    pub fn concept_info(&self) -> Option<&ConceptInfo> {
        match &self.body {
            ElementBody::Concept(info) => Some(info),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<BalanceType> {
        self.concept_info().and_then(|c| c.balance)
    }

    pub fn has_label_role(&self, role: &str) -> bool {
        self.labels.iter().any(|l| l.role == role)
    }

    /// Adds a label unless an identical one is already attached.
    pub fn add_label(&mut self, label: Label) -> bool {
        if self.labels.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    pub fn add_reference(&mut self, reference: Reference) -> bool {
        if self.references.contains(&reference) {
            return false;
        }
        self.references.push(reference);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("us-gaap:Assets", "us-gaap", "Assets")]
    #[case("dei:EntityRegistrantName", "dei", "EntityRegistrantName")]
    fn test_qname_parse(#[case] input: &str, #[case] prefix: &str, #[case] local: &str) {
        let q: QName = input.parse().unwrap();
        assert_eq!(q.prefix(), prefix);
        assert_eq!(q.local_name(), local);
        assert_eq!(q.to_string(), input);
    }

    #[rstest]
    #[case("Assets")]
    #[case(":Assets")]
    #[case("us-gaap:")]
    #[case("a:b:c")]
    fn test_qname_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<QName>().is_err());
    }

    #[test]
    fn test_element_json_shape() {
        let json = r#"{
            "name": "us-gaap:Assets",
            "kind": "concept",
            "balance": "debit",
            "period_type": "instant"
        }"#;
        let el: ReportElement = serde_json::from_str(json).unwrap();
        assert_eq!(el.kind(), ElementKind::Concept);
        assert_eq!(el.balance(), Some(BalanceType::Debit));
        assert!(el.labels.is_empty());

        let abs: ReportElement =
            serde_json::from_str(r#"{"name": "us-gaap:BalanceSheetAbstract", "kind": "abstract"}"#).unwrap();
        assert_eq!(abs.kind(), ElementKind::Abstract);
        assert_eq!(abs.balance(), None);
    }

    #[test]
    fn test_add_label_deduplicates() {
        let mut el = ReportElement::new(QName::new("p", "X"), ElementBody::Member);
        let label = Label { role: "r".into(), language: "en".into(), text: "X".into() };
        assert!(el.add_label(label.clone()));
        assert!(!el.add_label(label));
        assert_eq!(el.labels.len(), 1);
        assert!(el.has_label_role("r"));
    }
}
