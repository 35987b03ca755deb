use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The shared report-element lookup, keyed by qualified name.
///
/// Passes receive it by `&mut` in a fixed order (labels, then promotion) and
/// look entries up by name every time; nothing holds references into it
/// across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ReportElement>", into = "Vec<ReportElement>")]
pub struct ReportElementTable {
    elements: BTreeMap<QName, ReportElement>,
}

impl ReportElementTable {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.elements.len() }
    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Inserts or replaces the entry for `element.name`, returning the previous one.
    pub fn insert(&mut self, element: ReportElement) -> Option<ReportElement> {
        self.elements.insert(element.name.clone(), element)
    }

    pub fn get(&self, name: &QName) -> Option<&ReportElement> {
        self.elements.get(name)
    }

    pub fn get_mut(&mut self, name: &QName) -> Option<&mut ReportElement> {
        self.elements.get_mut(name)
    }

    pub fn contains(&self, name: &QName) -> bool {
        self.elements.contains_key(name)
    }

    pub fn kind_of(&self, name: &QName) -> Option<ElementKind> {
        self.get(name).map(ReportElement::kind)
    }

    /// Rewrites an `Abstract` entry into `LineItems`, keeping name, labels and references.
    ///
    /// Returns `true` only when the entry actually changed kind.
    pub fn promote_to_line_items(&mut self, name: &QName) -> bool {
        match self.elements.get_mut(name) {
            Some(el) if el.body == ElementBody::Abstract => {
                el.body = ElementBody::LineItems;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportElement> {
        self.elements.values()
    }
}

impl From<Vec<ReportElement>> for ReportElementTable {
    fn from(elements: Vec<ReportElement>) -> Self {
        elements.into_iter().collect()
    }
}

impl From<ReportElementTable> for Vec<ReportElement> {
    fn from(table: ReportElementTable) -> Self {
        table.elements.into_values().collect()
    }
}

impl FromIterator<ReportElement> for ReportElementTable {
    fn from_iter<I: IntoIterator<Item = ReportElement>>(iter: I) -> Self {
        let mut table = Self::new();
        for el in iter {
            table.insert(el);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abstract_el(local: &str) -> ReportElement {
        ReportElement::new(QName::new("t", local), ElementBody::Abstract)
    }

    #[test]
    fn test_promotion_keeps_labels() {
        let mut el = abstract_el("StatementAbstract");
        el.add_label(Label { role: "terse".into(), language: "en".into(), text: "Statement".into() });
        let mut table: ReportElementTable = vec![el].into();
        let name = QName::new("t", "StatementAbstract");

        assert!(table.promote_to_line_items(&name));
        let promoted = table.get(&name).unwrap();
        assert_eq!(promoted.kind(), ElementKind::LineItems);
        assert_eq!(promoted.labels.len(), 1);

        // Second promotion is a no-op.
        assert!(!table.promote_to_line_items(&name));
    }

    #[test]
    fn test_promotion_ignores_non_abstracts() {
        let name = QName::new("t", "Cube");
        let mut table: ReportElementTable =
            vec![ReportElement::new(name.clone(), ElementBody::Hypercube)].into();
        assert!(!table.promote_to_line_items(&name));
        assert!(!table.promote_to_line_items(&QName::new("t", "Missing")));
        assert_eq!(table.kind_of(&name), Some(ElementKind::Hypercube));
    }
}
