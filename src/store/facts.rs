//! Facts as the calculation validator sees them.
//!
//! Context characteristics (period, entity, unit, dimensions) are built
//! upstream; here a context is an opaque key and two facts share a context
//! only when their keys are identical.

use super::types::QName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(pub String);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Identifier a footnote locator uses to point at a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(default)]
    pub id: Option<FactId>,
    pub concept: QName,
    pub context: ContextId,
    pub value: f64,
}

/// Facts indexed by concept, each concept's facts keyed by context.
///
/// Duplicate (concept, context) pairs keep the first reported value.
#[derive(Debug, Clone, Default)]
pub struct FactSet {
    by_concept: HashMap<QName, Vec<(ContextId, f64)>>,
}

impl FactSet {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, fact: &Fact) {
        let entries = self.by_concept.entry(fact.concept.clone()).or_default();
        if !entries.iter().any(|(ctx, _)| ctx == &fact.context) {
            entries.push((fact.context.clone(), fact.value));
        }
    }

    /// All (context, value) pairs reported for `concept`, in first-seen order.
    pub fn facts_for(&self, concept: &QName) -> &[(ContextId, f64)] {
        self.by_concept.get(concept).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn value(&self, concept: &QName, context: &ContextId) -> Option<f64> {
        self.facts_for(concept).iter().find(|(ctx, _)| ctx == context).map(|&(_, v)| v)
    }

    pub fn is_empty(&self) -> bool { self.by_concept.is_empty() }
}

impl<'a> FromIterator<&'a Fact> for FactSet {
    fn from_iter<I: IntoIterator<Item = &'a Fact>>(iter: I) -> Self {
        let mut set = Self::new();
        for fact in iter {
            set.insert(fact);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(concept: &str, ctx: &str, value: f64) -> Fact {
        Fact { id: None, concept: concept.parse().unwrap(), context: ContextId(ctx.into()), value }
    }

    #[test]
    fn test_first_duplicate_wins() {
        let facts = vec![fact("t:A", "c1", 1.0), fact("t:A", "c1", 2.0), fact("t:A", "c2", 3.0)];
        let set: FactSet = facts.iter().collect();
        let a: QName = "t:A".parse().unwrap();
        assert_eq!(set.value(&a, &ContextId("c1".into())), Some(1.0));
        assert_eq!(set.facts_for(&a).len(), 2);
        assert!(set.facts_for(&"t:B".parse().unwrap()).is_empty());
    }
}
