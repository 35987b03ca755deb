//! Extended-link fragments as handed over by the markup reader.

use super::edge::Edge;
use super::endpoint::Endpoint;
use super::roles;
use crate::resolve::{ResolveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Presentation,
    Calculation,
    Definition,
    Label,
    Reference,
    Footnote,
}

impl LinkKind {
    pub const ALL: [LinkKind; 6] = [
        Self::Presentation,
        Self::Calculation,
        Self::Definition,
        Self::Label,
        Self::Reference,
        Self::Footnote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::Calculation => "calculation",
            Self::Definition => "definition",
            Self::Label => "label",
            Self::Reference => "reference",
            Self::Footnote => "footnote",
        }
    }

    pub fn default_link_name(&self) -> String {
        format!("link:{}Link", self.as_str())
    }

    pub fn default_arc_name(&self) -> String {
        format!("link:{}Arc", self.as_str())
    }

    /// Label, reference and footnote networks live in the default bucket
    /// rather than under a component.
    pub fn is_default_bucket_kind(&self) -> bool {
        matches!(self, Self::Label | Self::Reference | Self::Footnote)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One extended link: endpoints plus the arcs between them, under one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedLink {
    pub kind: LinkKind,
    pub link_role: String,
    #[serde(default)]
    pub link_name: Option<String>,
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl ExtendedLink {
    /// Builds a fragment, rejecting duplicate arcs and dangling endpoint labels.
    pub fn new(
        kind: LinkKind,
        link_role: impl Into<String>,
        endpoints: Vec<Endpoint>,
        edges: Vec<Edge>,
    ) -> Result<Self> {
        let link = Self { kind, link_role: link_role.into(), link_name: None, endpoints, edges };
        link.check_structure()?;
        Ok(link)
    }

    pub fn with_link_name(mut self, name: impl Into<String>) -> Self {
        self.link_name = Some(name.into());
        self
    }

    pub fn link_name(&self) -> String {
        self.link_name.clone().unwrap_or_else(|| self.kind.default_link_name())
    }

    pub fn is_default_role(&self) -> bool {
        self.link_role == roles::DEFAULT_LINK_ROLE
    }

    pub fn endpoint(&self, label: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.label == label)
    }

    /// The first arc pointing at `label`.
    pub fn incoming(&self, label: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to == label)
    }

    /// The first arc leaving `label`.
    pub fn outgoing(&self, label: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == label)
    }

    /// The arc `from -> to` with the given role, if the link has one.
    pub fn find_edge(&self, from: &str, to: &str, arc_role: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(from, to) && e.arc_role == arc_role)
    }

    /// Verifies the invariants every later pass relies on: endpoint labels
    /// are unique, every arc names known endpoints, and no (from, to) pair
    /// appears twice.
    pub fn check_structure(&self) -> Result<()> {
        let mut labels = HashSet::with_capacity(self.endpoints.len());
        for ep in &self.endpoints {
            if !labels.insert(ep.label.as_str()) {
                return Err(ResolveError::DuplicateEndpointLabel {
                    kind: self.kind,
                    link_role: self.link_role.clone(),
                    label: ep.label.clone(),
                });
            }
        }

        let mut seen: HashMap<(&str, &str), usize> = HashMap::with_capacity(self.edges.len());
        for (i, edge) in self.edges.iter().enumerate() {
            for label in [&edge.from, &edge.to] {
                if !labels.contains(label.as_str()) {
                    return Err(ResolveError::UnknownEndpoint {
                        kind: self.kind,
                        link_role: self.link_role.clone(),
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        label: label.clone(),
                    });
                }
            }
            if seen.insert((edge.from.as_str(), edge.to.as_str()), i).is_some() {
                return Err(ResolveError::DuplicateArc {
                    kind: self.kind,
                    link_role: self.link_role.clone(),
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QName;

    fn loc(label: &str) -> Endpoint {
        Endpoint::locator(label, QName::new("t", label))
    }

    #[test]
    fn test_duplicate_arc_is_rejected() {
        let err = ExtendedLink::new(
            LinkKind::Presentation,
            "http://example.com/role/R",
            vec![loc("A"), loc("B")],
            vec![
                Edge::new("A", "B", roles::PARENT_CHILD).with_order(1.0),
                Edge::new("A", "B", roles::PARENT_CHILD).with_order(2.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::DuplicateArc { ref from, ref to, .. } if from == "A" && to == "B"));
    }

    #[test]
    fn test_dangling_arc_is_rejected() {
        let err = ExtendedLink::new(
            LinkKind::Calculation,
            "r",
            vec![loc("A")],
            vec![Edge::new("A", "Ghost", roles::SUMMATION_ITEM)],
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownEndpoint { ref label, .. } if label == "Ghost"));
    }

    #[test]
    fn test_duplicate_endpoint_label_is_rejected() {
        let err = ExtendedLink::new(LinkKind::Definition, "r", vec![loc("A"), loc("A")], vec![]).unwrap_err();
        assert!(matches!(err, ResolveError::DuplicateEndpointLabel { .. }));
    }

    #[test]
    fn test_reverse_direction_is_not_a_duplicate() {
        // A -> B and B -> A are distinct pairs; the cycle is caught later.
        let link = ExtendedLink::new(
            LinkKind::Definition,
            "r",
            vec![loc("A"), loc("B")],
            vec![Edge::new("A", "B", roles::DOMAIN_MEMBER), Edge::new("B", "A", roles::DOMAIN_MEMBER)],
        );
        assert!(link.is_ok());
    }

    #[test]
    fn test_default_names() {
        let link = ExtendedLink::new(LinkKind::Label, roles::DEFAULT_LINK_ROLE, vec![], vec![]).unwrap();
        assert_eq!(link.link_name(), "link:labelLink");
        assert_eq!(LinkKind::Calculation.default_arc_name(), "link:calculationArc");
        assert!(link.is_default_role());
    }
}
