//! Per-kind node factories.
//!
//! A factory knows how to turn one endpoint (plus the arc that reaches or
//! leaves it) into a typed node, how to wrap roots into a network, and which
//! report-element rewrites its kind of network implies.

mod calculation;
mod definition;
mod footnote;
mod label;
mod presentation;
mod reference;

pub use calculation::CalculationFactory;
pub use definition::DefinitionFactory;
pub use footnote::FootnoteFactory;
pub use label::LabelFactory;
pub use presentation::PresentationFactory;
pub use reference::ReferenceFactory;

use crate::graph::{Children, ElementRef, Network, NetworkNode, NodeArena, NodeBase, NodeId, PointsTo};
use crate::linkbase::{roles, Edge, Endpoint, ExtendedLink, LinkKind, Resource};
use crate::resolve::{ResolveError, Result};
use crate::store::{FactId, ReportElement, ReportElementTable};

/// Order given to roots and to nodes built without an arc.
pub const ROOT_ORDER: f64 = 1.0;

/// The object an endpoint resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Referent<'a> {
    Element(&'a ReportElement),
    Resource(&'a Resource),
    Fact(&'a FactId),
}

impl<'a> Referent<'a> {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Element(_) => "report element",
            Self::Resource(r) => r.kind_name(),
            Self::Fact(_) => "fact",
        }
    }

    pub fn to_points_to(&self) -> PointsTo {
        match self {
            Self::Element(el) => PointsTo::Element(ElementRef { name: el.name.clone(), kind: el.kind() }),
            Self::Resource(r) => PointsTo::Resource((*r).clone()),
            Self::Fact(id) => PointsTo::Fact((*id).clone()),
        }
    }
}

/// Where an endpoint sits relative to the arc it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The arc targets the endpoint.
    Internal,
    /// The arc leaves the endpoint and nothing targets it.
    Root,
    /// No arc touches the endpoint.
    Isolated,
}

pub trait NodeFactory {
    fn kind(&self) -> LinkKind;

    /// Physical networks split by arc role; logical ones stay one tree.
    fn is_physical(&self) -> bool;

    fn create_node(
        &self,
        link: &ExtendedLink,
        endpoint: &Endpoint,
        referent: Referent<'_>,
        edge: Option<&Edge>,
    ) -> Result<NetworkNode>;

    fn create_network(&self, link_role: &str, link_name: &str, arena: &NodeArena, roots: &[NodeId]) -> Result<Network> {
        Network::new(self.kind(), link_role, link_name, self.is_physical(), arena, roots)
    }

    /// Rewrites `table` entries this network implies. Returns how many
    /// entries changed.
    fn update_report_elements(&self, _table: &mut ReportElementTable, _network: &mut Network) -> usize {
        0
    }
}

/// The factory passes a link kind runs through, in order.
pub fn factories_for(kind: LinkKind) -> Vec<Box<dyn NodeFactory>> {
    match kind {
        LinkKind::Presentation => vec![Box::new(PresentationFactory)],
        LinkKind::Calculation => vec![Box::new(CalculationFactory)],
        LinkKind::Definition => vec![
            Box::new(DefinitionFactory::physical()),
            Box::new(DefinitionFactory::logical()),
        ],
        LinkKind::Label => vec![Box::new(LabelFactory)],
        LinkKind::Reference => vec![Box::new(ReferenceFactory)],
        LinkKind::Footnote => vec![Box::new(FootnoteFactory)],
    }
}

/// Builds the shared part of a node and reports where the endpoint sits.
///
/// An arc targeting the endpoint makes it internal and hands it the arc's
/// role and order. An arc leaving it makes it a root with [`ROOT_ORDER`].
/// No arc yields a placeholder with the `unknown` arc role.
pub(crate) fn base_node(
    link: &ExtendedLink,
    endpoint: &Endpoint,
    referent: Referent<'_>,
    edge: Option<&Edge>,
) -> (NodeBase, Position) {
    let (position, arc_role, arc_name, order) = match edge {
        Some(e) if e.to == endpoint.label => (
            Position::Internal,
            e.arc_role.clone(),
            e.arc_name.clone().unwrap_or_else(|| link.kind.default_arc_name()),
            e.order_or_default(),
        ),
        Some(e) if e.from == endpoint.label => (
            Position::Root,
            e.arc_role.clone(),
            e.arc_name.clone().unwrap_or_else(|| link.kind.default_arc_name()),
            ROOT_ORDER,
        ),
        _ => (
            Position::Isolated,
            roles::UNKNOWN_ARC_ROLE.to_string(),
            link.kind.default_arc_name(),
            ROOT_ORDER,
        ),
    };

    let base = NodeBase {
        points_to: referent.to_points_to(),
        children: Children::new(),
        arc_role,
        arc_name,
        link_role: link.link_role.clone(),
        link_name: link.link_name(),
        order,
    };
    (base, position)
}

pub(crate) fn unexpected(link: &ExtendedLink, endpoint: &Endpoint, referent: Referent<'_>) -> ResolveError {
    ResolveError::UnexpectedReferent {
        kind: link.kind,
        link_role: link.link_role.clone(),
        label: endpoint.label.clone(),
        found: referent.describe(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Small builders shared by the factory, resolver and updater tests.
    use crate::linkbase::{Endpoint, Resource, ResourceContent};
    use crate::store::{
        BalanceType, ConceptInfo, ElementBody, Label, PeriodType, QName, ReportElement, ReportElementTable,
    };

    pub fn qn(local: &str) -> QName {
        QName::new("t", local)
    }

    pub fn concept(local: &str, balance: Option<BalanceType>) -> ReportElement {
        ReportElement::concept(
            qn(local),
            ConceptInfo { balance, period_type: PeriodType::Instant, data_type: None, nillable: false },
        )
    }

    pub fn element(local: &str, body: ElementBody) -> ReportElement {
        ReportElement::new(qn(local), body)
    }

    pub fn with_label(mut el: ReportElement, role: &str) -> ReportElement {
        el.add_label(Label { role: role.into(), language: "en".into(), text: el.name.local_name().into() });
        el
    }

    pub fn table(elements: Vec<ReportElement>) -> ReportElementTable {
        elements.into()
    }

    pub fn loc(local: &str) -> Endpoint {
        Endpoint::locator(format!("loc_{}", local), qn(local))
    }

    pub fn label_res(label: &str, role: &str, text: &str) -> Endpoint {
        Endpoint::resource(
            label,
            Resource {
                id: None,
                role: role.into(),
                content: ResourceContent::Label { language: "en".into(), text: text.into() },
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::graph::TreeNode;

    #[test]
    fn test_base_node_positions() {
        let link = ExtendedLink::new(
            LinkKind::Definition,
            "r",
            vec![loc("A"), loc("B"), loc("C")],
            vec![Edge::new("loc_A", "loc_B", roles::DOMAIN_MEMBER).with_order(3.0)],
        )
        .unwrap();
        let t = table(vec![concept("A", None)]);
        let a = t.get(&qn("A")).unwrap();
        let edge = &link.edges[0];

        let (internal, pos) = base_node(&link, &link.endpoints[1], Referent::Element(a), Some(edge));
        assert_eq!(pos, Position::Internal);
        assert_eq!(internal.order(), 3.0);
        assert_eq!(internal.arc_role(), roles::DOMAIN_MEMBER);
        assert_eq!(internal.arc_name(), "link:definitionArc");

        let (root, pos) = base_node(&link, &link.endpoints[0], Referent::Element(a), Some(edge));
        assert_eq!(pos, Position::Root);
        assert_eq!(root.order(), ROOT_ORDER);
        assert_eq!(root.arc_role(), roles::DOMAIN_MEMBER);

        let (lone, pos) = base_node(&link, &link.endpoints[2], Referent::Element(a), None);
        assert_eq!(pos, Position::Isolated);
        assert_eq!(lone.arc_role(), roles::UNKNOWN_ARC_ROLE);
    }

    #[test]
    fn test_definition_runs_two_passes() {
        let passes = factories_for(LinkKind::Definition);
        assert_eq!(passes.len(), 2);
        assert!(passes[0].is_physical());
        assert!(!passes[1].is_physical());
        for kind in LinkKind::ALL {
            assert!(factories_for(kind).iter().all(|f| f.kind() == kind));
        }
    }
}
