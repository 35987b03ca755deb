use super::{base_node, unexpected, NodeFactory, Position, Referent};
use crate::graph::{CalculationNode, NetworkNode};
use crate::linkbase::{Edge, Endpoint, ExtendedLink, LinkKind};
use crate::resolve::{ResolveError, Result};
use crate::store::ElementKind;

/// Weight an internal calculation node gets when its arc omits one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationFactory;

impl NodeFactory for CalculationFactory {
    fn kind(&self) -> LinkKind { LinkKind::Calculation }
    fn is_physical(&self) -> bool { false }

    fn create_node(
        &self,
        link: &ExtendedLink,
        endpoint: &Endpoint,
        referent: Referent<'_>,
        edge: Option<&Edge>,
    ) -> Result<NetworkNode> {
        let Referent::Element(element) = referent else {
            return Err(unexpected(link, endpoint, referent));
        };
        if element.kind() != ElementKind::Concept {
            return Err(ResolveError::NotAConcept {
                link_role: link.link_role.clone(),
                label: endpoint.label.clone(),
                name: element.name.clone(),
            });
        }

        let (base, position) = base_node(link, endpoint, referent, edge);
        let weight = match (position, edge) {
            (Position::Internal, Some(e)) => e.weight.unwrap_or(DEFAULT_WEIGHT),
            _ => 0.0,
        };
        Ok(NetworkNode::Calculation(CalculationNode { base, weight }))
    }
}
