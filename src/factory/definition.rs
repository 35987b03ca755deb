use super::{base_node, unexpected, NodeFactory, Referent};
use crate::graph::NetworkNode;
use crate::linkbase::{Edge, Endpoint, ExtendedLink, LinkKind};
use crate::resolve::Result;

/// Definition links resolve twice: once split by arc role (physical) and
/// once as a single tree (logical).
#[derive(Debug, Clone, Copy)]
pub struct DefinitionFactory {
    physical: bool,
}

impl DefinitionFactory {
    pub fn physical() -> Self { Self { physical: true } }
    pub fn logical() -> Self { Self { physical: false } }
}

impl NodeFactory for DefinitionFactory {
    fn kind(&self) -> LinkKind { LinkKind::Definition }
    fn is_physical(&self) -> bool { self.physical }

    fn create_node(
        &self,
        link: &ExtendedLink,
        endpoint: &Endpoint,
        referent: Referent<'_>,
        edge: Option<&Edge>,
    ) -> Result<NetworkNode> {
        if !matches!(referent, Referent::Element(_)) {
            return Err(unexpected(link, endpoint, referent));
        }
        let (base, _) = base_node(link, endpoint, referent, edge);
        Ok(NetworkNode::Definition(base))
    }
}
