use super::{base_node, unexpected, NodeFactory, Referent};
use crate::graph::NetworkNode;
use crate::linkbase::{Edge, Endpoint, ExtendedLink, LinkKind, ResourceContent};
use crate::resolve::Result;

/// Footnote links connect facts (or elements) to footnote resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootnoteFactory;

impl NodeFactory for FootnoteFactory {
    fn kind(&self) -> LinkKind { LinkKind::Footnote }
    fn is_physical(&self) -> bool { false }

    fn create_node(
        &self,
        link: &ExtendedLink,
        endpoint: &Endpoint,
        referent: Referent<'_>,
        edge: Option<&Edge>,
    ) -> Result<NetworkNode> {
        if let Referent::Resource(r) = referent {
            if !matches!(r.content, ResourceContent::Footnote { .. }) {
                return Err(unexpected(link, endpoint, referent));
            }
        }
        let (base, _) = base_node(link, endpoint, referent, edge);
        Ok(NetworkNode::Footnote(base))
    }
}
