use super::{base_node, unexpected, NodeFactory, Referent};
use crate::graph::{Network, NetworkNode};
use crate::linkbase::{Edge, Endpoint, ExtendedLink, LinkKind, ResourceContent};
use crate::resolve::Result;
use crate::store::ReportElementTable;
use crate::updater::attach;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceFactory;

impl NodeFactory for ReferenceFactory {
    fn kind(&self) -> LinkKind { LinkKind::Reference }
    fn is_physical(&self) -> bool { false }

    fn create_node(
        &self,
        link: &ExtendedLink,
        endpoint: &Endpoint,
        referent: Referent<'_>,
        edge: Option<&Edge>,
    ) -> Result<NetworkNode> {
        match referent {
            Referent::Element(_) => {}
            Referent::Resource(r) if matches!(r.content, ResourceContent::Reference { .. }) => {}
            _ => return Err(unexpected(link, endpoint, referent)),
        }
        let (base, _) = base_node(link, endpoint, referent, edge);
        Ok(NetworkNode::Reference(base))
    }

    fn update_report_elements(&self, table: &mut ReportElementTable, network: &mut Network) -> usize {
        attach::attach_references(table, network)
    }
}
