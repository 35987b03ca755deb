use super::{base_node, unexpected, NodeFactory, Referent};
use crate::graph::{Network, NetworkNode};
use crate::linkbase::{Edge, Endpoint, ExtendedLink, LinkKind, ResourceContent};
use crate::resolve::Result;
use crate::store::ReportElementTable;
use crate::updater::attach;

/// Label links: element locators at the roots, label resources below them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFactory;

impl NodeFactory for LabelFactory {
    fn kind(&self) -> LinkKind { LinkKind::Label }
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
            Referent::Resource(r) if matches!(r.content, ResourceContent::Label { .. }) => {}
            _ => return Err(unexpected(link, endpoint, referent)),
        }
        let (base, _) = base_node(link, endpoint, referent, edge);
        Ok(NetworkNode::Label(base))
    }

    fn update_report_elements(&self, table: &mut ReportElementTable, network: &mut Network) -> usize {
        attach::attach_labels(table, network)
    }
}
