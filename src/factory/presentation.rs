use super::{base_node, unexpected, NodeFactory, Position, Referent};
use crate::graph::{Network, NetworkNode, PresentationNode};
use crate::linkbase::{Edge, Endpoint, ExtendedLink, LinkKind};
use crate::resolve::{ResolveError, Result};
use crate::store::ReportElementTable;
use crate::updater::promotion;

/// Builds presentation nodes and runs the line-items promotion afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationFactory;

impl NodeFactory for PresentationFactory {
    fn kind(&self) -> LinkKind { LinkKind::Presentation }
    fn is_physical(&self) -> bool { false }

    /// Fails fast when the arc prefers a label role the element lacks; the
    /// label networks have already run by the time presentation resolves.
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
        let (base, position) = base_node(link, endpoint, referent, edge);

        let preferred_label_role = match (position, edge) {
            (Position::Internal, Some(e)) => match &e.preferred_label {
                Some(role) if !element.has_label_role(role) => {
                    return Err(ResolveError::MissingPreferredLabel {
                        link_role: link.link_role.clone(),
                        from: e.from.clone(),
                        to: e.to.clone(),
                        name: element.name.clone(),
                        role: role.clone(),
                    });
                }
                other => other.clone(),
            },
            _ => None,
        };

        Ok(NetworkNode::Presentation(PresentationNode { base, preferred_label_role }))
    }

    fn update_report_elements(&self, table: &mut ReportElementTable, network: &mut Network) -> usize {
        promotion::promote_line_items(table, network).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::test_support::*;
    use crate::linkbase::roles;
    use crate::store::ElementBody;

    fn link() -> ExtendedLink {
        ExtendedLink::new(
            LinkKind::Presentation,
            "http://example.com/role/BS",
            vec![loc("Statement"), loc("Assets")],
            vec![Edge::new("loc_Statement", "loc_Assets", roles::PARENT_CHILD)
                .with_order(2.0)
                .with_preferred_label(roles::TOTAL_LABEL)],
        )
        .unwrap()
    }

    #[test]
    fn test_preferred_label_is_resolved() {
        let link = link();
        let t = table(vec![with_label(concept("Assets", None), roles::TOTAL_LABEL)]);
        let node = PresentationFactory
            .create_node(&link, &link.endpoints[1], Referent::Element(t.get(&qn("Assets")).unwrap()), Some(&link.edges[0]))
            .unwrap();
        assert_eq!(node.preferred_label_role(), Some(roles::TOTAL_LABEL));
    }

    #[test]
    fn test_missing_preferred_label_fails() {
        let link = link();
        let t = table(vec![with_label(concept("Assets", None), roles::STANDARD_LABEL)]);
        let err = PresentationFactory
            .create_node(&link, &link.endpoints[1], Referent::Element(t.get(&qn("Assets")).unwrap()), Some(&link.edges[0]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingPreferredLabel { ref role, .. } if role == roles::TOTAL_LABEL));
    }

    #[test]
    fn test_root_ignores_preferred_label() {
        let link = link();
        let t = table(vec![element("Statement", ElementBody::Abstract)]);
        let node = PresentationFactory
            .create_node(&link, &link.endpoints[0], Referent::Element(t.get(&qn("Statement")).unwrap()), Some(&link.edges[0]))
            .unwrap();
        assert_eq!(node.preferred_label_role(), None);
    }
}
