//! Abstract -> line-items promotion over presentation networks.

use crate::graph::{Network, NodeId, PointsTo, TreeNode};
use crate::store::{ElementKind, QName, ReportElementTable};
use std::collections::HashMap;
use tracing::debug;

/// Promotes abstracts that sit directly under a hypercube, or that are
/// roots with no hypercube child, to line items.
///
/// Decisions are taken on the kinds before the pass, then the table and
/// every node in `network` pointing at a promoted name are rewritten
/// together. Returns the promoted names; a second run returns none.
pub fn promote_line_items(table: &mut ReportElementTable, network: &mut Network) -> Vec<QName> {
    let kind_of = |net: &Network, id: NodeId| -> Option<ElementKind> {
        net.node(id).element().map(|el| table.kind_of(&el.name).unwrap_or(el.kind))
    };

    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    for (parent, child) in network.edges() {
        parents.entry(child).or_insert(parent);
    }

    let mut promoted: Vec<QName> = Vec::new();
    for id in network.preorder() {
        if kind_of(network, id) != Some(ElementKind::Abstract) {
            continue;
        }
        let fires = match parents.get(&id) {
            Some(&parent) => kind_of(network, parent) == Some(ElementKind::Hypercube),
            None => !network
                .node(id)
                .children()
                .iter()
                .any(|&kid| kind_of(network, kid) == Some(ElementKind::Hypercube)),
        };
        if fires {
            if let Some(name) = network.node(id).element_name() {
                if !promoted.contains(name) {
                    promoted.push(name.clone());
                }
            }
        }
    }

    for name in &promoted {
        table.promote_to_line_items(name);
        let ids: Vec<NodeId> = network.nodes_for_element(name).collect();
        for id in ids {
            if let PointsTo::Element(el) = &mut network.node_mut(id).base_mut().points_to {
                el.kind = ElementKind::LineItems;
            }
        }
        debug!(element = %name, link_role = network.link_role(), "promoted abstract to line items");
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::test_support::*;
    use crate::factory::PresentationFactory;
    use crate::linkbase::{roles, Edge, ExtendedLink, LinkKind};
    use crate::resolve::Resolver;
    use crate::store::ElementBody;
    use rstest::rstest;

    /// Resolves `arcs` as a presentation link, which promotes on the way out.
    fn resolve(table: &mut ReportElementTable, arcs: &[(&str, &str)]) -> Network {
        let mut locals: Vec<&str> = Vec::new();
        for &(from, to) in arcs {
            for local in [from, to] {
                if !locals.contains(&local) {
                    locals.push(local);
                }
            }
        }
        let link = ExtendedLink::new(
            LinkKind::Presentation,
            "r",
            locals.iter().map(|l| loc(l)).collect(),
            arcs.iter()
                .map(|(f, t)| Edge::new(format!("loc_{}", f), format!("loc_{}", t), roles::PARENT_CHILD))
                .collect(),
        )
        .unwrap();
        let mut nets = Resolver::new(table).resolve_with(&link, &PresentationFactory).unwrap();
        assert_eq!(nets.len(), 1);
        nets.remove(0)
    }

    fn kinds() -> ReportElementTable {
        table(vec![
            element("Statement", ElementBody::Abstract),
            element("Table", ElementBody::Hypercube),
            element("Heading", ElementBody::Abstract),
            element("Detail", ElementBody::Abstract),
            concept("Cash", None),
        ])
    }

    const ALL: [&str; 5] = ["Statement", "Table", "Heading", "Detail", "Cash"];

    #[rstest]
    #[case::root_without_hypercube(&[("Statement", "Heading"), ("Heading", "Cash")], vec!["Statement"])]
    #[case::root_with_hypercube(&[("Statement", "Table"), ("Table", "Heading"), ("Heading", "Detail")], vec!["Heading"])]
    #[case::name_under_two_parents(
        &[("Statement", "Table"), ("Table", "Heading"), ("Statement", "Detail"), ("Detail", "Heading")],
        vec!["Heading"]
    )]
    fn test_promotion_rule(#[case] arcs: &[(&str, &str)], #[case] expected: Vec<&str>) {
        let before = kinds();
        let mut t = kinds();
        let net = resolve(&mut t, arcs);

        for local in ALL {
            let name = qn(local);
            let want = if expected.contains(&local) { Some(ElementKind::LineItems) } else { before.kind_of(&name) };
            assert_eq!(t.kind_of(&name), want, "{}", local);
            for id in net.nodes_for_element(&name) {
                assert_eq!(net.node(id).element().map(|el| el.kind), want, "{}", local);
            }
        }

        // Decisions follow the table, so a fresh table sees the same promotions.
        let promoted = promote_line_items(&mut kinds(), &mut net.clone());
        let locals: Vec<&str> = promoted.iter().map(|q| q.local_name()).collect();
        assert_eq!(locals, expected);
    }

    #[test]
    fn test_every_reference_to_a_promoted_name_is_rewritten() {
        // Heading sits under the hypercube and under another abstract.
        let mut t = kinds();
        let net = resolve(&mut t, &[("Statement", "Table"), ("Table", "Heading"), ("Statement", "Detail"), ("Detail", "Heading")]);

        let headings: Vec<NodeId> = net.nodes_for_element(&qn("Heading")).collect();
        assert_eq!(headings.len(), 2);
        assert!(headings.iter().all(|&id| net.node(id).element().unwrap().kind == ElementKind::LineItems));
        let parents: Vec<&str> = net
            .edges()
            .into_iter()
            .filter(|(_, child)| headings.contains(child))
            .map(|(parent, _)| net.node(parent).element_name().unwrap().local_name())
            .collect();
        assert_eq!(parents, vec!["Table", "Detail"]);
        assert_eq!(t.kind_of(&qn("Detail")), Some(ElementKind::Abstract));
    }

    #[test]
    fn test_promotion_is_idempotent() {
        let mut t = kinds();
        let mut net = resolve(&mut t, &[("Statement", "Heading")]);
        assert_eq!(t.kind_of(&qn("Statement")), Some(ElementKind::LineItems));

        let (table_before, net_before) = (t.clone(), net.clone());
        assert!(promote_line_items(&mut t, &mut net).is_empty());
        assert_eq!(t, table_before);
        assert_eq!(net, net_before);
    }
}
