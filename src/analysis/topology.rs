//! Graph-level checks over extended links and networks, backed by petgraph.

use crate::graph::Network;
use crate::linkbase::ExtendedLink;
use petgraph::algo::{kosaraju_scc, tarjan_scc};
use petgraph::graph::DiGraph;
use petgraph::graphmap::DiGraphMap;

/// Returns one endpoint label on a directed cycle, if the arcs form one.
///
/// Resolution builds trees, so a cycle in the arc set is a structural error
/// rather than something to unroll.
pub fn find_cycle(link: &ExtendedLink) -> Option<String> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for ep in &link.endpoints {
        graph.add_node(ep.label.as_str());
    }
    for edge in &link.edges {
        if edge.from == edge.to {
            return Some(edge.from.clone());
        }
        graph.add_edge(edge.from.as_str(), edge.to.as_str(), ());
    }

    tarjan_scc(&graph)
        .into_iter()
        .find(|scc| scc.len() > 1)
        .and_then(|scc| scc.into_iter().min())
        .map(str::to_string)
}

/// Orders networks so that one whose roots all appear inside another comes
/// after it.
///
/// This is a prerequisite ordering, not a strict topological sort: networks
/// that contain each other's roots end up in one strongly connected
/// component and keep their input order.
pub fn merge_order(networks: &[Network]) -> Vec<usize> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(networks.len(), 0);
    let idx: Vec<_> = (0..networks.len()).map(|i| graph.add_node(i)).collect();

    for (i, host) in networks.iter().enumerate() {
        for (j, guest) in networks.iter().enumerate() {
            if i == j {
                continue;
            }
            let contained = guest
                .roots()
                .iter()
                .all(|&r| host.find_equal(guest.node(r)).is_some());
            if contained {
                graph.add_edge(idx[i], idx[j], ());
            }
        }
    }

    // kosaraju_scc yields components in reverse topological order.
    let mut components = kosaraju_scc(&graph);
    components.reverse();
    components
        .into_iter()
        .flat_map(|scc| {
            let mut members: Vec<usize> = scc.into_iter().map(|n| graph[n]).collect();
            members.sort_unstable();
            members
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkbase::{roles, Edge, Endpoint, LinkKind};
    use crate::store::QName;

    fn link(edges: &[(&str, &str)]) -> ExtendedLink {
        let mut labels: Vec<&str> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        labels.sort_unstable();
        labels.dedup();
        ExtendedLink::new(
            LinkKind::Definition,
            "r",
            labels.iter().map(|l| Endpoint::locator(*l, QName::new("t", *l))).collect(),
            edges.iter().map(|&(a, b)| Edge::new(a, b, roles::DOMAIN_MEMBER)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_acyclic_link_has_no_cycle() {
        // Diamond: shared child is fine.
        assert_eq!(find_cycle(&link(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")])), None);
    }

    #[test]
    fn test_cycle_is_reported() {
        let found = find_cycle(&link(&[("A", "B"), ("B", "C"), ("C", "B")]));
        assert_eq!(found.as_deref(), Some("B"));
    }

    #[test]
    fn test_self_loop_is_reported() {
        assert_eq!(find_cycle(&link(&[("A", "A")])).as_deref(), Some("A"));
    }
}
