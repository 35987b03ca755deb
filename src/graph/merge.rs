//! Combines several networks over the same node identities into one tree.

use super::dag::Network;
use super::node::TreeNode;
use super::storage::{NodeArena, NodeId};
use crate::analysis::topology;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Nothing to merge")]
    Empty,
    #[error("Cannot merge a {found} network into a {expected} network")]
    KindMismatch { expected: String, found: String },
}

/// Merges `networks` into one aggregate network.
///
/// Networks are visited in prerequisite order (see
/// [`topology::merge_order`]). Each root of the visited network is looked up
/// in the aggregate by identity; a match receives the root's children, a miss
/// becomes a new aggregate root. A child that the host already holds is not
/// copied again; its own children are spliced into the existing node. The
/// result carries the link metadata of the first network visited.
pub fn merge(networks: Vec<Network>) -> Result<Network, MergeError> {
    let first_kind = networks.first().ok_or(MergeError::Empty)?.kind();
    if let Some(other) = networks.iter().find(|n| n.kind() != first_kind) {
        return Err(MergeError::KindMismatch {
            expected: first_kind.to_string(),
            found: other.kind().to_string(),
        });
    }

    let order = topology::merge_order(&networks);
    let mut slots: Vec<Option<Network>> = networks.into_iter().map(Some).collect();
    let mut visit = order.into_iter().filter_map(|i| slots[i].take());

    let seed = visit.next().ok_or(MergeError::Empty)?;
    let kind = seed.kind();
    let is_physical = seed.is_physical();
    let link_role = seed.link_role().to_string();
    let link_name = seed.link_name().to_string();
    let (mut arena, mut roots) = seed.into_parts();

    for net in visit {
        debug!(link_role = net.link_role(), roots = net.roots().len(), "merging network into aggregate");
        let mut memo = HashMap::new();
        for &root in net.roots() {
            match arena.find_equal(&roots, net.node(root)) {
                Some(host) => splice(net.arena(), root, &mut arena, host, &mut memo),
                None => {
                    let copied = net.arena().copy_subtree(root, &mut arena, &mut memo);
                    roots.push(copied);
                }
            }
        }
    }

    // Spliced roots leave orphan copies behind; keep only what is reachable.
    let (arena, roots) = arena.extract(&roots);
    Ok(Network::from_parts(kind, link_role, link_name, is_physical, arena, roots))
}

/// Moves the children of `guest` (in `src`) under `host` (in `dest`).
fn splice(src: &NodeArena, guest: NodeId, dest: &mut NodeArena, host: NodeId, memo: &mut HashMap<NodeId, NodeId>) {
    for &kid in src.get(guest).children() {
        let incoming = src.get(kid);
        let existing = dest.get(host).children().iter().copied().find(|&c| dest.get(c).same_identity(incoming));
        match existing {
            Some(twin) => {
                memo.entry(kid).or_insert(twin);
                splice(src, kid, dest, twin, memo);
            }
            None => {
                let copied = src.copy_subtree(kid, dest, memo);
                dest.attach(host, copied);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{Children, ElementRef, NetworkNode, NodeBase, PointsTo};
    use crate::graph::storage::NodeArena;
    use crate::linkbase::LinkKind;
    use crate::store::{ElementKind, QName};
    use rstest::rstest;

    fn pres(local: &str, order: f64) -> NetworkNode {
        NetworkNode::Presentation(crate::graph::node::PresentationNode {
            base: NodeBase {
                points_to: PointsTo::Element(ElementRef { name: QName::new("t", local), kind: ElementKind::Concept }),
                children: Children::new(),
                arc_role: "pc".into(),
                arc_name: "a".into(),
                link_role: "l".into(),
                link_name: "n".into(),
                order,
            },
            preferred_label_role: None,
        })
    }

    /// Builds a single-rooted chain network `names[0] -> names[1] -> ...`.
    fn chain(names: &[&str]) -> Network {
        let mut arena = NodeArena::new();
        let ids: Vec<_> = names.iter().map(|n| arena.push(pres(n, 1.0))).collect();
        for pair in ids.windows(2) {
            arena.attach(pair[0], pair[1]);
        }
        Network::new(LinkKind::Presentation, "l", "n", false, &arena, &ids[..1]).unwrap()
    }

    fn shape(net: &Network) -> Vec<(String, usize)> {
        net.preorder()
            .into_iter()
            .map(|id| {
                let n = net.node(id);
                (n.element_name().unwrap().local_name().to_string(), n.children().len())
            })
            .collect()
    }

    #[test]
    fn test_merge_splices_matching_root() {
        let x = chain(&["R1", "C1"]);
        let y = chain(&["C1", "C2"]);

        // Input order must not matter: Y's root lives inside X.
        for input in [vec![x.clone(), y.clone()], vec![y, x]] {
            let merged = merge(input).unwrap();
            assert_eq!(merged.roots().len(), 1);
            assert_eq!(
                shape(&merged),
                vec![("R1".to_string(), 1), ("C1".to_string(), 1), ("C2".to_string(), 0)]
            );
        }
    }

    /// Builds a network from `(parent, child)` pairs; the first parent is the root.
    fn tree(arcs: &[(&str, &str)]) -> Network {
        let mut arena = NodeArena::new();
        let mut ids: HashMap<&str, NodeId> = HashMap::new();
        for &(parent, child) in arcs {
            let p = *ids.entry(parent).or_insert_with(|| arena.push(pres(parent, 1.0)));
            let c = *ids.entry(child).or_insert_with(|| arena.push(pres(child, 1.0)));
            arena.attach(p, c);
        }
        Network::new(LinkKind::Presentation, "l", "n", false, &arena, &[ids[arcs[0].0]]).unwrap()
    }

    #[rstest]
    #[case::shared_leaf(
        tree(&[("R", "C1")]),
        tree(&[("R", "C1"), ("R", "C2")]),
        vec![("R", 2), ("C1", 0), ("C2", 0)]
    )]
    #[case::shared_inner_node(
        tree(&[("R", "A"), ("A", "X")]),
        tree(&[("R", "A"), ("A", "Y")]),
        vec![("R", 1), ("A", 2), ("X", 0), ("Y", 0)]
    )]
    fn test_repeated_arc_is_spliced_once(#[case] x: Network, #[case] y: Network, #[case] expected: Vec<(&str, usize)>) {
        let mut expected: Vec<(String, usize)> = expected.into_iter().map(|(n, k)| (n.to_string(), k)).collect();
        expected.sort();
        // Equal sibling orders, so sibling position depends on visit order.
        for input in [vec![x.clone(), y.clone()], vec![y.clone(), x.clone()]] {
            let merged = merge(input).unwrap();
            assert_eq!(merged.roots().len(), 1);
            let mut got = shape(&merged);
            got.sort();
            assert_eq!(got, expected);
            assert_eq!(merged.node_count(), expected.len());
        }
    }

    #[test]
    fn test_unrelated_networks_become_separate_roots() {
        let merged = merge(vec![chain(&["A", "B"]), chain(&["C", "D"])]).unwrap();
        assert_eq!(merged.roots().len(), 2);
        assert_eq!(merged.node_count(), 4);
    }

    #[test]
    fn test_empty_and_mismatched_inputs() {
        assert_eq!(merge(vec![]).unwrap_err(), MergeError::Empty);

        let mut arena = NodeArena::new();
        let root = arena.push(NetworkNode::Definition(match pres("A", 1.0) {
            NetworkNode::Presentation(p) => p.base,
            _ => unreachable!(),
        }));
        let def = Network::new(LinkKind::Definition, "l", "n", false, &arena, &[root]).unwrap();
        assert!(matches!(merge(vec![chain(&["A"]), def]), Err(MergeError::KindMismatch { .. })));
    }
}
