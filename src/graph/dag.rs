//! dag.rs
//! A resolved network: an ordered set of roots over a node arena, with the
//! traversal helpers the updaters, validators and merge need.

use super::node::{NetworkNode, TreeNode};
use super::storage::{NodeArena, NodeId};
use crate::linkbase::LinkKind;
use crate::resolve::{ResolveError, Result};
use crate::store::QName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    kind: LinkKind,
    link_role: String,
    link_name: String,
    is_physical: bool,
    roots: Vec<NodeId>,
    nodes: NodeArena,
}

impl Network {
    /// Builds a network from the part of `arena` reachable from `roots`.
    ///
    /// Fails on an empty root set: a network always has at least one root.
    pub fn new(
        kind: LinkKind,
        link_role: impl Into<String>,
        link_name: impl Into<String>,
        is_physical: bool,
        arena: &NodeArena,
        roots: &[NodeId],
    ) -> Result<Self> {
        let link_role = link_role.into();
        if roots.is_empty() {
            return Err(ResolveError::EmptyNetwork { kind, link_role });
        }
        let (nodes, roots) = arena.extract(roots);
        Ok(Self { kind, link_role, link_name: link_name.into(), is_physical, roots, nodes })
    }

    pub fn kind(&self) -> LinkKind { self.kind }
    pub fn link_role(&self) -> &str { &self.link_role }
    pub fn link_name(&self) -> &str { &self.link_name }
    pub fn is_physical(&self) -> bool { self.is_physical }
    pub fn roots(&self) -> &[NodeId] { &self.roots }
    pub fn node(&self, id: NodeId) -> &NetworkNode { self.nodes.get(id) }
    pub fn node_count(&self) -> usize { self.nodes.count() }
    pub fn arena(&self) -> &NodeArena { &self.nodes }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NetworkNode { self.nodes.get_mut(id) }

    pub(crate) fn into_parts(self) -> (NodeArena, Vec<NodeId>) { (self.nodes, self.roots) }

    pub(crate) fn from_parts(
        kind: LinkKind,
        link_role: String,
        link_name: String,
        is_physical: bool,
        nodes: NodeArena,
        roots: Vec<NodeId>,
    ) -> Self {
        Self { kind, link_role, link_name, is_physical, roots, nodes }
    }

    /// Depth-first, roots in order, children in order. Shared nodes are
    /// visited once.
    pub fn preorder(&self) -> Vec<NodeId> {
        self.nodes.preorder(&self.roots)
    }

    /// Children before parents; what bottom-up checks iterate.
    pub fn postorder(&self) -> Vec<NodeId> {
        fn visit(net: &Network, id: NodeId, visited: &mut HashSet<NodeId>, out: &mut Vec<NodeId>) {
            if !visited.insert(id) {
                return;
            }
            for &kid in net.node(id).children() {
                visit(net, kid, visited, out);
            }
            out.push(id);
        }

        let mut out = Vec::with_capacity(self.nodes.count());
        let mut visited = HashSet::with_capacity(self.nodes.count());
        for &root in &self.roots {
            visit(self, root, &mut visited, &mut out);
        }
        out
    }

    /// Every (parent, child) pair, in preorder of the parent.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.preorder()
            .into_iter()
            .flat_map(|p| self.node(p).children().iter().map(move |&c| (p, c)))
            .collect()
    }

    /// The first node (in preorder) listing `id` among its children.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.preorder().into_iter().find(|&p| self.node(p).children().contains(&id))
    }

    /// All nodes pointing at the element `name`.
    pub fn nodes_for_element<'a>(&'a self, name: &'a QName) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes.iter().filter(move |(_, n)| n.element_name() == Some(name)).map(|(id, _)| id)
    }

    /// The first node, in preorder, with the same identity as `target`.
    pub fn find_equal(&self, target: &NetworkNode) -> Option<NodeId> {
        self.nodes.find_equal(&self.roots, target)
    }

    /// Distinct arc roles of the roots, in root order.
    pub fn root_arc_roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = Vec::new();
        for &r in &self.roots {
            let role = self.node(r).arc_role();
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        roles
    }

    /// Qualified names of the root elements, in order.
    pub fn root_names(&self) -> Vec<&QName> {
        self.roots.iter().filter_map(|&r| self.node(r).element_name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{Children, ElementRef, NodeBase, PointsTo};
    use crate::store::ElementKind;

    fn def(local: &str, order: f64) -> NetworkNode {
        NetworkNode::Definition(NodeBase {
            points_to: PointsTo::Element(ElementRef { name: QName::new("t", local), kind: ElementKind::Member }),
            children: Children::new(),
            arc_role: "r".into(),
            arc_name: "a".into(),
            link_role: "l".into(),
            link_name: "n".into(),
            order,
        })
    }

    #[test]
    fn test_empty_roots_rejected() {
        let arena = NodeArena::new();
        let err = Network::new(LinkKind::Definition, "l", "n", false, &arena, &[]).unwrap_err();
        assert!(matches!(err, ResolveError::EmptyNetwork { .. }));
    }

    #[test]
    fn test_attach_sorts_children_and_keeps_ties_stable() {
        let mut arena = NodeArena::new();
        let root = arena.push(def("Root", 1.0));
        let c = arena.push(def("C", 3.0));
        let a = arena.push(def("A", 1.0));
        let b1 = arena.push(def("B1", 2.0));
        let b2 = arena.push(def("B2", 2.0));
        for kid in [c, a, b1, b2] {
            arena.attach(root, kid);
        }
        assert_eq!(arena.get(root).children(), &[a, b1, b2, c]);
    }

    #[test]
    fn test_extract_drops_unreachable_and_traversals_agree() {
        let mut arena = NodeArena::new();
        let root = arena.push(def("Root", 1.0));
        let _orphan = arena.push(def("Orphan", 1.0));
        let a = arena.push(def("A", 1.0));
        let b = arena.push(def("B", 2.0));
        arena.attach(root, a);
        arena.attach(a, b);

        let net = Network::new(LinkKind::Definition, "l", "n", false, &arena, &[root]).unwrap();
        assert_eq!(net.node_count(), 3);

        let names = |ids: Vec<NodeId>| -> Vec<String> {
            ids.into_iter().map(|i| net.node(i).element_name().unwrap().local_name().to_string()).collect()
        };
        assert_eq!(names(net.preorder()), vec!["Root", "A", "B"]);
        assert_eq!(names(net.postorder()), vec!["B", "A", "Root"]);

        let b_id = net.preorder()[2];
        let a_id = net.parent_of(b_id).unwrap();
        assert_eq!(net.node(a_id).element_name().unwrap().local_name(), "A");
        assert_eq!(net.parent_of(net.roots()[0]), None);
        assert_eq!(net.edges().len(), 2);
    }
}
