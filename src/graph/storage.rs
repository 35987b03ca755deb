//! storage.rs
//! Flat node arena. Trees are index-linked so a subtree reached through
//! several arcs is stored once and the whole structure moves as one `Vec`.

use super::node::{NetworkNode, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeArena {
    nodes: Vec<NetworkNode>,
}

impl NodeArena {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn push(&mut self, node: NetworkNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline(always)]
    pub fn get(&self, id: NodeId) -> &NetworkNode { &self.nodes[id.index()] }

    #[inline(always)]
    pub fn get_mut(&mut self, id: NodeId) -> &mut NetworkNode { &mut self.nodes[id.index()] }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> { (0..self.nodes.len()).map(NodeId::new) }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NetworkNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId::new(i), n))
    }

    /// Appends `child` under `parent`, keeping siblings sorted by ascending
    /// order. Equal orders keep first-attached first.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        let order = self.get(child).order();
        let pos = {
            let kids = self.get(parent).children();
            if kids.contains(&child) {
                return;
            }
            kids.iter()
                .position(|&k| self.get(k).order() > order)
                .unwrap_or(kids.len())
        };
        self.get_mut(parent).base_mut().children.insert(pos, child);
    }

    /// Deep-copies the subtree under `root` into `dest`.
    ///
    /// `memo` maps already-copied source ids to their copies, so shared
    /// subtrees stay shared in the destination.
    pub fn copy_subtree(&self, root: NodeId, dest: &mut NodeArena, memo: &mut HashMap<NodeId, NodeId>) -> NodeId {
        if let Some(&copied) = memo.get(&root) {
            return copied;
        }
        let mut node = self.get(root).clone();
        let kids: Vec<NodeId> = node.children().to_vec();
        node.base_mut().children.clear();
        let new_id = dest.push(node);
        memo.insert(root, new_id);
        for kid in kids {
            let new_kid = self.copy_subtree(kid, dest, memo);
            dest.get_mut(new_id).base_mut().children.push(new_kid);
        }
        new_id
    }

    /// Depth-first from `roots`, children in order. Shared nodes are visited once.
    pub fn preorder(&self, roots: &[NodeId]) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            stack.extend(self.get(id).children().iter().rev().copied());
        }
        order
    }

    /// The first node reachable from `roots` (in preorder) with the same identity as `target`.
    pub fn find_equal(&self, roots: &[NodeId], target: &NetworkNode) -> Option<NodeId> {
        self.preorder(roots).into_iter().find(|&id| self.get(id).same_identity(target))
    }

    /// Returns a compact arena holding only what `roots` reach, plus the
    /// remapped root ids.
    pub fn extract(&self, roots: &[NodeId]) -> (NodeArena, Vec<NodeId>) {
        let mut dest = NodeArena::new();
        let mut memo = HashMap::new();
        let new_roots = roots.iter().map(|&r| self.copy_subtree(r, &mut dest, &mut memo)).collect();
        (dest, new_roots)
    }
}
