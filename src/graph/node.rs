//! Defines the `NetworkNode` and the objects a node can point to.

use super::storage::NodeId;
use crate::linkbase::{LinkKind, Resource};
use crate::store::{ElementKind, FactId, QName};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub type Children = SmallVec<[NodeId; 4]>;

/// A report element as seen from a node: its name plus the kind it had when
/// the node was built (or last promoted).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub name: QName,
    pub kind: ElementKind,
}

/// The object a node stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsTo {
    Element(ElementRef),
    Resource(Resource),
    Fact(FactId),
}

impl PointsTo {
    /// Identity, not structure: elements compare by name, resources by
    /// [`Resource::same_identity`], facts by id.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Element(a), Self::Element(b)) => a.name == b.name,
            (Self::Resource(a), Self::Resource(b)) => a.same_identity(b),
            (Self::Fact(a), Self::Fact(b)) => a == b,
            _ => false,
        }
    }

    pub fn element(&self) -> Option<&ElementRef> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }
}

/// Fields every node kind shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase {
    pub points_to: PointsTo,
    /// Sorted by ascending `order` of the child nodes.
    pub children: Children,
    pub arc_role: String,
    pub arc_name: String,
    pub link_role: String,
    pub link_name: String,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationNode {
    #[serde(flatten)]
    pub base: NodeBase,
    pub preferred_label_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationNode {
    #[serde(flatten)]
    pub base: NodeBase,
    /// 0 for roots and unconnected placeholders.
    pub weight: f64,
}

/// Accessors shared by every node flavour.
pub trait TreeNode {
    fn base(&self) -> &NodeBase;
    fn base_mut(&mut self) -> &mut NodeBase;

    fn points_to(&self) -> &PointsTo { &self.base().points_to }
    fn children(&self) -> &[NodeId] { &self.base().children }
    fn arc_role(&self) -> &str { &self.base().arc_role }
    fn arc_name(&self) -> &str { &self.base().arc_name }
    fn link_role(&self) -> &str { &self.base().link_role }
    fn link_name(&self) -> &str { &self.base().link_name }
    fn order(&self) -> f64 { self.base().order }
    fn is_leaf(&self) -> bool { self.base().children.is_empty() }

    fn element(&self) -> Option<&ElementRef> { self.base().points_to.element() }
    fn element_name(&self) -> Option<&QName> { self.element().map(|e| &e.name) }
}

impl TreeNode for NodeBase {
    fn base(&self) -> &NodeBase { self }
    fn base_mut(&mut self) -> &mut NodeBase { self }
}

impl TreeNode for PresentationNode {
    fn base(&self) -> &NodeBase { &self.base }
    fn base_mut(&mut self) -> &mut NodeBase { &mut self.base }
}

impl TreeNode for CalculationNode {
    fn base(&self) -> &NodeBase { &self.base }
    fn base_mut(&mut self) -> &mut NodeBase { &mut self.base }
}

/// A node of any network kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NetworkNode {
    Presentation(PresentationNode),
    Calculation(CalculationNode),
    Definition(NodeBase),
    Label(NodeBase),
    Reference(NodeBase),
    Footnote(NodeBase),
}

impl NetworkNode {
    pub fn kind(&self) -> LinkKind {
        match self {
            Self::Presentation(_) => LinkKind::Presentation,
            Self::Calculation(_) => LinkKind::Calculation,
            Self::Definition(_) => LinkKind::Definition,
            Self::Label(_) => LinkKind::Label,
            Self::Reference(_) => LinkKind::Reference,
            Self::Footnote(_) => LinkKind::Footnote,
        }
    }

    /// Calculation weight; every other kind reports `None`.
    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::Calculation(n) => Some(n.weight),
            _ => None,
        }
    }

    pub fn preferred_label_role(&self) -> Option<&str> {
        match self {
            Self::Presentation(n) => n.preferred_label_role.as_deref(),
            _ => None,
        }
    }

    /// Merge equality: same variant and the same pointed-to object.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.points_to().same_identity(other.points_to())
    }
}

impl TreeNode for NetworkNode {
    fn base(&self) -> &NodeBase {
        match self {
            Self::Presentation(n) => &n.base,
            Self::Calculation(n) => &n.base,
            Self::Definition(b) | Self::Label(b) | Self::Reference(b) | Self::Footnote(b) => b,
        }
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            Self::Presentation(n) => &mut n.base,
            Self::Calculation(n) => &mut n.base,
            Self::Definition(b) | Self::Label(b) | Self::Reference(b) | Self::Footnote(b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(local: &str) -> NodeBase {
        NodeBase {
            points_to: PointsTo::Element(ElementRef { name: QName::new("t", local), kind: ElementKind::Concept }),
            children: Children::new(),
            arc_role: "r".into(),
            arc_name: "a".into(),
            link_role: "l".into(),
            link_name: "n".into(),
            order: 1.0,
        }
    }

    #[test]
    fn test_identity_ignores_arc_metadata() {
        let a = NetworkNode::Definition(base("A"));
        let mut other = base("A");
        other.arc_role = "different".into();
        other.order = 7.0;
        assert!(a.same_identity(&NetworkNode::Definition(other)));
    }

    #[test]
    fn test_identity_requires_same_variant() {
        let a = NetworkNode::Definition(base("A"));
        let b = NetworkNode::Calculation(CalculationNode { base: base("A"), weight: 1.0 });
        assert!(!a.same_identity(&b));
        assert_eq!(b.weight(), Some(1.0));
        assert_eq!(a.weight(), None);
    }
}
