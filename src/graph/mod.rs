//! Defines the resolved network trees and the operations over them.
pub mod dag;
pub mod merge;
pub mod node;
pub mod storage;

// Re-export key types for convenient access
pub use dag::Network;
pub use merge::{merge, MergeError};
pub use node::{CalculationNode, Children, ElementRef, NetworkNode, NodeBase, PointsTo, PresentationNode, TreeNode};
pub use storage::{NodeArena, NodeId};
