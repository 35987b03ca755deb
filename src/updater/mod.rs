//! Report-element updaters: the table rewrites that follow resolution.
//!
//! They run in a fixed order on one `&mut ReportElementTable`: label and
//! reference attachment first, line-items promotion once presentation
//! networks exist, and a final kind sync across every resolved network.
pub mod attach;
pub mod promotion;

use crate::graph::{Network, PointsTo, TreeNode};
use crate::store::ReportElementTable;

/// Brings every element reference in `network` in line with the kind the
/// table currently holds for that name. Returns the number of nodes touched.
pub fn sync_element_kinds(table: &ReportElementTable, network: &mut Network) -> usize {
    let stale: Vec<_> = network
        .arena()
        .iter()
        .filter_map(|(id, node)| match node.points_to() {
            PointsTo::Element(el) => match table.kind_of(&el.name) {
                Some(kind) if kind != el.kind => Some((id, kind)),
                _ => None,
            },
            _ => None,
        })
        .collect();

    for &(id, kind) in &stale {
        if let PointsTo::Element(el) = &mut network.node_mut(id).base_mut().points_to {
            el.kind = kind;
        }
    }
    stale.len()
}
