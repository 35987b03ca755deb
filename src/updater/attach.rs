//! Label and reference attachment.

use crate::graph::{Network, PointsTo, TreeNode};
use crate::linkbase::Resource;
use crate::store::{ReportElement, ReportElementTable};
use tracing::trace;

/// Copies every label resource hanging under an element node onto that
/// element's table entry. Returns how many labels were new.
pub fn attach_labels(table: &mut ReportElementTable, network: &Network) -> usize {
    attach_resources(table, network, |el, res| match res.as_label() {
        Some(label) => el.add_label(label),
        None => false,
    })
}

/// Same as [`attach_labels`] for reference resources.
pub fn attach_references(table: &mut ReportElementTable, network: &Network) -> usize {
    attach_resources(table, network, |el, res| match res.as_reference() {
        Some(reference) => el.add_reference(reference),
        None => false,
    })
}

fn attach_resources<F>(table: &mut ReportElementTable, network: &Network, mut add: F) -> usize
where
    F: FnMut(&mut ReportElement, &Resource) -> bool,
{
    let mut added = 0;
    for (parent, child) in network.edges() {
        let (PointsTo::Element(el), PointsTo::Resource(res)) =
            (network.node(parent).points_to(), network.node(child).points_to())
        else {
            continue;
        };
        if let Some(entry) = table.get_mut(&el.name) {
            if add(entry, res) {
                trace!(element = %el.name, role = %res.role, "attached resource");
                added += 1;
            }
        }
    }
    added
}
