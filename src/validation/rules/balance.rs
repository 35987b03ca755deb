//! Validation rule for balance-type consistency of calculation weights.

use crate::graph::{Network, NodeId, TreeNode};
use crate::store::ReportElementTable;
use crate::validation::error::{Finding, FindingType};

/// "Debits sum into debits": checks one parent -> child edge.
///
/// When both concepts declare a balance type the child's weight must be `+1`
/// if the types match and `-1` if they differ. Concepts without a balance
/// (non-monetary) are exempt, as are nodes that carry no weight.
pub(crate) fn validate_balance(
    network: &Network,
    table: &ReportElementTable,
    parent: NodeId,
    child: NodeId,
) -> Option<Finding> {
    let parent_name = network.node(parent).element_name()?;
    let child_node = network.node(child);
    let child_name = child_node.element_name()?;
    let weight = child_node.weight()?;

    let parent_balance = table.get(parent_name)?.balance()?;
    let child_balance = table.get(child_name)?.balance()?;
    let expected = if parent_balance == child_balance { 1.0 } else { -1.0 };
    if weight == expected {
        return None;
    }

    Some(Finding {
        finding_type: FindingType::BalanceMismatch,
        parent: parent_name.clone(),
        child: Some(child_name.clone()),
        context: None,
        message: format!(
            "Balance Error: '{}' ({:?}) contributes to '{}' ({:?}) with weight {}; expected {}.",
            child_name, child_balance, parent_name, parent_balance, weight, expected
        ),
    })
}
