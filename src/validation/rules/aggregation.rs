//! Validation rule for summation consistency of reported facts.

use crate::graph::{Network, NodeId, TreeNode};
use crate::store::FactSet;
use crate::validation::error::{Finding, FindingType};
use tracing::trace;

/// Checks every fact reported for `node`'s concept against its children.
///
/// For each parent context the children's facts in the identical context are
/// weighted and summed; the parent value must equal that sum exactly. A
/// context in which no child reported anything is a finding of its own.
/// Leaves and non-element nodes yield nothing.
pub(crate) fn validate_aggregation(network: &Network, facts: &FactSet, node: NodeId) -> Vec<Finding> {
    let parent = network.node(node);
    let Some(parent_name) = parent.element_name() else {
        return Vec::new();
    };
    if parent.is_leaf() {
        return Vec::new();
    }

    let mut findings = Vec::new();
    for (context, value) in facts.facts_for(parent_name) {
        let mut sum = 0.0;
        let mut contributors = 0usize;
        for &kid in parent.children() {
            let child = network.node(kid);
            let (Some(name), Some(weight)) = (child.element_name(), child.weight()) else {
                continue;
            };
            if let Some(v) = facts.value(name, context) {
                sum += v * weight;
                contributors += 1;
            }
        }
        trace!(concept = %parent_name, %context, value, sum, contributors, "aggregation check");

        if contributors == 0 {
            findings.push(Finding {
                finding_type: FindingType::MissingChildFacts,
                parent: parent_name.clone(),
                child: None,
                context: Some(context.clone()),
                message: format!(
                    "Aggregation Error: '{}' = {} in context '{}' but none of its {} children report a value there.",
                    parent_name,
                    value,
                    context,
                    parent.children().len()
                ),
            });
        } else if sum != *value {
            findings.push(Finding {
                finding_type: FindingType::AggregationMismatch,
                parent: parent_name.clone(),
                child: None,
                context: Some(context.clone()),
                message: format!(
                    "Aggregation Error: '{}' = {} in context '{}' but its children sum to {}.",
                    parent_name, value, context, sum
                ),
            });
        }
    }
    findings
}
