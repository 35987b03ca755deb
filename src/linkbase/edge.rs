//! Defines the `Edge` type, one directed arc between two endpoint labels.

use serde::{Deserialize, Serialize};

/// A directed arc inside one extended link.
///
/// The arc role carries the semantics (parent-child, summation-item,
/// domain-member, ...). `order` sorts siblings; `weight` only means something
/// on calculation arcs; `preferred_label` only on presentation arcs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub arc_role: String,
    #[serde(default)]
    pub arc_name: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub preferred_label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, arc_role: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            arc_role: arc_role.into(),
            arc_name: None,
            order: None,
            weight: None,
            preferred_label: None,
        }
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_preferred_label(mut self, role: impl Into<String>) -> Self {
        self.preferred_label = Some(role.into());
        self
    }

    /// XLink's default `order` is 1.
    pub fn order_or_default(&self) -> f64 {
        self.order.unwrap_or(1.0)
    }

    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }
}
