//! Components: the per-role owners of resolved networks.

use crate::graph::{merge, MergeError, Network};
use crate::linkbase::LinkKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps a non-default link role to the component that owns it.
pub trait RoleResolver {
    fn component_id(&self, link_role: &str) -> Option<String>;

    /// Human-readable description of the role, when the taxonomy has one.
    fn definition(&self, _link_role: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleType {
    pub id: String,
    #[serde(default)]
    pub definition: Option<String>,
}

/// A role resolver backed by a fixed map, as read from a filing's role types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticRoleResolver {
    roles: BTreeMap<String, RoleType>,
}

impl StaticRoleResolver {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, link_role: impl Into<String>, role: RoleType) {
        self.roles.insert(link_role.into(), role);
    }

    pub fn with_role(mut self, link_role: impl Into<String>, id: impl Into<String>, definition: Option<&str>) -> Self {
        self.insert(link_role, RoleType { id: id.into(), definition: definition.map(str::to_string) });
        self
    }

    pub fn len(&self) -> usize { self.roles.len() }
    pub fn is_empty(&self) -> bool { self.roles.is_empty() }
}

impl RoleResolver for StaticRoleResolver {
    fn component_id(&self, link_role: &str) -> Option<String> {
        self.roles.get(link_role).map(|r| r.id.clone())
    }

    fn definition(&self, link_role: &str) -> Option<String> {
        self.roles.get(link_role).and_then(|r| r.definition.clone())
    }
}

/// Everything resolved under one component identifier.
///
/// Holds at most one presentation, calculation and logical definition
/// network; physical definition networks stay split by arc role. The default
/// bucket is a component too, and is where label, reference and footnote
/// networks land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    id: String,
    link_role: String,
    definition: Option<String>,
    presentation: Option<Network>,
    calculation: Option<Network>,
    definition_logical: Option<Network>,
    definition_physical: Vec<Network>,
    labels: Vec<Network>,
    references: Vec<Network>,
    footnotes: Vec<Network>,
}

impl Component {
    pub fn id(&self) -> &str { &self.id }
    pub fn link_role(&self) -> &str { &self.link_role }
    pub fn definition(&self) -> Option<&str> { self.definition.as_deref() }
    pub fn presentation(&self) -> Option<&Network> { self.presentation.as_ref() }
    pub fn calculation(&self) -> Option<&Network> { self.calculation.as_ref() }
    pub fn definition_logical(&self) -> Option<&Network> { self.definition_logical.as_ref() }
    pub fn definition_physical(&self) -> &[Network] { &self.definition_physical }
    pub fn labels(&self) -> &[Network] { &self.labels }
    pub fn references(&self) -> &[Network] { &self.references }
    pub fn footnotes(&self) -> &[Network] { &self.footnotes }

    /// All networks held, in kind order.
    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.presentation
            .iter()
            .chain(self.calculation.iter())
            .chain(self.definition_logical.iter())
            .chain(self.definition_physical.iter())
            .chain(self.labels.iter())
            .chain(self.references.iter())
            .chain(self.footnotes.iter())
    }

    pub(crate) fn networks_mut(&mut self) -> impl Iterator<Item = &mut Network> {
        self.presentation
            .iter_mut()
            .chain(self.calculation.iter_mut())
            .chain(self.definition_logical.iter_mut())
            .chain(self.definition_physical.iter_mut())
            .chain(self.labels.iter_mut())
            .chain(self.references.iter_mut())
            .chain(self.footnotes.iter_mut())
    }
}

/// Collects networks for one component until every fragment is resolved.
#[derive(Debug, Default)]
pub(crate) struct ComponentBuilder {
    id: String,
    link_role: String,
    definition: Option<String>,
    presentation: Vec<Network>,
    calculation: Vec<Network>,
    definition_logical: Vec<Network>,
    definition_physical: Vec<Network>,
    labels: Vec<Network>,
    references: Vec<Network>,
    footnotes: Vec<Network>,
}

impl ComponentBuilder {
    pub(crate) fn new(id: impl Into<String>, link_role: impl Into<String>, definition: Option<String>) -> Self {
        Self { id: id.into(), link_role: link_role.into(), definition, ..Default::default() }
    }

    pub(crate) fn push(&mut self, network: Network) {
        let slot = match (network.kind(), network.is_physical()) {
            (LinkKind::Presentation, _) => &mut self.presentation,
            (LinkKind::Calculation, _) => &mut self.calculation,
            (LinkKind::Definition, true) => &mut self.definition_physical,
            (LinkKind::Definition, false) => &mut self.definition_logical,
            (LinkKind::Label, _) => &mut self.labels,
            (LinkKind::Reference, _) => &mut self.references,
            (LinkKind::Footnote, _) => &mut self.footnotes,
        };
        slot.push(network);
    }

    /// Freezes the component, merging same-kind logical networks into one.
    pub(crate) fn build(self) -> Result<Component, MergeError> {
        Ok(Component {
            id: self.id,
            link_role: self.link_role,
            definition: self.definition,
            presentation: merge_all(self.presentation)?,
            calculation: merge_all(self.calculation)?,
            definition_logical: merge_all(self.definition_logical)?,
            definition_physical: self.definition_physical,
            labels: self.labels,
            references: self.references,
            footnotes: self.footnotes,
        })
    }
}

fn merge_all(mut networks: Vec<Network>) -> Result<Option<Network>, MergeError> {
    match networks.len() {
        0 => Ok(None),
        1 => Ok(networks.pop()),
        _ => merge(networks).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_role_resolver() {
        let roles = StaticRoleResolver::new().with_role("http://example.com/role/BS", "BS", Some("Balance Sheet"));
        assert_eq!(roles.component_id("http://example.com/role/BS").as_deref(), Some("BS"));
        assert_eq!(roles.definition("http://example.com/role/BS").as_deref(), Some("Balance Sheet"));
        assert_eq!(roles.component_id("http://example.com/role/IS"), None);

        let json = serde_json::to_string(&roles).unwrap();
        let back: StaticRoleResolver = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roles);
    }
}
