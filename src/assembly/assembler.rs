//! Groups resolved networks into components.

use super::component::{Component, ComponentBuilder, RoleResolver};
use crate::config::{Config, ErrorPolicy};
use crate::graph::MergeError;
use crate::linkbase::{ExtendedLink, LinkKind};
use crate::resolve::{ResolveError, Resolver};
use crate::store::ReportElementTable;
use crate::updater;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Failed to merge networks of component '{component}': {source}")]
    Merge { component: String, source: MergeError },
}

/// The outcome of one assembly run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyReport {
    default_bucket_id: String,
    components: BTreeMap<String, Component>,
    /// Fragments skipped under [`ErrorPolicy::Collect`], in input order.
    pub errors: Vec<ResolveError>,
}

impl AssemblyReport {
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Where label, reference and footnote networks (and anything under the
    /// default link role) were filed.
    pub fn default_bucket(&self) -> Option<&Component> {
        self.components.get(&self.default_bucket_id)
    }

    pub fn component_count(&self) -> usize { self.components.len() }

    pub fn is_clean(&self) -> bool { self.errors.is_empty() }
}

pub struct Assembler<'a> {
    config: &'a Config,
    roles: &'a dyn RoleResolver,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a Config, roles: &'a dyn RoleResolver) -> Self {
        Self { config, roles }
    }

    /// Resolves every fragment against `table` and files the networks under
    /// their components.
    ///
    /// Label fragments go first so presentation arcs can see the labels they
    /// prefer. A failing fragment either ends the run or is recorded in
    /// [`AssemblyReport::errors`] and skipped, per the configured policy.
    /// Once everything is resolved, element kinds are re-synced across all
    /// networks so later promotions are visible everywhere.
    pub fn assemble(
        &self,
        table: &mut ReportElementTable,
        links: &[ExtendedLink],
    ) -> Result<AssemblyReport, AssemblyError> {
        let mut ordered: Vec<&ExtendedLink> = links.iter().collect();
        ordered.sort_by_key(|l| l.kind != LinkKind::Label);

        let mut builders: BTreeMap<String, ComponentBuilder> = BTreeMap::new();
        let mut errors = Vec::new();
        {
            let mut resolver = Resolver::new(table);
            for link in ordered {
                let outcome = self.owner(link).and_then(|owner| Ok((owner, resolver.resolve(link)?)));
                let (owner, networks) = match outcome {
                    Ok(ok) => ok,
                    Err(err) if self.config.error_policy == ErrorPolicy::Collect => {
                        warn!(error = %err, link_role = %link.link_role, kind = %link.kind, "skipping fragment");
                        errors.push(err);
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };

                debug!(component = %owner, kind = %link.kind, networks = networks.len(), "filing networks");
                let builder = builders.entry(owner.clone()).or_insert_with(|| {
                    let definition = self.roles.definition(&link.link_role);
                    ComponentBuilder::new(owner, link.link_role.clone(), definition)
                });
                for net in networks {
                    builder.push(net);
                }
            }
        }

        let mut components = BTreeMap::new();
        for (id, builder) in builders {
            let mut component =
                builder.build().map_err(|source| AssemblyError::Merge { component: id.clone(), source })?;
            for net in component.networks_mut() {
                updater::sync_element_kinds(table, net);
            }
            components.insert(id, component);
        }

        info!(
            fragments = links.len(),
            components = components.len(),
            errors = errors.len(),
            "assembled filing"
        );
        Ok(AssemblyReport { default_bucket_id: self.config.default_bucket_id.clone(), components, errors })
    }

    /// The component a fragment's networks belong to.
    fn owner(&self, link: &ExtendedLink) -> Result<String, ResolveError> {
        if link.kind.is_default_bucket_kind() || link.link_role == self.config.default_link_role {
            return Ok(self.config.default_bucket_id.clone());
        }
        self.roles.component_id(&link.link_role).ok_or_else(|| ResolveError::UnresolvedRole {
            kind: link.kind,
            link_role: link.link_role.clone(),
        })
    }
}
