//! The extended-link resolver: endpoints and arcs in, typed networks out.

use super::error::{ResolveError, Result};
use crate::analysis::topology;
use crate::factory::{self, NodeFactory, Referent};
use crate::graph::{Network, NodeArena, NodeId, TreeNode};
use crate::linkbase::{Edge, Endpoint, EndpointKind, ExtendedLink, LocatorTarget};
use crate::store::ReportElementTable;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Resolves extended links against a report-element table.
///
/// The resolver holds the table exclusively for its lifetime: each factory
/// pass may rewrite entries (labels, promotion) that later passes read.
pub struct Resolver<'a> {
    table: &'a mut ReportElementTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a mut ReportElementTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ReportElementTable {
        self.table
    }

    /// Runs every factory pass the link's kind calls for (two for
    /// definition links) and returns all emitted networks.
    pub fn resolve(&mut self, link: &ExtendedLink) -> Result<Vec<Network>> {
        let mut networks = Vec::new();
        for factory in factory::factories_for(link.kind) {
            networks.extend(self.resolve_with(link, factory.as_ref())?);
        }
        Ok(networks)
    }

    /// One factory pass over one link.
    ///
    /// 1. Every endpoint becomes a node, typed by the first arc targeting it,
    ///    else the first arc leaving it (a root), else none (isolated).
    /// 2. Every arc attaches its target under its source. A later arc into an
    ///    endpoint gets a node of its own, built from that arc, which shares
    ///    the endpoint's children. In physical networks an arc crossing into
    ///    another arc role attaches under a root for that role instead,
    ///    synthesised at most once per (source label, arc role).
    /// 3. Isolated endpoints become single-node networks; the remaining
    ///    roots form one network (logical) or one per arc role (physical).
    pub fn resolve_with(&mut self, link: &ExtendedLink, factory: &dyn NodeFactory) -> Result<Vec<Network>> {
        link.check_structure()?;
        if !link.edges.is_empty() && link.edges.iter().all(|e| link.incoming(&e.from).is_some()) {
            return Err(ResolveError::NoRoots { kind: link.kind, link_role: link.link_role.clone() });
        }
        if let Some(label) = topology::find_cycle(link) {
            return Err(ResolveError::Cycle { kind: link.kind, link_role: link.link_role.clone(), label });
        }
        debug!(
            kind = %link.kind,
            link_role = %link.link_role,
            physical = factory.is_physical(),
            endpoints = link.endpoints.len(),
            arcs = link.edges.len(),
            "resolving extended link"
        );

        let mut arena = NodeArena::new();
        let mut node_of: HashMap<&str, NodeId> = HashMap::with_capacity(link.endpoints.len());
        let mut root_labels: HashSet<&str> = HashSet::new();
        let mut isolated: Vec<NodeId> = Vec::new();

        // --- PASS 1: one node per endpoint ---
        for ep in &link.endpoints {
            let edge = match link.incoming(&ep.label) {
                Some(e) => Some(e),
                None => {
                    let out = link.outgoing(&ep.label);
                    if out.is_some() {
                        root_labels.insert(ep.label.as_str());
                    }
                    out
                }
            };
            let node = factory.create_node(link, ep, self.referent(link, ep)?, edge)?;
            let id = arena.push(node);
            if edge.is_none() {
                isolated.push(id);
            }
            node_of.insert(ep.label.as_str(), id);
        }

        // --- PASS 2: linking ---
        let mut candidates: Vec<NodeId> = Vec::new();
        let mut root_index: HashMap<(&str, String), NodeId> = HashMap::new();
        // (arc node, endpoint node) pairs for targets reached more than once.
        let mut extra: Vec<(NodeId, NodeId)> = Vec::new();

        for edge in &link.edges {
            // check_structure guarantees both labels exist.
            let from = node_of[edge.from.as_str()];
            let to = match link.incoming(&edge.to) {
                Some(first) if !std::ptr::eq(first, edge) => {
                    let id = self.arc_node(link, factory, &mut arena, edge)?;
                    trace!(from = %edge.from, to = %edge.to, arc_role = %edge.arc_role, "extra incoming arc");
                    extra.push((id, node_of[edge.to.as_str()]));
                    id
                }
                _ => node_of[edge.to.as_str()],
            };

            if root_labels.contains(edge.from.as_str()) {
                let role = arena.get(from).arc_role().to_string();
                root_index.entry((edge.from.as_str(), role)).or_insert_with(|| {
                    candidates.push(from);
                    from
                });
            }

            let from_role = arena.get(from).arc_role();
            let to_role = arena.get(to).arc_role();
            let parent = if factory.is_physical() && from_role != to_role {
                let role = to_role.to_string();
                match root_index.get(&(edge.from.as_str(), role.clone())) {
                    Some(&root) => root,
                    None => {
                        let root = self.synthesize_root(link, factory, &mut arena, &edge.from, &edge.to, &role)?;
                        root_index.insert((edge.from.as_str(), role), root);
                        candidates.push(root);
                        root
                    }
                }
            } else {
                from
            };
            arena.attach(parent, to);
        }
        for (id, endpoint_node) in extra {
            let kids = arena.get(endpoint_node).children().iter().copied().collect();
            arena.get_mut(id).base_mut().children = kids;
        }

        // --- PASS 3: emission ---
        let link_name = link.link_name();
        let mut networks = Vec::new();
        for &id in &isolated {
            networks.push(factory.create_network(&link.link_role, &link_name, &arena, &[id])?);
        }

        if factory.is_physical() {
            let mut by_role: Vec<(String, Vec<NodeId>)> = Vec::new();
            for &root in &candidates {
                let role = arena.get(root).arc_role();
                match by_role.iter_mut().find(|(r, _)| r == role) {
                    Some((_, roots)) => roots.push(root),
                    None => by_role.push((role.to_string(), vec![root])),
                }
            }
            for (_, roots) in &by_role {
                networks.push(factory.create_network(&link.link_role, &link_name, &arena, roots)?);
            }
        } else if !candidates.is_empty() {
            networks.push(factory.create_network(&link.link_role, &link_name, &arena, &candidates)?);
        }

        for net in &mut networks {
            let changed = factory.update_report_elements(self.table, net);
            trace!(link_role = %link.link_role, roots = net.roots().len(), nodes = net.node_count(), changed, "emitted network");
        }
        Ok(networks)
    }

    /// Builds a second root for the `from` endpoint under `role`.
    ///
    /// The seed arc is `from -> to` with that role when present, else any arc
    /// leaving `from` with that role, else `from -> to` itself; the node is
    /// always filed under `role`.
    fn synthesize_root(
        &self,
        link: &ExtendedLink,
        factory: &dyn NodeFactory,
        arena: &mut NodeArena,
        from: &str,
        to: &str,
        role: &str,
    ) -> Result<NodeId> {
        let seed = link
            .find_edge(from, to, role)
            .or_else(|| link.edges.iter().find(|e| e.from == from && e.arc_role == role))
            .or_else(|| link.edges.iter().find(|e| e.connects(from, to)));
        let endpoint = link.endpoint(from).ok_or_else(|| ResolveError::UnknownEndpoint {
            kind: link.kind,
            link_role: link.link_role.clone(),
            from: from.to_string(),
            to: to.to_string(),
            label: from.to_string(),
        })?;

        let mut node = factory.create_node(link, endpoint, self.referent(link, endpoint)?, seed)?;
        node.base_mut().arc_role = role.to_string();
        debug!(label = from, arc_role = role, link_role = %link.link_role, "synthesized root");
        Ok(arena.push(node))
    }

    /// A node for the target of `edge`, typed by that arc rather than the
    /// first one into the endpoint.
    fn arc_node(&self, link: &ExtendedLink, factory: &dyn NodeFactory, arena: &mut NodeArena, edge: &Edge) -> Result<NodeId> {
        let endpoint = link.endpoint(&edge.to).ok_or_else(|| ResolveError::UnknownEndpoint {
            kind: link.kind,
            link_role: link.link_role.clone(),
            from: edge.from.clone(),
            to: edge.to.clone(),
            label: edge.to.clone(),
        })?;
        let node = factory.create_node(link, endpoint, self.referent(link, endpoint)?, Some(edge))?;
        Ok(arena.push(node))
    }

    fn referent<'t>(&'t self, link: &'t ExtendedLink, endpoint: &'t Endpoint) -> Result<Referent<'t>> {
        match &endpoint.kind {
            EndpointKind::Locator(LocatorTarget::Element(name)) => {
                self.table.get(name).map(Referent::Element).ok_or_else(|| ResolveError::UnknownReportElement {
                    kind: link.kind,
                    link_role: link.link_role.clone(),
                    label: endpoint.label.clone(),
                    name: name.clone(),
                })
            }
            EndpointKind::Locator(LocatorTarget::Fact(id)) => Ok(Referent::Fact(id)),
            EndpointKind::Resource(res) => Ok(Referent::Resource(res)),
        }
    }
}
