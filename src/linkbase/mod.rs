//! Input records: extended-link fragments, their endpoints and arcs.
pub mod edge;
pub mod endpoint;
pub mod extended_link;
pub mod roles;

pub use edge::Edge;
pub use endpoint::{Endpoint, EndpointKind, LocatorTarget, Resource, ResourceContent};
pub use extended_link::{ExtendedLink, LinkKind};
