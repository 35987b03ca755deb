//! Defines the error types for extended-link resolution.
use crate::linkbase::LinkKind;
use crate::store::QName;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Whether a failure means the fragment itself is malformed or one node
/// could not be typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Structural,
    Type,
}

/// Everything that aborts resolution of one extended-link fragment.
///
/// Every variant names the link role, and the arc where one is involved, so
/// a collected report can point back at the offending fragment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Duplicate arc {from} -> {to} in {kind} link '{link_role}'")]
    DuplicateArc { kind: LinkKind, link_role: String, from: String, to: String },

    #[error("Arc {from} -> {to} in {kind} link '{link_role}' references unknown endpoint '{label}'")]
    UnknownEndpoint { kind: LinkKind, link_role: String, from: String, to: String, label: String },

    #[error("Endpoint label '{label}' is used twice in {kind} link '{link_role}'")]
    DuplicateEndpointLabel { kind: LinkKind, link_role: String, label: String },

    #[error("{kind} link '{link_role}' has endpoints but no root")]
    NoRoots { kind: LinkKind, link_role: String },

    #[error("Arcs in {kind} link '{link_role}' form a cycle through '{label}'")]
    Cycle { kind: LinkKind, link_role: String, label: String },

    #[error("Locator '{label}' in {kind} link '{link_role}' points to unknown report element {name}")]
    UnknownReportElement { kind: LinkKind, link_role: String, label: String, name: QName },

    #[error("Link role '{link_role}' does not resolve to a component")]
    UnresolvedRole { kind: LinkKind, link_role: String },

    #[error("Refusing to build a {kind} network for '{link_role}' without roots")]
    EmptyNetwork { kind: LinkKind, link_role: String },

    #[error("Calculation node '{label}' in '{link_role}' points to {name}, which is not a concept")]
    NotAConcept { link_role: String, label: String, name: QName },

    #[error("Presentation arc {from} -> {to} in '{link_role}' prefers label role '{role}', but {name} has no such label")]
    MissingPreferredLabel { link_role: String, from: String, to: String, name: QName, role: String },

    #[error("Endpoint '{label}' in {kind} link '{link_role}' points to a {found}, which this network cannot hold")]
    UnexpectedReferent { kind: LinkKind, link_role: String, label: String, found: &'static str },
}

impl ResolveError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotAConcept { .. } | Self::MissingPreferredLabel { .. } | Self::UnexpectedReferent { .. } => {
                ErrorClass::Type
            }
            _ => ErrorClass::Structural,
        }
    }

    /// The link role of the fragment that failed.
    pub fn link_role(&self) -> &str {
        match self {
            Self::DuplicateArc { link_role, .. }
            | Self::UnknownEndpoint { link_role, .. }
            | Self::DuplicateEndpointLabel { link_role, .. }
            | Self::NoRoots { link_role, .. }
            | Self::Cycle { link_role, .. }
            | Self::UnknownReportElement { link_role, .. }
            | Self::UnresolvedRole { link_role, .. }
            | Self::EmptyNetwork { link_role, .. }
            | Self::NotAConcept { link_role, .. }
            | Self::MissingPreferredLabel { link_role, .. }
            | Self::UnexpectedReferent { link_role, .. } => link_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_fragment_and_arc() {
        let err = ResolveError::DuplicateArc {
            kind: LinkKind::Calculation,
            link_role: "http://example.com/role/BS".into(),
            from: "loc_Assets".into(),
            to: "loc_Cash".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("loc_Assets -> loc_Cash"), "{}", msg);
        assert!(msg.contains("calculation"), "{}", msg);
        assert!(msg.contains("http://example.com/role/BS"), "{}", msg);
        assert_eq!(err.class(), ErrorClass::Structural);
    }

    #[test]
    fn test_type_errors_are_classified() {
        let err = ResolveError::NotAConcept {
            link_role: "r".into(),
            label: "loc".into(),
            name: QName::new("t", "Cube"),
        };
        assert_eq!(err.class(), ErrorClass::Type);
        assert_eq!(err.link_role(), "r");
    }
}
