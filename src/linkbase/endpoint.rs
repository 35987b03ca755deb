//! Endpoints: the labelled locators and resources an extended link connects.

use crate::store::{FactId, Label, QName, Reference};
use serde::{Deserialize, Serialize};

/// What a locator points at outside the link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorTarget {
    Element(QName),
    /// Footnote links locate facts rather than report elements.
    Fact(FactId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceContent {
    Label { language: String, text: String },
    Reference { parts: Vec<(String, String)> },
    Footnote { language: String, text: String },
}

/// An inline payload carried by the link itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: Option<String>,
    pub role: String,
    #[serde(flatten)]
    pub content: ResourceContent,
}

impl Resource {
    /// Identity used when merging networks: the document id when present,
    /// otherwise the full payload.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.content {
            ResourceContent::Label { .. } => "label resource",
            ResourceContent::Reference { .. } => "reference resource",
            ResourceContent::Footnote { .. } => "footnote resource",
        }
    }

    pub fn as_label(&self) -> Option<Label> {
        match &self.content {
            ResourceContent::Label { language, text } => Some(Label {
                role: self.role.clone(),
                language: language.clone(),
                text: text.clone(),
            }),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<Reference> {
        match &self.content {
            ResourceContent::Reference { parts } => Some(Reference { role: self.role.clone(), parts: parts.clone() }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Locator(LocatorTarget),
    Resource(Resource),
}

/// One labelled endpoint of an extended link.
///
/// The label is link-local: arcs name endpoints by it, nothing outside the
/// fragment does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub label: String,
    #[serde(flatten)]
    pub kind: EndpointKind,
}

impl Endpoint {
    pub fn locator(label: impl Into<String>, element: QName) -> Self {
        Self { label: label.into(), kind: EndpointKind::Locator(LocatorTarget::Element(element)) }
    }

    pub fn fact_locator(label: impl Into<String>, fact: FactId) -> Self {
        Self { label: label.into(), kind: EndpointKind::Locator(LocatorTarget::Fact(fact)) }
    }

    pub fn resource(label: impl Into<String>, resource: Resource) -> Self {
        Self { label: label.into(), kind: EndpointKind::Resource(resource) }
    }
}
