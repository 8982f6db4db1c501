//! Resource descriptors and deferred attribute references.
//!
//! A descriptor is a declarative record of one piece of infrastructure.
//! It is assembled through a [`DescriptorBuilder`] and never changes after
//! [`DescriptorBuilder::build`] returns.

use std::collections::BTreeMap;
use std::fmt;

use ebplan_common::types::{LogicalName, OptionSetting};
use serde::{Deserialize, Serialize};

/// Kind of platform resource a descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Top-level application container for versions and environments.
    Application,
    /// Source bundle version of the application.
    Version,
    /// Running environment.
    Environment,
    /// DNS alias record pointing a custom domain at the environment.
    DnsAlias,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application => write!(f, "application"),
            Self::Version => write!(f, "version"),
            Self::Environment => write!(f, "environment"),
            Self::DnsAlias => write!(f, "dns-alias"),
        }
    }
}

/// Placeholder for an attribute of another resource that only exists once
/// that resource has been realized.
///
/// The provisioning engine resolves it after realizing `resource`; plan
/// construction never reads or guesses the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeferredAttributeReference {
    /// Logical name of the resource owning the attribute.
    pub resource: LogicalName,
    /// Attribute key on that resource.
    pub attribute: String,
}

impl DeferredAttributeReference {
    /// Creates a reference to `attribute` of `resource`.
    #[must_use]
    pub fn new(resource: LogicalName, attribute: impl Into<String>) -> Self {
        Self {
            resource,
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for DeferredAttributeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}.{}}}", self.resource, self.attribute)
    }
}

/// Value of one descriptor attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Literal string.
    Text(String),
    /// Ordered list of strings.
    List(Vec<String>),
    /// Ordered option settings.
    Options(Vec<OptionSetting>),
    /// Identifier of another resource, assigned when it is realized.
    Ref(LogicalName),
    /// Attribute of another resource, resolved after it is realized.
    Deferred(DeferredAttributeReference),
}

impl AttributeValue {
    /// Returns the literal string, if this is a [`AttributeValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the resource this value points at, if any.
    #[must_use]
    pub const fn referenced_resource(&self) -> Option<&LogicalName> {
        match self {
            Self::Ref(name) => Some(name),
            Self::Deferred(reference) => Some(&reference.resource),
            Self::Text(_) | Self::List(_) | Self::Options(_) => None,
        }
    }
}

/// Declarative, immutable record of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    kind: ResourceKind,
    logical_name: LogicalName,
    attributes: BTreeMap<String, AttributeValue>,
    depends_on: Vec<LogicalName>,
}

impl ResourceDescriptor {
    /// Starts a descriptor of `kind` named `logical_name`.
    #[must_use]
    pub fn builder(kind: ResourceKind, logical_name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            descriptor: Self {
                kind,
                logical_name: LogicalName::new(logical_name),
                attributes: BTreeMap::new(),
                depends_on: Vec::new(),
            },
        }
    }

    /// Resource kind.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Stable logical name.
    #[must_use]
    pub const fn logical_name(&self) -> &LogicalName {
        &self.logical_name
    }

    /// Every attribute, keyed by name.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// Looks up one attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Explicit dependencies, in declaration order.
    #[must_use]
    pub fn depends_on(&self) -> &[LogicalName] {
        &self.depends_on
    }

    /// Resources named by `Ref` or `Deferred` attributes.
    pub fn references(&self) -> impl Iterator<Item = &LogicalName> {
        self.attributes
            .values()
            .filter_map(AttributeValue::referenced_resource)
    }

    /// Explicit dependencies followed by attribute references, deduplicated.
    #[must_use]
    pub fn requirements(&self) -> Vec<&LogicalName> {
        let mut required: Vec<&LogicalName> = Vec::new();
        for name in self.depends_on.iter().chain(self.references()) {
            if !required.contains(&name) {
                required.push(name);
            }
        }
        required
    }

    /// Every deferred reference held by this descriptor.
    pub fn deferred_references(&self) -> impl Iterator<Item = &DeferredAttributeReference> {
        self.attributes.values().filter_map(|value| match value {
            AttributeValue::Deferred(reference) => Some(reference),
            _ => None,
        })
    }

    /// The option list, if this descriptor carries one under `key`.
    #[must_use]
    pub fn options(&self, key: &str) -> Option<&[OptionSetting]> {
        match self.attributes.get(key) {
            Some(AttributeValue::Options(options)) => Some(options),
            _ => None,
        }
    }
}

/// Assembles a [`ResourceDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor: ResourceDescriptor,
}

impl DescriptorBuilder {
    /// Sets an attribute, replacing any earlier value under the same key.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        let _ = self.descriptor.attributes.insert(key.into(), value);
        self
    }

    /// Sets a literal string attribute.
    #[must_use]
    pub fn text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute(key, AttributeValue::Text(value.into()))
    }

    /// Declares an explicit dependency.
    #[must_use]
    pub fn depends_on(mut self, name: &LogicalName) -> Self {
        if !self.descriptor.depends_on.contains(name) {
            self.descriptor.depends_on.push(name.clone());
        }
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> ResourceDescriptor {
        self.descriptor
    }
}
