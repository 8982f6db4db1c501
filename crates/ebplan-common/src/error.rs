//! Unified error types for the ebplan workspace.
//!
//! Every error is raised while a plan is being constructed and is fatal to
//! that construction call. No partial plan is ever returned.

use thiserror::Error;

/// Errors produced while building a deployment plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// One or more required configuration fields are absent.
    #[error("missing required configuration fields: {}", fields.join(", "))]
    MissingRequiredField {
        /// Every missing field, in validation order.
        fields: Vec<String>,
    },

    /// The runtime variant tag is not recognized.
    #[error("unsupported runtime variant: \"{tag}\"")]
    UnsupportedVariant {
        /// The offending tag, as supplied.
        tag: String,
    },

    /// Two option blocks emit the same namespace/name pair.
    #[error("conflicting option {namespace}/{name}: \"{existing}\" already set, got \"{incoming}\"")]
    ConflictingOption {
        /// Namespace of the colliding option.
        namespace: String,
        /// Name of the colliding option.
        name: String,
        /// Value already present in the list.
        existing: String,
        /// Value that attempted to shadow it.
        incoming: String,
    },

    /// A descriptor was appended before one of the resources it needs.
    #[error("descriptor \"{dependent}\" needs \"{dependency}\", which is not declared before it")]
    PlanOrder {
        /// Logical name of the descriptor being appended.
        dependent: String,
        /// Logical name it depends on or references.
        dependency: String,
    },

    /// Two descriptors share one logical name.
    #[error("resource \"{resource}\" is declared more than once")]
    DuplicateResource {
        /// The repeated logical name.
        resource: String,
    },

    /// The dependency graph of a plan contains a cycle.
    #[error("cyclic dependency detected at resource \"{resource}\"")]
    CyclicDependency {
        /// A resource participating in the cycle.
        resource: String,
    },
}

impl PlanError {
    /// Shorthand for a single missing field.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            fields: vec![field.into()],
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_listed_together() {
        let err = PlanError::MissingRequiredField {
            fields: vec!["application_name".into(), "region".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing required configuration fields: application_name, region"
        );
    }

    #[test]
    fn unsupported_variant_names_the_tag() {
        let err = PlanError::UnsupportedVariant { tag: "ruby".into() };
        assert!(err.to_string().contains("\"ruby\""));
    }

    #[test]
    fn duplicate_resource_names_the_resource() {
        let err = PlanError::DuplicateResource {
            resource: "Application".into(),
        };
        assert_eq!(
            err.to_string(),
            "resource \"Application\" is declared more than once"
        );
    }

    #[test]
    fn conflicting_option_names_namespace_and_name() {
        let err = PlanError::ConflictingOption {
            namespace: "aws:autoscaling:asg".into(),
            name: "MinSize".into(),
            existing: "1".into(),
            incoming: "3".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("aws:autoscaling:asg/MinSize"), "got: {msg}");
        assert!(msg.contains("\"3\""), "got: {msg}");
    }
}
