//! The read-only deployment plan.
//!
//! A [`DeploymentPlan`] lists descriptors so that every dependency and every
//! referenced resource precedes the descriptors needing it. The order is
//! enforced while descriptors are appended, never by a later sort.

use std::collections::HashSet;

use ebplan_common::error::{PlanError, Result};
use ebplan_common::types::LogicalName;
use serde::{Deserialize, Serialize};

use crate::descriptor::ResourceDescriptor;
use crate::graph::DependencyGraph;

/// Account and region the plan is realized in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTarget {
    /// Target account identifier.
    pub account: String,
    /// Target region.
    pub region: String,
}

/// Ordered descriptor graph handed to the provisioning engine.
///
/// Deserialized plans go through [`DeploymentPlan::from_descriptors`], so
/// they satisfy the same order and naming checks as built ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlan")]
pub struct DeploymentPlan {
    target: PlanTarget,
    descriptors: Vec<ResourceDescriptor>,
}

/// Unchecked wire form of a [`DeploymentPlan`].
#[derive(Deserialize)]
struct RawPlan {
    target: PlanTarget,
    descriptors: Vec<ResourceDescriptor>,
}

impl TryFrom<RawPlan> for DeploymentPlan {
    type Error = PlanError;

    fn try_from(raw: RawPlan) -> Result<Self> {
        Self::from_descriptors(raw.target, raw.descriptors)
    }
}

impl DeploymentPlan {
    /// Assembles a plan from descriptors listed in dependency order.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::PlanOrder`] if a descriptor needs a resource
    /// that is not listed before it, or [`PlanError::DuplicateResource`] if
    /// two descriptors share a logical name.
    pub fn from_descriptors(
        target: PlanTarget,
        descriptors: impl IntoIterator<Item = ResourceDescriptor>,
    ) -> Result<Self> {
        let mut assembler = PlanAssembler::new(target);
        for descriptor in descriptors {
            let _ = assembler.push(descriptor)?;
        }
        Ok(assembler.finish())
    }

    /// Account and region of the plan.
    #[must_use]
    pub const fn target(&self) -> &PlanTarget {
        &self.target
    }

    /// Iterates descriptors in dependency-safe order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceDescriptor> {
        self.descriptors.iter()
    }

    /// Borrows the descriptors in dependency-safe order.
    #[must_use]
    pub fn descriptors(&self) -> &[ResourceDescriptor] {
        &self.descriptors
    }

    /// Looks up a descriptor by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.logical_name().as_str() == name)
    }

    /// Logical names in plan order.
    #[must_use]
    pub fn logical_names(&self) -> Vec<&LogicalName> {
        self.descriptors.iter().map(ResourceDescriptor::logical_name).collect()
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the plan holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Builds the dependency graph, including attribute references as edges.
    #[must_use]
    pub fn dependency_graph(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for descriptor in &self.descriptors {
            let _ = graph.add_resource(descriptor.logical_name());
            for required in descriptor.requirements() {
                graph.add_dependency(descriptor.logical_name(), required);
            }
        }
        graph
    }
}

impl<'a> IntoIterator for &'a DeploymentPlan {
    type Item = &'a ResourceDescriptor;
    type IntoIter = std::slice::Iter<'a, ResourceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// Appends descriptors one at a time, checking the order invariant.
#[derive(Debug)]
pub(crate) struct PlanAssembler {
    target: PlanTarget,
    declared: HashSet<LogicalName>,
    descriptors: Vec<ResourceDescriptor>,
}

impl PlanAssembler {
    pub(crate) fn new(target: PlanTarget) -> Self {
        Self {
            target,
            declared: HashSet::new(),
            descriptors: Vec::new(),
        }
    }

    /// Appends `descriptor` after checking everything it needs is declared.
    pub(crate) fn push(&mut self, descriptor: ResourceDescriptor) -> Result<LogicalName> {
        if self.declared.contains(descriptor.logical_name()) {
            return Err(PlanError::DuplicateResource {
                resource: descriptor.logical_name().to_string(),
            });
        }
        if let Some(missing) = descriptor
            .requirements()
            .into_iter()
            .find(|name| !self.declared.contains(*name))
        {
            return Err(PlanError::PlanOrder {
                dependent: descriptor.logical_name().to_string(),
                dependency: missing.to_string(),
            });
        }
        tracing::debug!(
            kind = %descriptor.kind(),
            name = %descriptor.logical_name(),
            "descriptor added to plan"
        );
        let name = descriptor.logical_name().clone();
        let _ = self.declared.insert(name.clone());
        self.descriptors.push(descriptor);
        Ok(name)
    }

    pub(crate) fn finish(self) -> DeploymentPlan {
        DeploymentPlan {
            target: self.target,
            descriptors: self.descriptors,
        }
    }
}
