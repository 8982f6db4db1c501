//! Dependency graph management using `petgraph`.
//!
//! Builds a directed graph from descriptor dependencies and references and
//! resolves a topological ordering. Plans are already ordered by
//! construction; the graph is an independent check of that order.

use std::collections::HashMap;

use ebplan_common::error::{PlanError, Result};
use ebplan_common::types::LogicalName;
use petgraph::graph::NodeIndex;

/// A dependency graph of resources.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: petgraph::Graph<LogicalName, ()>,
    nodes: HashMap<LogicalName, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: petgraph::Graph::new(),
            nodes: HashMap::new(),
        }
    }

    /// Adds a resource node, returning the existing node if already present.
    pub fn add_resource(&mut self, name: &LogicalName) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.clone());
        let _ = self.nodes.insert(name.clone(), idx);
        idx
    }

    /// Adds a dependency edge: `dependent` depends on `dependency`.
    ///
    /// The graph edge points from `dependency` to `dependent`
    /// so that topological sort yields dependencies first.
    pub fn add_dependency(&mut self, dependent: &LogicalName, dependency: &LogicalName) {
        let from = self.add_resource(dependency);
        let to = self.add_resource(dependent);
        let _ = self.graph.update_edge(from, to, ());
    }

    /// Number of resources in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `dependent` directly depends on `dependency`.
    #[must_use]
    pub fn depends_on(&self, dependent: &LogicalName, dependency: &LogicalName) -> bool {
        match (self.nodes.get(dependency), self.nodes.get(dependent)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Returns a topological ordering of resources.
    ///
    /// Dependencies appear before the resources that depend on them.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::CyclicDependency`] if the graph contains cycles.
    pub fn resolve_order(&self) -> Result<Vec<LogicalName>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => Err(PlanError::CyclicDependency {
                resource: self
                    .graph
                    .node_weight(cycle.node_id())
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            }),
        }
    }

    /// Checks that `order` lists every dependency before its dependents.
    #[must_use]
    pub fn is_valid_order(&self, order: &[LogicalName]) -> bool {
        let position: HashMap<&LogicalName, usize> =
            order.iter().enumerate().map(|(i, n)| (n, i)).collect();
        self.graph.edge_indices().all(|edge| {
            let Some((from, to)) = self.graph.edge_endpoints(edge) else {
                return false;
            };
            match (
                self.graph.node_weight(from).and_then(|n| position.get(n)),
                self.graph.node_weight(to).and_then(|n| position.get(n)),
            ) {
                (Some(dependency), Some(dependent)) => dependency < dependent,
                _ => false,
            }
        })
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
