// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation for topologies.
//!
//! Both the programmatic [`TopologyBuilder`](crate::topology::TopologyBuilder)
//! and the config loader describe their nodes as [`NodeOutline`]s and run them
//! through [`validate_topology`] before anything is instantiated.
//!
//! # Validation Pipeline
//!
//! 1. **Uniqueness**: node names and store names are unique
//! 2. **References**: every parent exists, sources have no parents, sinks are
//!    never parents, every store connection names an existing node
//! 3. **Source topics**: each topic feeds exactly one source
//! 4. **Cycle detection**: DFS with a recursion stack, reporting the cycle path
//!
//! Cycle detection only runs once the earlier stages pass, since it needs every
//! parent reference to resolve.
//!
//! The engine itself never checks for cycles; this is the one place they are
//! caught.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicTopologyDetected, ValidationCompleted, ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// What a node does with the records it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Entry point bound to one or more topics; forwards records unchanged.
    Source,
    /// Carries a processing unit.
    Processor,
    /// Terminal node that sends every record to a topic.
    Sink,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Source => write!(f, "source"),
            NodeRole::Processor => write!(f, "processor"),
            NodeRole::Sink => write!(f, "sink"),
        }
    }
}

/// The shape of one node, independent of how it will be instantiated.
#[derive(Debug, Clone, Copy)]
pub struct NodeOutline<'a> {
    pub name: &'a str,
    pub role: NodeRole,
    pub parents: &'a [String],
    /// Topics a source consumes; ignored for other roles.
    pub topics: &'a [String],
}

/// The shape of one state store and the nodes it is connected to.
#[derive(Debug, Clone, Copy)]
pub struct StoreOutline<'a> {
    pub name: &'a str,
    pub nodes: &'a [String],
}

/// Validates a topology outline, accumulating every problem found.
///
/// # Returns
///
/// * `Ok(())` - The outline can be built into a topology
/// * `Err(Vec<ValidationError>)` - Every problem found, in pipeline order
pub fn validate_topology(
    nodes: &[NodeOutline<'_>],
    stores: &[StoreOutline<'_>],
) -> Result<(), Vec<ValidationError>> {
    ValidationStarted {
        node_count: nodes.len(),
        store_count: stores.len(),
    }
    .log();

    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_names(nodes, stores) {
        errors.extend(duplicate_errors);
    }

    if let Err(reference_errors) = validate_references(nodes, stores) {
        errors.extend(reference_errors);
    }

    if let Err(topic_errors) = validate_source_topics(nodes) {
        errors.extend(topic_errors);
    }

    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic(nodes) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        ValidationCompleted {
            node_count: nodes.len(),
        }
        .log();
        Ok(())
    } else {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn validate_unique_names(
    nodes: &[NodeOutline<'_>],
    stores: &[StoreOutline<'_>],
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen_nodes = HashSet::new();
    for node in nodes {
        if !seen_nodes.insert(node.name) {
            errors.push(ValidationError::DuplicateNodeName {
                node: node.name.to_string(),
            });
        }
    }

    let mut seen_stores = HashSet::new();
    for store in stores {
        if !seen_stores.insert(store.name) {
            errors.push(ValidationError::DuplicateStoreName {
                store: store.name.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_references(
    nodes: &[NodeOutline<'_>],
    stores: &[StoreOutline<'_>],
) -> Result<(), Vec<ValidationError>> {
    let roles: HashMap<&str, NodeRole> = nodes.iter().map(|n| (n.name, n.role)).collect();
    let mut errors = Vec::new();

    for node in nodes {
        if node.role == NodeRole::Source && !node.parents.is_empty() {
            errors.push(ValidationError::SourceWithParents {
                node: node.name.to_string(),
            });
            continue;
        }

        for parent in node.parents {
            match roles.get(parent.as_str()) {
                None => errors.push(ValidationError::UnresolvedParent {
                    node: node.name.to_string(),
                    missing_parent: parent.clone(),
                }),
                Some(NodeRole::Sink) => errors.push(ValidationError::SinkAsParent {
                    node: node.name.to_string(),
                    sink: parent.clone(),
                }),
                Some(_) => {}
            }
        }
    }

    for store in stores {
        for node in store.nodes {
            if !roles.contains_key(node.as_str()) {
                errors.push(ValidationError::UnknownStoreNode {
                    store: store.name.to_string(),
                    node: node.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_source_topics(nodes: &[NodeOutline<'_>]) -> Result<(), Vec<ValidationError>> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut errors = Vec::new();

    for node in nodes.iter().filter(|n| n.role == NodeRole::Source) {
        for topic in node.topics {
            if let Some(first) = owners.insert(topic.as_str(), node.name) {
                errors.push(ValidationError::DuplicateSourceTopic {
                    topic: topic.clone(),
                    first: first.to_string(),
                    second: node.name.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// DFS over parent → child edges, three-color style.
///
/// A neighbor already on the recursion stack closes a cycle; the reported path
/// runs from that neighbor back to itself.
fn validate_acyclic(nodes: &[NodeOutline<'_>]) -> Result<(), Vec<ValidationError>> {
    let mut graph: HashMap<&str, Vec<&str>> =
        nodes.iter().map(|n| (n.name, Vec::new())).collect();

    for node in nodes {
        for parent in node.parents {
            if let Some(children) = graph.get_mut(parent.as_str()) {
                children.push(node.name);
            }
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node in nodes {
        if !visited.contains(node.name) {
            if let Some(cycle) =
                dfs_cycle_detection(node.name, &graph, &mut visited, &mut rec_stack, &mut path)
            {
                CyclicTopologyDetected { cycle: &cycle }.log();
                return Err(vec![ValidationError::CyclicTopology { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(children) = graph.get(node) {
        for &child in children {
            if !visited.contains(child) {
                if let Some(cycle) = dfs_cycle_detection(child, graph, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(child) {
                let start = path.iter().position(|n| *n == child).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(child.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}
