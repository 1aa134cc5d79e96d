// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::errors::StreamsError;
use crate::topology::validation::{validate_topology, NodeOutline, StoreOutline};
use crate::topology::{NodeId, NodeKind, ProcessorNode, Topology};
use crate::traits::{Processor, StateStoreSupplier};

struct PendingNode {
    name: String,
    kind: NodeKind,
    parents: Vec<String>,
    topics: Vec<String>,
}

struct PendingStore {
    supplier: Box<dyn StateStoreSupplier>,
    name: String,
    nodes: Vec<String>,
}

/// Assembles a [`Topology`] by name.
///
/// Parents are resolved in [`build`](Self::build), so nodes may be declared in
/// any order. Declaration order still matters: it is the order nodes are
/// initialized and punctuated in, and a node's children are listed in the
/// order they were declared.
///
/// # Example
/// ```
/// use the_dagwood_streams::topology::TopologyBuilder;
/// use the_dagwood_streams::backends::local::PassthroughProcessor;
/// use the_dagwood_streams::stores::KeyValueStoreSupplier;
///
/// let topology = TopologyBuilder::new()
///     .add_source("words", &["input"])
///     .add_processor("relay", Box::new(PassthroughProcessor::new()), &["words"])
///     .add_sink("out", "output", &["relay"])
///     .add_state_store(Box::new(KeyValueStoreSupplier::new("counts")), &["relay"])
///     .build()
///     .unwrap();
///
/// assert_eq!(topology.node_count(), 3);
/// ```
#[derive(Default)]
pub struct TopologyBuilder {
    nodes: Vec<PendingNode>,
    stores: Vec<PendingStore>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source node consuming the given topics.
    pub fn add_source(mut self, name: &str, topics: &[&str]) -> Self {
        let topics: Vec<String> = topics.iter().map(|t| t.to_string()).collect();
        self.nodes.push(PendingNode {
            name: name.to_string(),
            kind: NodeKind::Source {
                topics: topics.clone(),
            },
            parents: Vec::new(),
            topics,
        });
        self
    }

    /// Add a processor node fed by `parents`.
    pub fn add_processor(
        mut self,
        name: &str,
        processor: Box<dyn Processor>,
        parents: &[&str],
    ) -> Self {
        self.nodes.push(PendingNode {
            name: name.to_string(),
            kind: NodeKind::Processor(processor),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            topics: Vec::new(),
        });
        self
    }

    /// Add a sink node that sends everything it receives to `topic`.
    pub fn add_sink(mut self, name: &str, topic: &str, parents: &[&str]) -> Self {
        self.nodes.push(PendingNode {
            name: name.to_string(),
            kind: NodeKind::Sink {
                topic: topic.to_string(),
            },
            parents: parents.iter().map(|p| p.to_string()).collect(),
            topics: Vec::new(),
        });
        self
    }

    /// Register a state store and connect it to the named nodes.
    pub fn add_state_store(
        mut self,
        supplier: Box<dyn StateStoreSupplier>,
        connected_nodes: &[&str],
    ) -> Self {
        self.stores.push(PendingStore {
            name: supplier.name().to_string(),
            supplier,
            nodes: connected_nodes.iter().map(|n| n.to_string()).collect(),
        });
        self
    }

    /// Validate and freeze the topology.
    ///
    /// Every structural problem is reported at once through
    /// [`StreamsError::InvalidTopology`].
    pub fn build(self) -> Result<Topology, StreamsError> {
        let node_outlines: Vec<NodeOutline<'_>> = self
            .nodes
            .iter()
            .map(|n| NodeOutline {
                name: &n.name,
                role: n.kind.role(),
                parents: &n.parents,
                topics: &n.topics,
            })
            .collect();
        let store_outlines: Vec<StoreOutline<'_>> = self
            .stores
            .iter()
            .map(|s| StoreOutline {
                name: &s.name,
                nodes: &s.nodes,
            })
            .collect();

        validate_topology(&node_outlines, &store_outlines)
            .map_err(StreamsError::InvalidTopology)?;

        let ids: HashMap<String, NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, n)| (n.name.clone(), NodeId(index)))
            .collect();

        let mut children: Vec<Vec<NodeId>> = vec![Vec::new(); self.nodes.len()];
        let mut sources = HashMap::new();
        for (index, pending) in self.nodes.iter().enumerate() {
            for parent in &pending.parents {
                // validated above
                if let Some(parent_id) = ids.get(parent) {
                    children[parent_id.0].push(NodeId(index));
                }
            }
            for topic in &pending.topics {
                sources.insert(topic.clone(), NodeId(index));
            }
        }

        let mut node_stores: Vec<Vec<String>> = vec![Vec::new(); self.nodes.len()];
        for store in &self.stores {
            for node in &store.nodes {
                if let Some(id) = ids.get(node) {
                    node_stores[id.0].push(store.name.clone());
                }
            }
        }

        let nodes = self
            .nodes
            .into_iter()
            .zip(children)
            .zip(node_stores)
            .map(|((pending, children), stores)| ProcessorNode {
                name: pending.name,
                kind: pending.kind,
                children,
                stores,
            })
            .collect();

        Ok(Topology {
            nodes,
            sources,
            store_suppliers: self.stores.into_iter().map(|s| s.supplier).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubProcessor;
    use crate::errors::ValidationError;
    use crate::stores::KeyValueStoreSupplier;

    fn names(topology: &Topology, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| topology.node(*id).name().to_string())
            .collect()
    }

    #[test]
    fn children_follow_declaration_order() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("c", Box::new(StubProcessor::new()), &["src"])
            .add_processor("a", Box::new(StubProcessor::new()), &["src"])
            .add_processor("b", Box::new(StubProcessor::new()), &["src"])
            .build()
            .unwrap();

        let src = topology.source("in").unwrap();
        assert_eq!(names(&topology, topology.node(src).children()), vec!["c", "a", "b"]);
    }

    #[test]
    fn child_may_be_declared_before_parent() {
        let topology = TopologyBuilder::new()
            .add_processor("p", Box::new(StubProcessor::new()), &["src"])
            .add_source("src", &["in"])
            .build()
            .unwrap();

        let src = topology.source("in").unwrap();
        assert_eq!(names(&topology, topology.node(src).children()), vec!["p"]);
        assert_eq!(topology.nodes().next().unwrap().1.name(), "p");
    }

    #[test]
    fn every_topic_of_a_source_resolves_to_it() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["left", "right"])
            .build()
            .unwrap();

        assert_eq!(topology.source("left"), topology.source("right"));
        assert!(topology.source("middle").is_none());
    }

    #[test]
    fn store_connections_are_recorded_on_nodes() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("p", Box::new(StubProcessor::new()), &["src"])
            .add_state_store(Box::new(KeyValueStoreSupplier::new("counts")), &["p"])
            .build()
            .unwrap();

        let p = topology.node_by_name("p").unwrap();
        assert_eq!(topology.node(p).stores(), &["counts".to_string()]);
        assert_eq!(topology.store_suppliers().count(), 1);
    }

    #[test]
    fn build_reports_all_problems() {
        let result = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("src", Box::new(StubProcessor::new()), &[])
            .add_processor("orphan", Box::new(StubProcessor::new()), &["ghost"])
            .build();

        match result {
            Err(StreamsError::InvalidTopology(errors)) => {
                assert!(errors.contains(&ValidationError::DuplicateNodeName {
                    node: "src".to_string()
                }));
                assert!(errors.contains(&ValidationError::UnresolvedParent {
                    node: "orphan".to_string(),
                    missing_parent: "ghost".to_string(),
                }));
            }
            other => panic!("expected InvalidTopology, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn build_rejects_cycles() {
        let result = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("a", Box::new(StubProcessor::new()), &["src", "b"])
            .add_processor("b", Box::new(StubProcessor::new()), &["a"])
            .build();

        assert!(matches!(result, Err(StreamsError::InvalidTopology(_))));
    }
}
