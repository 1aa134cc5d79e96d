// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::engine::context::{ExecutionState, ProcessorContext};
use crate::engine::loopback::{LoopbackSink, UnroutedTopicPolicy};
use crate::errors::StreamsError;
use crate::observability::messages::{engine::*, StructuredLog};
use crate::record::{Datum, ProducerRecord};
use crate::stores::StoreRegistry;
use crate::topology::Topology;
use crate::traits::{RecordCollector, StateStore};

/// Driver behavior knobs.
///
/// # Example
/// ```yaml
/// driver:
///   max_cascade_depth: 256
///   unrouted_topics: capture
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DriverConfig {
    /// Maximum number of nested node entries in one call chain. Every entry
    /// counts, including the source a record comes in through and the node
    /// entered for `init`, `punctuate` and `close`, so the smallest usable
    /// limit is 1 and a source feeding one processor needs 2. Unbounded when
    /// absent, in which case a cyclic cascade overflows the stack.
    #[serde(default)]
    pub max_cascade_depth: Option<usize>,
    #[serde(default)]
    pub unrouted_topics: UnroutedTopicPolicy,
}

/// Synchronous, in-process driver for a [`Topology`].
///
/// Construction instantiates and initializes every state store, then
/// initializes every node. After that the caller feeds records with
/// [`process`](Self::process) and fires scheduled callbacks with
/// [`punctuate`](Self::punctuate); both run the complete downstream cascade on
/// the caller's thread before returning.
///
/// # Example
/// ```
/// use serde_json::json;
/// use the_dagwood_streams::backends::local::ChangeCaseProcessor;
/// use the_dagwood_streams::engine::{DriverConfig, TopologyTestDriver, UnroutedTopicPolicy};
/// use the_dagwood_streams::topology::TopologyBuilder;
///
/// let topology = TopologyBuilder::new()
///     .add_source("in", &["words"])
///     .add_processor("upper", Box::new(ChangeCaseProcessor::upper()), &["in"])
///     .add_sink("out", "shouted", &["upper"])
///     .build()?;
///
/// let config = DriverConfig {
///     unrouted_topics: UnroutedTopicPolicy::Capture,
///     ..DriverConfig::default()
/// };
/// let mut driver = TopologyTestDriver::with_config(topology, config)?;
/// driver.process("words", json!(1), json!("hello"))?;
///
/// assert_eq!(driver.output_for("shouted")[0].value, json!("HELLO"));
/// # Ok::<(), the_dagwood_streams::errors::StreamsError>(())
/// ```
pub struct TopologyTestDriver {
    topology: Topology,
    collector: Box<dyn RecordCollector>,
    state: ExecutionState,
}

impl TopologyTestDriver {
    pub fn new(topology: Topology) -> Result<Self, StreamsError> {
        Self::with_config(topology, DriverConfig::default())
    }

    /// Build a driver whose record collector is a [`LoopbackSink`].
    pub fn with_config(topology: Topology, config: DriverConfig) -> Result<Self, StreamsError> {
        let collector = Box::new(LoopbackSink::new(config.unrouted_topics));
        Self::with_collector(topology, config, collector)
    }

    /// Build a driver around any record collector.
    ///
    /// Fails if any store or node fails to initialize; there is no partially
    /// constructed driver.
    pub fn with_collector(
        topology: Topology,
        config: DriverConfig,
        collector: Box<dyn RecordCollector>,
    ) -> Result<Self, StreamsError> {
        if config.max_cascade_depth == Some(0) {
            return Err(StreamsError::InvalidDriverConfig(
                "max_cascade_depth must be at least 1".to_string(),
            ));
        }
        let mut state = ExecutionState::new(config.max_cascade_depth);

        for supplier in topology.store_suppliers() {
            let mut store = supplier.get();
            store.init(&ProcessorContext::new(&topology, &*collector, &mut state))?;
            state.stores.register(store)?;
        }

        ProcessorContext::new(&topology, &*collector, &mut state).init_nodes()?;

        DriverInitialized {
            node_count: topology.node_count(),
            store_count: state.stores.len(),
        }
        .log();

        Ok(Self {
            topology,
            collector,
            state,
        })
    }

    /// Feed one record into the source consuming `topic`.
    pub fn process(&mut self, topic: &str, key: Datum, value: Datum) -> Result<(), StreamsError> {
        let msg = RecordInjected {
            topic,
            timestamp: self.state.time,
        };
        let span = msg.span("process");
        let _guard = span.enter();
        msg.log();

        self.context().process(topic, key, value)
    }

    /// Set logical time to `timestamp`, then fire every processing unit's
    /// scheduled callback in node declaration order.
    pub fn punctuate(&mut self, timestamp: i64) -> Result<(), StreamsError> {
        self.set_time(timestamp);

        let msg = PunctuationStarted {
            timestamp,
            processor_count: self
                .topology
                .nodes()
                .filter(|(_, node)| node.processor().is_some())
                .count(),
        };
        let span = msg.span("punctuate");
        let _guard = span.enter();
        msg.log();

        self.context().punctuate_nodes(timestamp)
    }

    /// Set logical time. No ordering is enforced.
    pub fn set_time(&mut self, timestamp: i64) {
        self.state.time = timestamp;
    }

    pub fn time(&self) -> i64 {
        self.state.time
    }

    pub fn get_state_store(&self, name: &str) -> Option<&(dyn StateStore + 'static)> {
        self.state.stores.get(name)
    }

    /// Typed lookup; `None` if the store is missing or of another type.
    pub fn state_store<S: StateStore>(&self, name: &str) -> Option<&S> {
        self.get_state_store(name)?.as_any().downcast_ref::<S>()
    }

    pub fn all_state_stores(&self) -> &StoreRegistry {
        &self.state.stores
    }

    /// The active node. Always `None` between calls.
    pub fn current_node(&self) -> Option<&str> {
        self.state
            .cursor
            .map(|id| self.topology.node(id).name())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Every record sent so far, in send order.
    pub fn output_records(&self) -> &[ProducerRecord] {
        &self.state.output
    }

    pub fn output_for(&self, topic: &str) -> Vec<&ProducerRecord> {
        self.state
            .output
            .iter()
            .filter(|record| record.topic == topic)
            .collect()
    }

    /// Remove and return the output log.
    pub fn take_output(&mut self) -> Vec<ProducerRecord> {
        std::mem::take(&mut self.state.output)
    }

    /// Close every processing unit, then flush and close every store.
    ///
    /// Stores are torn down even when a processor fails to close; the first
    /// error seen is returned.
    pub fn close(mut self) -> Result<(), StreamsError> {
        let mut first_error = self.context().close_nodes().err();
        self.collector.flush();

        for (_, store) in self.state.stores.iter_mut() {
            let flushed = store.flush();
            let closed = store.close();
            if let Err(e) = flushed.and(closed) {
                first_error.get_or_insert(e);
            }
        }

        DriverClosed {
            node_count: self.topology.node_count(),
            store_count: self.state.stores.len(),
        }
        .log();

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn context(&mut self) -> ProcessorContext<'_> {
        ProcessorContext::new(&self.topology, &*self.collector, &mut self.state)
    }
}

impl std::fmt::Debug for TopologyTestDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopologyTestDriver")
            .field("topology", &self.topology)
            .field("time", &self.state.time)
            .field("stores", &self.state.stores)
            .field("output_len", &self.state.output.len())
            .finish()
    }
}
