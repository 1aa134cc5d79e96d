// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for exercising the driver.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;
use crate::stores::InMemoryKeyValueStore;
use crate::traits::{Processor, StateStore, StateStoreSupplier};

/// A processor that forwards everything and does nothing else.
pub struct StubProcessor;

impl StubProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for StubProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        ctx.forward(key, value)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[derive(Default)]
struct ProbeLog {
    events: Vec<String>,
    records: Vec<(String, Datum, Datum)>,
}

/// Shared log of what the test processors saw, in call order.
///
/// Events are named after the node that was active when they happened, so
/// they double as a check on the cursor.
#[derive(Clone, Default)]
pub struct Probe(Rc<RefCell<ProbeLog>>);

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(&self, event: impl Into<String>) {
        self.0.borrow_mut().events.push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().events.clone()
    }

    pub fn records(&self) -> Vec<(String, Datum, Datum)> {
        self.0.borrow().records.clone()
    }

    pub fn clear(&self) {
        let mut log = self.0.borrow_mut();
        log.events.clear();
        log.records.clear();
    }

    fn record(&self, node: &str, key: &Datum, value: &Datum) {
        let mut log = self.0.borrow_mut();
        log.events.push(format!("process:{}", node));
        log.records
            .push((node.to_string(), key.clone(), value.clone()));
    }
}

fn active(ctx: &ProcessorContext<'_>) -> String {
    ctx.current_node().unwrap_or("<none>").to_string()
}

/// Records every lifecycle call and record, then forwards records on.
pub struct RecordingProcessor {
    probe: Probe,
    required_store: Option<String>,
}

impl RecordingProcessor {
    pub fn new(probe: &Probe) -> Self {
        Self {
            probe: probe.clone(),
            required_store: None,
        }
    }

    /// Fail `init` unless the named store is already registered.
    pub fn requiring_store(mut self, store: &str) -> Self {
        self.required_store = Some(store.to_string());
        self
    }
}

impl Processor for RecordingProcessor {
    fn init(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        if let Some(store) = &self.required_store {
            ctx.store::<InMemoryKeyValueStore>(store)?;
        }
        self.probe.event(format!("init:{}", active(ctx)));
        Ok(())
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        self.probe.record(&active(ctx), &key, &value);
        ctx.forward(key, value)
    }

    fn punctuate(&self, ctx: &mut ProcessorContext<'_>, timestamp: i64) -> Result<(), StreamsError> {
        self.probe
            .event(format!("punctuate:{}@{}", active(ctx), timestamp));
        Ok(())
    }

    fn close(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        self.probe.event(format!("close:{}", active(ctx)));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Sends every record to a topic, noting the active node before and after.
pub struct SendingProcessor {
    probe: Probe,
    topic: String,
}

impl SendingProcessor {
    pub fn new(probe: &Probe, topic: &str) -> Self {
        Self {
            probe: probe.clone(),
            topic: topic.to_string(),
        }
    }
}

impl Processor for SendingProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        self.probe.event(format!("{}:before", active(ctx)));
        ctx.send(&self.topic, key, value)?;
        self.probe.event(format!("{}:after", active(ctx)));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sending"
    }
}

/// Sends each record back to `topic` until it has done so `limit` times.
pub struct LoopingProcessor {
    topic: String,
    limit: u32,
    sent: Cell<u32>,
}

impl LoopingProcessor {
    pub fn new(topic: &str, limit: u32) -> Self {
        Self {
            topic: topic.to_string(),
            limit,
            sent: Cell::new(0),
        }
    }
}

impl Processor for LoopingProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        if self.sent.get() >= self.limit {
            return Ok(());
        }
        self.sent.set(self.sent.get() + 1);
        let next = value.as_i64().unwrap_or(0) + 1;
        ctx.send(&self.topic, key, Datum::from(next))
    }

    fn name(&self) -> &'static str {
        "looping"
    }
}

/// A processor that fails in one chosen lifecycle stage
pub struct FailingProcessor {
    stage: &'static str,
}

impl FailingProcessor {
    pub fn on_init() -> Self {
        Self { stage: "init" }
    }

    pub fn on_process() -> Self {
        Self { stage: "process" }
    }

    pub fn on_punctuate() -> Self {
        Self { stage: "punctuate" }
    }

    pub fn on_close() -> Self {
        Self { stage: "close" }
    }

    fn check(&self, ctx: &ProcessorContext<'_>, stage: &str) -> Result<(), StreamsError> {
        if self.stage == stage {
            Err(ctx.fail(format!("simulated {} failure", stage)))
        } else {
            Ok(())
        }
    }
}

impl Processor for FailingProcessor {
    fn init(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        self.check(ctx, "init")
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        _key: Datum,
        _value: Datum,
    ) -> Result<(), StreamsError> {
        self.check(ctx, "process")
    }

    fn punctuate(&self, ctx: &mut ProcessorContext<'_>, _timestamp: i64) -> Result<(), StreamsError> {
        self.check(ctx, "punctuate")
    }

    fn close(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        self.check(ctx, "close")
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Supplies a store that refuses to initialize.
pub struct BrokenStoreSupplier;

struct BrokenStore;

impl StateStore for BrokenStore {
    fn name(&self) -> &str {
        "broken"
    }

    fn init(&mut self, _ctx: &ProcessorContext<'_>) -> Result<(), StreamsError> {
        Err(StreamsError::StoreInitFailed {
            store: "broken".to_string(),
            reason: "simulated failure".to_string(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl StateStoreSupplier for BrokenStoreSupplier {
    fn name(&self) -> &str {
        "broken"
    }

    fn get(&self) -> Box<dyn StateStore> {
        Box::new(BrokenStore)
    }
}

/// Supplies stores that note `flush` and `close` calls in a [`Probe`].
pub struct RecordingStoreSupplier {
    probe: Probe,
    name: String,
}

impl RecordingStoreSupplier {
    pub fn new(probe: &Probe, name: &str) -> Self {
        Self {
            probe: probe.clone(),
            name: name.to_string(),
        }
    }
}

struct RecordingStore {
    probe: Probe,
    name: String,
}

impl StateStore for RecordingStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, _ctx: &ProcessorContext<'_>) -> Result<(), StreamsError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StreamsError> {
        self.probe.event(format!("flush:{}", self.name));
        Ok(())
    }

    fn close(&mut self) -> Result<(), StreamsError> {
        self.probe.event(format!("close:{}", self.name));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl StateStoreSupplier for RecordingStoreSupplier {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Box<dyn StateStore> {
        Box::new(RecordingStore {
            probe: self.probe.clone(),
            name: self.name.clone(),
        })
    }
}
