// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::json;

use crate::backends::local::{
    BranchByTypeProcessor, ChangeCaseProcessor, CountByKeyProcessor, EmitStoreOnPunctuateProcessor, RouteByKeyProcessor,
    SplitWordsProcessor, ValueType,
};
use crate::backends::stub::{FailingProcessor, LoopingProcessor, Probe, RecordingProcessor, SendingProcessor};
use crate::engine::{CaptureOnlyCollector, DriverConfig, TopologyTestDriver, UnroutedTopicPolicy};
use crate::errors::StreamsError;
use crate::stores::{InMemoryKeyValueStore, KeyValueStoreSupplier};
use crate::topology::TopologyBuilder;

/// End-to-end driver scenarios using the stub and local backends
#[cfg(test)]
mod tests {
    use super::*;

    fn capture_config() -> DriverConfig {
        DriverConfig {
            unrouted_topics: UnroutedTopicPolicy::Capture,
            ..DriverConfig::default()
        }
    }

    #[test]
    fn test_forward_reaches_children_in_declaration_order() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("A", Box::new(RecordingProcessor::new(&probe)), &["src"])
            .add_processor("B", Box::new(RecordingProcessor::new(&probe)), &["src"])
            .add_processor("C", Box::new(RecordingProcessor::new(&probe)), &["src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        driver.process("in", json!("k"), json!("v")).unwrap();

        assert_eq!(probe.events(), vec!["process:A", "process:B", "process:C"]);
        assert_eq!(driver.current_node(), None);
    }

    #[test]
    fn test_nested_forward_targets_the_active_node() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("a", Box::new(RecordingProcessor::new(&probe)), &["src"])
            .add_processor("a1", Box::new(RecordingProcessor::new(&probe)), &["a"])
            .add_processor("b", Box::new(RecordingProcessor::new(&probe)), &["src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        driver.process("in", json!(1), json!(2)).unwrap();

        // b is reached only after a's whole subtree, and still as a child of src
        assert_eq!(
            probe.events(),
            vec!["process:a", "process:a1", "process:b"]
        );
    }

    #[test]
    fn test_forward_to_index_hits_one_child() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor(
                "branch",
                Box::new(BranchByTypeProcessor::new(vec![ValueType::String, ValueType::Number])),
                &["src"],
            )
            .add_processor("strings", Box::new(RecordingProcessor::new(&probe)), &["branch"])
            .add_processor("numbers", Box::new(RecordingProcessor::new(&probe)), &["branch"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        driver.process("in", json!("k"), json!(7)).unwrap();
        driver.process("in", json!("k"), json!(null)).unwrap();

        assert_eq!(
            probe.records(),
            vec![("numbers".to_string(), json!("k"), json!(7))]
        );
    }

    #[test]
    fn test_forward_to_index_out_of_range_fails() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor(
                "branch",
                Box::new(BranchByTypeProcessor::new(vec![
                    ValueType::String,
                    ValueType::Number,
                    ValueType::Bool,
                ])),
                &["src"],
            )
            .add_processor("a", Box::new(FailingProcessor::on_punctuate()), &["branch"])
            .add_processor("b", Box::new(FailingProcessor::on_punctuate()), &["branch"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();

        let err = driver.process("in", json!(1), json!(true)).unwrap_err();

        assert!(matches!(
            err,
            StreamsError::ChildIndexOutOfRange { ref node, index: 2, child_count: 2 } if node == "branch"
        ));
        assert_eq!(driver.current_node(), None);
    }

    #[test]
    fn test_forward_to_child_by_name() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("router", Box::new(RouteByKeyProcessor::new()), &["src"])
            .add_processor("left", Box::new(RecordingProcessor::new(&probe)), &["router"])
            .add_processor("right", Box::new(RecordingProcessor::new(&probe)), &["router"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        driver.process("in", json!("right"), json!(1)).unwrap();
        driver.process("in", json!("nowhere"), json!(2)).unwrap();

        assert_eq!(
            probe.records(),
            vec![("right".to_string(), json!("right"), json!(1))]
        );
    }

    #[test]
    fn test_loopback_cascade_completes_before_send_returns() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("p1", Box::new(SendingProcessor::new(&probe, "mid")), &["src"])
            .add_source("mid-src", &["mid"])
            .add_processor("p2", Box::new(RecordingProcessor::new(&probe)), &["mid-src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        driver.process("in", json!("k"), json!("v")).unwrap();

        assert_eq!(probe.events(), vec!["p1:before", "process:p2", "p1:after"]);
        assert_eq!(
            probe.records(),
            vec![("p2".to_string(), json!("k"), json!("v"))]
        );
        assert_eq!(driver.output_records().len(), 1);
        assert_eq!(driver.output_records()[0].topic, "mid");
    }

    #[test]
    fn test_capture_only_collector_stops_at_the_send() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("p1", Box::new(SendingProcessor::new(&probe, "mid")), &["src"])
            .add_source("mid-src", &["mid"])
            .add_processor("p2", Box::new(RecordingProcessor::new(&probe)), &["mid-src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::with_collector(
            topology,
            DriverConfig::default(),
            Box::new(CaptureOnlyCollector),
        )
        .unwrap();
        probe.clear();

        driver.process("in", json!("k"), json!("v")).unwrap();

        assert_eq!(probe.events(), vec!["p1:before", "p1:after"]);
        assert_eq!(driver.output_for("mid").len(), 1);
    }

    #[test]
    fn test_self_loop_terminates_when_processor_stops_sending() {
        let topology = TopologyBuilder::new()
            .add_source("S-src", &["S"])
            .add_processor("looper", Box::new(LoopingProcessor::new("S", 3)), &["S-src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();

        driver.process("S", json!("k"), json!(0)).unwrap();

        let values: Vec<_> = driver.output_for("S").iter().map(|r| r.value.clone()).collect();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(driver.current_node(), None);
    }

    #[test]
    fn test_cascade_depth_limit_stops_runaway_loop() {
        let topology = TopologyBuilder::new()
            .add_source("S-src", &["S"])
            .add_processor("looper", Box::new(LoopingProcessor::new("S", u32::MAX)), &["S-src"])
            .build()
            .unwrap();
        let config = DriverConfig {
            max_cascade_depth: Some(16),
            ..DriverConfig::default()
        };
        let mut driver = TopologyTestDriver::with_config(topology, config).unwrap();

        let err = driver.process("S", json!("k"), json!(0)).unwrap_err();

        assert!(matches!(err, StreamsError::CascadeDepthExceeded { limit: 16, .. }));
        assert_eq!(driver.current_node(), None);
    }

    #[test]
    fn test_cursor_is_restored_after_failure() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("bad-src", &["bad"])
            .add_processor("boom", Box::new(FailingProcessor::on_process()), &["bad-src"])
            .add_source("good-src", &["good"])
            .add_processor("ok", Box::new(RecordingProcessor::new(&probe)), &["good-src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        let err = driver.process("bad", json!(1), json!(1)).unwrap_err();
        assert!(matches!(err, StreamsError::ProcessorFailed { ref node, .. } if node == "boom"));
        assert_eq!(driver.current_node(), None);

        driver.process("good", json!(1), json!(1)).unwrap();
        assert_eq!(probe.events(), vec!["process:ok"]);
    }

    #[test]
    fn test_unrouted_send_fails_by_default() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_sink("out", "nowhere", &["src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();

        let err = driver.process("in", json!(1), json!(1)).unwrap_err();

        assert!(matches!(err, StreamsError::UnknownSource(ref topic) if topic == "nowhere"));
        // the record was logged before the collector saw it
        assert_eq!(driver.output_for("nowhere").len(), 1);
        assert_eq!(driver.current_node(), None);
    }

    #[test]
    fn test_unrouted_send_is_captured_when_configured() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_sink("out", "nowhere", &["src"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::with_config(topology, capture_config()).unwrap();
        driver.set_time(99);

        driver.process("in", json!("k"), json!("v")).unwrap();

        let records = driver.output_for("nowhere");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, json!("k"));
        assert_eq!(records[0].timestamp, 99);
    }

    #[test]
    fn test_word_count_with_punctuated_emit() {
        let topology = TopologyBuilder::new()
            .add_source("lines", &["text"])
            .add_processor("words", Box::new(SplitWordsProcessor::new()), &["lines"])
            .add_processor("count", Box::new(CountByKeyProcessor::new("counts")), &["words"])
            .add_processor(
                "buffer",
                Box::new(EmitStoreOnPunctuateProcessor::new("latest", true)),
                &["count"],
            )
            .add_sink("out", "word-counts", &["buffer"])
            .add_state_store(Box::new(KeyValueStoreSupplier::new("counts")), &["count"])
            .add_state_store(Box::new(KeyValueStoreSupplier::new("latest")), &["buffer"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::with_config(topology, capture_config()).unwrap();

        driver.process("text", json!(null), json!("b a b")).unwrap();
        assert!(driver.output_records().is_empty());

        driver.punctuate(1_000).unwrap();

        let emitted: Vec<_> = driver
            .output_for("word-counts")
            .iter()
            .map(|r| (r.key.clone(), r.value.clone(), r.timestamp))
            .collect();
        assert_eq!(
            emitted,
            vec![(json!("a"), json!(1), 1_000), (json!("b"), json!(2), 1_000)]
        );

        let latest = driver.state_store::<InMemoryKeyValueStore>("latest").unwrap();
        assert!(latest.is_empty());
        let counts = driver.state_store::<InMemoryKeyValueStore>("counts").unwrap();
        assert_eq!(counts.len(), 2);

        driver.punctuate(2_000).unwrap();
        assert_eq!(driver.output_records().len(), 2);
    }

    #[test]
    fn test_stateful_processor_without_its_store_fails_init() {
        let topology = TopologyBuilder::new()
            .add_source("src", &["in"])
            .add_processor("count", Box::new(CountByKeyProcessor::new("missing")), &["src"])
            .build()
            .unwrap();

        let err = TopologyTestDriver::new(topology).unwrap_err();
        assert!(matches!(err, StreamsError::StoreNotFound(ref name) if name == "missing"));
    }

    #[test]
    fn test_text_processors_reject_non_string_values() {
        let probe = Probe::new();
        let topology = TopologyBuilder::new()
            .add_source("case-src", &["case"])
            .add_processor("upper", Box::new(ChangeCaseProcessor::upper()), &["case-src"])
            .add_source("split-src", &["split"])
            .add_processor("split", Box::new(SplitWordsProcessor::new()), &["split-src"])
            .add_processor("after", Box::new(RecordingProcessor::new(&probe)), &["upper", "split"])
            .build()
            .unwrap();
        let mut driver = TopologyTestDriver::new(topology).unwrap();
        probe.clear();

        for (topic, node, value) in [("case", "upper", json!(42)), ("split", "split", json!(["a b"]))] {
            let err = driver.process(topic, json!("k"), value).unwrap_err();
            assert!(
                matches!(err, StreamsError::ProcessorFailed { node: ref failed, .. } if failed == node),
                "{}: {}",
                topic,
                err
            );
            assert_eq!(driver.current_node(), None);
        }
        assert!(probe.records().is_empty());
    }
}
