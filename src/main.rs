// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use the_dagwood_streams::config::{load_and_validate_config, TopologyFactory};
use the_dagwood_streams::engine::TopologyTestDriver;
use the_dagwood_streams::record::Datum;

/// One line of an events file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Event {
    Punctuate {
        punctuate: i64,
    },
    Record {
        topic: String,
        #[serde(default)]
        key: Datum,
        #[serde(default)]
        value: Datum,
        timestamp: Option<i64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <topology.(yaml|toml)> <events.jsonl>", args[0]);
        eprintln!("Example: {} demos/word_count.yaml demos/word_count.jsonl", args[0]);
        eprintln!("Set RUST_LOG=debug to trace every hop through the topology.");
        std::process::exit(1);
    }

    let cfg = load_and_validate_config(&args[1])
        .with_context(|| format!("loading topology from {}", args[1]))?;
    let (topology, driver_config) = TopologyFactory::from_config(&cfg)?;
    let mut driver = TopologyTestDriver::with_config(topology, driver_config)?;

    let events = fs::read_to_string(&args[2])
        .with_context(|| format!("reading events from {}", args[2]))?;

    for (index, line) in events.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_number = index + 1;

        let event: Event = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed event", args[2], line_number))?;

        let result = match event {
            Event::Punctuate { punctuate } => driver.punctuate(punctuate),
            Event::Record {
                topic,
                key,
                value,
                timestamp,
            } => {
                if let Some(timestamp) = timestamp {
                    driver.set_time(timestamp);
                }
                driver.process(&topic, key, value)
            }
        };

        if let Err(e) = result {
            bail!("{}:{}: {}", args[2], line_number, e);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "# output records")?;
    for record in driver.output_records() {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }

    writeln!(out, "# state stores")?;
    for (name, store) in driver.all_state_stores().iter() {
        let snapshot = store.snapshot().unwrap_or(Datum::Null);
        writeln!(out, "{}: {}", name, serde_json::to_string_pretty(&snapshot)?)?;
    }

    driver.close()?;
    Ok(())
}
