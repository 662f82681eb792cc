//! Rill CLI
//!
//! Reads `<station>;<value>` lines from standard input until end of stream,
//! then prints the CPU time consumed and one aggregated row per station.
//!
//! Run with: cargo run --release < data.txt
//!
//! Environment variables:
//! - RILL_MAX_KEYS: Maximum distinct stations (default: 16384)
//! - RILL_MAX_NODES: Trie node arena capacity (default: 1048576)
//! - RILL_MAX_LINE_LEN: Maximum line length in bytes (default: 512)
//! - RUST_LOG: Log level (default: off)

use rill::{clock, Engine, EngineConfig};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn run() -> rill::Result<()> {
    let config = EngineConfig::default()
        .with_max_keys(env_usize("RILL_MAX_KEYS", rill::ingest::DEFAULT_MAX_KEYS))
        .with_max_nodes(env_usize("RILL_MAX_NODES", rill::ingest::DEFAULT_MAX_NODES))
        .with_max_line_len(env_usize(
            "RILL_MAX_LINE_LEN",
            rill::ingest::DEFAULT_MAX_LINE_LEN,
        ));

    let mut engine = Engine::new(config);
    engine.ingest_reader(io::stdin().lock())?;

    // CPU time since process start; the millisecond figure is the total,
    // not the sub-second remainder.
    let cpu = clock::process_cpu_time();
    println!("Runtime: {}s {}ms", cpu.as_secs(), cpu.as_millis());

    for summary in engine.summaries() {
        println!("{summary}");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "off".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run() {
        eprintln!("rill: {err}");
        std::process::exit(1);
    }
}
