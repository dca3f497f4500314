//! Shared test setup and fixtures.

use std::env;
use std::path::PathBuf;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::Configuration;
use crate::domain::Node;
use crate::infrastructure::backends::{FlatBackend, MemoryStore};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Single equipment entry with one value of each JSON scalar kind.
pub const EQUIPMENT_JSON: &str =
    r#"{"equipment_1":{"enabled":true,"type":"rorc","serial":33333,"channel":0}}"#;

/// Absolute path of a file under `tests/resources`.
pub fn resource_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

/// [`EQUIPMENT_JSON`] as a tree.
pub fn equipment_tree() -> Node {
    crate::branch! {
        "equipment_1" => crate::branch! {
            "enabled" => true,
            "type" => "rorc",
            "serial" => 33333,
            "channel" => 0,
        },
    }
}

/// Configuration over an in-memory flat store seeded with `entries`.
pub fn memory_configuration(entries: &[(&str, &str)]) -> Configuration {
    let store: MemoryStore = entries.iter().copied().collect();
    Configuration::new(Box::new(FlatBackend::new(store)))
}
