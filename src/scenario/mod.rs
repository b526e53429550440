//! Scenarios: the `(Context, Cache)` pairs a test runs against.
//!
//! ## Modules
//!
//! - `spec` - declarative scenario shape ([`CacheSpec`])
//! - `context` - per-scenario metadata and the fake time source
//! - `generator` - reference [`ScenarioSource`] expanding a spec lazily
//!
//! The binder only depends on [`Scenario`] and [`ScenarioSource`]; how scenarios are produced is up to the
//! source.

pub mod context;
pub mod generator;
pub mod spec;

use std::sync::Arc;

use cache_scenarios_core::views::Cache;

pub use context::{Context, FakeTicker};
pub use generator::CacheGenerator;
pub use spec::{CacheSpec, Compute, Configuration, Expire, Maximum, Population};

/// One generated test case instance.
///
/// Produced once, consumed once. The cache is never shared with another scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub context: Arc<Context>,
    pub cache: Arc<dyn Cache>,
}

impl Scenario {
    pub fn new(context: Arc<Context>, cache: Arc<dyn Cache>) -> Self {
        Self { context, cache }
    }
}

/// Produces the scenarios for a spec.
///
/// The returned iterator is lazy, finite and single-pass. When `loading_only` is set the source must only
/// generate caches that load missing entries.
pub trait ScenarioSource {
    type Scenarios: Iterator<Item = Scenario>;

    fn generate(&self, spec: &CacheSpec, loading_only: bool) -> Self::Scenarios;
}
