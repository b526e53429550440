#![forbid(unsafe_code)]
//! Cache scenario binder
//!
//! Binds generated cache scenarios to the parameters a table-driven test declares. A test describes itself with a
//! [`TestMethod`]: the scenario shape it runs against and an ordered list of parameter types (the context, the
//! cache, a map view, eviction or expiration control, the ticker). For every scenario a source produces, the
//! provider resolves each parameter and yields the argument vector, lazily and in scenario order.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a logic error, use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod cli;
pub mod descriptor;
pub mod provider;
pub mod reference;
pub mod scenario;
pub mod version;

pub use descriptor::{DeclaredType, Param, Qualifier, TestMethod};
pub use provider::{Argument, ArgumentVector, BindError, ProviderConfig, TestCases, provide_cases, provide_cases_with};
pub use reference::ReferenceCache;
pub use scenario::{CacheGenerator, CacheSpec, Context, FakeTicker, Scenario, ScenarioSource};
