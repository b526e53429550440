//! Scenario-to-parameter binding.
//!
//! A provider takes a [`TestMethod`](crate::descriptor::TestMethod) and a
//! [`ScenarioSource`](crate::scenario::ScenarioSource) and yields, lazily, one argument vector per scenario.
//!
//! ## Modules
//!
//! - `inspector` - descriptor inspection and per-method memoization
//! - `loading` - whole-descriptor loading mode detection
//! - `binder` - per-slot resolution against one scenario
//! - `cases` - the lazy adapter and the `provide_cases` entry points
//! - `config` - provider settings
//! - `error` - [`BindError`]
//!
//! ## Examples
//! ```rust
//! use cache_scenarios::descriptor::{Param, TestMethod};
//! use cache_scenarios::provider::provide_cases;
//! use cache_scenarios::scenario::{CacheGenerator, CacheSpec};
//! use cache_scenarios_core::types::TypeId;
//!
//! let method = TestMethod::new("put")
//!     .with_spec(CacheSpec::new())
//!     .param(Param::new(TypeId::Context))
//!     .param(Param::new(TypeId::Map));
//!
//! for case in provide_cases(&method, &CacheGenerator).unwrap() {
//!     assert_eq!(case.unwrap().len(), 2);
//! }
//! ```

pub mod binder;
pub mod cases;
pub mod config;
pub mod error;
pub mod inspector;
pub mod loading;

pub use binder::{Argument, ArgumentVector, bind, resolve};
pub use cases::{TestCases, as_test_cases, provide_cases, provide_cases_with};
pub use config::ProviderConfig;
pub use error::{BindError, View};
pub use inspector::{Inspection, InspectionCache, ParamSlot, inspect};
pub use loading::requires_loading_cache;
