//! Provide the closed vocabulary and capability view traits shared by the scenario binder and cache
//! implementations under test.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - the registry of declarable parameter types and their subtype lattice ([`types`]),
//! - the registry of disambiguating qualifiers ([`qualifiers`]),
//! - the capability view traits a generated cache exposes ([`views`]).
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, no binder-specific types.
//! - Registries follow one shape ([`registry::VocabInfo`]) so tooling can list and document them uniformly.

pub mod qualifiers;
pub mod registry;
pub mod types;
pub mod views;
