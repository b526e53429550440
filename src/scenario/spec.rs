//! Declarative scenario shape.
//!
//! A [`CacheSpec`] lists, per dimension, the configurations a test wants to run against. The generator expands
//! the cartesian product lazily; the binder never looks inside.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How many entries a cache holds when handed to the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    Empty,
    Single,
    Partial,
    Full,
}

impl Population {
    /// Number of entries to seed.
    pub fn size(self) -> usize {
        match self {
            Population::Empty => 0,
            Population::Single => 1,
            Population::Partial => 25,
            Population::Full => 50,
        }
    }
}

/// Maximum size bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maximum {
    /// Unbounded; the cache exposes no eviction view.
    Disabled,
    Zero,
    One,
    Ten,
    /// Bounded, but larger than any population.
    Full,
}

impl Maximum {
    pub fn bound(self) -> Option<u64> {
        match self {
            Maximum::Disabled => None,
            Maximum::Zero => Some(0),
            Maximum::One => Some(1),
            Maximum::Ten => Some(10),
            Maximum::Full => Some(Population::Full.size() as u64 * 2),
        }
    }
}

/// Expiration setting for one flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expire {
    /// No expiration; the cache exposes no view for this flavour.
    Disabled,
    Immediately,
    OneMinute,
    Forever,
}

impl Expire {
    pub fn duration(self) -> Option<Duration> {
        match self {
            Expire::Disabled => None,
            Expire::Immediately => Some(Duration::ZERO),
            Expire::OneMinute => Some(Duration::from_secs(60)),
            Expire::Forever => Some(Duration::MAX),
        }
    }
}

/// Whether the cache loads missing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compute {
    Manual,
    Loading,
}

/// Declarative description of the scenarios a test runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSpec {
    pub population: Vec<Population>,
    pub maximum_size: Vec<Maximum>,
    pub expire_after_access: Vec<Expire>,
    pub expire_after_write: Vec<Expire>,
    pub compute: Vec<Compute>,
}

impl Default for CacheSpec {
    fn default() -> Self {
        Self {
            population: vec![Population::Empty, Population::Single, Population::Partial, Population::Full],
            maximum_size: vec![Maximum::Disabled],
            expire_after_access: vec![Expire::Disabled],
            expire_after_write: vec![Expire::Disabled],
            compute: vec![Compute::Manual, Compute::Loading],
        }
    }
}

impl CacheSpec {
    /// Create a spec with the default dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_population(mut self, population: impl Into<Vec<Population>>) -> Self {
        self.population = population.into();
        self
    }

    pub fn with_maximum_size(mut self, maximum: impl Into<Vec<Maximum>>) -> Self {
        self.maximum_size = maximum.into();
        self
    }

    pub fn with_expire_after_access(mut self, expire: impl Into<Vec<Expire>>) -> Self {
        self.expire_after_access = expire.into();
        self
    }

    pub fn with_expire_after_write(mut self, expire: impl Into<Vec<Expire>>) -> Self {
        self.expire_after_write = expire.into();
        self
    }

    pub fn with_compute(mut self, compute: impl Into<Vec<Compute>>) -> Self {
        self.compute = compute.into();
        self
    }
}

/// One point in the spec's cartesian product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub population: Population,
    pub maximum_size: Maximum,
    pub expire_after_access: Expire,
    pub expire_after_write: Expire,
    pub compute: Compute,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "population={:?} maximum={:?} access={:?} write={:?} compute={:?}",
            self.population, self.maximum_size, self.expire_after_access, self.expire_after_write, self.compute
        )
    }
}
