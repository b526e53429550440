//! Reference scenario source.
//!
//! Expands a [`CacheSpec`] into its cartesian product one configuration at a time. Nothing is built ahead of
//! the consumer: each call to `next` decodes the next index, constructs a fresh cache and seeds it.

use std::sync::Arc;

use cache_scenarios_core::views::Cache;

use super::context::{Context, FakeTicker};
use super::spec::{CacheSpec, Compute, Configuration, Expire, Maximum, Population};
use super::{Scenario, ScenarioSource};
use crate::reference::ReferenceCache;

/// Generates [`ReferenceCache`] scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheGenerator;

impl ScenarioSource for CacheGenerator {
    type Scenarios = Scenarios;

    fn generate(&self, spec: &CacheSpec, loading_only: bool) -> Scenarios {
        let compute = if loading_only {
            spec.compute.iter().copied().filter(|c| *c == Compute::Loading).collect()
        } else {
            spec.compute.clone()
        };
        let dimensions = Dimensions {
            population: spec.population.clone(),
            maximum_size: spec.maximum_size.clone(),
            expire_after_access: spec.expire_after_access.clone(),
            expire_after_write: spec.expire_after_write.clone(),
            compute,
        };
        let total = dimensions.total();
        tracing::debug!(total, loading_only, "expanding cache spec");
        Scenarios {
            dimensions,
            next: 0,
            total,
        }
    }
}

#[derive(Debug, Clone)]
struct Dimensions {
    population: Vec<Population>,
    maximum_size: Vec<Maximum>,
    expire_after_access: Vec<Expire>,
    expire_after_write: Vec<Expire>,
    compute: Vec<Compute>,
}

impl Dimensions {
    fn total(&self) -> usize {
        [
            self.population.len(),
            self.maximum_size.len(),
            self.expire_after_access.len(),
            self.expire_after_write.len(),
            self.compute.len(),
        ]
        .iter()
        .fold(1usize, |total, len| total.saturating_mul(*len))
    }

    /// Decode a mixed-radix index; the last dimension varies fastest.
    fn configuration(&self, mut index: usize) -> Configuration {
        let mut pick = |len: usize| {
            let digit = index % len;
            index /= len;
            digit
        };
        let compute = self.compute[pick(self.compute.len())];
        let expire_after_write = self.expire_after_write[pick(self.expire_after_write.len())];
        let expire_after_access = self.expire_after_access[pick(self.expire_after_access.len())];
        let maximum_size = self.maximum_size[pick(self.maximum_size.len())];
        let population = self.population[pick(self.population.len())];
        Configuration {
            population,
            maximum_size,
            expire_after_access,
            expire_after_write,
            compute,
        }
    }
}

/// Lazy iterator over the scenarios of one spec.
#[derive(Debug)]
pub struct Scenarios {
    dimensions: Dimensions,
    next: usize,
    total: usize,
}

impl Iterator for Scenarios {
    type Item = Scenario;

    fn next(&mut self) -> Option<Scenario> {
        if self.next >= self.total {
            return None;
        }
        let configuration = self.dimensions.configuration(self.next);
        self.next += 1;

        let ticker = Arc::new(FakeTicker::new());
        let cache = ReferenceCache::new(&configuration, Arc::clone(&ticker));
        for key in 1..=configuration.population.size() as i32 {
            cache.put(key, -key);
        }
        let context = Arc::new(Context::new(configuration, ticker));
        Some(Scenario::new(context, Arc::new(cache)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Scenarios {}
