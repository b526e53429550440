//! Scenario-to-test-case adaptation.
//!
//! [`TestCases`] wraps a scenario iterator and binds each scenario as it is pulled. Nothing is buffered: the only
//! state is the shared inspection and a couple of counters, so arbitrarily large scenario products stream through
//! in constant memory.

use std::sync::Arc;

use super::binder::{self, ArgumentVector};
use super::config::ProviderConfig;
use super::error::BindError;
use super::inspector::{self, Inspection};
use super::loading::requires_loading_cache;
use crate::descriptor::TestMethod;
use crate::scenario::{Scenario, ScenarioSource};

/// Lazy sequence of argument vectors, one per scenario, in scenario order.
#[derive(Debug)]
pub struct TestCases<I> {
    scenarios: I,
    inspection: Arc<Inspection>,
    remaining: Option<usize>,
    fail_fast: bool,
    failed: bool,
    pulled: usize,
}

impl<I> TestCases<I> {
    pub fn inspection(&self) -> &Inspection {
        &self.inspection
    }

    /// Number of scenarios pulled from the source so far.
    pub fn pulled(&self) -> usize {
        self.pulled
    }
}

impl<I: Iterator<Item = Scenario>> Iterator for TestCases<I> {
    type Item = Result<ArgumentVector, BindError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed && self.fail_fast {
            return None;
        }
        if self.remaining == Some(0) {
            return None;
        }
        let scenario = self.scenarios.next()?;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        let index = self.pulled;
        self.pulled += 1;

        let result = binder::bind(&self.inspection, &scenario);
        match &result {
            Ok(arguments) => {
                tracing::trace!(index, context = %scenario.context, arity = arguments.len(), "bound scenario");
            }
            Err(err) => {
                tracing::debug!(index, context = %scenario.context, error = %err, "binding failed");
                self.failed = true;
            }
        }
        Some(result)
    }
}

/// Adapt an already-generated scenario sequence.
pub fn as_test_cases<S>(inspection: Arc<Inspection>, scenarios: S, config: &ProviderConfig) -> TestCases<S::IntoIter>
where
    S: IntoIterator<Item = Scenario>,
{
    TestCases {
        scenarios: scenarios.into_iter(),
        inspection,
        remaining: config.limit,
        fail_fast: config.fail_fast,
        failed: false,
        pulled: 0,
    }
}

/// Provide the test cases of `method` from `source` with the default configuration.
pub fn provide_cases<S: ScenarioSource>(method: &TestMethod, source: &S) -> Result<TestCases<S::Scenarios>, BindError> {
    provide_cases_with(method, source, &ProviderConfig::default())
}

/// Provide the test cases of `method` from `source`.
///
/// Fails with [`BindError::MissingDescriptor`] before the source is asked for anything when the method carries
/// no spec. Otherwise the source is configured with the loading mode detected from the descriptor.
#[tracing::instrument(skip_all, fields(method = %method.name))]
pub fn provide_cases_with<S: ScenarioSource>(
    method: &TestMethod,
    source: &S,
    config: &ProviderConfig,
) -> Result<TestCases<S::Scenarios>, BindError> {
    let Some(spec) = method.spec.as_ref() else {
        return Err(BindError::MissingDescriptor {
            method: method.name.clone(),
        });
    };
    let loading_only = requires_loading_cache(method);
    tracing::debug!(loading_only, "providing test cases");

    let inspection = Arc::new(inspector::inspect(method));
    Ok(as_test_cases(inspection, source.generate(spec, loading_only), config))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::Arc;

    use cache_scenarios_core::types::TypeId;

    use super::*;
    use crate::descriptor::Param;
    use crate::scenario::{CacheGenerator, CacheSpec, Compute, Maximum};

    /// A single-use source that counts how many scenarios were pulled.
    struct CountingSource {
        scenarios: RefCell<Option<Vec<Scenario>>>,
        pulled: Rc<Cell<usize>>,
        loading_only: Cell<Option<bool>>,
    }

    impl CountingSource {
        fn new(count: usize) -> Self {
            let spec = CacheSpec::new().with_compute([Compute::Manual]);
            let scenarios = std::iter::repeat_with(|| CacheGenerator.generate(&spec, false))
                .flatten()
                .take(count)
                .collect();
            Self {
                scenarios: RefCell::new(Some(scenarios)),
                pulled: Rc::new(Cell::new(0)),
                loading_only: Cell::new(None),
            }
        }
    }

    impl ScenarioSource for CountingSource {
        type Scenarios = Box<dyn Iterator<Item = Scenario>>;

        fn generate(&self, _spec: &CacheSpec, loading_only: bool) -> Self::Scenarios {
            self.loading_only.set(Some(loading_only));
            let pulled = Rc::clone(&self.pulled);
            let scenarios = self.scenarios.borrow_mut().take().unwrap_or_default();
            Box::new(scenarios.into_iter().inspect(move |_| pulled.set(pulled.get() + 1)))
        }
    }

    fn method() -> TestMethod {
        TestMethod::new("t")
            .with_spec(CacheSpec::new())
            .param(Param::new(TypeId::Cache))
            .param(Param::new(TypeId::Map))
    }

    #[test]
    fn test_missing_spec_fails_before_generation() {
        let source = CountingSource::new(3);
        let err = provide_cases(&TestMethod::new("bare"), &source).err().expect("expected an error");
        assert_eq!(
            err,
            BindError::MissingDescriptor {
                method: "bare".to_string()
            }
        );
        assert_eq!(source.loading_only.get(), None);
    }

    #[test]
    fn test_cases_are_lazy() {
        let source = CountingSource::new(5);
        let mut cases = provide_cases(&method(), &source).unwrap();
        assert_eq!(source.pulled.get(), 0);

        cases.next().unwrap().unwrap();
        assert_eq!(source.pulled.get(), 1);
        assert_eq!(cases.pulled(), 1);
    }

    #[test]
    fn test_length_matches_source() {
        let source = CountingSource::new(7);
        let cases: Vec<_> = provide_cases(&method(), &source).unwrap().collect();
        assert_eq!(cases.len(), 7);
        assert!(cases.iter().all(|c| c.as_ref().is_ok_and(|args| args.len() == 2)));
    }

    #[test]
    fn test_single_use_source_is_exhausted_once() {
        let source = CountingSource::new(4);
        assert_eq!(provide_cases(&method(), &source).unwrap().count(), 4);
        assert_eq!(provide_cases(&method(), &source).unwrap().count(), 0);
    }

    #[test]
    fn test_restartable_source_traverses_afresh() {
        let first = provide_cases(&method(), &CacheGenerator).unwrap().count();
        let second = provide_cases(&method(), &CacheGenerator).unwrap().count();
        assert_eq!(first, 8);
        assert_eq!(first, second);
    }

    #[test]
    fn test_loading_mode_reaches_source() {
        let source = CountingSource::new(1);
        let method = TestMethod::new("t")
            .with_spec(CacheSpec::new())
            .param(Param::new(TypeId::LoadingCache));
        let _ = provide_cases(&method, &source).unwrap();
        assert_eq!(source.loading_only.get(), Some(true));
    }

    #[test]
    fn test_limit_caps_pulls() {
        let source = CountingSource::new(10);
        let config = ProviderConfig::new().with_limit(3);
        let cases = provide_cases_with(&method(), &source, &config).unwrap();
        assert_eq!(cases.count(), 3);
        assert_eq!(source.pulled.get(), 3);
    }

    fn eviction_method() -> TestMethod {
        TestMethod::new("t")
            .with_spec(CacheSpec::new().with_maximum_size([Maximum::Disabled, Maximum::Ten]))
            .param(Param::new(TypeId::Eviction))
    }

    #[test]
    fn test_first_error_ends_sequence_by_default() {
        let mut cases = provide_cases(&eviction_method(), &CacheGenerator).unwrap();
        assert!(cases.next().unwrap().is_err());
        assert!(cases.next().is_none());
        assert_eq!(cases.pulled(), 1);
    }

    #[test]
    fn test_keep_going_yields_every_scenario() {
        let config = ProviderConfig::new().with_fail_fast(false);
        let results: Vec<_> = provide_cases_with(&eviction_method(), &CacheGenerator, &config)
            .unwrap()
            .collect();
        assert_eq!(results.len(), 16);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 8);
    }

    #[test]
    fn test_as_test_cases_over_plain_vec() {
        let spec = CacheSpec::new().with_compute([Compute::Manual]);
        let scenarios: Vec<Scenario> = CacheGenerator.generate(&spec, false).collect();
        let inspection = Arc::new(inspector::inspect(&TestMethod::new("empty")));
        let cases: Vec<_> = as_test_cases(inspection, scenarios, &ProviderConfig::default()).collect();
        assert_eq!(cases.len(), 4);
        assert!(cases.iter().all(|c| c.as_ref().is_ok_and(|args| args.is_empty())));
    }
}
