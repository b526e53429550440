//! Per-scenario context and its time source.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use cache_scenarios_core::views::Ticker;

use super::spec::Configuration;

/// A ticker that only moves when told to.
#[derive(Debug, Default)]
pub struct FakeTicker {
    nanos: AtomicU64,
}

impl FakeTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, saturating at `u64::MAX` nanoseconds.
    pub fn advance(&self, duration: Duration) -> &Self {
        let step = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| Some(now.saturating_add(step)));
        self
    }
}

impl Ticker for FakeTicker {
    fn read(&self) -> u64 {
        self.nanos.load(Ordering::Acquire)
    }
}

/// Metadata for one generated scenario.
///
/// Immutable once built; shared between every argument slot that asks for it.
#[derive(Debug)]
pub struct Context {
    configuration: Configuration,
    ticker: Arc<FakeTicker>,
}

impl Context {
    pub fn new(configuration: Configuration, ticker: Arc<FakeTicker>) -> Self {
        Self { configuration, ticker }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn ticker(&self) -> &Arc<FakeTicker> {
        &self.ticker
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_advances() {
        let ticker = FakeTicker::new();
        ticker.advance(Duration::from_nanos(5)).advance(Duration::from_nanos(7));
        assert_eq!(ticker.read(), 12);
    }

    #[test]
    fn test_ticker_saturates() {
        let ticker = FakeTicker::new();
        ticker.advance(Duration::MAX).advance(Duration::from_secs(1));
        assert_eq!(ticker.read(), u64::MAX);
    }
}
