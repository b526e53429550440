//! Parameter binding.
//!
//! Each slot is resolved independently by walking a fixed list of candidates and taking the first whose runtime
//! kind the declared type accepts. Broad candidates (the context, the cache itself) come first so a parameter
//! typed to accept them is never narrowed to a view.
//!
//! | order | candidate  | runtime kind                 | bound value                      |
//! |-------|------------|------------------------------|----------------------------------|
//! | 1     | context    | `Context`                    | the scenario context             |
//! | 2     | resource   | `Cache` or `LoadingCache`    | the cache's default view         |
//! | 3     | map        | `Map`                        | `cache.as_map()`                 |
//! | 4     | eviction   | `Eviction`                   | `cache.eviction()`               |
//! | 5     | expiration | `Expiration`                 | picked by the slot's qualifier   |
//! | 6     | ticker     | `Ticker`                     | the context's time source        |

use std::fmt;
use std::sync::Arc;

use cache_scenarios_core::qualifiers::QualifierId;
use cache_scenarios_core::types::{self, TypeId};
use cache_scenarios_core::views::{Cache, Eviction, Expiration, MapView};

use super::error::{BindError, View};
use super::inspector::{Inspection, ParamSlot};
use crate::scenario::{Context, FakeTicker, Scenario};

/// One bound value.
#[derive(Debug, Clone)]
pub enum Argument {
    Context(Arc<Context>),
    Cache(Arc<dyn Cache>),
    Map(Arc<dyn MapView>),
    Eviction(Arc<dyn Eviction>),
    Expiration {
        view: Arc<dyn Expiration>,
        flavour: QualifierId,
    },
    Ticker(Arc<FakeTicker>),
}

/// The bound values for one scenario, in descriptor order.
pub type ArgumentVector = Vec<Argument>;

impl Argument {
    /// The runtime kind of the bound value.
    pub fn kind(&self) -> TypeId {
        match self {
            Argument::Context(_) => TypeId::Context,
            Argument::Cache(cache) if cache.is_loading() => TypeId::LoadingCache,
            Argument::Cache(_) => TypeId::Cache,
            Argument::Map(_) => TypeId::Map,
            Argument::Eviction(_) => TypeId::Eviction,
            Argument::Expiration { .. } => TypeId::Expiration,
            Argument::Ticker(_) => TypeId::Ticker,
        }
    }

    pub fn as_context(&self) -> Option<&Arc<Context>> {
        match self {
            Argument::Context(context) => Some(context),
            _ => None,
        }
    }

    pub fn as_cache(&self) -> Option<&Arc<dyn Cache>> {
        match self {
            Argument::Cache(cache) => Some(cache),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Arc<dyn MapView>> {
        match self {
            Argument::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_eviction(&self) -> Option<&Arc<dyn Eviction>> {
        match self {
            Argument::Eviction(eviction) => Some(eviction),
            _ => None,
        }
    }

    pub fn as_expiration(&self) -> Option<&Arc<dyn Expiration>> {
        match self {
            Argument::Expiration { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn as_ticker(&self) -> Option<&Arc<FakeTicker>> {
        match self {
            Argument::Ticker(ticker) => Some(ticker),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Expiration { flavour, .. } => {
                write!(f, "Expiration({})", cache_scenarios_core::qualifiers::as_str(*flavour))
            }
            other => f.write_str(types::as_str(other.kind())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Context,
    Resource,
    Map,
    Eviction,
    Expiration,
    Ticker,
}

const RESOLUTION_ORDER: [Candidate; 6] = [
    Candidate::Context,
    Candidate::Resource,
    Candidate::Map,
    Candidate::Eviction,
    Candidate::Expiration,
    Candidate::Ticker,
];

impl Candidate {
    fn runtime_kind(self, scenario: &Scenario) -> TypeId {
        match self {
            Candidate::Context => TypeId::Context,
            Candidate::Resource if scenario.cache.is_loading() => TypeId::LoadingCache,
            Candidate::Resource => TypeId::Cache,
            Candidate::Map => TypeId::Map,
            Candidate::Eviction => TypeId::Eviction,
            Candidate::Expiration => TypeId::Expiration,
            Candidate::Ticker => TypeId::Ticker,
        }
    }

    fn bind(self, slot: &ParamSlot, scenario: &Scenario) -> Result<Argument, BindError> {
        let unavailable = |view| BindError::ViewUnavailable {
            index: slot.index,
            view,
        };
        match self {
            Candidate::Context => Ok(Argument::Context(Arc::clone(&scenario.context))),
            Candidate::Resource => Ok(Argument::Cache(Arc::clone(&scenario.cache))),
            Candidate::Map => Ok(Argument::Map(scenario.cache.as_map())),
            Candidate::Eviction => scenario
                .cache
                .eviction()
                .map(Argument::Eviction)
                .ok_or_else(|| unavailable(View::Eviction)),
            Candidate::Expiration => {
                let flavour = slot.qualifier.as_ref().and_then(|q| q.id()).ok_or_else(|| {
                    BindError::AmbiguousParameter {
                        index: slot.index,
                        qualifier: slot.qualifier.as_ref().map(|q| q.to_string()),
                    }
                })?;
                let (view, missing) = match flavour {
                    QualifierId::ExpireAfterAccess => (scenario.cache.expire_after_access(), View::ExpireAfterAccess),
                    QualifierId::ExpireAfterWrite => (scenario.cache.expire_after_write(), View::ExpireAfterWrite),
                };
                view.map(|view| Argument::Expiration { view, flavour })
                    .ok_or_else(|| unavailable(missing))
            }
            Candidate::Ticker => Ok(Argument::Ticker(Arc::clone(scenario.context.ticker()))),
        }
    }
}

/// Resolve one slot against one scenario.
pub fn resolve(slot: &ParamSlot, scenario: &Scenario) -> Result<Argument, BindError> {
    RESOLUTION_ORDER
        .iter()
        .copied()
        .find(|candidate| slot.declared.accepts(candidate.runtime_kind(scenario)))
        .ok_or_else(|| BindError::UnresolvableParameter {
            index: slot.index,
            declared: slot.declared.to_string(),
        })?
        .bind(slot, scenario)
}

/// Build the argument vector for one scenario, failing on the first slot that does not resolve.
pub fn bind(inspection: &Inspection, scenario: &Scenario) -> Result<ArgumentVector, BindError> {
    inspection.slots().iter().map(|slot| resolve(slot, scenario)).collect()
}
