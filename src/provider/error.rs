//! Binding failures.
//!
//! Every variant stems from a static mismatch between a descriptor and the caches its spec generates, so none
//! is retried and none produces a partial argument vector.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// An optional capability view of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Eviction,
    ExpireAfterAccess,
    ExpireAfterWrite,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Eviction => "eviction",
            View::ExpireAfterAccess => "expire-after-access",
            View::ExpireAfterWrite => "expire-after-write",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BindError {
    #[error("cache spec not found on test method `{method}`")]
    #[diagnostic(
        code(bind::missing_descriptor),
        help("add a `spec` describing the scenarios this test runs against")
    )]
    MissingDescriptor { method: String },

    #[error("parameter {index} requests the {view} view, which this cache does not support")]
    #[diagnostic(
        code(bind::view_unavailable),
        help("narrow the spec so every generated cache is configured for this view")
    )]
    ViewUnavailable { index: usize, view: View },

    #[error("expiration parameter {index} must have a qualifier annotation{}", found(.qualifier))]
    #[diagnostic(
        code(bind::ambiguous_parameter),
        help("qualify it with `expire_after_access` or `expire_after_write`")
    )]
    AmbiguousParameter { index: usize, qualifier: Option<String> },

    #[error("unknown parameter type at position {index}: {declared}")]
    #[diagnostic(code(bind::unresolvable_parameter))]
    UnresolvableParameter { index: usize, declared: String },
}

fn found(qualifier: &Option<String>) -> String {
    match qualifier {
        Some(name) => format!(" (found unrecognized `{name}`)"),
        None => String::new(),
    }
}
