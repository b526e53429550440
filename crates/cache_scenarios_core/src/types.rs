//! Declarable parameter type vocabulary.
//!
//! A test method declares the values it wants by type. The set of types the binder understands is closed and
//! lives in [`TYPES`]; anything else is carried as an unknown name and never resolves.
//!
//! The same ids describe the *runtime* kind of every candidate value (the context, the cache, each view), so
//! resolution is a single question: is the candidate's kind a subtype of the declared type?
//!
//! ## Examples
//! ```rust
//! use cache_scenarios_core::types::{self, TypeId};
//!
//! assert_eq!(types::from_str("LoadingCache"), Some(TypeId::LoadingCache));
//! assert!(TypeId::Cache.accepts(TypeId::LoadingCache));
//! assert!(!TypeId::LoadingCache.accepts(TypeId::Cache));
//! ```

use crate::registry::{self, VocabInfo};

/// Stable identifier for a declarable (and runtime) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeId {
    /// Top of the lattice; accepts every candidate.
    Any,
    /// The per-scenario context.
    Context,
    /// Any cache, loading or not.
    Cache,
    /// A cache that loads missing entries synchronously.
    LoadingCache,
    /// Map-like view over the cache.
    Map,
    /// Size-bounded eviction control.
    Eviction,
    /// Expiration control; access and write flavours share this type.
    Expiration,
    /// Time source owned by the context.
    Ticker,
}

/// Metadata entry for a declarable type.
pub type TypeInfo = VocabInfo<TypeId>;

/// Registry of declarable types.
pub const TYPES: &[TypeInfo] = &[
    info(TypeId::Any, "Any", &["Object"], "Accepts any candidate; binds the context."),
    info(TypeId::Context, "Context", &["CacheContext"], "Scenario metadata and time source."),
    info(TypeId::Cache, "Cache", &[], "The generated cache through its default view."),
    info(
        TypeId::LoadingCache,
        "LoadingCache",
        &[],
        "A loading cache; restricts generation to loading-capable caches.",
    ),
    info(TypeId::Map, "Map", &["ConcurrentMap"], "Map view backed by the same cache."),
    info(TypeId::Eviction, "Eviction", &[], "Maximum size control; requires a bounded cache."),
    info(
        TypeId::Expiration,
        "Expiration",
        &[],
        "Expiration control; requires an access or write qualifier.",
    ),
    info(TypeId::Ticker, "Ticker", &["FakeTicker"], "The scenario's manually advanced time source."),
];

impl TypeId {
    /// Return the immediate supertype, or `None` for [`TypeId::Any`].
    pub fn supertype(self) -> Option<TypeId> {
        match self {
            TypeId::Any => None,
            TypeId::LoadingCache => Some(TypeId::Cache),
            _ => Some(TypeId::Any),
        }
    }

    /// Return true when `self` is `other` or one of its descendants.
    pub fn is_subtype_of(self, other: TypeId) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == other {
                return true;
            }
            current = ty.supertype();
        }
        false
    }

    /// Return true when a parameter declared as `self` can hold a value whose runtime kind is `runtime`.
    pub fn accepts(self, runtime: TypeId) -> bool {
        runtime.is_subtype_of(self)
    }

    /// Return true when more than one view shares this type, so a qualifier must pick one.
    pub fn needs_qualifier(self) -> bool {
        matches!(self, TypeId::Expiration)
    }
}

/// Resolve a type name to its stable id.
pub fn from_str(name: &str) -> Option<TypeId> {
    registry::lookup(TYPES, name)
}

/// Return the canonical spelling for a type.
pub fn as_str(id: TypeId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a type.
pub fn info_for(id: TypeId) -> &'static TypeInfo {
    TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("INVARIANT: every TypeId has a registry entry")
}

const fn info(
    id: TypeId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> TypeInfo {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_accepts_everything() {
        for info in TYPES {
            assert!(TypeId::Any.accepts(info.id), "Any should accept {:?}", info.id);
        }
    }

    #[test]
    fn test_loading_cache_is_a_cache() {
        assert!(TypeId::LoadingCache.is_subtype_of(TypeId::Cache));
        assert!(TypeId::LoadingCache.is_subtype_of(TypeId::Any));
        assert!(!TypeId::Cache.is_subtype_of(TypeId::LoadingCache));
    }

    #[test]
    fn test_views_accept_only_themselves() {
        let views = [TypeId::Map, TypeId::Eviction, TypeId::Expiration, TypeId::Ticker];
        for declared in views {
            for info in TYPES {
                assert_eq!(declared.accepts(info.id), declared == info.id);
            }
        }
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(from_str("Object"), Some(TypeId::Any));
        assert_eq!(from_str("CacheContext"), Some(TypeId::Context));
        assert_eq!(from_str("ConcurrentMap"), Some(TypeId::Map));
        assert_eq!(from_str("Policy"), None);
    }
}
