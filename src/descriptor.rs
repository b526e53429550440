//! Test method descriptors.
//!
//! A [`TestMethod`] is what a test declares about itself: its name, the scenario shape it runs against and the
//! ordered parameters it wants bound. Descriptors are plain data; they can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "name": "put_replace",
//!   "spec": { "expire_after_write": ["one_minute"] },
//!   "params": [
//!     { "type": "Cache" },
//!     { "type": "Expiration", "qualifier": "expire_after_write" }
//!   ]
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use cache_scenarios_core::qualifiers::{self, QualifierId};
use cache_scenarios_core::types::{self, TypeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scenario::CacheSpec;

/// Errors raised while loading a descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

/// A declared parameter type.
///
/// Names outside the vocabulary are kept verbatim so diagnostics can report them; they never resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredType {
    Known(TypeId),
    Named(String),
}

impl DeclaredType {
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            DeclaredType::Known(id) => Some(*id),
            DeclaredType::Named(_) => None,
        }
    }

    /// Structural assignability: can a parameter of this type hold a value of kind `runtime`?
    pub fn accepts(&self, runtime: TypeId) -> bool {
        self.type_id().is_some_and(|id| id.accepts(runtime))
    }
}

impl From<TypeId> for DeclaredType {
    fn from(id: TypeId) -> Self {
        DeclaredType::Known(id)
    }
}

impl From<&str> for DeclaredType {
    fn from(name: &str) -> Self {
        match types::from_str(name) {
            Some(id) => DeclaredType::Known(id),
            None => DeclaredType::Named(name.to_string()),
        }
    }
}

impl From<String> for DeclaredType {
    fn from(name: String) -> Self {
        match types::from_str(&name) {
            Some(id) => DeclaredType::Known(id),
            None => DeclaredType::Named(name),
        }
    }
}

impl From<DeclaredType> for String {
    fn from(declared: DeclaredType) -> Self {
        declared.to_string()
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Known(id) => f.write_str(types::as_str(*id)),
            DeclaredType::Named(name) => f.write_str(name),
        }
    }
}

/// A qualifier attached to one parameter position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Qualifier {
    Known(QualifierId),
    /// Unrecognized spelling; treated like a missing qualifier at bind time.
    Other(String),
}

impl Qualifier {
    pub fn id(&self) -> Option<QualifierId> {
        match self {
            Qualifier::Known(id) => Some(*id),
            Qualifier::Other(_) => None,
        }
    }
}

impl From<QualifierId> for Qualifier {
    fn from(id: QualifierId) -> Self {
        Qualifier::Known(id)
    }
}

impl From<String> for Qualifier {
    fn from(name: String) -> Self {
        match qualifiers::from_str(&name) {
            Some(id) => Qualifier::Known(id),
            None => Qualifier::Other(name),
        }
    }
}

impl From<Qualifier> for String {
    fn from(qualifier: Qualifier) -> Self {
        qualifier.to_string()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Known(id) => f.write_str(qualifiers::as_str(*id)),
            Qualifier::Other(name) => f.write_str(name),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub declared: DeclaredType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<Qualifier>,
}

impl Param {
    pub fn new(declared: impl Into<DeclaredType>) -> Self {
        Self {
            declared: declared.into(),
            qualifier: None,
        }
    }

    pub fn qualified(mut self, qualifier: impl Into<Qualifier>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

/// Everything a test method declares about the values it wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestMethod {
    pub name: String,
    /// The scenario shape; a provider refuses to run without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<CacheSpec>,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl TestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: None,
            params: Vec::new(),
        }
    }

    pub fn with_spec(mut self, spec: CacheSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn from_json(source: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let source = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_parses_known_and_unknown() {
        assert_eq!(DeclaredType::from("Map"), DeclaredType::Known(TypeId::Map));
        assert_eq!(DeclaredType::from("ConcurrentMap"), DeclaredType::Known(TypeId::Map));
        assert_eq!(DeclaredType::from("Policy"), DeclaredType::Named("Policy".to_string()));
    }

    #[test]
    fn test_named_type_accepts_nothing() {
        let declared = DeclaredType::from("Policy");
        for info in types::TYPES {
            assert!(!declared.accepts(info.id));
        }
    }

    #[test]
    fn test_descriptor_from_json() {
        let method = TestMethod::from_json(
            r#"{
                "name": "put_replace",
                "spec": {"expire_after_write": ["one_minute"]},
                "params": [
                    {"type": "Cache"},
                    {"type": "Expiration", "qualifier": "write"},
                    {"type": "Expiration", "qualifier": "sometimes"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(method.name, "put_replace");
        assert!(method.spec.is_some());
        assert_eq!(method.params.len(), 3);
        assert_eq!(method.params[0], Param::new(TypeId::Cache));
        assert_eq!(
            method.params[1],
            Param::new(TypeId::Expiration).qualified(QualifierId::ExpireAfterWrite)
        );
        assert_eq!(method.params[2].qualifier, Some(Qualifier::Other("sometimes".to_string())));
    }

    #[test]
    fn test_descriptor_without_spec_or_params() {
        let method = TestMethod::from_json(r#"{"name": "bare"}"#).unwrap();
        assert!(method.spec.is_none());
        assert!(method.params.is_empty());
    }

    #[test]
    fn test_descriptor_round_trips_canonical_spellings() {
        let method = TestMethod::new("t")
            .param(Param::new("Object"))
            .param(Param::new(TypeId::Expiration).qualified(QualifierId::ExpireAfterAccess));
        let json = serde_json::to_string(&method).unwrap();
        assert!(json.contains(r#""type":"Any""#));
        assert!(json.contains(r#""qualifier":"expire_after_access""#));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TestMethod::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DescriptorError::Io { .. }));
    }
}
