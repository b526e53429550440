//! Qualifier vocabulary.
//!
//! Qualifiers break the one genuine ambiguity in the type vocabulary: the access-based and write-based
//! expiration views share [`crate::types::TypeId::Expiration`].

use crate::registry::{self, VocabInfo};

/// Stable identifier for a recognized qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierId {
    ExpireAfterAccess,
    ExpireAfterWrite,
}

/// Metadata entry for a qualifier.
pub type QualifierInfo = VocabInfo<QualifierId>;

/// Registry of recognized qualifiers.
pub const QUALIFIERS: &[QualifierInfo] = &[
    VocabInfo {
        id: QualifierId::ExpireAfterAccess,
        canonical: "expire_after_access",
        aliases: &["ExpireAfterAccess", "access"],
        description: "Select the access-based expiration view.",
    },
    VocabInfo {
        id: QualifierId::ExpireAfterWrite,
        canonical: "expire_after_write",
        aliases: &["ExpireAfterWrite", "write"],
        description: "Select the write-based expiration view.",
    },
];

/// Resolve a qualifier spelling to its stable id.
pub fn from_str(name: &str) -> Option<QualifierId> {
    registry::lookup(QUALIFIERS, name)
}

/// Return the canonical spelling for a qualifier.
pub fn as_str(id: QualifierId) -> &'static str {
    match id {
        QualifierId::ExpireAfterAccess => QUALIFIERS[0].canonical,
        QualifierId::ExpireAfterWrite => QUALIFIERS[1].canonical,
    }
}
