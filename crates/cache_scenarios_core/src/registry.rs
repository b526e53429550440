//! Shareable metadata for the `cache_scenarios_core` registries.
//!
//! Both the declarable type registry and the qualifier registry are **registry-first**: callers work with
//! stable ids and look up spellings and descriptions through `const` tables instead of comparing strings.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for diagnostics and the CLI listing; resolution rules live with the ids themselves.
//!
//! ## See also
//! - [`crate::types`]
//! - [`crate::qualifiers`]

/// Shared metadata shape for vocabulary items.
///
/// Every item carries:
/// - a stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - a one-line `description` used by docs and diagnostics
///
/// ## Examples
/// ```rust
/// use cache_scenarios_core::registry::VocabInfo;
///
/// let info = VocabInfo { id: 1u8, canonical: "one", aliases: &["uno"], description: "The first." };
/// assert!(info.matches("uno"));
/// assert!(!info.matches("two"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl<Id> VocabInfo<Id> {
    /// Return true when `name` is the canonical spelling or one of the aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.canonical == name || self.aliases.contains(&name)
    }
}

/// Look up the id for `name` in a registry table.
///
/// Spellings are unique across a table, so the first match is the only one.
pub fn lookup<Id: Copy>(table: &[VocabInfo<Id>], name: &str) -> Option<Id> {
    table.iter().find(|item| item.matches(name)).map(|item| item.id)
}
