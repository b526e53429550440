//! Loading mode detection.
//!
//! A whole-descriptor scan: if any parameter is declared as a loading cache, the scenario source is told to
//! generate loading caches only. The scan is deliberately coarse; it never looks at positions or qualifiers.

use cache_scenarios_core::types::TypeId;

use crate::descriptor::TestMethod;

/// Return true when `method` declares a loading cache anywhere in its parameter list.
pub fn requires_loading_cache(method: &TestMethod) -> bool {
    method
        .params
        .iter()
        .filter_map(|param| param.declared.type_id())
        .any(|id| id.is_subtype_of(TypeId::LoadingCache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Param;

    #[test]
    fn test_loading_cache_parameter_triggers() {
        let method = TestMethod::new("get")
            .param(Param::new(TypeId::Context))
            .param(Param::new(TypeId::LoadingCache));
        assert!(requires_loading_cache(&method));
    }

    #[test]
    fn test_supertypes_do_not_trigger() {
        let method = TestMethod::new("put")
            .param(Param::new(TypeId::Cache))
            .param(Param::new(TypeId::Any))
            .param(Param::new("LoadingCacheLike"));
        assert!(!requires_loading_cache(&method));
    }

    #[test]
    fn test_empty_descriptor_defaults_to_false() {
        assert!(!requires_loading_cache(&TestMethod::new("empty")));
    }
}
