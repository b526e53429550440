//! Descriptor inspection.
//!
//! Turns a [`TestMethod`] into the ordered slots the binder walks for every scenario. Inspection is pure and
//! never fails: ambiguity and qualifier problems are reported by the binder, which knows the position and the
//! cache involved.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::{DeclaredType, Param, Qualifier, TestMethod};

/// One parameter position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSlot {
    pub index: usize,
    pub declared: DeclaredType,
    /// Only kept for types that need one to pick a view.
    pub qualifier: Option<Qualifier>,
}

/// The inspected shape of one test method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    method: String,
    slots: Arc<[ParamSlot]>,
}

impl Inspection {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn slots(&self) -> &[ParamSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Extract the ordered parameter slots of `method`.
#[tracing::instrument(skip_all, fields(method = %method.name, param_count = method.params.len()))]
pub fn inspect(method: &TestMethod) -> Inspection {
    let slots: Vec<ParamSlot> = method
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let qualified = param.declared.type_id().is_some_and(|id| id.needs_qualifier());
            ParamSlot {
                index,
                declared: param.declared.clone(),
                qualifier: if qualified { param.qualifier.clone() } else { None },
            }
        })
        .collect();

    Inspection {
        method: method.name.clone(),
        slots: slots.into(),
    }
}

/// Memoizes inspections by method name and declared parameters.
///
/// A descriptor is inspected once no matter how many providers are built for it. Two descriptors sharing a name
/// but not a parameter list get separate entries.
#[derive(Debug, Default)]
pub struct InspectionCache {
    entries: HashMap<(String, Vec<Param>), Arc<Inspection>>,
}

impl InspectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_inspect(&mut self, method: &TestMethod) -> Arc<Inspection> {
        let key = (method.name.clone(), method.params.clone());
        Arc::clone(self.entries.entry(key).or_insert_with(|| Arc::new(inspect(method))))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use cache_scenarios_core::qualifiers::QualifierId;
    use cache_scenarios_core::types::TypeId;

    use super::*;
    use crate::provider::binder::bind;
    use crate::scenario::{CacheGenerator, CacheSpec, ScenarioSource};

    #[test]
    fn test_inspect_preserves_order() {
        let method = TestMethod::new("ordered")
            .param(Param::new(TypeId::Map))
            .param(Param::new(TypeId::Context))
            .param(Param::new("Policy"));
        let inspection = inspect(&method);

        assert_eq!(inspection.method(), "ordered");
        let declared: Vec<String> = inspection.slots().iter().map(|s| s.declared.to_string()).collect();
        assert_eq!(declared, ["Map", "Context", "Policy"]);
        let indices: Vec<usize> = inspection.slots().iter().map(|s| s.index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn test_qualifier_kept_only_where_ambiguous() {
        let method = TestMethod::new("qualified")
            .param(Param::new(TypeId::Cache).qualified(QualifierId::ExpireAfterWrite))
            .param(Param::new(TypeId::Expiration).qualified(QualifierId::ExpireAfterWrite));
        let inspection = inspect(&method);

        assert_eq!(inspection.slots()[0].qualifier, None);
        assert_eq!(
            inspection.slots()[1].qualifier,
            Some(Qualifier::Known(QualifierId::ExpireAfterWrite))
        );
    }

    #[test]
    fn test_zero_parameters() {
        let inspection = inspect(&TestMethod::new("nothing"));
        assert!(inspection.is_empty());
    }

    #[test]
    fn test_cache_reuses_inspection() {
        let method = TestMethod::new("cached").param(Param::new(TypeId::Cache));
        let mut cache = InspectionCache::new();
        let first = cache.get_or_inspect(&method);
        let second = cache.get_or_inspect(&method);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_separates_same_name_different_params() {
        let narrow = TestMethod::new("t").param(Param::new(TypeId::Cache));
        let wide = TestMethod::new("t")
            .param(Param::new(TypeId::Cache))
            .param(Param::new(TypeId::Map))
            .param(Param::new(TypeId::Ticker));
        let mut cache = InspectionCache::new();

        assert_eq!(cache.get_or_inspect(&narrow).len(), 1);
        let inspection = cache.get_or_inspect(&wide);
        assert_eq!(inspection.len(), 3);
        assert_eq!(cache.len(), 2);

        let scenario = CacheGenerator.generate(&CacheSpec::new(), false).next().unwrap();
        assert_eq!(bind(&inspection, &scenario).unwrap().len(), wide.params.len());
    }
}
