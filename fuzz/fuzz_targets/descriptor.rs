#![no_main]

use cache_scenarios::provider::{ProviderConfig, provide_cases_with};
use cache_scenarios::{CacheGenerator, TestMethod};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz descriptor parsing
        if let Ok(method) = TestMethod::from_json(s) {
            // If parsing succeeds, bind a bounded number of scenarios
            let config = ProviderConfig::new().with_limit(16);
            if let Ok(cases) = provide_cases_with(&method, &CacheGenerator, &config) {
                for case in cases {
                    if let Ok(arguments) = case {
                        assert_eq!(arguments.len(), method.params.len());
                    }
                }
            }
        }
    }
});
