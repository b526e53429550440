//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//! Rendering is split from printing so output can be tested directly.

use std::path::Path;

use cache_scenarios_core::registry::VocabInfo;
use cache_scenarios_core::{qualifiers, types};
use miette::{Diagnostic, Report};

use super::{CliError, CliResult, ExitCode};
use crate::descriptor::{DeclaredType, TestMethod};
use crate::provider::{self, BindError, ProviderConfig};
use crate::scenario::{CacheGenerator, ScenarioSource};

/// Outcome of binding every scenario of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindReport {
    pub output: String,
    pub bound: usize,
    pub failed: usize,
}

/// Bind a descriptor file against the reference generator and print the argument vectors.
pub fn bind_file(path: &Path, config: &ProviderConfig) -> CliResult<ExitCode> {
    let method = load_descriptor(path)?;
    let report = render_bind(&method, &CacheGenerator, config).map_err(diagnostic)?;
    print!("{}", report.output);

    if report.failed > 0 {
        // Failures already printed with the summary
        Err(CliError::new("", ExitCode::FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Print the inspected slots of a descriptor file.
pub fn inspect_file(path: &Path) -> CliResult<ExitCode> {
    let method = load_descriptor(path)?;
    print!("{}", render_inspect(&method));
    Ok(ExitCode::SUCCESS)
}

/// Print the type and qualifier vocabulary.
pub fn list_kinds() -> CliResult<ExitCode> {
    print!("{}", render_kinds());
    Ok(ExitCode::SUCCESS)
}

fn load_descriptor(path: &Path) -> CliResult<TestMethod> {
    TestMethod::load(path).map_err(|e| CliError::failure(format!("Error: {}", e)))
}

fn diagnostic(err: BindError) -> CliError {
    CliError::failure(format!("{:?}", Report::new(err)))
}

/// Bind every scenario `source` generates for `method`, one line per scenario.
pub fn render_bind<S: ScenarioSource>(
    method: &TestMethod,
    source: &S,
    config: &ProviderConfig,
) -> Result<BindReport, BindError> {
    let cases = provider::provide_cases_with(method, source, config)?;
    let mut output = String::new();
    let mut bound = 0;
    let mut failed = 0;

    output.push_str(&format!(
        "{} (loading only: {})\n",
        cases.inspection().method(),
        provider::requires_loading_cache(method)
    ));
    for (index, case) in cases.enumerate() {
        match case {
            Ok(arguments) => {
                bound += 1;
                let rendered: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                output.push_str(&format!("[{}] ({})\n", index, rendered.join(", ")));
            }
            Err(err) => {
                failed += 1;
                let code = err.code().map(|c| c.to_string()).unwrap_or_else(|| "bind".to_string());
                output.push_str(&format!("[{}] error[{}]: {}\n", index, code, err));
            }
        }
    }
    output.push_str(&format!("====== {} bound, {} failed ======\n", bound, failed));

    Ok(BindReport { output, bound, failed })
}

/// Render the inspected slots of `method`.
pub fn render_inspect(method: &TestMethod) -> String {
    let inspection = provider::inspect(method);
    let mut output = String::new();

    output.push_str(&format!("method: {}\n", inspection.method()));
    output.push_str(&format!(
        "spec: {}\n",
        if method.spec.is_some() { "declared" } else { "missing" }
    ));
    output.push_str(&format!("loading only: {}\n", provider::requires_loading_cache(method)));
    for slot in inspection.slots() {
        output.push_str(&format!("[{}] {}", slot.index, slot.declared));
        if let Some(qualifier) = &slot.qualifier {
            output.push_str(&format!(" @{}", qualifier));
        }
        if let DeclaredType::Named(_) = slot.declared {
            output.push_str(" (unknown type)");
        }
        output.push('\n');
    }
    output
}

/// Render the declarable types and qualifiers.
pub fn render_kinds() -> String {
    let mut output = String::from("types:\n");
    for info in types::TYPES {
        render_vocab_line(&mut output, info);
    }
    output.push_str("qualifiers:\n");
    for info in qualifiers::QUALIFIERS {
        render_vocab_line(&mut output, info);
    }
    output
}

fn render_vocab_line<Id>(output: &mut String, info: &VocabInfo<Id>) {
    output.push_str(&format!("  {} - {}", info.canonical, info.description));
    if !info.aliases.is_empty() {
        output.push_str(&format!(" (aliases: {})", info.aliases.join(", ")));
    }
    output.push('\n');
}
