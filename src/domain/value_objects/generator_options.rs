//! Generator options - the configuration surface forwarded to the binding
//! generator. bindkit does not interpret these beyond checking that the
//! regex-valued ones compile.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Python `re` syntax the `regex` crate does not implement
const PYTHON_ONLY_SYNTAX: &[&str] = &["(?=", "(?!", "(?<=", "(?<!", "(?P="];

/// Per-template-function specialization rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpecialization {
    /// Regex matching the template function names
    pub name: String,
    /// Concrete C++ types to instantiate
    pub types: Vec<String>,
    /// Suffix the Python name with the type (`add_int`, `add_double`)
    #[serde(default)]
    pub add_suffix: bool,
}

/// Options handed to the binding generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Root namespaces to bind; empty means "the module's root namespace"
    pub namespaces_root: Vec<String>,
    /// Functions excluded by name
    pub exclude_functions: Option<String>,
    /// Parameters excluded by name
    pub exclude_params: Option<String>,
    /// Classes whose virtual methods may be overridden from Python
    pub override_virtual_classes: Option<String>,
    pub template_specializations: Vec<TemplateSpecialization>,
    /// Functions whose reference returns use the `reference` policy
    pub force_reference_return: Option<String>,
    /// Modifiable immutable parameters replaced by boxed values
    pub boxed_params: Option<String>,
    /// Namespaces whose functions get vectorized overloads
    pub vectorize_namespaces: Option<String>,
    /// Functions that get vectorized overloads
    pub vectorize_functions: Option<String>,
    /// Run the stub formatter after generation
    pub format_stubs: bool,
}

impl GeneratorOptions {
    /// Regex-valued options as `(option name, pattern)`
    pub fn patterns(&self) -> Vec<(String, &str)> {
        let mut out: Vec<(String, &str)> = [
            ("exclude_functions", &self.exclude_functions),
            ("exclude_params", &self.exclude_params),
            ("override_virtual_classes", &self.override_virtual_classes),
            ("force_reference_return", &self.force_reference_return),
            ("boxed_params", &self.boxed_params),
            ("vectorize_namespaces", &self.vectorize_namespaces),
            ("vectorize_functions", &self.vectorize_functions),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|p| (name.to_string(), p)))
        .collect();

        for (i, spec) in self.template_specializations.iter().enumerate() {
            out.push((format!("template_specializations[{}].name", i), spec.name.as_str()));
        }
        out
    }

    /// Check every pattern compiles. Returns the first offending option.
    ///
    /// The generator matches with Python `re`. Patterns using lookaround or
    /// backreferences cannot be checked here and are passed through.
    pub fn validate(&self) -> Result<(), String> {
        for (name, pattern) in self.patterns() {
            if let Err(e) = Regex::new(pattern) {
                if uses_python_only_syntax(pattern) {
                    warn!(option = %name, %pattern, "pattern left for the generator to check");
                    continue;
                }
                return Err(format!("{} is not a valid regex: {}", name, e));
            }
        }
        for spec in &self.template_specializations {
            if spec.types.is_empty() {
                return Err(format!(
                    "template specialization '{}' lists no types",
                    spec.name
                ));
            }
        }
        Ok(())
    }

    /// Namespaces to bind for a module whose root namespace is `root`
    pub fn effective_namespaces(&self, root: &str) -> Vec<String> {
        if self.namespaces_root.is_empty() {
            vec![root.to_string()]
        } else {
            self.namespaces_root.clone()
        }
    }
}

fn uses_python_only_syntax(pattern: &str) -> bool {
    if PYTHON_ONLY_SYNTAX.iter().any(|s| pattern.contains(s)) {
        return true;
    }
    // Backreference: `\1` .. `\9` not itself escaped
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'\\' {
            if bytes[i + 1].is_ascii_digit() && bytes[i + 1] != b'0' {
                return true;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    false
}
