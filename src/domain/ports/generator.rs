//! BindingGenerator port - the external service that fills marked regions
//!
//! The contract is narrow: read the declaration headers, rewrite the text
//! between the markers of the bindings source and the stub in place, leave
//! everything else alone.

use std::path::PathBuf;

use serde_json::json;
use thiserror::Error;

use crate::domain::value_objects::GeneratorOptions;

/// Errors reported by a generator adapter
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The generator process could not be started
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator ran and reported failure
    #[error("`{command}` {status}")]
    Failed { command: String, status: String },

    /// The request could not be handed over
    #[error("could not write request {path}: {message}")]
    Request { path: PathBuf, message: String },
}

/// Everything the generator needs for one module
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Root namespace of the module, used when options name none
    pub root_namespace: String,
    pub header_files: Vec<PathBuf>,
    /// C++ file whose glue and pydef regions are rewritten
    pub bindings_source: PathBuf,
    /// Stub file whose stub region is rewritten
    pub stub_file: PathBuf,
    /// Where the serialized request was written for out-of-process generators
    pub request_file: PathBuf,
    pub options: GeneratorOptions,
}

impl GenerationRequest {
    /// Request in the generator's own vocabulary.
    pub fn to_json(&self) -> serde_json::Value {
        let o = &self.options;
        let specializations: Vec<_> = o
            .template_specializations
            .iter()
            .map(|s| {
                json!({
                    "name_regex": s.name,
                    "cpp_types": s.types,
                    "add_suffix": s.add_suffix,
                })
            })
            .collect();

        json!({
            "input_cpp_header_files": self
                .header_files
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
            "output_cpp_pydef_file": self.bindings_source.display().to_string(),
            "output_stub_pyi_file": self.stub_file.display().to_string(),
            "options": {
                "namespaces_root": o.effective_namespaces(&self.root_namespace),
                "fn_exclude_by_name__regex": o.exclude_functions,
                "fn_params_exclude_by_name__regex": o.exclude_params,
                "class_override_virtual_methods_in_python__regex": o.override_virtual_classes,
                "fn_template_options": specializations,
                "fn_return_force_policy_reference_for_references__regex": o.force_reference_return,
                "fn_params_replace_modifiable_immutable_by_boxed__regex": o.boxed_params,
                "fn_namespace_vectorize__regex": o.vectorize_namespaces,
                "fn_vectorize__regex": o.vectorize_functions,
                "python_run_black_formatter": o.format_stubs,
            },
        })
    }
}

/// External binding generator
pub trait BindingGenerator {
    /// Name for logs and errors
    fn name(&self) -> &str;

    /// Rewrite the marked regions of the request's target files.
    fn generate(&self, request: &GenerationRequest) -> Result<(), GeneratorError>;
}
