//! Parse options
//!
//! Mirrors the options object accepted by the view entry point:
//!
//! ```yaml
//! optionalModel: employee
//! optionalBindings:
//!   "#title": name
//! optionalBindOptions:
//!   bindAttribute: my-data-bind
//!   modelName: employee
//! onError: skip
//! ```
//!
//! All fields are optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::CompileOptions;
use crate::error::{BindError, Result};

/// Attribute read when no other is configured
pub const DEFAULT_BIND_ATTRIBUTE: &str = "data-bind";

fn default_bind_attribute() -> String {
    DEFAULT_BIND_ATTRIBUTE.to_string()
}

/// Which elements to read declarations from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindOptions {
    #[serde(default = "default_bind_attribute")]
    pub bind_attribute: String,

    /// Only elements whose declaration mentions `model:<name>`
    #[serde(default)]
    pub model_name: Option<String>,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            bind_attribute: default_bind_attribute(),
            model_name: None,
        }
    }
}

/// What to do with an element whose declaration fails to compile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first bad declaration
    #[default]
    Abort,
    /// Log it, leave the element unbound and carry on
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Model to bind against; falls back to the view's own model
    #[serde(default)]
    pub optional_model: Option<String>,

    /// Bindings registered with the engine before the parsed ones
    #[serde(default)]
    pub optional_bindings: Option<Value>,

    #[serde(default)]
    pub optional_bind_options: Option<BindOptions>,

    #[serde(default)]
    pub on_error: ErrorPolicy,

    /// See [`CompileOptions::legacy_model_fallthrough`]
    #[serde(default)]
    pub legacy_model_fallthrough: bool,
}

impl ParseOptions {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML (or JSON) options file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BindError::Config {
            reason: format!("Failed to read options file {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    /// Bind options with defaults filled in
    pub fn bind_options(&self) -> BindOptions {
        self.optional_bind_options.clone().unwrap_or_default()
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            legacy_model_fallthrough: self.legacy_model_fallthrough,
        }
    }
}
