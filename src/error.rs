//! Error types with fix suggestions
//!
//! Every parse-time condition carries the offending substring so the author
//! can find it in the markup. None of them are recoverable by the compiler:
//! the whole declaration for that element is rejected.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = BindError> = std::result::Result<T, E>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum BindError {
    // ─────────────────────────────────────────────────────────────
    // Declaration grammar errors (BIND-001 to BIND-030)
    // ─────────────────────────────────────────────────────────────
    #[error("BIND-001: Empty binding declaration: '{declaration}'")]
    EmptyDeclaration { declaration: String },

    #[error("BIND-010: Malformed operand '{clause}': {reason}")]
    MalformedOperand { clause: String, reason: String },

    #[error("BIND-020: Bad filter format: '{token}'")]
    InvalidFilterToken { token: String },

    #[error("BIND-030: No event types in events declaration: '{payload}'")]
    EmptyEventList { payload: String },

    // ─────────────────────────────────────────────────────────────
    // Host errors (BIND-050)
    // ─────────────────────────────────────────────────────────────
    #[error("BIND-050: Configuration error: {reason}")]
    Config { reason: String },

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BindError {
    pub(crate) fn malformed(clause: &str, reason: impl Into<String>) -> Self {
        BindError::MalformedOperand {
            clause: clause.to_string(),
            reason: reason.into(),
        }
    }

    /// True for conditions raised while compiling a declaration string
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            BindError::EmptyDeclaration { .. }
                | BindError::MalformedOperand { .. }
                | BindError::InvalidFilterToken { .. }
                | BindError::EmptyEventList { .. }
        )
    }
}

impl FixSuggestion for BindError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            BindError::EmptyDeclaration { .. } => {
                Some("Add at least one clause, e.g. data-bind=\"value:name\"")
            }
            BindError::MalformedOperand { .. } => {
                Some("Use format: operand:[model#]attribute[+attribute][|filter]")
            }
            BindError::InvalidFilterToken { .. } => Some(
                "Put exactly one + (formatter) or - (filter) before or after the function name, e.g. +format or parse-",
            ),
            BindError::EmptyEventList { .. } => Some("List event names separated by +, e.g. events:blur+keyup"),
            BindError::Config { .. } => Some("Check the options file and the --model flag"),
            BindError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            BindError::Json(_) => Some("Check that optionalBindings is valid JSON"),
            BindError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
