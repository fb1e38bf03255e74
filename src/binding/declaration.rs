//! Declaration compiler
//!
//! Splits a full `data-bind` value into clauses and folds them, left to
//! right, into one [`BindingSpec`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::operand::parse_binding_operand;
use super::spec::BindingSpec;
use crate::error::{BindError, Result};

/// Comma separator, surrounding whitespace is dropped
static CLAUSE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Knobs for the declaration compiler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Also read a `model:` payload as a data-bound operand and keep the
    /// result on the model spec. Matches the output of the stickit
    /// parser plugin for Backbone; off by default.
    pub legacy_model_fallthrough: bool,
}

/// Compile a declaration with default options
pub fn compile_declaration(declaration: &str) -> Result<BindingSpec> {
    Compiler::default().compile(declaration)
}

/// Stateless compiler; holds only its options
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one element's declaration
    ///
    /// Any bad clause aborts the whole declaration; there is no partial
    /// result.
    pub fn compile(&self, declaration: &str) -> Result<BindingSpec> {
        let trimmed = declaration.trim();
        if trimmed.is_empty() {
            return Err(BindError::EmptyDeclaration {
                declaration: declaration.to_string(),
            });
        }

        let mut spec = BindingSpec::new();
        for clause in CLAUSE_SEPARATOR.split(trimmed) {
            parse_binding_operand(&mut spec, clause, &self.options)?;
        }

        debug!(declaration = trimmed, operands = spec.len(), "compiled declaration");
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::spec::{FilterTarget, FilterType, OperandSpec};

    const EMPLOYEE: &str = "value:employee#address.zip|+fooFormatter|-fooFilter,disabled:isFullTime,class:isImportant|+classSelector,events:blur+keyup";

    #[test]
    fn compiles_every_clause() {
        let spec = compile_declaration(EMPLOYEE).unwrap();
        assert_eq!(
            spec.operand_names().collect::<Vec<_>>(),
            ["value", "disabled", "class", "events"]
        );

        let value = spec.get("value").and_then(OperandSpec::as_data_bound).unwrap();
        assert_eq!(value.model.as_deref(), Some("employee"));
        assert_eq!(value.attributes, ["address.zip"]);
        assert_eq!(value.filters[0].name, "fooFormatter");
        assert_eq!(value.filters[0].kind, FilterType::Formatter);
        assert_eq!(value.filters[1].name, "fooFilter");
        assert_eq!(value.filters[1].kind, FilterType::Filter);
        assert_eq!(value.filters[1].target, FilterTarget::Dom);
    }

    #[test]
    fn whitespace_around_commas_is_ignored() {
        let spec = compile_declaration("  value:name ,  class:state\t,events:blur ").unwrap();
        assert_eq!(spec.len(), 3);
        let class = spec.get("class").and_then(OperandSpec::as_data_bound).unwrap();
        assert_eq!(class.attributes, ["state"]);
    }

    #[test]
    fn duplicate_operand_last_write_wins() {
        let spec = compile_declaration("value:first,class:c,value:second").unwrap();
        assert_eq!(spec.len(), 2);
        let value = spec.get("value").and_then(OperandSpec::as_data_bound).unwrap();
        assert_eq!(value.attributes, ["second"]);
        assert_eq!(spec.operand_names().next(), Some("value"));
    }

    #[test]
    fn reject_empty_declaration() {
        for declaration in ["", "   ", "\n"] {
            assert!(matches!(
                compile_declaration(declaration),
                Err(BindError::EmptyDeclaration { .. })
            ));
        }
    }

    #[test]
    fn reject_empty_clause() {
        assert!(matches!(
            compile_declaration("value:a,,class:b"),
            Err(BindError::MalformedOperand { .. })
        ));
    }

    #[test]
    fn one_bad_clause_rejects_everything() {
        let err = compile_declaration("value:a,class:b|bogus,events:blur").unwrap_err();
        assert!(matches!(err, BindError::InvalidFilterToken { ref token } if token == "bogus"));
    }

    #[test]
    fn normalized_form_reparses_identically() {
        for declaration in [
            EMPLOYEE,
            "model:employee+company, value:name|fmt+|-clean",
            "value:a+b+c,readonly:locked|-toBool",
            "placeholder:hint,events:",
        ] {
            let spec = compile_declaration(declaration).unwrap();
            let normalized = spec.to_string();
            assert_eq!(compile_declaration(&normalized).unwrap(), spec, "{normalized}");
        }
    }

    #[test]
    fn legacy_options_round_trip() {
        let compiler = Compiler::new(CompileOptions {
            legacy_model_fallthrough: true,
        });
        let spec = compiler.compile("model:employee,value:name").unwrap();
        assert_eq!(compiler.compile(&spec.to_string()).unwrap(), spec);
        assert!(compiler.options().legacy_model_fallthrough);
    }
}
