//! Model qualifier and attribute list
//!
//! `employee#address.zip+address.city|+fmt`
//!  └ model ┘└──── attributes ──────┘└ filter chain

use crate::error::{BindError, Result};

/// Split an optional `model#` prefix off a data-bound payload
///
/// Splits on the first `#` only. Never fails: no `#` means no model.
pub fn parse_model_qualifier(payload: &str) -> (Option<&str>, &str) {
    match payload.split_once('#') {
        Some((model, rest)) => (Some(model), rest),
        None => (None, payload),
    }
}

/// Attribute names plus the unparsed filter chain that followed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeList<'a> {
    pub attributes: Vec<String>,
    /// Everything after the first `|`, segments still joined by `|`
    pub filter_chain: Option<&'a str>,
}

/// Parse `attr[+attr...][|chain]`
pub fn parse_attribute_list(expression: &str) -> Result<AttributeList<'_>> {
    let (head, filter_chain) = match expression.split_once('|') {
        Some((head, tail)) => (head, Some(tail)),
        None => (expression, None),
    };

    if head.is_empty() {
        return Err(BindError::malformed(
            expression,
            "at least one model attribute is required",
        ));
    }

    Ok(AttributeList {
        attributes: head.split('+').map(str::to_string).collect(),
        filter_chain,
    })
}
