//! Filter chain parsing
//!
//! A chain is `|`-separated transform references. Each token is one
//! identifier with exactly one symbol on one side:
//!
//! | token   | type      | target |
//! |---------|-----------|--------|
//! | `+fmt`  | Formatter | Dom    |
//! | `fmt+`  | Formatter | Model  |
//! | `-flt`  | Filter    | Dom    |
//! | `flt-`  | Filter    | Model  |
//!
//! Kind and direction are decided here once; nothing downstream looks at
//! symbol positions again.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::spec::{FilterSpec, FilterTarget, FilterType};
use crate::error::{BindError, Result};

static FILTER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<lead>[+-])(?P<lname>[A-Za-z0-9_]+)|(?P<rname>[A-Za-z0-9_]+)(?P<trail>[+-]))$")
        .unwrap()
});

fn filter_type(symbol: &str) -> FilterType {
    if symbol == "-" {
        FilterType::Filter
    } else {
        FilterType::Formatter
    }
}

/// Parse one token such as `+fooFormatter` or `fooFilter-`
pub fn parse_filter_token(token: &str) -> Result<FilterSpec> {
    let invalid = || BindError::InvalidFilterToken {
        token: token.to_string(),
    };
    let caps = FILTER_TOKEN.captures(token).ok_or_else(invalid)?;

    let spec = match (caps.name("lead"), caps.name("lname")) {
        (Some(symbol), Some(name)) => {
            FilterSpec::new(name.as_str(), filter_type(symbol.as_str()), FilterTarget::Dom)
        }
        _ => {
            let (name, symbol) = caps
                .name("rname")
                .zip(caps.name("trail"))
                .ok_or_else(invalid)?;
            FilterSpec::new(name.as_str(), filter_type(symbol.as_str()), FilterTarget::Model)
        }
    };

    trace!(token, name = %spec.name, role = %spec.role(), "parsed filter token");
    Ok(spec)
}

/// Parse a whole chain; `None` (no `|` in the operand) yields no filters
///
/// Order is preserved and nothing is deduplicated: two transforms with the
/// same role are both kept.
pub fn parse_filter_chain(chain: Option<&str>) -> Result<Vec<FilterSpec>> {
    match chain {
        None => Ok(Vec::new()),
        Some(chain) => chain.split('|').map(parse_filter_token).collect(),
    }
}
