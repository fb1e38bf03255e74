//! Binding declaration grammar
//!
//! Turns a `data-bind` attribute value into a canonical [`BindingSpec`]:
//! - `declaration`: comma split, clause folding (entry point)
//! - `operand`: `operand:payload` dispatch, events/model/data-bound payloads
//! - `attributes`: `model#` qualifier and `+`-separated attribute list
//! - `filter`: `|`-separated formatter/filter chain
//! - `spec`: the canonical types and their normalized string form
//!
//! Grammar:
//! ```text
//! declaration := clause (',' clause)*
//! clause      := operand ':' payload
//! payload     := [model '#'] attr ('+' attr)* ('|' filter)*      (data-bound)
//!              | name ('+' name)*                                (events, model)
//! filter      := ('+' | '-') ident | ident ('+' | '-')
//! ```

mod attributes;
mod declaration;
mod filter;
mod operand;
mod spec;

pub use attributes::{parse_attribute_list, parse_model_qualifier, AttributeList};
pub use declaration::{compile_declaration, CompileOptions, Compiler};
pub use filter::{parse_filter_chain, parse_filter_token};
pub use operand::{
    parse_binding_operand, parse_data_bound_operand, parse_events_operand, parse_model_operand,
};
pub use spec::{
    BindingSpec, CallbackRole, DataBoundSpec, EventsSpec, FilterSpec, FilterTarget, FilterType,
    ModelSpec, OperandSpec, ATTRIBUTE_OPERANDS, EVENTS_OPERAND, MODEL_OPERAND, VALUE_OPERAND,
};
