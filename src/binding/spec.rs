//! Canonical binding specification
//!
//! The engine-agnostic form a declaration compiles to. Keys are operand
//! names; values depend on which parser handled the clause:
//!
//! ```text
//! value:employee#address.zip|+fooFormatter|-fooFilter
//!   → value  => DataBound { model: employee, attributes: [address.zip],
//!                           filters: [+fooFormatter, -fooFilter] }
//! events:blur+keyup
//!   → events => Events { types: [blur, keyup] }
//! ```

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Operand that takes an event type list
pub const EVENTS_OPERAND: &str = "events";
/// Operand that takes a model name list
pub const MODEL_OPERAND: &str = "model";
/// Operand bound to the element value
pub const VALUE_OPERAND: &str = "value";
/// Operands lowered to per-attribute bindings
pub const ATTRIBUTE_OPERANDS: [&str; 3] = ["disabled", "class", "readonly"];

/// `+` is a formatter, `-` is a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Formatter,
    Filter,
}

impl FilterType {
    pub fn symbol(self) -> char {
        match self {
            FilterType::Formatter => '+',
            FilterType::Filter => '-',
        }
    }
}

/// Which side of the binding a transform runs on its way to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterTarget {
    /// Symbol on the left: model data pushed into the view
    Dom,
    /// Symbol on the right: view data pushed into the model
    Model,
}

/// Engine callback slot a transform is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CallbackRole {
    OnGet,
    OnSet,
    UpdateView,
    UpdateModel,
}

impl CallbackRole {
    /// The fixed 2×2 mapping from transform kind and direction to a slot
    pub fn for_filter(kind: FilterType, target: FilterTarget) -> Self {
        match (kind, target) {
            (FilterType::Formatter, FilterTarget::Dom) => CallbackRole::OnGet,
            (FilterType::Formatter, FilterTarget::Model) => CallbackRole::OnSet,
            (FilterType::Filter, FilterTarget::Dom) => CallbackRole::UpdateView,
            (FilterType::Filter, FilterTarget::Model) => CallbackRole::UpdateModel,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallbackRole::OnGet => "onGet",
            CallbackRole::OnSet => "onSet",
            CallbackRole::UpdateView => "updateView",
            CallbackRole::UpdateModel => "updateModel",
        }
    }
}

impl fmt::Display for CallbackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transform reference from a filter chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// Method name on the host view
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FilterType,
    pub target: FilterTarget,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, kind: FilterType, target: FilterTarget) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
        }
    }

    pub fn role(&self) -> CallbackRole {
        CallbackRole::for_filter(self.kind, self.target)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            FilterTarget::Dom => write!(f, "{}{}", self.kind.symbol(), self.name),
            FilterTarget::Model => write!(f, "{}{}", self.name, self.kind.symbol()),
        }
    }
}

/// `[model#]attr[+attr...][|filter...]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataBoundSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// First entry is the primary observed attribute
    pub attributes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterSpec>,
}

impl fmt::Display for DataBoundSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(model) = &self.model {
            write!(f, "{}#", model)?;
        }
        f.write_str(&self.attributes.join("+"))?;
        for filter in &self.filters {
            write!(f, "|{}", filter)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsSpec {
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSpec {
    #[serde(rename = "modelNames")]
    pub model_names: Vec<String>,
    /// Data-bound reading of the same payload, only present when the
    /// compiler runs with legacy model fallthrough
    #[serde(flatten)]
    pub fallthrough: Option<DataBoundSpec>,
}

/// Sub-specification for one operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperandSpec {
    DataBound(DataBoundSpec),
    Events(EventsSpec),
    Model(ModelSpec),
}

impl OperandSpec {
    pub fn as_data_bound(&self) -> Option<&DataBoundSpec> {
        match self {
            OperandSpec::DataBound(spec) => Some(spec),
            _ => None,
        }
    }
}

impl fmt::Display for OperandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandSpec::DataBound(spec) => spec.fmt(f),
            OperandSpec::Events(spec) => f.write_str(&spec.types.join("+")),
            OperandSpec::Model(spec) => f.write_str(&spec.model_names.join("+")),
        }
    }
}

/// Operand name → sub-specification
///
/// Entries keep the position of their first insertion. Re-inserting an
/// operand replaces its sub-specification in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSpec {
    operands: Vec<(String, OperandSpec)>,
}

impl BindingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the replaced entry
    pub fn insert(&mut self, operand: impl Into<String>, spec: OperandSpec) -> Option<OperandSpec> {
        let operand = operand.into();
        match self.operands.iter_mut().find(|(name, _)| *name == operand) {
            Some((_, existing)) => Some(std::mem::replace(existing, spec)),
            None => {
                self.operands.push((operand, spec));
                None
            }
        }
    }

    pub fn get(&self, operand: &str) -> Option<&OperandSpec> {
        self.operands
            .iter()
            .find(|(name, _)| name == operand)
            .map(|(_, spec)| spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OperandSpec)> {
        self.operands.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn operand_names(&self) -> impl Iterator<Item = &str> {
        self.operands.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }
}

impl Serialize for BindingSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.operands.len()))?;
        for (name, spec) in &self.operands {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

/// Normalized declaration: `op:payload` clauses joined by `,`
impl fmt::Display for BindingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, spec)) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", name, spec)?;
        }
        Ok(())
    }
}
