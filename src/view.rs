//! Host view document
//!
//! A flat list of elements standing in for the DOM subtree of a view:
//!
//! ```yaml
//! model: employee
//! elements:
//!   - tag: input
//!     id: zip
//!     attributes:
//!       data-bind: "value:address.zip|+formatZip"
//!   - tag: span
//!     attributes:
//!       data-bind: "class:isImportant|+classSelector"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::binding::MODEL_OPERAND;
use crate::error::Result;
use crate::options::BindOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ViewElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Default model when the caller does not pass one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub elements: Vec<ViewElement>,
}

impl View {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML (or JSON) view document
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn select<'a>(&'a self, selector: &'a BindSelector) -> impl Iterator<Item = &'a ViewElement> {
        self.elements.iter().filter(move |el| selector.matches(el))
    }
}

/// Attribute selector for declaration-bearing elements
///
/// `[data-bind]`, or `[data-bind*='model:employee']` when a model name is
/// configured (substring match, as in CSS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindSelector {
    attribute: String,
    model_filter: Option<String>,
}

impl BindSelector {
    pub fn from_options(options: &BindOptions) -> Self {
        Self {
            attribute: options.bind_attribute.clone(),
            model_filter: options
                .model_name
                .as_ref()
                .map(|name| format!("{}:{}", MODEL_OPERAND, name)),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The declaration this selector reads from `element`, if it matches
    pub fn declaration<'a>(&self, element: &'a ViewElement) -> Option<&'a str> {
        let value = element.attr(&self.attribute)?;
        match &self.model_filter {
            Some(needle) if !value.contains(needle.as_str()) => None,
            _ => Some(value),
        }
    }

    pub fn matches(&self, element: &ViewElement) -> bool {
        self.declaration(element).is_some()
    }
}

impl fmt::Display for BindSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.model_filter {
            Some(needle) => write!(f, "[{}*='{}']", self.attribute, needle),
            None => write!(f, "[{}]", self.attribute),
        }
    }
}
