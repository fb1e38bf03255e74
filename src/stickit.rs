//! Stickit binding structure
//!
//! The engine-specific output. One entry per element, keyed by its
//! selector:
//!
//! ```json
//! {
//!   "#stickit_1": {
//!     "observe": "address.zip",
//!     "onGet": "fooFormatter",
//!     "attributes": [{ "name": "disabled", "observe": "isFullTime" }],
//!     "events": ["blur", "keyup"]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::binding::CallbackRole;

/// A single attribute name, or several in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Observe {
    One(String),
    Many(Vec<String>),
}

impl Observe {
    /// Zero names → none, one → the bare name, more → the whole list
    pub fn collapse(attributes: &[String]) -> Option<Self> {
        match attributes {
            [] => None,
            [single] => Some(Observe::One(single.clone())),
            many => Some(Observe::Many(many.to_vec())),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Observe::One(name) => vec![name.as_str()],
            Observe::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Observe {
    fn from(name: &str) -> Self {
        Observe::One(name.to_string())
    }
}

/// Transform method registered under one callback slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub role: CallbackRole,
    pub name: String,
}

/// Binding of a model attribute onto a DOM attribute (`class`, `disabled`...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    pub name: String,
    pub observe: Option<Observe>,
    /// The engine accepts one transform per attribute
    pub callback: Option<Callback>,
}

impl Serialize for AttributeBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        if let Some(observe) = &self.observe {
            map.serialize_entry("observe", observe)?;
        }
        if let Some(callback) = &self.callback {
            map.serialize_entry(callback.role.as_str(), &callback.name)?;
        }
        map.end()
    }
}

/// Everything the engine needs for one element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observe: Option<Observe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_get: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_model: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeBinding>,
    /// Event types that trigger a view → model update
    #[serde(rename = "events", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl ElementBinding {
    fn slot_mut(&mut self, role: CallbackRole) -> &mut Option<String> {
        match role {
            CallbackRole::OnGet => &mut self.on_get,
            CallbackRole::OnSet => &mut self.on_set,
            CallbackRole::UpdateView => &mut self.update_view,
            CallbackRole::UpdateModel => &mut self.update_model,
        }
    }

    /// Register a transform; overwrites whatever the slot held
    pub fn set_callback(&mut self, role: CallbackRole, name: impl Into<String>) {
        *self.slot_mut(role) = Some(name.into());
    }

    pub fn callback(&self, role: CallbackRole) -> Option<&str> {
        match role {
            CallbackRole::OnGet => self.on_get.as_deref(),
            CallbackRole::OnSet => self.on_set.as_deref(),
            CallbackRole::UpdateView => self.update_view.as_deref(),
            CallbackRole::UpdateModel => self.update_model.as_deref(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeBinding> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// Selector → element binding, merged across elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StickitBindings(BTreeMap<String, ElementBinding>);

impl StickitBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: impl Into<String>, binding: ElementBinding) -> Option<ElementBinding> {
        self.0.insert(selector.into(), binding)
    }

    /// Shallow merge; entries in `other` replace ours with the same selector
    pub fn extend(&mut self, other: StickitBindings) {
        self.0.extend(other.0);
    }

    pub fn get(&self, selector: &str) -> Option<&ElementBinding> {
        self.0.get(selector)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ElementBinding)> {
        self.0.iter()
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collapse_one_or_many() {
        assert_eq!(Observe::collapse(&[]), None);
        assert_eq!(Observe::collapse(&names(&["a"])), Some(Observe::One("a".into())));
        assert_eq!(
            Observe::collapse(&names(&["a", "b"])),
            Some(Observe::Many(names(&["a", "b"])))
        );
    }

    #[test]
    fn observe_serializes_bare_or_array() {
        assert_eq!(serde_json::to_value(Observe::from("a")).unwrap(), json!("a"));
        assert_eq!(
            serde_json::to_value(Observe::Many(names(&["a", "b"]))).unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn attribute_binding_callback_is_keyed_by_role() {
        let attr = AttributeBinding {
            name: "class".into(),
            observe: Some(Observe::from("isImportant")),
            callback: Some(Callback {
                role: CallbackRole::OnGet,
                name: "classSelector".into(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&attr).unwrap(),
            json!({"name": "class", "observe": "isImportant", "onGet": "classSelector"})
        );
    }

    #[test]
    fn element_binding_skips_empty_fields() {
        let mut binding = ElementBinding {
            observe: Some(Observe::from("zip")),
            types: Some(names(&["blur"])),
            ..Default::default()
        };
        binding.set_callback(CallbackRole::UpdateModel, "clean");
        assert_eq!(binding.callback(CallbackRole::UpdateModel), Some("clean"));
        assert_eq!(
            serde_json::to_value(&binding).unwrap(),
            json!({"observe": "zip", "updateModel": "clean", "events": ["blur"]})
        );
    }

    #[test]
    fn extend_replaces_same_selector() {
        let mut left = StickitBindings::new();
        left.insert("#a", ElementBinding::default());
        left.insert(
            "#b",
            ElementBinding {
                observe: Some(Observe::from("old")),
                ..Default::default()
            },
        );

        let mut right = StickitBindings::new();
        right.insert(
            "#b",
            ElementBinding {
                observe: Some(Observe::from("new")),
                ..Default::default()
            },
        );

        left.extend(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.get("#b").unwrap().observe, Some(Observe::from("new")));
    }
}
