//! Binding engine seam
//!
//! The reactive engine itself lives outside this crate. The parser only
//! needs its two registration calls.

use serde::Serialize;
use serde_json::Value;

use crate::stickit::StickitBindings;

pub trait BindingEngine {
    /// Register the caller's own bindings (may be none)
    fn stickit(&mut self, model: &str, bindings: Option<&Value>);

    /// Add the bindings parsed from the view's declarations
    fn add_binding(&mut self, model: &str, bindings: &StickitBindings);
}

/// One call made against an engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum Registration {
    Stickit {
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bindings: Option<Value>,
    },
    AddBinding {
        model: String,
        bindings: StickitBindings,
    },
}

/// Engine that just records the calls it receives
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordingEngine {
    pub registrations: Vec<Registration>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings from the last `add_binding` call
    pub fn added_bindings(&self) -> Option<&StickitBindings> {
        self.registrations.iter().rev().find_map(|reg| match reg {
            Registration::AddBinding { bindings, .. } => Some(bindings),
            _ => None,
        })
    }
}

impl BindingEngine for RecordingEngine {
    fn stickit(&mut self, model: &str, bindings: Option<&Value>) {
        self.registrations.push(Registration::Stickit {
            model: model.to_string(),
            bindings: bindings.cloned(),
        });
    }

    fn add_binding(&mut self, model: &str, bindings: &StickitBindings) {
        self.registrations.push(Registration::AddBinding {
            model: model.to_string(),
            bindings: bindings.clone(),
        });
    }
}
