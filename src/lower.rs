//! Specification lowering
//!
//! Walks a canonical [`BindingSpec`] and emits the stickit structure for
//! one element. Operand handling is a closed set:
//!
//! | operand                        | output                                   |
//! |--------------------------------|------------------------------------------|
//! | `value`                        | `observe` + one callback slot per filter |
//! | `disabled`, `class`, `readonly`| one entry in `attributes`                |
//! | `events`                       | `events` list                            |
//! | `model`                        | nothing (used for element selection)     |
//! | anything else                  | dropped                                  |

use tracing::debug;

use crate::binding::{
    BindingSpec, DataBoundSpec, OperandSpec, ATTRIBUTE_OPERANDS, VALUE_OPERAND,
};
use crate::ids::IdGenerator;
use crate::stickit::{AttributeBinding, Callback, ElementBinding, Observe, StickitBindings};

/// Selector key for an element id
pub fn selector_for(element_id: &str) -> String {
    format!("#{}", element_id)
}

/// Output for one element, plus the id it was keyed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredBinding {
    pub element_id: String,
    /// The id came from the generator, not from the element
    pub generated: bool,
    pub binding: ElementBinding,
}

impl LoweredBinding {
    pub fn selector(&self) -> String {
        selector_for(&self.element_id)
    }

    /// Id the caller must write back onto the element before the selector
    /// is handed to the engine
    pub fn id_to_persist(&self) -> Option<&str> {
        self.generated.then_some(self.element_id.as_str())
    }

    pub fn into_bindings(self) -> StickitBindings {
        let mut bindings = StickitBindings::new();
        bindings.insert(self.selector(), self.binding);
        bindings
    }
}

/// Lower a spec for an element, generating an id when it has none
pub fn lower_spec(
    spec: &BindingSpec,
    element_id: Option<&str>,
    ids: &dyn IdGenerator,
) -> LoweredBinding {
    let (element_id, generated) = match element_id {
        Some(id) => (id.to_string(), false),
        None => (ids.next_id(), true),
    };

    let binding = lower_element(spec);
    debug!(element_id = %element_id, generated, "lowered binding specification");

    LoweredBinding {
        element_id,
        generated,
        binding,
    }
}

/// Lower a spec into the element binding alone
pub fn lower_element(spec: &BindingSpec) -> ElementBinding {
    let mut binding = ElementBinding::default();

    for (operand, operand_spec) in spec.iter() {
        match operand_spec {
            OperandSpec::DataBound(data) if operand == VALUE_OPERAND => {
                lower_value(&mut binding, data);
            }
            OperandSpec::DataBound(data) if is_attribute_operand(operand) => {
                binding.attributes.push(lower_attribute(operand, data));
            }
            OperandSpec::Events(events) => {
                binding.types = Some(events.types.clone());
            }
            OperandSpec::Model(_) => {}
            OperandSpec::DataBound(_) => {
                debug!(operand, "no stickit mapping for operand, dropped");
            }
        }
    }

    binding
}

fn is_attribute_operand(operand: &str) -> bool {
    ATTRIBUTE_OPERANDS.iter().any(|name| *name == operand)
}

/// Later filters with the same role overwrite earlier ones
fn lower_value(binding: &mut ElementBinding, data: &DataBoundSpec) {
    binding.observe = Observe::collapse(&data.attributes);
    for filter in &data.filters {
        binding.set_callback(filter.role(), filter.name.as_str());
    }
}

/// The engine takes a single transform per attribute binding, so only the
/// first filter is used. The rest were still validated by the parser.
fn lower_attribute(operand: &str, data: &DataBoundSpec) -> AttributeBinding {
    if data.filters.len() > 1 {
        debug!(
            operand,
            ignored = data.filters.len() - 1,
            "attribute bindings keep only the first filter"
        );
    }

    AttributeBinding {
        name: operand.to_string(),
        observe: Observe::collapse(&data.attributes),
        callback: data.filters.first().map(|filter| Callback {
            role: filter.role(),
            name: filter.name.clone(),
        }),
    }
}
