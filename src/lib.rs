//! stickit-parser - compiles `data-bind` declarations into stickit bindings
//!
//! ```text
//! "value:employee#address.zip|+fooFormatter,events:blur+keyup"
//!        │ binding::compile_declaration
//!        ▼
//! BindingSpec (canonical, engine-agnostic)
//!        │ lower::lower_spec
//!        ▼
//! StickitBindings { "#stickit_1": { observe, onGet, events, ... } }
//! ```

pub mod binding;
pub mod engine;
pub mod error;
pub mod ids;
pub mod lower;
pub mod options;
pub mod parse;
pub mod stickit;
pub mod view;

pub use binding::{compile_declaration, BindingSpec, CompileOptions, Compiler};
pub use engine::{BindingEngine, RecordingEngine, Registration};
pub use error::{BindError, FixSuggestion, Result};
pub use ids::{IdGenerator, SequentialIds, UniqueIds};
pub use lower::{lower_element, lower_spec, LoweredBinding};
pub use options::{BindOptions, ErrorPolicy, ParseOptions};
pub use parse::{process_binding_declaration, stickit_parse, ParseReport};
pub use stickit::{AttributeBinding, ElementBinding, Observe, StickitBindings};
pub use view::{BindSelector, View, ViewElement};
