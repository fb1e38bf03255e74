//! View-level entry point
//!
//! For every selected element: compile its declaration, lower it, write a
//! generated id back when needed, and merge the result by selector. The
//! engine first receives the caller's own bindings, then the merged ones.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::binding::Compiler;
use crate::engine::BindingEngine;
use crate::error::{BindError, Result};
use crate::ids::IdGenerator;
use crate::lower::{lower_spec, LoweredBinding};
use crate::options::{ErrorPolicy, ParseOptions};
use crate::stickit::StickitBindings;
use crate::view::{BindSelector, View};

/// Compile and lower one declaration
pub fn process_binding_declaration(
    compiler: &Compiler,
    declaration: &str,
    element_id: Option<&str>,
    ids: &dyn IdGenerator,
) -> Result<LoweredBinding> {
    let spec = compiler.compile(declaration)?;
    Ok(lower_spec(&spec, element_id, ids))
}

/// Element left unbound under [`ErrorPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedElement {
    /// Position in the view's element list
    pub index: usize,
    pub declaration: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub model: String,
    pub bindings: StickitBindings,
    /// Ids written onto elements that had none
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generated_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedElement>,
}

/// Parse every declaration in `view` and register the result with `engine`
pub fn stickit_parse(
    view: &mut View,
    engine: &mut dyn BindingEngine,
    options: &ParseOptions,
    ids: &dyn IdGenerator,
) -> Result<ParseReport> {
    let model = options
        .optional_model
        .clone()
        .or_else(|| view.model.clone())
        .ok_or_else(|| BindError::Config {
            reason: "no model to bind: pass optionalModel or set the view's model".into(),
        })?;

    engine.stickit(&model, options.optional_bindings.as_ref());

    let selector = BindSelector::from_options(&options.bind_options());
    let compiler = Compiler::new(options.compile_options());
    debug!(selector = %selector, model = %model, "collecting declarations");

    let mut report = ParseReport {
        model,
        ..Default::default()
    };

    for (index, element) in view.elements.iter_mut().enumerate() {
        let Some(declaration) = selector.declaration(element).map(str::to_string) else {
            continue;
        };

        let lowered = match process_binding_declaration(
            &compiler,
            &declaration,
            element.id.as_deref(),
            ids,
        ) {
            Ok(lowered) => lowered,
            Err(err) => match options.on_error {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => {
                    warn!(index, declaration = %declaration, error = %err, "skipping element");
                    report.skipped.push(SkippedElement {
                        index,
                        declaration,
                        error: err.to_string(),
                    });
                    continue;
                }
            },
        };

        if let Some(id) = lowered.id_to_persist() {
            element.id = Some(id.to_string());
            report.generated_ids.push(id.to_string());
        }
        report.bindings.extend(lowered.into_bindings());
    }

    info!(
        elements = report.bindings.len(),
        skipped = report.skipped.len(),
        "parsed view bindings"
    );
    engine.add_binding(&report.model, &report.bindings);
    Ok(report)
}
