//! Operand clauses: `operand:payload`
//!
//! The operand name picks the payload grammar:
//! - `events` → `blur+keyup`
//! - `model` → `employee+address`
//! - anything else → `[model#]attr[+attr][|filter...]`

use tracing::debug;

use super::attributes::{parse_attribute_list, parse_model_qualifier};
use super::declaration::CompileOptions;
use super::filter::parse_filter_chain;
use super::spec::{
    BindingSpec, DataBoundSpec, EventsSpec, ModelSpec, OperandSpec, EVENTS_OPERAND, MODEL_OPERAND,
};
use crate::error::{BindError, Result};

/// Payload of `value`, `class`, `disabled`, `readonly` and any other
/// non-reserved operand
pub fn parse_data_bound_operand(payload: &str) -> Result<DataBoundSpec> {
    let (model, expression) = parse_model_qualifier(payload);
    let list = parse_attribute_list(expression)?;
    let filters = parse_filter_chain(list.filter_chain)?;

    Ok(DataBoundSpec {
        model: model.map(str::to_string),
        attributes: list.attributes,
        filters,
    })
}

/// Payload of `events`; empty names are tolerated
pub fn parse_events_operand(payload: &str) -> Result<EventsSpec> {
    let types: Vec<String> = payload.split('+').map(str::to_string).collect();
    if types.is_empty() {
        return Err(BindError::EmptyEventList {
            payload: payload.to_string(),
        });
    }
    Ok(EventsSpec { types })
}

/// Payload of `model`; empty names are tolerated
pub fn parse_model_operand(payload: &str) -> Result<ModelSpec> {
    Ok(ModelSpec {
        model_names: payload.split('+').map(str::to_string).collect(),
        fallthrough: None,
    })
}

/// Split one clause and route its payload; the result is stored in `spec`
/// under the operand name, replacing any earlier clause for that operand
pub fn parse_binding_operand(
    spec: &mut BindingSpec,
    clause: &str,
    options: &CompileOptions,
) -> Result<()> {
    let parts: Vec<&str> = clause.split(':').collect();
    let [operand, payload] = parts[..] else {
        return Err(BindError::malformed(
            clause,
            format!("expected exactly one ':' separator, found {}", parts.len() - 1),
        ));
    };

    let operand_spec = match operand {
        EVENTS_OPERAND => OperandSpec::Events(parse_events_operand(payload)?),
        MODEL_OPERAND => {
            let mut model = parse_model_operand(payload)?;
            if options.legacy_model_fallthrough {
                model.fallthrough = Some(parse_data_bound_operand(payload)?);
            }
            OperandSpec::Model(model)
        }
        _ => OperandSpec::DataBound(parse_data_bound_operand(payload)?),
    };

    debug!(operand, payload, "compiled binding clause");
    if spec.insert(operand, operand_spec).is_some() {
        debug!(operand, "operand declared twice, keeping the later clause");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::spec::{FilterTarget, FilterType};

    fn dispatch(clause: &str) -> Result<BindingSpec> {
        let mut spec = BindingSpec::new();
        parse_binding_operand(&mut spec, clause, &CompileOptions::default())?;
        Ok(spec)
    }

    #[test]
    fn data_bound_full_form() {
        let spec = parse_data_bound_operand("employee#address.zip|+fooFormatter|-fooFilter").unwrap();
        assert_eq!(spec.model.as_deref(), Some("employee"));
        assert_eq!(spec.attributes, ["address.zip"]);
        assert_eq!(spec.filters.len(), 2);
        assert_eq!(spec.filters[0].kind, FilterType::Formatter);
        assert_eq!(spec.filters[0].target, FilterTarget::Dom);
        assert_eq!(spec.filters[1].kind, FilterType::Filter);
        assert_eq!(spec.filters[1].target, FilterTarget::Dom);
    }

    #[test]
    fn data_bound_without_model_or_filters() {
        let spec = parse_data_bound_operand("isFullTime").unwrap();
        assert!(spec.model.is_none());
        assert_eq!(spec.attributes, ["isFullTime"]);
        assert!(spec.filters.is_empty());
    }

    #[test]
    fn data_bound_empty_attributes_rejected() {
        assert!(matches!(
            parse_data_bound_operand("employee#"),
            Err(BindError::MalformedOperand { .. })
        ));
    }

    #[test]
    fn events_split_on_plus() {
        let spec = parse_events_operand("blur+keyup").unwrap();
        assert_eq!(spec.types, ["blur", "keyup"]);
    }

    #[test]
    fn events_trailing_plus_tolerated() {
        let spec = parse_events_operand("blur+").unwrap();
        assert_eq!(spec.types, ["blur", ""]);
        assert_eq!(parse_events_operand("").unwrap().types, [""]);
    }

    #[test]
    fn model_operand_names() {
        let spec = parse_model_operand("employee+company").unwrap();
        assert_eq!(spec.model_names, ["employee", "company"]);
        assert!(spec.fallthrough.is_none());
    }

    #[test]
    fn dispatch_routes_by_name() {
        let spec = dispatch("events:blur").unwrap();
        assert!(matches!(spec.get("events"), Some(OperandSpec::Events(_))));

        let spec = dispatch("model:employee").unwrap();
        assert!(matches!(spec.get("model"), Some(OperandSpec::Model(_))));

        let spec = dispatch("placeholder:hint").unwrap();
        assert!(matches!(spec.get("placeholder"), Some(OperandSpec::DataBound(_))));
    }

    #[test]
    fn model_clause_is_not_data_bound_by_default() {
        // `|x` would be a bad filter if the payload were read as data-bound
        let spec = dispatch("model:employee|x").unwrap();
        match spec.get("model") {
            Some(OperandSpec::Model(model)) => {
                assert_eq!(model.model_names, ["employee|x"]);
                assert!(model.fallthrough.is_none());
            }
            other => panic!("expected model spec, got {other:?}"),
        }
    }

    #[test]
    fn legacy_fallthrough_attaches_data_bound_reading() {
        let options = CompileOptions {
            legacy_model_fallthrough: true,
        };
        let mut spec = BindingSpec::new();
        parse_binding_operand(&mut spec, "model:employee+company", &options).unwrap();
        match spec.get("model") {
            Some(OperandSpec::Model(model)) => {
                let data = model.fallthrough.as_ref().unwrap();
                assert_eq!(data.attributes, ["employee", "company"]);
            }
            other => panic!("expected model spec, got {other:?}"),
        }

        let mut spec = BindingSpec::new();
        let err = parse_binding_operand(&mut spec, "model:employee|x", &options).unwrap_err();
        assert!(matches!(err, BindError::InvalidFilterToken { .. }));
    }

    #[test]
    fn reject_missing_colon() {
        let err = dispatch("valueemployee").unwrap_err();
        assert!(matches!(err, BindError::MalformedOperand { ref clause, .. } if clause == "valueemployee"));
    }

    #[test]
    fn reject_extra_colon() {
        let err = dispatch("value:a:b").unwrap_err();
        assert!(matches!(err, BindError::MalformedOperand { .. }));
        assert!(err.to_string().contains("found 2"));
    }
}
