//! Template loading and management

use protoc_gen_rest_common::{unexport, GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name the service adapter template is registered under
pub const SERVICE_TEMPLATE: &str = "service.go";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Register custom filters
    tera.register_filter("unexport", unexport_filter);

    tera.add_raw_template(SERVICE_TEMPLATE, include_str!("../templates/service.go.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load service.go template: {}", e))
        })?;

    Ok(tera)
}

/// Filter to lower-case the first letter of a Go identifier
fn unexport_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("unexport filter expects a string"))?;

    Ok(Value::String(unexport(s)))
}
