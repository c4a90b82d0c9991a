// src/ops.rs
//! Reinterprets an opaque line as a JSON management operation and renders the
//! CLI form `/addr=val/addr=val:operation(key="value",...)`.
//!
//! The core never looks inside a line; this transformation is applied by the
//! renderer, after consolidation, when the caller asks for it.

use serde_json::Value;

use crate::error::Result;

/// Renders one JSON operation line in CLI form.
///
/// The `address` field is expected to be a list of single-property objects
/// and renders in order; `operation` follows after `:`; any remaining
/// non-null fields render parenthesized. Scalar parameter values are quoted,
/// with a leading `$` escaped; object and array values render as raw JSON.
///
/// # Errors
/// Fails with [`crate::FoldError::Json`] when the line is not valid JSON.
pub fn to_cli_line(line: &str) -> Result<String> {
    let op: Value = serde_json::from_str(line)?;

    let mut out = String::from("/");
    if let Some(address) = op.get("address").and_then(Value::as_array) {
        let mut first = true;
        for step in address {
            let Some(props) = step.as_object() else {
                continue;
            };
            for (key, value) in props {
                if !first {
                    out.push('/');
                }
                first = false;
                out.push_str(key);
                out.push('=');
                out.push_str(&scalar_text(value));
            }
        }
    }

    out.push(':');
    match op.get("operation").and_then(Value::as_str) {
        Some(name) => out.push_str(name),
        None => out.push_str("undefined"),
    }

    if let Some(fields) = op.as_object() {
        if fields.len() > 2 {
            out.push('(');
            let mut written = 0;
            for (key, value) in fields {
                if key == "address" || key == "operation" || value.is_null() {
                    continue;
                }
                if written > 0 {
                    out.push(',');
                }
                written += 1;
                out.push_str(key);
                out.push('=');
                push_param(&mut out, value);
            }
            out.push(')');
        }
    }

    Ok(out)
}

fn push_param(out: &mut String, value: &Value) {
    if value.is_object() || value.is_array() {
        out.push_str(&value.to_string());
        return;
    }
    let text = scalar_text(value);
    out.push('"');
    if text.starts_with('$') {
        out.push('\\');
    }
    out.push_str(&text);
    out.push('"');
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
