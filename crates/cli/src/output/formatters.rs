//! Output formatters

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter.
///
/// Renders `key: value` lines, nesting objects and lists by indentation.
pub struct PlainFormatter;

impl PlainFormatter {
    /// Format a value as indented plain text
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        let mut lines = Vec::new();
        Self::write_value(&json, 0, &mut lines);
        Ok(lines.join("\n"))
    }

    fn write_value(value: &Value, indent: usize, lines: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(obj) => {
                for (key, v) in obj {
                    if Self::is_scalar(v) {
                        lines.push(format!("{}{}: {}", pad, key, Self::scalar(v)));
                    } else {
                        lines.push(format!("{}{}:", pad, key));
                        Self::write_value(v, indent + 1, lines);
                    }
                }
            }
            Value::Array(arr) => {
                for v in arr {
                    if Self::is_scalar(v) {
                        lines.push(format!("{}- {}", pad, Self::scalar(v)));
                    } else {
                        lines.push(format!("{}-", pad));
                        Self::write_value(v, indent + 1, lines);
                    }
                }
            }
            scalar => lines.push(format!("{}{}", pad, Self::scalar(scalar))),
        }
    }

    fn is_scalar(value: &Value) -> bool {
        !matches!(value, Value::Object(_) | Value::Array(_))
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
