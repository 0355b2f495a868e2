//! JSON values written as source literals.

use std::fmt::Write;

use serde_json::Value;

use crate::naming::is_js_proto;

/// Python 2 literal for a JSON value. Strings are ASCII-only so the generated
/// file needs no coding declaration.
pub fn python(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => python_string(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", python_string(k), python(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Single-quoted Python string literal.
pub fn python_string(s: &str) -> String {
    let mut out: String = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            c if u32::from(c) <= 0xff => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c if u32::from(c) <= 0xffff => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(out, "\\U{:08x}", u32::from(c));
            }
        }
    }
    out.push('\'');
    out
}

/// Body of a triple-quoted Python docstring. Line breaks are kept; quotes,
/// backslashes and non-ASCII characters are escaped.
pub fn python_docstring(s: &str) -> String {
    let mut out: String = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push('\n'),
            '"' => out.push_str("\\\""),
            _ => {
                let escaped: String = python_string(&c.to_string());
                out.push_str(&escaped[1..escaped.len() - 1]);
            }
        }
    }
    out
}

/// JavaScript literal for a JSON value. Compact JSON, except that a
/// `__proto__` key is written as a computed key so it stays an own property.
pub fn javascript(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(javascript).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| {
                    if is_js_proto(k) {
                        format!("[{}]:{}", javascript_string(k), javascript(v))
                    } else {
                        format!("{}:{}", javascript_string(k), javascript(v))
                    }
                })
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
    }
}

/// Double-quoted JavaScript string literal.
pub fn javascript_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
