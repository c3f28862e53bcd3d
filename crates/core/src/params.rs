//! Typed extraction helpers for JSON configuration values.
//!
//! Each helper takes a `serde_json::Value` object, a key, and a default.
//! A missing key or wrong-typed value silently yields the default, which is
//! how the pipeline guarantees that generation never fails solely because
//! a configuration entry is absent.

use serde_json::Value;

/// Extracts an `f64` from `obj[name]`, or `default`.
pub fn param_f64(obj: &Value, name: &str, default: f64) -> f64 {
    obj.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `obj[name]`, or `default`. Only non-negative
/// integers are accepted.
pub fn param_usize(obj: &Value, name: &str, default: usize) -> usize {
    obj.get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `u32` from `obj[name]`, or `default`. Values above
/// `u32::MAX` fall back to the default rather than truncating.
pub fn param_u32(obj: &Value, name: &str, default: u32) -> u32 {
    obj.get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a list of strings from `obj[name]`, or the defaults.
///
/// Non-string elements inside an otherwise valid array are skipped; an
/// array that yields no strings falls back to the defaults.
pub fn param_string_list(obj: &Value, name: &str, default: &[&str]) -> Vec<String> {
    let fallback = || default.iter().map(|s| (*s).to_owned()).collect();
    match obj.get(name).and_then(Value::as_array) {
        Some(items) => {
            let list: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect();
            if list.is_empty() {
                fallback()
            } else {
                list
            }
        }
        None => fallback(),
    }
}

/// Extracts a list of string lists (e.g. per-world hazard unlocks) from
/// `obj[name]`, or the defaults. Inner non-arrays and non-strings are
/// skipped; an empty result falls back wholesale.
pub fn param_string_table(obj: &Value, name: &str, default: &[&[&str]]) -> Vec<Vec<String>> {
    let fallback = || {
        default
            .iter()
            .map(|row| row.iter().map(|s| (*s).to_owned()).collect())
            .collect()
    };
    match obj.get(name).and_then(Value::as_array) {
        Some(rows) => {
            let table: Vec<Vec<String>> = rows
                .iter()
                .filter_map(Value::as_array)
                .map(|row| {
                    row.iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .collect();
            if table.is_empty() {
                fallback()
            } else {
                table
            }
        }
        None => fallback(),
    }
}
