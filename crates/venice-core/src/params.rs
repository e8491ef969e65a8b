// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-item parameter resolution.
//!
//! Top-level parameters the host did not supply take their declared default.
//! Fields inside an options collection stay absent unless supplied, so each
//! adapter decides its own fallback for them.

use serde_json::{Map, Value};

use crate::descriptor::{ParameterKind, ToolDescriptor};
use crate::error::VeniceError;

/// Resolved parameter values for one item. Read-only after resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSet {
    values: Map<String, Value>,
}

impl ParameterSet {
    /// Resolves `raw` against the parameters declared by `descriptor`.
    /// Keys that are not declared are dropped.
    pub fn resolve(descriptor: &ToolDescriptor, mut raw: Map<String, Value>) -> Self {
        let mut values = Map::new();
        for spec in &descriptor.parameters {
            let value = match raw.remove(&spec.name) {
                Some(Value::Null) | None => spec.default.clone(),
                Some(value) => value,
            };
            let value = match (&spec.kind, value) {
                (ParameterKind::Collection { .. }, Value::Object(map)) => Value::Object(map),
                (ParameterKind::Collection { .. }, _) => Value::Object(Map::new()),
                (_, value) => value,
            };
            values.insert(spec.name.clone(), value);
        }
        Self { values }
    }

    /// Wraps already-resolved values.
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// A required string parameter. Missing, non-string, or empty values fail validation.
    pub fn required_str(&self, name: &str) -> Result<&str, VeniceError> {
        match self.value(name) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
            Some(Value::String(_)) | None => Err(VeniceError::validation(format!(
                "missing required parameter `{name}`"
            ))),
            Some(other) => Err(VeniceError::validation(format!(
                "parameter `{name}` must be a string, got {other}"
            ))),
        }
    }

    /// A string parameter, falling back to `default` when absent.
    pub fn str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.value(name).and_then(Value::as_str).unwrap_or(default)
    }

    /// A numeric parameter. Numeric strings are accepted.
    pub fn number(&self, name: &str) -> Result<Option<serde_json::Number>, VeniceError> {
        self.value(name)
            .map(|v| as_number(name, v))
            .transpose()
    }

    /// The options collection (empty when not supplied).
    pub fn options(&self) -> &Map<String, Value> {
        static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
        self.values
            .get("options")
            .and_then(Value::as_object)
            .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
    }

    /// A field of the options collection. `null` counts as absent.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options().get(name).filter(|v| !v.is_null())
    }

    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(Value::as_str)
    }

    pub fn option_bool(&self, name: &str) -> Result<Option<bool>, VeniceError> {
        match self.option(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(VeniceError::validation(format!(
                "option `{name}` must be a boolean, got {other}"
            ))),
        }
    }

    pub fn option_number(&self, name: &str) -> Result<Option<serde_json::Number>, VeniceError> {
        self.option(name).map(|v| as_number(name, v)).transpose()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

fn as_number(name: &str, value: &Value) -> Result<serde_json::Number, VeniceError> {
    let invalid = || VeniceError::validation(format!("parameter `{name}` must be a number, got {value}"));
    match value {
        Value::Number(n) => Ok(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Ok(i.into())
            } else {
                s.parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .ok_or_else(invalid)
            }
        }
        _ => Err(invalid()),
    }
}
