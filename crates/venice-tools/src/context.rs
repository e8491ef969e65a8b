// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process [`ExecutionContext`] with per-item expression evaluation.
//!
//! Parameter values that start with `=` are expressions. Every
//! `{{ $json.path }}` segment is replaced by the value at `path` in the
//! current item's JSON. A value consisting of a single segment keeps the
//! referenced JSON type; segments embedded in surrounding text are
//! stringified. Missing paths evaluate to `null` (whole value) or the empty
//! string (embedded).

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use tracing::trace;
use venice_core::{CREDENTIAL_NAME, Credentials, ExecutionContext, Item, VeniceError};

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").expect("segment pattern is valid"));

static JSON_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$json((?:\.[A-Za-z_][A-Za-z0-9_\-]*|\[\d+\])*)$")
        .expect("path pattern is valid")
});

static PATH_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.([A-Za-z_][A-Za-z0-9_\-]*)|\[(\d+)\]").expect("part pattern is valid")
});

/// A run's input items, node parameters, and credentials.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    items: Vec<Item>,
    parameters: Map<String, Value>,
    item_parameters: Vec<Map<String, Value>>,
    credentials: Option<Credentials>,
    continue_on_fail: bool,
}

impl RunContext {
    /// A context over exactly the given items.
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Node parameters shared by every item.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Per-item overrides, matched to items by position. Top-level keys in
    /// an override replace the node parameter of the same name.
    pub fn with_item_parameters(mut self, overrides: Vec<Map<String, Value>>) -> Self {
        self.item_parameters = overrides;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

impl ExecutionContext for RunContext {
    fn input_items(&self) -> &[Item] {
        &self.items
    }

    fn parameters(&self, index: usize) -> Result<Map<String, Value>, VeniceError> {
        let item = self.items.get(index).ok_or_else(|| {
            VeniceError::Internal(format!(
                "parameters requested for item {index}, but the run has {} items",
                self.items.len()
            ))
        })?;

        let mut merged = self.parameters.clone();
        if let Some(overrides) = self.item_parameters.get(index) {
            merged.extend(overrides.clone());
        }

        merged
            .into_iter()
            .map(|(name, value)| Ok((name, evaluate(value, &item.json)?)))
            .collect()
    }

    fn credentials(&self) -> Result<Credentials, VeniceError> {
        self.credentials
            .clone()
            .filter(|c| !c.api_key.trim().is_empty())
            .ok_or_else(|| {
                VeniceError::Config(format!("no credentials configured for `{CREDENTIAL_NAME}`"))
            })
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}

/// Evaluates expressions in `value` against `json`, descending into
/// objects and arrays.
pub fn evaluate(value: Value, json: &Map<String, Value>) -> Result<Value, VeniceError> {
    match value {
        Value::String(s) => match s.strip_prefix('=') {
            Some(expression) => evaluate_expression(expression, json),
            None => Ok(Value::String(s)),
        },
        Value::Array(list) => list
            .into_iter()
            .map(|v| evaluate(v, json))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| Ok((k, evaluate(v, json)?)))
            .collect::<Result<Map<_, _>, VeniceError>>()
            .map(Value::Object),
        other => Ok(other),
    }
}

fn evaluate_expression(expression: &str, json: &Map<String, Value>) -> Result<Value, VeniceError> {
    trace!(expression, "evaluating parameter expression");

    let trimmed = expression.trim();
    if let Some(whole) = SEGMENT.captures(trimmed)
        && whole.get(0).is_some_and(|m| m.len() == trimmed.len())
    {
        let path = &whole[1];
        return Ok(lookup(path, json)?.cloned().unwrap_or(Value::Null));
    }

    let mut failure = None;
    let rendered = SEGMENT.replace_all(expression, |caps: &Captures| {
        match lookup(&caps[1], json) {
            Ok(found) => found.map(stringify).unwrap_or_default(),
            Err(err) => {
                if failure.is_none() {
                    failure = Some(err);
                }
                String::new()
            }
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(Value::String(rendered.into_owned())),
    }
}

fn lookup<'a>(path: &str, json: &'a Map<String, Value>) -> Result<Option<&'a Value>, VeniceError> {
    let rest = JSON_PATH
        .captures(path)
        .and_then(|c| c.get(1))
        .ok_or_else(|| VeniceError::validation(format!("unsupported expression `{{{{ {path} }}}}`")))?
        .as_str();

    let mut parts = PATH_PART.captures_iter(rest);
    let Some(first) = parts.next() else {
        return Err(VeniceError::validation(
            "expression `$json` must name a field",
        ));
    };
    let Some(key) = first.get(1) else {
        return Ok(None);
    };
    let mut current = json.get(key.as_str());

    for part in parts {
        current = match (current, part.get(1), part.get(2)) {
            (Some(Value::Object(map)), Some(key), _) => map.get(key.as_str()),
            (Some(Value::Array(list)), _, Some(idx)) => {
                idx.as_str().parse::<usize>().ok().and_then(|i| list.get(i))
            }
            _ => None,
        };
    }
    Ok(current)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
