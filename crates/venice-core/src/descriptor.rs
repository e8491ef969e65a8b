// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static tool descriptors: display metadata, parameters, and credentials.
//!
//! Descriptors are pure data. [`ToolDescriptor::input_schema`] renders the
//! parameter list as a JSON Schema object for agent hosts that call the
//! adapters as LLM tools.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::types::CREDENTIAL_NAME;

/// A credential resource an adapter needs at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialRequirement {
    pub name: String,
    pub required: bool,
}

impl CredentialRequirement {
    /// The Venice API key credential.
    pub fn venice() -> Self {
        Self {
            name: CREDENTIAL_NAME.to_string(),
            required: true,
        }
    }
}

/// One allowed value of an options parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionValue {
    pub name: String,
    pub value: Value,
}

impl OptionValue {
    pub fn new(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// The type of a declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParameterKind {
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Options { options: Vec<OptionValue> },
    Collection { options: Vec<ParameterSpec> },
}

/// A declared parameter with its default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    pub display_name: String,
    #[serde(flatten)]
    pub kind: ParameterKind,
    pub default: Value,
    pub required: bool,
    pub description: String,
}

impl ParameterSpec {
    fn new(name: &str, display_name: &str, kind: ParameterKind, default: Value) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            kind,
            default,
            required: false,
            description: String::new(),
        }
    }

    pub fn string(name: &str, display_name: &str, default: &str) -> Self {
        Self::new(name, display_name, ParameterKind::String { rows: None }, json!(default))
    }

    /// A multi-line text parameter.
    pub fn text(name: &str, display_name: &str, rows: u32) -> Self {
        Self::new(
            name,
            display_name,
            ParameterKind::String { rows: Some(rows) },
            json!(""),
        )
    }

    pub fn number(name: &str, display_name: &str, default: impl Into<Value>) -> Self {
        Self::new(
            name,
            display_name,
            ParameterKind::Number {
                min: None,
                max: None,
            },
            default.into(),
        )
    }

    pub fn boolean(name: &str, display_name: &str, default: bool) -> Self {
        Self::new(name, display_name, ParameterKind::Boolean, json!(default))
    }

    pub fn options(
        name: &str,
        display_name: &str,
        default: impl Into<Value>,
        options: Vec<OptionValue>,
    ) -> Self {
        Self::new(
            name,
            display_name,
            ParameterKind::Options { options },
            default.into(),
        )
    }

    /// A collection of optional fields. Defaults to an empty object.
    pub fn collection(name: &str, display_name: &str, options: Vec<ParameterSpec>) -> Self {
        Self::new(
            name,
            display_name,
            ParameterKind::Collection { options },
            json!({}),
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn range(mut self, lower: f64, upper: f64) -> Self {
        if let ParameterKind::Number { min, max } = &mut self.kind {
            *min = Some(lower);
            *max = Some(upper);
        }
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// JSON Schema fragment for this parameter.
    pub fn json_schema(&self) -> Value {
        let mut schema = Map::new();
        match &self.kind {
            ParameterKind::String { .. } => {
                schema.insert("type".into(), json!("string"));
            }
            ParameterKind::Number { min, max } => {
                schema.insert("type".into(), json!("number"));
                if let Some(min) = min {
                    schema.insert("minimum".into(), json!(min));
                }
                if let Some(max) = max {
                    schema.insert("maximum".into(), json!(max));
                }
            }
            ParameterKind::Boolean => {
                schema.insert("type".into(), json!("boolean"));
            }
            ParameterKind::Options { options } => {
                let values: Vec<Value> = options.iter().map(|o| o.value.clone()).collect();
                let ty = if values.iter().all(Value::is_number) {
                    "number"
                } else {
                    "string"
                };
                schema.insert("type".into(), json!(ty));
                schema.insert("enum".into(), Value::Array(values));
            }
            ParameterKind::Collection { options } => {
                let properties: Map<String, Value> = options
                    .iter()
                    .map(|o| (o.name.clone(), o.json_schema()))
                    .collect();
                schema.insert("type".into(), json!("object"));
                schema.insert("properties".into(), Value::Object(properties));
                return Value::Object(schema);
            }
        }
        if !self.description.is_empty() {
            schema.insert("description".into(), json!(self.description));
        }
        if !self.required {
            schema.insert("default".into(), self.default.clone());
        }
        Value::Object(schema)
    }
}

/// Declarative description of one tool adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub default_node_name: String,
    pub documentation_url: String,
    pub usable_as_tool: bool,
    pub credentials: Vec<CredentialRequirement>,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDescriptor {
    /// Looks up a top-level parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Renders all parameters as a JSON Schema object.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolDescriptor {
        ToolDescriptor {
            name: "sampleTool".into(),
            display_name: "Sample Tool".into(),
            description: "Does sampling".into(),
            default_node_name: "Sample".into(),
            documentation_url: "https://example.com".into(),
            usable_as_tool: true,
            credentials: vec![CredentialRequirement::venice()],
            parameters: vec![
                ParameterSpec::text("message", "Message", 4)
                    .required()
                    .describe("What to send"),
                ParameterSpec::options(
                    "scale",
                    "Scale",
                    2,
                    vec![OptionValue::new("2x", 2), OptionValue::new("4x", 4)],
                ),
                ParameterSpec::collection(
                    "options",
                    "Options",
                    vec![ParameterSpec::number("temperature", "Temperature", 0.7).range(0.0, 2.0)],
                ),
            ],
        }
    }

    #[test]
    fn input_schema_lists_required_parameters() {
        let schema = sample().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["message"]));
        assert_eq!(schema["properties"]["message"]["type"], "string");
        assert!(schema["properties"]["message"].get("default").is_none());
    }

    #[test]
    fn numeric_options_render_as_number_enum() {
        let schema = sample().input_schema();
        assert_eq!(schema["properties"]["scale"]["type"], "number");
        assert_eq!(schema["properties"]["scale"]["enum"], json!([2, 4]));
        assert_eq!(schema["properties"]["scale"]["default"], 2);
    }

    #[test]
    fn collection_renders_nested_properties() {
        let schema = sample().input_schema();
        let temp = &schema["properties"]["options"]["properties"]["temperature"];
        assert_eq!(temp["minimum"], 0.0);
        assert_eq!(temp["maximum"], 2.0);
        assert_eq!(temp["default"], 0.7);
    }

    #[test]
    fn parameter_lookup_and_credentials() {
        let desc = sample();
        assert!(desc.parameter("scale").is_some());
        assert!(desc.parameter("missing").is_none());
        assert_eq!(desc.credentials[0].name, "veniceAiApi");
    }
}
