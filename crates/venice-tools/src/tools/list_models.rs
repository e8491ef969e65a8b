// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model listing tool.

use serde_json::{Map, Value, json};
use venice_core::{
    Item, OptionValue, OutputItem, ParameterSet, ParameterSpec, ProviderResponse,
    RequestDescriptor, ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields};

const PATH: &str = "/models";
const ALL: &str = "all";
const MODEL_FIELDS: &[&str] = &["id", "type", "object", "created"];

/// Lists available models, optionally filtered by type.
pub struct ListModelsTool;

impl ToolAdapter for ListModelsTool {
    fn descriptor(&self) -> ToolDescriptor {
        descriptor(
            "veniceListModelsTool",
            "Venice List Models Tool",
            "List available Venice AI models, optionally filtered by type",
            "Venice List Models",
            "models/list",
            vec![
                ParameterSpec::options(
                    "type",
                    "Type Filter",
                    ALL,
                    vec![
                        OptionValue::new("All", "all"),
                        OptionValue::new("Text/Chat", "text"),
                        OptionValue::new("Image", "image"),
                        OptionValue::new("Embedding", "embedding"),
                        OptionValue::new("TTS (Text-to-Speech)", "tts"),
                        OptionValue::new("ASR (Speech-to-Text)", "asr"),
                        OptionValue::new("Upscale", "upscale"),
                    ],
                )
                .describe("Filter models by type"),
            ],
        )
    }

    fn build_request(
        &self,
        params: &ParameterSet,
        _item: &Item,
    ) -> Result<RequestDescriptor, VeniceError> {
        let filter = params.str_or("type", ALL);
        let request = RequestDescriptor::get(PATH);
        Ok(if filter == ALL {
            request
        } else {
            request.with_query("type", filter)
        })
    }

    fn shape_response(
        &self,
        params: &ParameterSet,
        _item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError> {
        let response = response.into_json()?;
        let models: Vec<Value> = match response.get("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => list.iter().map(pick_model_fields).collect(),
            Some(other) => {
                return Err(VeniceError::malformed(format!(
                    "expected `data` to be a list of models, got {other}"
                )));
            }
        };

        Ok(OutputItem::success(
            fields([
                ("filter", json!(params.str_or("type", ALL))),
                ("count", json!(models.len())),
                ("models", Value::Array(models)),
            ]),
            index,
        ))
    }
}

fn pick_model_fields(record: &Value) -> Value {
    let picked: Map<String, Value> = MODEL_FIELDS
        .iter()
        .filter_map(|&key| {
            record
                .get(key)
                .filter(|v| !v.is_null())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect();
    Value::Object(picked)
}
