// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character listing tool.

use serde_json::{Map, Value, json};
use venice_core::request::number_to_string;
use venice_core::{
    Item, OutputItem, ParameterSet, ParameterSpec, ProviderResponse, RequestDescriptor,
    ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields};

const PATH: &str = "/characters";
const DEFAULT_LIMIT: u64 = 20;
const CHARACTER_FIELDS: &[&str] = &["id", "name", "description", "slug", "avatar_url"];

/// Lists the character personas available for chat.
pub struct ListCharactersTool;

impl ToolAdapter for ListCharactersTool {
    fn descriptor(&self) -> ToolDescriptor {
        descriptor(
            "veniceListCharactersTool",
            "Venice List Characters Tool",
            "List available Venice AI character personas",
            "Venice List Characters",
            "characters/list",
            vec![
                ParameterSpec::number("limit", "Limit", DEFAULT_LIMIT)
                    .range(1.0, 100.0)
                    .describe("Maximum number of characters to return"),
            ],
        )
    }

    fn build_request(
        &self,
        params: &ParameterSet,
        _item: &Item,
    ) -> Result<RequestDescriptor, VeniceError> {
        let limit = params
            .number("limit")?
            .unwrap_or_else(|| DEFAULT_LIMIT.into());
        Ok(RequestDescriptor::get(PATH).with_query("limit", number_to_string(&limit)))
    }

    fn shape_response(
        &self,
        _params: &ParameterSet,
        _item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError> {
        let response = response.into_json()?;
        // Records live under `data`, or the body itself is the list.
        let records = match response.get("data") {
            Some(data) if is_truthy(data) => data,
            _ => &response,
        };
        let characters: Vec<Value> = records
            .as_array()
            .map(|list| list.iter().map(pick_character_fields).collect())
            .unwrap_or_default();

        Ok(OutputItem::success(
            fields([
                ("count", json!(characters.len())),
                ("characters", Value::Array(characters)),
            ]),
            index,
        ))
    }
}

fn pick_character_fields(record: &Value) -> Value {
    let picked: Map<String, Value> = CHARACTER_FIELDS
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

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
