// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat completion tool: one user message, optional system prompt.

use serde_json::{Value, json};
use venice_core::{
    Item, OptionValue, OutputItem, ParameterSet, ParameterSpec, ProviderResponse,
    RequestDescriptor, ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields};

const PATH: &str = "/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u64 = 1000;
const DEFAULT_WEB_SEARCH: &str = "auto";

/// Sends a chat message to a Venice LLM and returns the first choice.
pub struct ChatTool;

impl ToolAdapter for ChatTool {
    fn descriptor(&self) -> ToolDescriptor {
        descriptor(
            "veniceChatTool",
            "Venice Chat Tool",
            "Send chat messages to Venice AI LLMs for sub-conversations",
            "Venice Chat",
            "chat/completions",
            vec![
                ParameterSpec::text("message", "Message", 4)
                    .required()
                    .describe("The message to send to the AI"),
                ParameterSpec::options(
                    "model",
                    "Model",
                    DEFAULT_MODEL,
                    vec![
                        OptionValue::new("Llama 3.3 70B", "llama-3.3-70b"),
                        OptionValue::new("Llama 3.1 405B", "llama-3.1-405b"),
                        OptionValue::new("DeepSeek R1 Llama 70B", "deepseek-r1-llama-70b"),
                        OptionValue::new("DeepSeek R1", "deepseek-r1"),
                        OptionValue::new("Qwen 2.5 72B", "qwen-2.5-72b"),
                        OptionValue::new("Dolphin 2.9.2 Mixtral", "dolphin-2.9.2-mixtral-8x22b"),
                    ],
                )
                .describe("The model to use for chat completion"),
                ParameterSpec::collection(
                    "options",
                    "Options",
                    vec![
                        ParameterSpec::text("system_prompt", "System Prompt", 4)
                            .describe("System message to set the behavior of the assistant"),
                        ParameterSpec::number("temperature", "Temperature", DEFAULT_TEMPERATURE)
                            .range(0.0, 2.0)
                            .describe("Sampling temperature (0-2)"),
                        ParameterSpec::number("max_tokens", "Max Tokens", DEFAULT_MAX_TOKENS)
                            .describe("Maximum number of tokens to generate"),
                        ParameterSpec::string("character_id", "Character ID", "")
                            .describe("Optional Venice character persona ID to use"),
                        ParameterSpec::options(
                            "enable_web_search",
                            "Enable Web Search",
                            DEFAULT_WEB_SEARCH,
                            vec![
                                OptionValue::new("Auto", "auto"),
                                OptionValue::new("Always", "on"),
                                OptionValue::new("Never", "off"),
                            ],
                        )
                        .describe("Whether to enable web search for answers"),
                        ParameterSpec::boolean(
                            "include_venice_system_prompt",
                            "Include Venice System Prompt",
                            false,
                        )
                        .describe("Whether to include the Venice default system prompt"),
                    ],
                ),
            ],
        )
    }

    fn build_request(
        &self,
        params: &ParameterSet,
        _item: &Item,
    ) -> Result<RequestDescriptor, VeniceError> {
        let message = params.required_str("message")?;
        let model = params.str_or("model", DEFAULT_MODEL);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = params.option_str("system_prompt").filter(|s| !s.is_empty()) {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": message}));

        // Absent options fall back; explicit 0 / false are sent as given.
        let temperature = match params.option_number("temperature")? {
            Some(n) => Value::Number(n),
            None => json!(DEFAULT_TEMPERATURE),
        };
        let max_tokens = match params.option_number("max_tokens")? {
            Some(n) => Value::Number(n),
            None => json!(DEFAULT_MAX_TOKENS),
        };

        let mut venice_parameters = fields([
            (
                "enable_web_search",
                json!(params.option_str("enable_web_search").unwrap_or(DEFAULT_WEB_SEARCH)),
            ),
            (
                "include_venice_system_prompt",
                json!(params.option_bool("include_venice_system_prompt")?.unwrap_or(false)),
            ),
        ]);
        if let Some(character) = params.option_str("character_id").filter(|s| !s.is_empty()) {
            venice_parameters.insert("character_id".into(), json!(character));
        }

        Ok(RequestDescriptor::post_json(
            PATH,
            json!({
                "model": model,
                "messages": messages,
                "temperature": temperature,
                "max_tokens": max_tokens,
                "venice_parameters": venice_parameters,
            }),
        ))
    }

    fn shape_response(
        &self,
        params: &ParameterSet,
        _item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError> {
        let response = response.into_json()?;
        let output = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let mut json = fields([
            ("model", json!(params.str_or("model", DEFAULT_MODEL))),
            ("input", json!(params.str_or("message", ""))),
            ("output", json!(output)),
        ]);
        if let Some(usage) = response.get("usage").filter(|u| !u.is_null()) {
            json.insert("usage".into(), usage.clone());
        }
        Ok(OutputItem::success(json, index))
    }
}
