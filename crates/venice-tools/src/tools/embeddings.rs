// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embeddings tool.

use serde_json::{Value, json};
use venice_core::{
    Item, OptionValue, OutputItem, ParameterSet, ParameterSpec, ProviderResponse,
    RequestDescriptor, ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields, text_length};

const PATH: &str = "/embeddings";
const DEFAULT_MODEL: &str = "text-embedding-bge-m3";
const DEFAULT_ENCODING: &str = "float";

/// Generates vector embeddings for a piece of text.
pub struct EmbeddingsTool;

impl ToolAdapter for EmbeddingsTool {
    fn descriptor(&self) -> ToolDescriptor {
        descriptor(
            "veniceEmbeddingsTool",
            "Venice Embeddings Tool",
            "Generate text embeddings for semantic search and similarity",
            "Venice Embeddings",
            "embeddings/generate-embeddings",
            vec![
                ParameterSpec::text("input", "Text", 4)
                    .required()
                    .describe("The text to generate embeddings for"),
                ParameterSpec::options(
                    "model",
                    "Model",
                    DEFAULT_MODEL,
                    vec![
                        OptionValue::new("BGE-M3", "text-embedding-bge-m3"),
                        OptionValue::new("Ada 002", "text-embedding-ada-002"),
                    ],
                )
                .describe("The embedding model to use"),
                ParameterSpec::collection(
                    "options",
                    "Options",
                    vec![
                        ParameterSpec::options(
                            "encoding_format",
                            "Encoding Format",
                            DEFAULT_ENCODING,
                            vec![
                                OptionValue::new("Float", "float"),
                                OptionValue::new("Base64", "base64"),
                            ],
                        )
                        .describe("The format to return embeddings in"),
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
        let input = params.required_str("input")?;
        let encoding = params
            .option_str("encoding_format")
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ENCODING);

        Ok(RequestDescriptor::post_json(
            PATH,
            json!({
                "model": params.str_or("model", DEFAULT_MODEL),
                "input": input,
                "encoding_format": encoding,
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
        let input = params.str_or("input", "");
        let mut json = fields([
            ("model", json!(params.str_or("model", DEFAULT_MODEL))),
            ("inputLength", json!(text_length(input))),
        ]);
        // Response fields win over ours.
        if let Value::Object(body) = response.into_json()? {
            json.extend(body);
        }
        Ok(OutputItem::success(json, index))
    }
}
