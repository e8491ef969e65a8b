// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The seven Venice AI endpoint adapters.

pub mod chat;
pub mod embeddings;
pub mod image_generate;
pub mod image_upscale;
pub mod list_characters;
pub mod list_models;
pub mod text_to_speech;

pub use chat::ChatTool;
pub use embeddings::EmbeddingsTool;
pub use image_generate::ImageGenerateTool;
pub use image_upscale::ImageUpscaleTool;
pub use list_characters::ListCharactersTool;
pub use list_models::ListModelsTool;
pub use text_to_speech::TextToSpeechTool;

use std::sync::Arc;

use serde_json::{Map, Value};
use venice_core::{CredentialRequirement, ParameterSpec, ToolDescriptor};

use crate::registry::ToolRegistry;

/// Registers all seven adapters into the given registry.
pub fn register_all(registry: &mut ToolRegistry) {
    registry.register(Arc::new(ChatTool));
    registry.register(Arc::new(EmbeddingsTool));
    registry.register(Arc::new(ImageGenerateTool));
    registry.register(Arc::new(ImageUpscaleTool));
    registry.register(Arc::new(ListCharactersTool));
    registry.register(Arc::new(ListModelsTool));
    registry.register(Arc::new(TextToSpeechTool));
}

/// Descriptor shared shape: Venice credential, usable as an agent tool.
fn descriptor(
    name: &str,
    display_name: &str,
    description: &str,
    default_node_name: &str,
    doc_path: &str,
    parameters: Vec<ParameterSpec>,
) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        default_node_name: default_node_name.to_string(),
        documentation_url: format!("https://docs.venice.ai/api-reference/endpoint/{doc_path}"),
        usable_as_tool: true,
        credentials: vec![CredentialRequirement::venice()],
        parameters,
    }
}

/// Builds a JSON object from `(key, value)` pairs.
fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Length as the host measures strings (UTF-16 code units).
fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
