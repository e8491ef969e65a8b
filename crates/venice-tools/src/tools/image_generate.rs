// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image generation tool.

use serde_json::{Value, json};
use venice_core::{
    Item, OptionValue, OutputItem, ParameterSet, ParameterSpec, ProviderResponse,
    RequestDescriptor, ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields};

const PATH: &str = "/image/generate";
const DEFAULT_MODEL: &str = "fluently-xl";

const STYLE_PRESETS: &[&str] = &[
    "3D Model",
    "Analog Film",
    "Anime",
    "Cinematic",
    "Comic Book",
    "Digital Art",
    "Fantasy Art",
    "Photographic",
    "Pixel Art",
];

/// Generates images from a text prompt.
pub struct ImageGenerateTool;

impl ToolAdapter for ImageGenerateTool {
    fn descriptor(&self) -> ToolDescriptor {
        let mut presets = vec![OptionValue::new("None", "")];
        presets.extend(STYLE_PRESETS.iter().map(|p| OptionValue::new(p, *p)));

        descriptor(
            "veniceImageGenerateTool",
            "Venice Image Generate Tool",
            "Generate images from text prompts using Venice AI",
            "Venice Image Generate",
            "image/generate",
            vec![
                ParameterSpec::text("prompt", "Prompt", 4)
                    .required()
                    .describe("The text prompt to generate an image from"),
                ParameterSpec::options(
                    "model",
                    "Model",
                    DEFAULT_MODEL,
                    vec![
                        OptionValue::new("Fluently XL", "fluently-xl"),
                        OptionValue::new("Flux Dev", "flux-dev"),
                        OptionValue::new("Flux Dev Uncensored", "flux-dev-uncensored"),
                        OptionValue::new("Flux Schnell", "flux-schnell"),
                        OptionValue::new("HiDream", "hidream"),
                        OptionValue::new("Stable Diffusion 3.5", "stable-diffusion-3.5"),
                        OptionValue::new("Lustify", "lustify"),
                        OptionValue::new("Pony Realism", "pony-realism"),
                    ],
                )
                .describe("The model to use for image generation"),
                ParameterSpec::collection(
                    "options",
                    "Options",
                    vec![
                        ParameterSpec::number("width", "Width", 1024)
                            .describe("Width of the generated image in pixels"),
                        ParameterSpec::number("height", "Height", 1024)
                            .describe("Height of the generated image in pixels"),
                        ParameterSpec::number("steps", "Steps", 20)
                            .describe("Number of inference steps"),
                        ParameterSpec::number("cfg_scale", "CFG Scale", 7.5)
                            .describe("Classifier-free guidance scale"),
                        ParameterSpec::string("negative_prompt", "Negative Prompt", "")
                            .describe("What to avoid in the generated image"),
                        ParameterSpec::options("style_preset", "Style Preset", "", presets)
                            .describe("Style preset for the generated image"),
                        ParameterSpec::number("seed", "Seed", 0)
                            .describe("Random seed (0 for random)"),
                        ParameterSpec::boolean("hide_watermark", "Hide Watermark", false)
                            .describe("Whether to hide the Venice watermark"),
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
        let prompt = params.required_str("prompt")?;

        let mut body = fields([
            ("model", json!(params.str_or("model", DEFAULT_MODEL))),
            ("prompt", json!(prompt)),
        ]);
        body.extend(params.options().clone());
        // Only "" and null are dropped; 0 and false are meaningful.
        body.retain(|_, v| !matches!(v, Value::Null) && v.as_str() != Some(""));

        Ok(RequestDescriptor::post_json(PATH, Value::Object(body)))
    }

    fn shape_response(
        &self,
        params: &ParameterSet,
        _item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError> {
        let mut json = fields([
            ("model", json!(params.str_or("model", DEFAULT_MODEL))),
            ("prompt", json!(params.str_or("prompt", ""))),
        ]);
        if let Value::Object(body) = response.into_json()? {
            json.extend(body);
        }
        Ok(OutputItem::success(json, index))
    }
}
