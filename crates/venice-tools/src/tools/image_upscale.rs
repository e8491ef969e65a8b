// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image upscale tool.
//!
//! Uploads the item's image attachment as multipart form data and returns
//! the upscaled image as a new attachment. The provider's bytes are passed
//! through untouched.

use serde_json::{Value, json};
use venice_core::request::number_to_string;
use venice_core::{
    BinaryData, FormField, Item, OptionValue, OutputItem, ParameterSet, ParameterSpec,
    ProviderResponse, RequestDescriptor, ResponseFormat, ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields};

const PATH: &str = "/image/upscale";
const DEFAULT_BINARY_PROPERTY: &str = "data";
const DEFAULT_SCALE: u64 = 2;
const DEFAULT_FILE_NAME: &str = "image";
const DEFAULT_MIME_TYPE: &str = "image/png";

/// Upscales and optionally enhances an image attachment.
pub struct ImageUpscaleTool;

impl ImageUpscaleTool {
    /// The attachment named by `binaryProperty`, or a binary-missing error.
    fn source_image<'a>(
        &self,
        params: &ParameterSet,
        item: &'a Item,
    ) -> Result<&'a BinaryData, VeniceError> {
        let property = params.required_str("binaryProperty")?;
        let binary = item.binary.as_ref().ok_or_else(|| VeniceError::BinaryMissing {
            message: "No binary data exists on item!".into(),
        })?;
        binary.get(property).ok_or_else(|| VeniceError::BinaryMissing {
            message: format!("No binary data property \"{property}\" exists on item!"),
        })
    }

    fn scale(&self, params: &ParameterSet) -> Result<serde_json::Number, VeniceError> {
        Ok(params
            .number("scale")?
            .unwrap_or_else(|| DEFAULT_SCALE.into()))
    }
}

fn file_name(image: &BinaryData) -> &str {
    image
        .file_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
}

impl ToolAdapter for ImageUpscaleTool {
    fn descriptor(&self) -> ToolDescriptor {
        descriptor(
            "veniceImageUpscaleTool",
            "Venice Image Upscale Tool",
            "Upscale and enhance images using Venice AI",
            "Venice Image Upscale",
            "image/upscale",
            vec![
                ParameterSpec::string("binaryProperty", "Binary Property", DEFAULT_BINARY_PROPERTY)
                    .required()
                    .describe("Name of the binary property containing the image to upscale"),
                ParameterSpec::options(
                    "scale",
                    "Scale Factor",
                    DEFAULT_SCALE,
                    vec![OptionValue::new("2x", 2), OptionValue::new("4x", 4)],
                )
                .describe("How much to upscale the image"),
                ParameterSpec::collection(
                    "options",
                    "Options",
                    vec![
                        ParameterSpec::boolean("enhance", "Enhance", false)
                            .describe("Whether to enhance the upscaled image"),
                        ParameterSpec::number("enhanceCreativity", "Enhance Creativity", 0.35)
                            .range(0.0, 1.0)
                            .describe("Creativity level for enhancement (0-1)"),
                        ParameterSpec::string("enhancePrompt", "Enhance Prompt", "")
                            .describe("Optional prompt for enhancement direction"),
                    ],
                ),
            ],
        )
    }

    fn build_request(
        &self,
        params: &ParameterSet,
        item: &Item,
    ) -> Result<RequestDescriptor, VeniceError> {
        let image = self.source_image(params, item)?;
        let scale = self.scale(params)?;

        let mut form = vec![
            FormField::text("scale", number_to_string(&scale)),
            FormField::File {
                name: "image".into(),
                data: image.data.clone(),
                file_name: file_name(image).to_string(),
                content_type: image
                    .mime_type
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            },
        ];
        if let Some(enhance) = params.option_bool("enhance")? {
            form.push(FormField::text("enhance", enhance.to_string()));
        }
        if let Some(creativity) = params.option_number("enhanceCreativity")? {
            form.push(FormField::text(
                "enhanceCreativity",
                number_to_string(&creativity),
            ));
        }
        if let Some(prompt) = params.option_str("enhancePrompt").filter(|s| !s.is_empty()) {
            form.push(FormField::text("prompt", prompt));
        }

        Ok(RequestDescriptor::post_multipart(PATH, form).expecting(ResponseFormat::Binary))
    }

    fn shape_response(
        &self,
        params: &ParameterSet,
        item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError> {
        let image = self.source_image(params, item)?;
        let (body, content_type) = response.into_bytes();
        let mime_type = content_type
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        let json = fields([
            ("scale", Value::Number(self.scale(params)?)),
            (
                "enhance",
                json!(params.option_bool("enhance")?.unwrap_or(false)),
            ),
        ]);
        Ok(OutputItem::success(json, index).with_binary(
            "data",
            BinaryData::new(body, format!("upscaled_{}", file_name(image)), mime_type),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venice_test_utils::fixtures::{image_item, object};

    fn params(raw: Value) -> ParameterSet {
        ParameterSet::resolve(&ImageUpscaleTool.descriptor(), object(raw))
    }

    fn text_field<'a>(req: &'a RequestDescriptor, name: &str) -> Option<&'a str> {
        match req.form_field(name)? {
            FormField::Text { value, .. } => Some(value.as_str()),
            FormField::File { .. } => None,
        }
    }

    #[test]
    fn item_without_binary_is_rejected() {
        let err = ImageUpscaleTool
            .build_request(&params(json!({})), &Item::default())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "No binary data exists on item!");
    }

    #[test]
    fn missing_property_is_rejected() {
        let item = image_item("photo", "cat.png");
        let err = ImageUpscaleTool
            .build_request(&params(json!({})), &item)
            .unwrap_err();
        assert!(matches!(err, VeniceError::BinaryMissing { .. }));
        assert_eq!(
            err.to_string(),
            "No binary data property \"data\" exists on item!"
        );
    }

    #[test]
    fn form_carries_image_and_default_scale() {
        let item = image_item("data", "cat.png");
        let req = ImageUpscaleTool
            .build_request(&params(json!({})), &item)
            .unwrap();
        assert_eq!(req.path, "/image/upscale");
        assert_eq!(req.response_format, ResponseFormat::Binary);
        assert_eq!(text_field(&req, "scale"), Some("2"));
        assert!(req.form_field("enhance").is_none());
        assert!(req.form_field("prompt").is_none());
        match req.form_field("image").unwrap() {
            FormField::File {
                file_name,
                content_type,
                data,
                ..
            } => {
                assert_eq!(file_name, "cat.png");
                assert_eq!(content_type, "image/png");
                assert_eq!(data, b"\x89PNG fake");
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[test]
    fn enhancement_options_are_stringified() {
        let item = image_item("img", "cat.png");
        let req = ImageUpscaleTool
            .build_request(
                &params(json!({
                    "binaryProperty": "img",
                    "scale": 4,
                    "options": {"enhance": false, "enhanceCreativity": 0.35, "enhancePrompt": "sharper"}
                })),
                &item,
            )
            .unwrap();
        assert_eq!(text_field(&req, "scale"), Some("4"));
        assert_eq!(text_field(&req, "enhance"), Some("false"));
        assert_eq!(text_field(&req, "enhanceCreativity"), Some("0.35"));
        assert_eq!(text_field(&req, "prompt"), Some("sharper"));
    }

    #[test]
    fn unnamed_attachment_uses_defaults() {
        let mut item = image_item("data", "x.png");
        if let Some(binary) = item.binary.as_mut()
            && let Some(data) = binary.get_mut("data")
        {
            data.file_name = None;
            data.mime_type = None;
        }
        let req = ImageUpscaleTool
            .build_request(&params(json!({})), &item)
            .unwrap();
        match req.form_field("image").unwrap() {
            FormField::File {
                file_name,
                content_type,
                ..
            } => {
                assert_eq!(file_name, "image");
                assert_eq!(content_type, "image/png");
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[test]
    fn response_bytes_become_upscaled_attachment() {
        let item = image_item("data", "cat.png");
        let out = ImageUpscaleTool
            .shape_response(
                &params(json!({"options": {"enhance": true}})),
                &item,
                2,
                ProviderResponse::Binary {
                    body: b"BIGGER".to_vec(),
                    content_type: Some("image/webp".into()),
                },
            )
            .unwrap();
        assert_eq!(out.json["success"], true);
        assert_eq!(out.json["scale"], 2);
        assert_eq!(out.json["enhance"], true);
        let data = &out.binary.as_ref().unwrap()["data"];
        assert_eq!(data.data, b"BIGGER");
        assert_eq!(data.file_name.as_deref(), Some("upscaled_cat.png"));
        assert_eq!(data.mime_type.as_deref(), Some("image/webp"));
        assert_eq!(out.paired_item.item, 2);
    }

    #[test]
    fn missing_content_type_defaults_to_png() {
        let item = image_item("data", "cat.png");
        let out = ImageUpscaleTool
            .shape_response(
                &params(json!({})),
                &item,
                0,
                ProviderResponse::Binary {
                    body: vec![1],
                    content_type: None,
                },
            )
            .unwrap();
        assert_eq!(out.json["enhance"], false);
        let data = &out.binary.as_ref().unwrap()["data"];
        assert_eq!(data.mime_type.as_deref(), Some("image/png"));
    }
}
