// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-speech tool.

use serde_json::{Value, json};
use venice_core::{
    BinaryData, Item, OptionValue, OutputItem, ParameterSet, ParameterSpec, ProviderResponse,
    RequestDescriptor, ResponseFormat, ToolAdapter, ToolDescriptor, VeniceError,
};

use super::{descriptor, fields, text_length};

const PATH: &str = "/audio/speech";
const TTS_MODEL: &str = "tts-kokoro";
const DEFAULT_VOICE: &str = "af_sky";
const DEFAULT_FORMAT: &str = "mp3";

/// Converts text to speech and returns the audio as an attachment.
pub struct TextToSpeechTool;

fn response_format(params: &ParameterSet) -> &str {
    params
        .option_str("response_format")
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FORMAT)
}

impl ToolAdapter for TextToSpeechTool {
    fn descriptor(&self) -> ToolDescriptor {
        descriptor(
            "veniceTextToSpeechTool",
            "Venice Text to Speech Tool",
            "Convert text to speech audio using Venice AI",
            "Venice Text to Speech",
            "audio/speech",
            vec![
                ParameterSpec::text("text", "Text", 4)
                    .required()
                    .describe("The text to convert to speech (max 4096 characters)"),
                ParameterSpec::options(
                    "voice",
                    "Voice",
                    DEFAULT_VOICE,
                    vec![
                        OptionValue::new("Sky (Female)", "af_sky"),
                        OptionValue::new("Bella (Female)", "af_bella"),
                        OptionValue::new("Nova (Female)", "af_nova"),
                        OptionValue::new("Nicole (Female)", "af_nicole"),
                        OptionValue::new("Sarah (Female)", "af_sarah"),
                        OptionValue::new("Adam (Male)", "am_adam"),
                        OptionValue::new("Echo (Male)", "am_echo"),
                        OptionValue::new("Eric (Male)", "am_eric"),
                        OptionValue::new("Michael (Male)", "am_michael"),
                        OptionValue::new("Liam (Male)", "am_liam"),
                    ],
                )
                .describe("The voice to use for speech synthesis"),
                ParameterSpec::collection(
                    "options",
                    "Options",
                    vec![
                        ParameterSpec::options(
                            "response_format",
                            "Response Format",
                            DEFAULT_FORMAT,
                            ["mp3", "opus", "aac", "flac", "wav", "pcm"]
                                .iter()
                                .map(|f| OptionValue::new(&f.to_uppercase(), *f))
                                .collect(),
                        )
                        .describe("The format of the output audio"),
                        ParameterSpec::number("speed", "Speed", 1)
                            .range(0.25, 4.0)
                            .describe("Speed of the speech (0.25-4.0)"),
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
        let text = params.required_str("text")?;
        // A zero speed is treated as unset.
        let speed = params
            .option_number("speed")?
            .filter(|n| n.as_f64().is_some_and(|f| f != 0.0))
            .map(Value::Number)
            .unwrap_or_else(|| json!(1));

        Ok(RequestDescriptor::post_json(
            PATH,
            json!({
                "model": TTS_MODEL,
                "input": text,
                "voice": params.str_or("voice", DEFAULT_VOICE),
                "response_format": response_format(params),
                "speed": speed,
            }),
        )
        .expecting(ResponseFormat::Binary))
    }

    fn shape_response(
        &self,
        params: &ParameterSet,
        _item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError> {
        let format = response_format(params);
        let (audio, _) = response.into_bytes();
        let json = fields([
            ("voice", json!(params.str_or("voice", DEFAULT_VOICE))),
            ("format", json!(format)),
            ("textLength", json!(text_length(params.str_or("text", "")))),
        ]);
        Ok(OutputItem::success(json, index).with_binary(
            "data",
            BinaryData::new(audio, format!("speech.{format}"), format!("audio/{format}")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venice_test_utils::fixtures::object;

    fn params(raw: Value) -> ParameterSet {
        ParameterSet::resolve(&TextToSpeechTool.descriptor(), object(raw))
    }

    #[test]
    fn body_uses_fixed_model_and_defaults() {
        let req = TextToSpeechTool
            .build_request(&params(json!({"text": "Hello there"})), &Item::default())
            .unwrap();
        assert_eq!(req.path, "/audio/speech");
        assert_eq!(req.response_format, ResponseFormat::Binary);
        assert_eq!(
            req.json_body().unwrap(),
            &json!({
                "model": "tts-kokoro",
                "input": "Hello there",
                "voice": "af_sky",
                "response_format": "mp3",
                "speed": 1
            })
        );
    }

    #[test]
    fn zero_speed_falls_back_to_one() {
        let req = TextToSpeechTool
            .build_request(
                &params(json!({"text": "x", "options": {"speed": 0}})),
                &Item::default(),
            )
            .unwrap();
        assert_eq!(req.json_body().unwrap()["speed"], 1);
    }

    #[test]
    fn explicit_voice_format_and_speed() {
        let req = TextToSpeechTool
            .build_request(
                &params(json!({
                    "text": "x",
                    "voice": "am_liam",
                    "options": {"response_format": "wav", "speed": 1.5}
                })),
                &Item::default(),
            )
            .unwrap();
        let body = req.json_body().unwrap();
        assert_eq!(body["voice"], "am_liam");
        assert_eq!(body["response_format"], "wav");
        assert_eq!(body["speed"], 1.5);
    }

    #[test]
    fn missing_text_is_validation_error() {
        let err = TextToSpeechTool
            .build_request(&params(json!({})), &Item::default())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn audio_bytes_become_named_attachment() {
        let out = TextToSpeechTool
            .shape_response(
                &params(json!({"text": "Hello", "options": {"response_format": "opus"}})),
                &Item::default(),
                0,
                ProviderResponse::Binary {
                    body: vec![0x4F, 0x67, 0x67],
                    content_type: Some("application/octet-stream".into()),
                },
            )
            .unwrap();
        assert_eq!(out.json["voice"], "af_sky");
        assert_eq!(out.json["format"], "opus");
        assert_eq!(out.json["textLength"], 5);
        let audio = &out.binary.as_ref().unwrap()["data"];
        assert_eq!(audio.data, vec![0x4F, 0x67, 0x67]);
        assert_eq!(audio.file_name.as_deref(), Some("speech.opus"));
        assert_eq!(audio.mime_type.as_deref(), Some("audio/opus"));
        assert_eq!(audio.file_extension.as_deref(), Some("opus"));
    }
}
