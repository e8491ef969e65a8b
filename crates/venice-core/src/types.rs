// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types flowing between the host, the adapters, and the provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default base URL of the Venice AI REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.venice.ai/api/v1";

/// Name of the credential resource every adapter requires.
pub const CREDENTIAL_NAME: &str = "veniceAiApi";

/// Host-supplied credentials for one run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The override when set and non-empty, otherwise [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// A binary attachment carried by an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
}

impl BinaryData {
    /// Wraps a buffer as a named, MIME-typed attachment.
    pub fn new(data: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let file_extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .filter(|ext| !ext.is_empty());
        Self {
            data,
            mime_type: Some(mime_type.into()),
            file_name: Some(file_name),
            file_extension,
        }
    }
}

/// One unit of pipeline data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BTreeMap<String, BinaryData>>,
}

impl Item {
    pub fn from_json(json: Map<String, Value>) -> Self {
        Self { json, binary: None }
    }

    /// Adds a binary attachment under `key`.
    pub fn with_binary(mut self, key: impl Into<String>, data: BinaryData) -> Self {
        self.binary
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), data);
        self
    }
}

/// Links an output item back to the input item it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One result produced per input item, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BTreeMap<String, BinaryData>>,
    pub paired_item: PairedItem,
}

impl OutputItem {
    /// A successful result: the given fields plus `success: true`.
    pub fn success(fields: Map<String, Value>, index: usize) -> Self {
        let mut json = Map::new();
        json.insert("success".into(), Value::Bool(true));
        json.extend(fields);
        Self {
            json,
            binary: None,
            paired_item: PairedItem { item: index },
        }
    }

    /// A recovered failure: the json payload is exactly `{ "error": message }`.
    pub fn error(message: impl Into<String>, index: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".into(), Value::String(message.into()));
        Self {
            json,
            binary: None,
            paired_item: PairedItem { item: index },
        }
    }

    pub fn with_binary(mut self, key: impl Into<String>, data: BinaryData) -> Self {
        self.binary
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), data);
        self
    }

    /// True when this item records a recovered failure.
    pub fn is_error(&self) -> bool {
        self.json.contains_key("error") && !self.json.contains_key("success")
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
