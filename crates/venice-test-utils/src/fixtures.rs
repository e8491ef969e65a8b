// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for items, parameters, and credentials used across tests.

use serde_json::{Map, Value};

use venice_core::{BinaryData, Credentials, Item};

/// Credentials with a fixed test key.
pub fn credentials() -> Credentials {
    Credentials::new("test-api-key")
}

/// An item with the given JSON payload. Non-object values produce an empty payload.
pub fn item(json: Value) -> Item {
    Item::from_json(object(json))
}

/// `n` empty items.
pub fn empty_items(n: usize) -> Vec<Item> {
    vec![Item::default(); n]
}

/// An item carrying a PNG attachment under `property`.
pub fn image_item(property: &str, file_name: &str) -> Item {
    Item::default().with_binary(
        property,
        BinaryData::new(b"\x89PNG fake".to_vec(), file_name, "image/png"),
    )
}

/// Converts a `json!({...})` literal into a parameter map.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
