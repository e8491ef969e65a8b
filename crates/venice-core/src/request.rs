// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport-neutral request and response descriptors.
//!
//! Adapters build a [`RequestDescriptor`] per item; an
//! [`HttpTransport`](crate::traits::HttpTransport) turns it into exactly one
//! HTTP call and hands back a [`ProviderResponse`].

use std::collections::BTreeMap;

use serde_json::Value;
use strum::Display;

/// HTTP methods used by the Venice endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// How the transport should read the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    /// Raw bytes, passed through untouched.
    Binary,
}

/// A single multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        data: Vec<u8>,
        file_name: String,
        content_type: String,
    },
}

impl FormField {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

/// Everything needed to issue one provider call, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: RequestBody,
    pub response_format: ResponseFormat,
}

impl RequestDescriptor {
    fn new(method: HttpMethod, path: &str, body: RequestBody) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: BTreeMap::new(),
            body,
            response_format: ResponseFormat::Json,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(HttpMethod::Get, path, RequestBody::Empty)
    }

    pub fn post_json(path: &str, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, RequestBody::Json(body))
    }

    pub fn post_multipart(path: &str, fields: Vec<FormField>) -> Self {
        Self::new(HttpMethod::Post, path, RequestBody::Multipart(fields))
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    pub fn expecting(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// The JSON body, if this is a JSON request.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a multipart field by name.
    pub fn form_field(&self, name: &str) -> Option<&FormField> {
        match &self.body {
            RequestBody::Multipart(fields) => fields.iter().find(|f| f.name() == name),
            _ => None,
        }
    }
}

/// Raw provider response as read by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    Json(Value),
    Binary {
        body: Vec<u8>,
        content_type: Option<String>,
    },
}

impl ProviderResponse {
    pub fn into_json(self) -> Result<Value, crate::VeniceError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Binary { .. } => Err(crate::VeniceError::malformed(
                "expected a JSON response, got binary data",
            )),
        }
    }

    /// Returns the body bytes and content type. JSON responses are re-encoded.
    pub fn into_bytes(self) -> (Vec<u8>, Option<String>) {
        match self {
            Self::Binary { body, content_type } => (body, content_type),
            Self::Json(value) => (
                value.to_string().into_bytes(),
                Some("application/json".to_string()),
            ),
        }
    }
}

/// Renders a JSON number the way the host stringifies numbers (`2`, `0.35`).
pub fn number_to_string(number: &serde_json::Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        number.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_method_path_and_query() {
        let req = RequestDescriptor::get("/characters").with_query("limit", "20");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/characters");
        assert_eq!(req.query.get("limit").map(String::as_str), Some("20"));
        assert_eq!(req.body, RequestBody::Empty);
        assert_eq!(req.method.to_string(), "GET");
    }

    #[test]
    fn form_field_lookup() {
        let req = RequestDescriptor::post_multipart(
            "/image/upscale",
            vec![FormField::text("scale", "2")],
        );
        assert_eq!(req.form_field("scale"), Some(&FormField::text("scale", "2")));
        assert!(req.form_field("image").is_none());
        assert!(req.json_body().is_none());
    }

    #[test]
    fn numbers_stringify_without_trailing_zero() {
        assert_eq!(number_to_string(&serde_json::Number::from(2)), "2");
        let fractional = serde_json::Number::from_f64(0.35).unwrap();
        assert_eq!(number_to_string(&fractional), "0.35");
        let whole = serde_json::Number::from_f64(4.0).unwrap();
        assert_eq!(number_to_string(&whole), "4");
    }

    #[test]
    fn binary_response_refuses_json() {
        let resp = ProviderResponse::Binary {
            body: vec![1, 2],
            content_type: None,
        };
        assert!(resp.into_json().is_err());
    }
}
