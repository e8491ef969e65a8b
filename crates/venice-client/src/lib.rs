// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the Venice AI REST API.
//!
//! [`VeniceClient`] implements [`HttpTransport`] on top of reqwest: it joins
//! the request path onto the credential's base URL, adds the bearer token,
//! encodes JSON or multipart bodies, and reads the response either as JSON or
//! as raw bytes. Each request is sent exactly once.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Url};
use tracing::debug;
use venice_core::{
    Credentials, FormField, HttpMethod, HttpTransport, ProviderResponse, RequestBody,
    RequestDescriptor, ResponseFormat, VeniceError,
};

/// reqwest-backed transport. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct VeniceClient {
    client: reqwest::Client,
}

impl VeniceClient {
    /// Creates a client with reqwest defaults. No timeout is configured here.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for VeniceClient {
    async fn send(
        &self,
        credentials: &Credentials,
        request: RequestDescriptor,
    ) -> Result<ProviderResponse, VeniceError> {
        let url = request_url(credentials, &request)?;
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        debug!(method = %request.method, url = %url, "sending provider request");

        let mut builder = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", credentials.api_key));

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(fields) => builder.multipart(multipart_form(fields)?),
        };

        let response = builder.send().await.map_err(|e| VeniceError::Transport {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, path = %request.path, "provider response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VeniceError::Upstream {
                status: Some(status.as_u16()),
                message: upstream_message(status, &body),
            });
        }

        match request.response_format {
            ResponseFormat::Json => {
                let body = response.text().await.map_err(read_error)?;
                let value = serde_json::from_str(&body).map_err(|e| {
                    VeniceError::malformed(format!("failed to parse API response: {e}"))
                })?;
                Ok(ProviderResponse::Json(value))
            }
            ResponseFormat::Binary => {
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let body = response.bytes().await.map_err(read_error)?;
                Ok(ProviderResponse::Binary {
                    body: body.to_vec(),
                    content_type,
                })
            }
        }
    }
}

/// `<base_url><path>` plus the query string, if any.
fn request_url(credentials: &Credentials, request: &RequestDescriptor) -> Result<Url, VeniceError> {
    let base = credentials.base_url().trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}{}", request.path))
        .map_err(|e| VeniceError::Config(format!("invalid base URL `{base}`: {e}")))?;
    if !request.query.is_empty() {
        url.query_pairs_mut().extend_pairs(&request.query);
    }
    Ok(url)
}

fn multipart_form(fields: Vec<FormField>) -> Result<Form, VeniceError> {
    fields.into_iter().try_fold(Form::new(), |form, field| match field {
        FormField::Text { name, value } => Ok(form.text(name, value)),
        FormField::File {
            name,
            data,
            file_name,
            content_type,
        } => {
            let part = Part::bytes(data)
                .file_name(file_name)
                .mime_str(&content_type)
                .map_err(|e| {
                    VeniceError::validation(format!("invalid content type `{content_type}`: {e}"))
                })?;
            Ok(form.part(name, part))
        }
    })
}

fn read_error(e: reqwest::Error) -> VeniceError {
    VeniceError::Transport {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Best-effort error message from a non-success response body.
fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let detail = parsed.as_ref().and_then(|v| {
        v.get("error")
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(|m| m.as_str())))
            .or_else(|| v.get("message").and_then(|m| m.as_str()))
    });
    match detail {
        Some(detail) => format!("Venice API error ({status}): {detail}"),
        None => format!("API returned {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn creds(server: &MockServer) -> Credentials {
        Credentials::new("test-api-key").with_base_url(server.uri())
    }

    #[test]
    fn url_joins_base_path_and_query() {
        let creds = Credentials::new("k").with_base_url("http://localhost:1234/api/v1/");
        let req = RequestDescriptor::get("/models").with_query("type", "image");
        let url = request_url(&creds, &req).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/api/v1/models?type=image");
    }

    #[test]
    fn url_defaults_to_venice_api() {
        let req = RequestDescriptor::get("/models");
        let url = request_url(&Credentials::new("k"), &req).unwrap();
        assert_eq!(url.as_str(), "https://api.venice.ai/api/v1/models");
    }

    #[test]
    fn upstream_message_prefers_api_error_text() {
        let status = reqwest::StatusCode::UNAUTHORIZED;
        let msg = upstream_message(status, r#"{"error":"Authentication failed"}"#);
        assert!(msg.contains("Authentication failed"), "got: {msg}");

        let nested = upstream_message(status, r#"{"error":{"message":"nope"}}"#);
        assert!(nested.contains("nope"));

        let raw = upstream_message(status, "plain text");
        assert_eq!(raw, "API returned 401 Unauthorized: plain text");
    }

    #[tokio::test]
    async fn json_post_sends_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"model": "m", "input": "hi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = VeniceClient::new();
        let req = RequestDescriptor::post_json("/embeddings", json!({"model": "m", "input": "hi"}));
        let resp = client.send(&creds(&server), req).await.unwrap();
        assert_eq!(resp, ProviderResponse::Json(json!({"data": []})));
    }

    #[tokio::test]
    async fn get_sends_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/characters"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "c1"}]})))
            .mount(&server)
            .await;

        let client = VeniceClient::with_client(reqwest::Client::new());
        let req = RequestDescriptor::get("/characters").with_query("limit", "5");
        let resp = client.send(&creds(&server), req).await.unwrap();
        assert_eq!(resp.into_json().unwrap()["data"][0]["id"], "c1");
    }

    #[tokio::test]
    async fn binary_response_keeps_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0xFF, 0xFB, 0x90]),
            )
            .mount(&server)
            .await;

        let client = VeniceClient::new();
        let req = RequestDescriptor::post_json("/audio/speech", json!({"input": "hi"}))
            .expecting(ResponseFormat::Binary);
        let resp = client.send(&creds(&server), req).await.unwrap();
        assert_eq!(
            resp,
            ProviderResponse::Binary {
                body: vec![0xFF, 0xFB, 0x90],
                content_type: Some("audio/mpeg".into()),
            }
        );
    }

    #[tokio::test]
    async fn multipart_upload_is_sent_as_form_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/image/upscale"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"upscaled".to_vec()))
            .mount(&server)
            .await;

        let client = VeniceClient::new();
        let req = RequestDescriptor::post_multipart(
            "/image/upscale",
            vec![
                FormField::text("scale", "2"),
                FormField::File {
                    name: "image".into(),
                    data: b"raw-png".to_vec(),
                    file_name: "cat.png".into(),
                    content_type: "image/png".into(),
                },
            ],
        )
        .expecting(ResponseFormat::Binary);
        let resp = client.send(&creds(&server), req).await.unwrap();
        let (body, _) = resp.into_bytes();
        assert_eq!(body, b"upscaled");

        let received = server.received_requests().await.unwrap();
        let content_type = received[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"), "got: {content_type}");
        let raw = String::from_utf8_lossy(&received[0].body);
        assert!(raw.contains("name=\"scale\""));
        assert!(raw.contains("filename=\"cat.png\""));
        assert!(raw.contains("raw-png"));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Authentication failed"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = VeniceClient::new();
        let err = client
            .send(&creds(&server), RequestDescriptor::get("/models"))
            .await
            .unwrap_err();
        match err {
            VeniceError::Upstream { status, message } => {
                assert_eq!(status, Some(401));
                assert!(message.contains("Authentication failed"), "got: {message}");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = VeniceClient::new();
        let err = client
            .send(&creds(&server), RequestDescriptor::get("/models"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), venice_core::ErrorKind::Upstream);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let creds = Credentials::new("k").with_base_url("http://127.0.0.1:9/api/v1");
        let err = VeniceClient::new()
            .send(&creds, RequestDescriptor::get("/models"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), venice_core::ErrorKind::Transport);
    }
}
