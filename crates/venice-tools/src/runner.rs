// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential per-item execution of a tool adapter.
//!
//! Items are processed one at a time, in input order. Each item resolves
//! its parameters, builds a request, sends it, and reshapes the response.
//! The failure policy is applied in one place: with continue-on-fail every
//! failure becomes an `{ "error": message }` output at its position;
//! otherwise the run stops at the first failure and reports its index.

use tracing::{debug, info, warn};
use venice_core::{
    Credentials, ExecutionContext, HttpTransport, Item, OutputItem, ParameterSet, ToolAdapter,
    ToolDescriptor, VeniceError,
};

/// Runs `adapter` over every input item of `ctx`.
///
/// Returns exactly one output per input item, in order, paired to its
/// input index. Without continue-on-fail the first failing item aborts the
/// run with a [`VeniceError::Item`] and no later item is started.
pub async fn execute(
    adapter: &dyn ToolAdapter,
    ctx: &dyn ExecutionContext,
    transport: &dyn HttpTransport,
) -> Result<Vec<OutputItem>, VeniceError> {
    let descriptor = adapter.descriptor();
    let credentials = ctx.credentials()?;
    let items = ctx.input_items();
    let continue_on_fail = ctx.continue_on_fail();

    let mut outputs = Vec::with_capacity(items.len());
    let mut failed = 0usize;

    for (index, item) in items.iter().enumerate() {
        debug!(tool = %descriptor.name, index, "processing item");
        let result =
            process_item(adapter, &descriptor, ctx, transport, &credentials, item, index).await;
        match result {
            Ok(output) => outputs.push(output),
            Err(err) if continue_on_fail => {
                warn!(tool = %descriptor.name, index, error = %err, "item failed, continuing");
                failed += 1;
                outputs.push(OutputItem::error(err.root().to_string(), index));
            }
            Err(err) => {
                warn!(tool = %descriptor.name, index, error = %err, "item failed, aborting run");
                return Err(err.at_item(index));
            }
        }
    }

    info!(
        tool = %descriptor.name,
        items = outputs.len(),
        failed,
        "run complete"
    );
    Ok(outputs)
}

async fn process_item(
    adapter: &dyn ToolAdapter,
    descriptor: &ToolDescriptor,
    ctx: &dyn ExecutionContext,
    transport: &dyn HttpTransport,
    credentials: &Credentials,
    item: &Item,
    index: usize,
) -> Result<OutputItem, VeniceError> {
    let params = ParameterSet::resolve(descriptor, ctx.parameters(index)?);
    let request = adapter.build_request(&params, item)?;
    debug!(method = %request.method, path = %request.path, index, "sending request");
    let response = transport.send(credentials, request).await?;
    adapter.shape_response(&params, item, index, response)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use venice_core::{ErrorKind, HttpMethod};
    use venice_test_utils::fixtures::{credentials, empty_items, image_item, item, object};
    use venice_test_utils::{MockReply, MockTransport};

    use super::*;
    use crate::context::RunContext;
    use crate::tools::{ChatTool, EmbeddingsTool, ImageUpscaleTool, ListModelsTool};

    fn context(items: Vec<Item>, params: Value) -> RunContext {
        RunContext::new(items)
            .with_parameters(object(params))
            .with_credentials(credentials())
    }

    fn chat_reply(content: &str) -> MockReply {
        MockReply::Json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
    }

    #[tokio::test]
    async fn outputs_preserve_order_and_pairing() {
        let transport = MockTransport::with_replies(vec![
            chat_reply("one"),
            chat_reply("two"),
            chat_reply("three"),
        ]);
        let ctx = context(
            vec![
                item(json!({"q": "a"})),
                item(json!({"q": "b"})),
                item(json!({"q": "c"})),
            ],
            json!({"message": "={{ $json.q }}"}),
        );

        let out = execute(&ChatTool, &ctx, &transport).await.unwrap();
        assert_eq!(out.len(), 3);
        for (i, (o, expected)) in out.iter().zip(["one", "two", "three"]).enumerate() {
            assert_eq!(o.paired_item.item, i);
            assert_eq!(o.json["output"], expected);
        }
        let sent: Vec<Value> = transport
            .requests()
            .await
            .into_iter()
            .map(|r| r.request.json_body().unwrap()["messages"][0]["content"].clone())
            .collect();
        assert_eq!(sent, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[tokio::test]
    async fn continue_on_fail_records_validation_error_in_place() {
        let transport = MockTransport::always(MockReply::Json(json!({"data": []})));
        let ctx = context(
            vec![
                item(json!({"text": "first"})),
                item(json!({"text": ""})),
                item(json!({"text": "third"})),
            ],
            json!({"input": "={{ $json.text }}"}),
        )
        .with_continue_on_fail(true);

        let out = execute(&EmbeddingsTool, &ctx, &transport).await.unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].json["success"], true);
        assert!(out[1].is_error());
        assert_eq!(out[1].json.len(), 1);
        assert_eq!(out[1].json["error"], "missing required parameter `input`");
        assert_eq!(out[1].paired_item.item, 1);
        assert_eq!(out[2].json["success"], true);
        // The failing item never reached the network.
        assert_eq!(transport.call_count().await, 2);
    }

    #[tokio::test]
    async fn abort_reports_index_and_skips_later_items() {
        let transport = MockTransport::with_replies(vec![
            chat_reply("ok"),
            MockReply::Status(500, "boom".into()),
            chat_reply("never"),
        ]);
        let ctx = context(empty_items(3), json!({"message": "hi"}));

        let err = execute(&ChatTool, &ctx, &transport).await.unwrap_err();
        assert_eq!(err.item_index(), Some(1));
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(transport.call_count().await, 2);
    }

    #[tokio::test]
    async fn continue_on_fail_records_transport_errors() {
        let transport = MockTransport::with_replies(vec![
            MockReply::Unreachable("connection refused".into()),
            chat_reply("ok"),
        ]);
        let ctx = context(empty_items(2), json!({"message": "hi"})).with_continue_on_fail(true);

        let out = execute(&ChatTool, &ctx, &transport).await.unwrap();
        assert!(out[0].is_error());
        assert!(
            out[0].json["error"]
                .as_str()
                .unwrap()
                .contains("connection refused")
        );
        assert_eq!(out[1].json["output"], "ok");
    }

    #[tokio::test]
    async fn upscale_without_binary_makes_no_call() {
        let transport = MockTransport::new();
        let ctx = context(vec![Item::default()], json!({}));

        let err = execute(&ImageUpscaleTool, &ctx, &transport)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BinaryMissing);
        assert_eq!(err.item_index(), Some(0));
        assert_eq!(err.root().to_string(), "No binary data exists on item!");
        assert_eq!(transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn binary_missing_on_later_item_reports_its_index() {
        let transport = MockTransport::always(MockReply::Bytes {
            body: b"up".to_vec(),
            content_type: None,
        });
        let ctx = context(
            vec![image_item("data", "a.png"), Item::default()],
            json!({}),
        );

        let err = execute(&ImageUpscaleTool, &ctx, &transport)
            .await
            .unwrap_err();
        assert_eq!(err.item_index(), Some(1));
        assert_eq!(err.to_string(), "item 1: No binary data exists on item!");
        assert_eq!(transport.call_count().await, 1);
    }

    #[tokio::test]
    async fn upscale_round_trip_through_runner() {
        let transport = MockTransport::always(MockReply::Bytes {
            body: b"upscaled".to_vec(),
            content_type: Some("image/png".into()),
        });
        let ctx = context(vec![image_item("data", "photo.png")], json!({"scale": 4}));

        let out = execute(&ImageUpscaleTool, &ctx, &transport).await.unwrap();
        assert_eq!(out[0].json["scale"], 4);
        let data = &out[0].binary.as_ref().unwrap()["data"];
        assert_eq!(data.file_name.as_deref(), Some("upscaled_photo.png"));
        assert_eq!(data.data, b"upscaled");
    }

    #[tokio::test]
    async fn list_models_is_deterministic() {
        let reply = MockReply::Json(json!({
            "data": [
                {"id": "a", "type": "text", "object": "model", "created": 1},
                {"id": "b", "type": "image", "object": "model", "created": 2}
            ]
        }));
        let ctx = context(vec![Item::default()], json!({}));

        let first = execute(&ListModelsTool, &ctx, &MockTransport::always(reply.clone()))
            .await
            .unwrap();
        let second = execute(&ListModelsTool, &ctx, &MockTransport::always(reply))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn list_models_filter_controls_query() {
        let transport = MockTransport::new();
        let all = context(vec![Item::default()], json!({"type": "all"}));
        let image = context(vec![Item::default()], json!({"type": "image"}));

        execute(&ListModelsTool, &all, &transport).await.unwrap();
        execute(&ListModelsTool, &image, &transport).await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0].request.method, HttpMethod::Get);
        assert!(requests[0].request.query.is_empty());
        assert_eq!(
            requests[1].request.query.get("type").map(String::as_str),
            Some("image")
        );
    }

    #[tokio::test]
    async fn missing_credentials_abort_before_any_item() {
        let transport = MockTransport::new();
        let ctx = RunContext::new(empty_items(2)).with_parameters(object(json!({"message": "hi"})));

        let err = execute(&ChatTool, &ctx, &transport).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.item_index(), None);
        assert_eq!(transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn empty_input_produces_empty_output() {
        let transport = MockTransport::new();
        let ctx = context(vec![], json!({}));
        let out = execute(&ChatTool, &ctx, &transport).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn credentials_reach_the_transport() {
        let transport = MockTransport::new();
        let ctx = context(vec![Item::default()], json!({}));
        execute(&ListModelsTool, &ctx, &transport).await.unwrap();
        assert_eq!(
            transport.requests().await[0].credentials.api_key,
            "test-api-key"
        );
    }
}
