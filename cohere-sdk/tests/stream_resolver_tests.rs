use std::io;

use bytes::Bytes;
use futures::stream;
use serde_json::json;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use cohere_sdk::stream::{resolve, StreamResolver, DEFAULT_LINE_CAPACITY};
use cohere_sdk::types::StreamEvent;

// --- Helpers for driving a resolver over in-memory bodies ---

fn body_from_chunks(chunks: Vec<io::Result<Bytes>>) -> impl AsyncRead + Send + Unpin + 'static {
    StreamReader::new(stream::iter(chunks))
}

fn chunks(parts: Vec<&str>) -> Vec<io::Result<Bytes>> {
    parts
        .into_iter()
        .map(|s| Ok(Bytes::from(s.to_string())))
        .collect()
}

async fn collect_events(
    chunks: Vec<io::Result<Bytes>>,
    capacity: usize,
) -> Vec<StreamEvent> {
    let (tx, mut rx) = mpsc::channel(1);
    let resolver = StreamResolver::with_line_capacity(tx, body_from_chunks(chunks), capacity);
    let handle = tokio::spawn(resolver.run());

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    // The channel stays closed once the resolver is done.
    assert!(rx.recv().await.is_none());
    handle.await.unwrap();
    events
}

async fn resolve_parts(parts: Vec<&str>) -> Vec<StreamEvent> {
    collect_events(chunks(parts), DEFAULT_LINE_CAPACITY).await
}

const STREAM_START: &str =
    r#"{"is_finished":false,"event_type":"stream-start","generation_id":"gen-1"}"#;
const STREAM_END: &str = r#"{"is_finished":true,"event_type":"stream-end","finish_reason":"COMPLETE","text":"ignored"}"#;

fn text_line(text: &str) -> String {
    json!({"is_finished": false, "event_type": "text-generation", "text": text}).to_string()
}

#[tokio::test]
async fn test_text_generation_emits_text_event() {
    let line = format!("{}\n", text_line("hello"));
    let events = resolve_parts(vec![line.as_str()]).await;

    assert_eq!(events, vec![StreamEvent::Text("hello".to_string())]);
    assert_eq!(events[0].to_string(), "text: hello");
}

#[tokio::test]
async fn test_full_conversation_stream() {
    let body = format!(
        "{}\n{}\n{}\n{}\n",
        STREAM_START,
        text_line("Hello"),
        text_line(" world"),
        STREAM_END
    );
    let events = resolve_parts(vec![body.as_str()]).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::Text("Hello".to_string()),
            StreamEvent::Text(" world".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_finished_block_stops_the_stream() {
    let finished_with_text = json!({
        "is_finished": true,
        "event_type": "text-generation",
        "text": "never shown"
    })
    .to_string();
    let body = format!(
        "{}\n{}\n{}\n",
        text_line("first"),
        finished_with_text,
        text_line("after finish")
    );
    let events = resolve_parts(vec![body.as_str()]).await;

    assert_eq!(events, vec![StreamEvent::Text("first".to_string())]);
}

#[tokio::test]
async fn test_tool_calls_are_reencoded_compactly() {
    let line = r#"{"is_finished": false, "event_type": "tool-calls-generation", "text": "",
        "tool_calls": [ {"name": "search", "parameters": {"query": "rust"}} ]}"#
        .replace('\n', "");
    let body = format!("{}\n", line);
    let events = resolve_parts(vec![body.as_str()]).await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        StreamEvent::ToolCalls { calls, json } => {
            assert_eq!(
                calls,
                &vec![json!({"name": "search", "parameters": {"query": "rust"}})]
            );
            assert_eq!(json, r#"[{"name":"search","parameters":{"query":"rust"}}]"#);
        }
        other => panic!("expected tool calls, got {:?}", other),
    }
    assert_eq!(
        events[0].to_string(),
        r#"tool: [{"name":"search","parameters":{"query":"rust"}}]"#
    );
}

#[tokio::test]
async fn test_tool_calls_without_payload_encode_as_empty_array() {
    let body = "{\"event_type\":\"tool-calls-generation\"}\n";
    let events = resolve_parts(vec![body]).await;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].to_string(), "tool: []");
}

#[tokio::test]
async fn test_unknown_event_types_are_skipped() {
    let citation = r#"{"is_finished":false,"event_type":"citation-generation","citations":[]}"#;
    let body = format!(
        "{}\n{}\n{}\n",
        STREAM_START,
        citation,
        text_line("still here")
    );
    let events = resolve_parts(vec![body.as_str()]).await;

    assert_eq!(events, vec![StreamEvent::Text("still here".to_string())]);
}

#[tokio::test]
async fn test_malformed_line_is_fatal() {
    let body = format!(
        "{}\nnot json at all\n{}\n",
        text_line("before"),
        text_line("after")
    );
    let events = resolve_parts(vec![body.as_str()]).await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], StreamEvent::Text("before".to_string()));
    let expected = serde_json::from_str::<serde_json::Value>("not json at all")
        .unwrap_err()
        .to_string();
    assert_eq!(events[1], StreamEvent::Error(expected));
}

#[tokio::test]
async fn test_wrongly_typed_field_is_a_decode_error() {
    let body = "{\"event_type\":\"text-generation\",\"text\":42}\n";
    let events = resolve_parts(vec![body]).await;

    assert_eq!(events.len(), 1);
    assert!(events[0].is_error());
}

#[tokio::test]
async fn test_unterminated_tail_is_salvaged_verbatim() {
    let events = resolve_parts(vec![r#"{"partial"#]).await;

    assert_eq!(events, vec![StreamEvent::Text(r#"{"partial"#.to_string())]);
    assert_eq!(events[0].to_string(), "text: {\"partial");
}

#[tokio::test]
async fn test_tail_after_complete_lines_is_salvaged() {
    let body = format!("{}\n", text_line("a"));
    let events = resolve_parts(vec![body.as_str(), r#"{"event_type":"text-gen"#]).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::Text("a".to_string()),
            StreamEvent::Text(r#"{"event_type":"text-gen"#.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_body_emits_nothing() {
    let events = resolve_parts(vec![]).await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_crlf_terminated_lines_are_decoded() {
    let body = format!("{}\r\n{}\r\n", text_line("one"), text_line("two"));
    let events = resolve_parts(vec![body.as_str()]).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::Text("one".to_string()),
            StreamEvent::Text("two".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_blank_line_is_a_decode_error() {
    let body = format!("{}\n\n{}\n", text_line("a"), text_line("b"));
    let events = resolve_parts(vec![body.as_str()]).await;

    let expected = serde_json::from_str::<serde_json::Value>("")
        .unwrap_err()
        .to_string();
    assert_eq!(
        events,
        vec![
            StreamEvent::Text("a".to_string()),
            StreamEvent::Error(expected),
        ]
    );
}

#[tokio::test]
async fn test_null_fields_decode_as_defaults() {
    let body = concat!(
        r#"{"is_finished":false,"event_type":"text-generation","text":"hi","finish_reason":null}"#,
        "\n",
        r#"{"is_finished":null,"event_type":"text-generation","text":"more","generation_id":null}"#,
        "\n",
    );
    let events = resolve_parts(vec![body]).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::Text("hi".to_string()),
            StreamEvent::Text("more".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_chunk_boundaries_do_not_change_the_result() {
    let body = format!(
        "{}\n{}\n{}\n{}\n",
        STREAM_START,
        text_line("chunk"),
        text_line(" boundaries ✓"),
        STREAM_END
    );
    let expected = resolve_parts(vec![body.as_str()]).await;
    assert_eq!(expected.len(), 2);

    let bytes = body.as_bytes();
    for split in 1..bytes.len() {
        let parts = vec![
            Ok(Bytes::copy_from_slice(&bytes[..split])),
            Ok(Bytes::copy_from_slice(&bytes[split..])),
        ];
        let events = collect_events(parts, DEFAULT_LINE_CAPACITY).await;
        assert_eq!(events, expected, "split at byte {}", split);
    }

    let single_bytes = bytes
        .iter()
        .map(|b| Ok(Bytes::copy_from_slice(&[*b])))
        .collect();
    assert_eq!(
        collect_events(single_bytes, DEFAULT_LINE_CAPACITY).await,
        expected
    );
}

#[tokio::test]
async fn test_lines_longer_than_the_read_buffer_are_reassembled() {
    let long_text = "x".repeat(300);
    let body = format!("{}\n{}\n", text_line(&long_text), text_line("short"));

    let events = collect_events(chunks(vec![body.as_str()]), 16).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::Text(long_text),
            StreamEvent::Text("short".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_read_error_reports_then_salvages_tail() {
    let first = format!("{}\n", text_line("a"));
    let body = vec![
        Ok(Bytes::from(first)),
        Ok(Bytes::from_static(br#"{"event_type":"#)),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
        Ok(Bytes::from(format!("{}\n", text_line("unreachable")))),
    ];
    let events = collect_events(body, DEFAULT_LINE_CAPACITY).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::Text("a".to_string()),
            StreamEvent::Error("connection reset".to_string()),
            StreamEvent::Text(r#"{"event_type":"#.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_read_error_with_empty_buffer_reports_only_the_error() {
    let body = vec![Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))];
    let events = collect_events(body, DEFAULT_LINE_CAPACITY).await;

    assert_eq!(events, vec![StreamEvent::Error("timed out".to_string())]);
}

#[tokio::test]
async fn test_resolver_stops_when_consumer_goes_away() {
    let line = format!("{}\n", text_line("tick"));
    let body = body_from_chunks(chunks(vec![line.as_str(); 64]));

    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    // Completes instead of blocking on a send nobody receives.
    resolve(tx, body).await;
}

#[tokio::test]
async fn test_spawned_stream_ends_after_last_event() {
    use futures::StreamExt;

    let body = format!("{}\n{}\n", text_line("x"), STREAM_END);
    let mut reply = cohere_sdk::stream::spawn(body_from_chunks(chunks(vec![body.as_str()])));

    assert_eq!(reply.next().await, Some(StreamEvent::Text("x".to_string())));
    assert_eq!(reply.next().await, None);
    assert_eq!(reply.next().await, None);
}
