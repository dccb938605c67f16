//! Server-Sent Events (SSE) streaming parser.
//!
//! The agent chat endpoint streams its reply as SSE. The parser works on any
//! buffered async reader so it can be fed a live response body or a byte
//! slice in tests.

use std::ops::ControlFlow;

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::TransportError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The `event:` field, if the server sent one.
    pub event: Option<String>,
    /// Concatenated `data:` lines.
    pub data: String,
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each
/// event until the body ends or the callback breaks.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    on_event: impl FnMut(SseEvent) -> ControlFlow<()>,
) -> Result<(), TransportError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    parse_sse_reader(reader, on_event).await
}

/// Parse SSE events from a buffered reader.
pub async fn parse_sse_reader<R: AsyncBufRead + Unpin>(
    reader: R,
    mut on_event: impl FnMut(SseEvent) -> ControlFlow<()>,
) -> Result<(), TransportError> {
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines.next_line().await.map_err(classify_io)? {
        // Tolerate CRLF framing.
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.is_empty() {
            // Empty line = end of event
            if !current_data.is_empty() {
                let event = SseEvent {
                    event: current_event.take(),
                    data: std::mem::take(&mut current_data),
                };
                if on_event(event).is_break() {
                    return Ok(());
                }
            }
            current_event = None;
            continue;
        }

        if let Some(event_type) = field_value(line, "event") {
            current_event = Some(event_type.to_string());
        } else if let Some(data) = field_value(line, "data") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
    }

    // Flush any remaining event
    if !current_data.is_empty() {
        let _ = on_event(SseEvent {
            event: current_event,
            data: current_data,
        });
    }

    Ok(())
}

/// Map a reqwest failure to the transport error the user should see.
pub(crate) fn classify_reqwest(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Errors from reading the body. Body read failures arrive as the original
/// `reqwest::Error` wrapped in an `io::Error`.
fn classify_io(err: std::io::Error) -> TransportError {
    if let Some(inner) = err
        .get_ref()
        .and_then(|e| e.downcast_ref::<reqwest::Error>())
    {
        return classify_reqwest(inner);
    }
    match err.kind() {
        std::io::ErrorKind::InvalidData => TransportError::Parse(err.to_string()),
        std::io::ErrorKind::TimedOut => TransportError::Timeout,
        _ => TransportError::Network(err.to_string()),
    }
}

/// `name: value` or `name:value`; a single leading space is stripped.
fn field_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
