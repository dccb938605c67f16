//! HTTP transport client: request building and the streaming exchange task.

use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::streaming::{classify_reqwest, parse_sse_stream};
use crate::transport::channel_stream;
use crate::{ReplyEvent, ReplyRequest, ReplyStream, ReplyTransport, TransportError};

use super::config::HttpTransportConfig;
use super::wire::ReplyDecoder;

/// Streams agent replies from the backend over HTTP + SSE.
pub struct HttpTransport {
    pub(crate) config: HttpTransportConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    pub(crate) fn build_request(
        &self,
        request: &ReplyRequest,
        request_id: &str,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .post(self.config.stream_url())
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .header("x-request-id", request_id)
            .json(request);
        if let Some(ref token) = self.config.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

impl ReplyTransport for HttpTransport {
    /// Spawns the exchange on the current tokio runtime. Dropping the
    /// returned stream stops the exchange.
    fn stream_reply(&self, request: ReplyRequest) -> ReplyStream {
        let request_id = agentloom_common::new_correlation_id();
        debug!(
            request_id = %request_id,
            agent = %request.agent_id,
            history = request.history.len(),
            "agent reply request"
        );

        let builder = self.build_request(&request, &request_id);
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            tokio::select! {
                _ = tx.closed() => {
                    debug!(request_id = %request_id, "reply stream dropped, abandoning request");
                }
                _ = run_exchange(builder, &tx, &request_id) => {}
            }
        });

        channel_stream(rx)
    }
}

async fn run_exchange(
    builder: reqwest::RequestBuilder,
    tx: &mpsc::UnboundedSender<ReplyEvent>,
    request_id: &str,
) {
    let mut decoder = ReplyDecoder::default();

    let outcome = match builder.send().await {
        Ok(response) => stream_body(response, &mut decoder, tx).await,
        Err(e) => Err(classify_reqwest(&e)),
    };

    let terminal = match outcome {
        Ok(()) => decoder.finish_unterminated(),
        Err(err) => decoder.fail(err),
    };

    if let Some(event) = terminal {
        if let ReplyEvent::Error(ref err) = event {
            warn!(request_id, error = %err, "agent reply failed");
        }
        let _ = tx.send(event);
    }
}

async fn stream_body(
    response: reqwest::Response,
    decoder: &mut ReplyDecoder,
    tx: &mpsc::UnboundedSender<ReplyEvent>,
) -> Result<(), TransportError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TransportError::RateLimited);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let text = text.chars().take(200).collect::<String>();
        return Err(TransportError::Api(format!("HTTP {status}: {text}")));
    }

    parse_sse_stream(response, |event| {
        if let Some(reply) = decoder.decode(&event) {
            if tx.send(reply).is_err() {
                return ControlFlow::Break(());
            }
        }
        if decoder.is_finished() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .await
}
