//! Remote chat endpoint client

use futures::{Stream, StreamExt};
use serde::Serialize;

use crate::{
    assembler::ReplyAssembler,
    conversation::Conversation,
    error::{Error, Result},
    types::Message,
};

/// Receives the full accumulated reply content once per accepted delta.
///
/// Rendering layers subscribe here instead of coupling to the assembler;
/// any `FnMut(&str)` works directly.
pub trait ReplySink {
    fn update(&mut self, content: &str);
}

impl<F: FnMut(&str)> ReplySink for F {
    fn update(&mut self, content: &str) {
        self(content)
    }
}

/// Request body for the chat endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
}

/// Client for an SSE-style streaming chat endpoint
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Create a client for the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Attach a bearer token sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Run one conversation turn: send the transcript with the new user
    /// message, stream the reply into the conversation, and notify the
    /// sink once per delta.
    ///
    /// The turn is all-or-nothing: on any transport error the in-progress
    /// reply is rolled back and a single classified error is returned.
    /// Interim partial content may have been visible through the sink;
    /// only the transcript is rolled back. No retry is performed here,
    /// the user resubmits the turn.
    pub async fn send_turn<S: ReplySink>(
        &self,
        conversation: &mut Conversation,
        input: &str,
        sink: &mut S,
    ) -> Result<()> {
        conversation.begin_turn(input)?;
        match self.stream_reply(conversation, sink).await {
            Ok(()) => {
                conversation.complete_turn();
                Ok(())
            }
            Err(e) => {
                conversation.fail_turn();
                Err(e)
            }
        }
    }

    async fn stream_reply<S: ReplySink>(
        &self,
        conversation: &mut Conversation,
        sink: &mut S,
    ) -> Result<()> {
        let mut request = self.http.post(&self.endpoint).json(&ChatRequest {
            messages: conversation.outbound(),
        });
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::classify(Some(status.as_u16()), body));
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(Error::from));
        consume_reply(stream, conversation, sink).await
    }
}

/// Drive a byte stream through the assembler, mutating the in-progress
/// reply and notifying the sink. Stops at the first transport error;
/// whatever the assembler still holds as a partial line is dropped with it.
async fn consume_reply<St, S>(
    mut stream: St,
    conversation: &mut Conversation,
    sink: &mut S,
) -> Result<()>
where
    St: Stream<Item = Result<Vec<u8>>> + Unpin,
    S: ReplySink,
{
    let mut assembler = ReplyAssembler::new();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        assembler.push_chunk(&bytes, |content| {
            conversation.apply_update(content);
            sink.update(content);
        });
    }
    Ok(())
}
