//! Incremental assembly of a streamed assistant reply

use serde::Deserialize;

use crate::sse::{self, LineBuffer};

/// Assembles the growing reply from SSE-style stream chunks.
///
/// Feeds arbitrary byte chunks through a line buffer, extracts the text
/// delta at `choices[0].delta.content` from each data line, and keeps the
/// cumulative reply text. The `on_update` callback receives the full
/// accumulated content once per accepted delta; renderers overwrite their
/// display with it rather than appending, so the accumulator stays the
/// single source of truth.
#[derive(Debug, Default)]
pub struct ReplyAssembler {
    lines: LineBuffer,
    content: String,
}

// Streaming response shape (OpenAI-compatible chunks)

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

impl ReplyAssembler {
    /// Create an assembler with an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one transport chunk.
    ///
    /// A malformed data line never aborts the stream: it is logged and
    /// skipped. The `[DONE]` sentinel is skipped too; termination is the
    /// transport closing, not the sentinel.
    pub fn push_chunk(&mut self, chunk: &[u8], mut on_update: impl FnMut(&str)) {
        for line in self.lines.push(chunk) {
            let Some(payload) = sse::data_payload(&line) else {
                continue;
            };
            if payload == sse::DONE_SENTINEL {
                continue;
            }

            match serde_json::from_str::<StreamChunk>(payload) {
                Ok(parsed) => {
                    let delta = parsed
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|choice| choice.delta.content);
                    if let Some(delta) = delta {
                        if !delta.is_empty() {
                            self.content.push_str(&delta);
                            on_update(&self.content);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping malformed stream line: {}", e);
                }
            }
        }
    }

    /// The reply accumulated so far
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume the assembler, returning the final reply text
    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_line(text: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":{}}}}}]}}\n",
            serde_json::to_string(text).unwrap()
        )
    }

    /// Feed the input split at the given byte offsets, collecting every
    /// snapshot passed to the update callback.
    fn feed_split(input: &[u8], splits: &[usize]) -> (String, Vec<String>) {
        let mut assembler = ReplyAssembler::new();
        let mut snapshots = Vec::new();
        let mut start = 0;
        for &end in splits.iter().chain(std::iter::once(&input.len())) {
            assembler.push_chunk(&input[start..end], |content| {
                snapshots.push(content.to_string());
            });
            start = end;
        }
        (assembler.into_content(), snapshots)
    }

    #[test]
    fn test_single_delta_unsplit() {
        let input = delta_line("He");
        let (content, snapshots) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "He");
        assert_eq!(snapshots, vec!["He"]);
    }

    #[test]
    fn test_framing_split_mid_json() {
        let input = delta_line("He");
        // Split inside the JSON payload
        for split in [1, 10, 20, input.len() - 2] {
            let (content, _) = feed_split(input.as_bytes(), &[split]);
            assert_eq!(content, "He", "split at {}", split);
        }
    }

    #[test]
    fn test_framing_byte_at_a_time() {
        let input = delta_line("He");
        let splits: Vec<usize> = (1..input.len()).collect();
        let (content, snapshots) = feed_split(input.as_bytes(), &splits);
        assert_eq!(content, "He");
        // One logical line, one update
        assert_eq!(snapshots.len(), 1);
    }

    #[test]
    fn test_consecutive_deltas_accumulate_in_order() {
        let input = format!(
            "{}{}{}",
            delta_line("Hel"),
            delta_line("lo"),
            delta_line(" World")
        );
        let (content, snapshots) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "Hello World");
        assert_eq!(snapshots, vec!["Hel", "Hello", "Hello World"]);
    }

    #[test]
    fn test_ordering_independent_of_chunk_boundaries() {
        let input = format!(
            "{}{}{}",
            delta_line("Hel"),
            delta_line("lo"),
            delta_line(" World")
        );
        let bytes = input.as_bytes();
        for split in [5, 17, 43, bytes.len() - 1] {
            let (content, _) = feed_split(bytes, &[split]);
            assert_eq!(content, "Hello World", "split at {}", split);
        }
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let input = format!(": heartbeat\n\n{}\r\n: another\n{}", delta_line("a"), delta_line("b"));
        let (content, snapshots) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "ab");
        assert_eq!(snapshots.len(), 2);
    }

    #[test]
    fn test_done_sentinel_is_not_content_and_not_error() {
        let input = format!("{}data: [DONE]\n", delta_line("hi"));
        let (content, snapshots) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "hi");
        assert_eq!(snapshots.len(), 1);
    }

    #[test]
    fn test_malformed_json_skipped_stream_continues() {
        let input = format!("data: {{not valid json\n{}", delta_line("still fine"));
        let (content, _) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "still fine");
    }

    #[test]
    fn test_missing_delta_path_skipped() {
        let input = format!(
            "data: {{\"object\":\"chat.completion.chunk\"}}\n{}",
            delta_line("ok")
        );
        let (content, _) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "ok");
    }

    #[test]
    fn test_role_only_delta_produces_no_update() {
        let input = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n";
        let (content, snapshots) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "");
        assert!(snapshots.is_empty());
    }

    #[test]
    fn test_empty_delta_produces_no_update() {
        let input = delta_line("");
        let (content, snapshots) = feed_split(input.as_bytes(), &[]);
        assert_eq!(content, "");
        assert!(snapshots.is_empty());
    }

    #[test]
    fn test_trailing_fragment_discarded_at_end_of_stream() {
        let mut assembler = ReplyAssembler::new();
        let mut updates = 0;
        assembler.push_chunk(delta_line("done").as_bytes(), |_| updates += 1);
        // Incomplete trailing line, never terminated
        assembler.push_chunk(b"data: {\"choices\":[{\"delta\":{\"cont", |_| updates += 1);
        assert_eq!(assembler.content(), "done");
        assert_eq!(updates, 1);
    }

    #[test]
    fn test_multibyte_delta_split_mid_character() {
        let input = delta_line("Привет");
        let bytes = input.as_bytes();
        // Pick a split point inside a multibyte sequence
        let mid = bytes.len() / 2;
        let (content, _) = feed_split(bytes, &[mid]);
        assert_eq!(content, "Привет");
    }
}
