//! Speech-to-Text Collaborator
//!
//! The system performs no audio processing of its own: audio bytes are
//! forwarded to an external recognizer service and its text (or error) is
//! relayed back. Failures are request-scoped and never retried.

use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("transcription request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("recognizer rejected the audio: {0}")]
    Rejected(String),
    #[error("could not parse recognizer reply: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// Contract for the external speech-to-text collaborator.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Forwards an audio byte stream and returns the best-effort transcript.
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, TranscribeError>;
}

#[derive(Deserialize)]
struct RecognizerReply {
    text: String,
}

#[derive(Deserialize)]
struct RecognizerError {
    error: String,
}

/// Forwards audio to an HTTP recognizer endpoint as a multipart upload.
pub struct HttpTranscriber {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranscriber {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, TranscribeError> {
        let part = reqwest::multipart::Part::bytes(audio).file_name("audio");
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let success = response.status().is_success();
        let body = response.text().await?;

        parse_recognizer_reply(success, &body)
    }
}

/// A recognizer failure arrives as `{"error": ...}` with a non-success
/// status; anything else that is not `{"text": ...}` is malformed.
fn parse_recognizer_reply(success: bool, body: &str) -> Result<String, TranscribeError> {
    if !success {
        let message = serde_json::from_str::<RecognizerError>(body)
            .map(|reply| reply.error)
            .unwrap_or_else(|_| body.to_string());
        return Err(TranscribeError::Rejected(message));
    }
    let reply: RecognizerReply = serde_json::from_str(body)?;
    Ok(reply.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relays_the_transcribed_text() {
        let text = parse_recognizer_reply(true, r#"{"text": "hello world"}"#).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn relays_a_structured_recognizer_error() {
        let err = parse_recognizer_reply(false, r#"{"error": "could not decode audio"}"#)
            .unwrap_err();
        match err {
            TranscribeError::Rejected(message) => assert_eq!(message, "could not decode audio"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn unstructured_failure_body_is_relayed_verbatim() {
        let err = parse_recognizer_reply(false, "bad gateway").unwrap_err();
        match err {
            TranscribeError::Rejected(message) => assert_eq!(message, "bad gateway"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn malformed_success_body_is_a_parsing_error() {
        let err = parse_recognizer_reply(true, "not json").unwrap_err();
        assert!(matches!(err, TranscribeError::MalformedReply(_)));
    }
}
