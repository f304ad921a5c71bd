// src/llm/openai.rs
use serde::Deserialize;
use std::time::Duration;

use super::{ChatRequest, CompletionClient, CompletionError};
use crate::config::ClassifierConfig;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
// Error bodies are echoed to the user, keep them short
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout.min(MAX_CONNECT_TIMEOUT))
            .timeout_read(timeout)
            .timeout_write(timeout)
            .timeout(timeout)
            .build();

        Self {
            agent,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        let api_key = config.api_key();
        if api_key.is_none() {
            tracing::warn!(
                variable = %config.api_key_env,
                "No API key configured; every classification will fall back to Neutral"
            );
        }
        Self::new(config.base_url.clone(), api_key, config.timeout())
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let response = match self
            .agent
            .post(&self.endpoint())
            .set("Accept", "application/json")
            .set("Authorization", &format!("Bearer {}", api_key.trim()))
            .send_json(request)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(CompletionError::Status {
                    code,
                    body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(CompletionError::Transport(err.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        parse_completion(&body)
    }
}

fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::MalformedResponse("response contained no completion".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Instant;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::user("What's the sentiment of this feedback? great class")],
            temperature: 0.0,
            max_tokens: 10,
        }
    }

    fn read_request(stream: &mut impl Read) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let read = stream.read(&mut buf).unwrap_or(0);
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buf[..read]);
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= head_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    fn serve_once(status: &str, body: &str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let received = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            received
        });
        (format!("http://{addr}/v1"), handle)
    }

    #[test]
    fn complete_posts_request_and_returns_first_choice() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":" Positive\n"}}]}"#,
        );
        let client = OpenAiClient::new(url, Some("sk-test".into()), Duration::from_secs(5));

        let text = client.complete(&request()).unwrap();
        assert_eq!(text, " Positive\n");

        let received = server.join().unwrap();
        assert!(received.starts_with("POST /v1/chat/completions"));
        assert!(received.contains("Bearer sk-test"));
        assert!(received.contains(r#""temperature":0.0"#));
        assert!(received.contains(r#""max_tokens":10"#));
        assert!(received.contains(r#""model":"gpt-4o-mini""#));
    }

    #[test]
    fn complete_maps_error_status() {
        let (url, server) = serve_once("401 Unauthorized", r#"{"error":"bad key"}"#);
        let client = OpenAiClient::new(url, Some("sk-test".into()), Duration::from_secs(5));

        let err = client.complete(&request()).unwrap_err();
        assert!(matches!(err, CompletionError::Status { code: 401, .. }));
        server.join().unwrap();
    }

    #[test]
    fn complete_gives_up_on_a_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            thread::sleep(Duration::from_secs(3));
        });
        let client = OpenAiClient::new(format!("http://{addr}/v1"), Some("sk-test".into()), Duration::from_secs(1));

        let started = Instant::now();
        let err = client.complete(&request()).unwrap_err();

        assert!(matches!(err, CompletionError::Transport(_)), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(3));
        server.join().unwrap();
    }

    #[test]
    fn complete_without_key_fails_before_sending() {
        let client = OpenAiClient::new("http://127.0.0.1:9", None, Duration::from_secs(1));
        assert_eq!(client.complete(&request()), Err(CompletionError::MissingApiKey));
    }

    #[test]
    fn parse_completion_rejects_empty_choices() {
        let err = parse_completion(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[test]
    fn parse_completion_rejects_non_json() {
        let err = parse_completion("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }
}
