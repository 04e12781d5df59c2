//! HTTP oracle speaking the chat-completions protocol.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::context::{OracleRequest, SYSTEM_PROMPT};
use super::{Oracle, OracleError, OracleResult};

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?(?:</think>|\z)").expect("valid pattern"));

static INTERNAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[INTERNAL:[^\]]*\]").expect("valid pattern"));

/// One message in a chat-completions conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatTurn {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatTurn>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Oracle backed by a chat-completions endpoint.
///
/// Keeps a rolling window of past exchanges and replays it with each
/// request so follow-up questions have context. One exchange is a user
/// message plus the assistant reply.
#[derive(Debug)]
pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: String,
    model: Option<String>,
    conversation: Vec<ChatTurn>,
    window: usize,
}

impl HttpOracle {
    /// Create a client for `endpoint`. `window` is the number of past
    /// exchanges replayed with each request.
    pub fn new(
        endpoint: String,
        model: Option<String>,
        timeout: Duration,
        window: usize,
    ) -> OracleResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!(endpoint = %endpoint, "oracle endpoint configured");
        Ok(Self {
            client,
            endpoint,
            model,
            conversation: Vec::new(),
            window,
        })
    }

    /// Past exchanges, oldest first.
    pub fn conversation(&self) -> &[ChatTurn] {
        &self.conversation
    }

    /// Messages for `request`: system prompt, recent conversation, then the
    /// contextual query.
    pub fn messages(&self, request: &OracleRequest) -> Vec<ChatTurn> {
        let start = self.conversation.len().saturating_sub(self.window * 2);
        let mut messages = Vec::with_capacity(self.conversation.len() - start + 2);
        messages.push(ChatTurn::new("system", SYSTEM_PROMPT));
        messages.extend(self.conversation[start..].iter().cloned());
        messages.push(ChatTurn::new("user", request.render()));
        messages
    }

    fn remember(&mut self, prompt: &str, reply: &str) {
        self.conversation.push(ChatTurn::new("user", prompt));
        self.conversation.push(ChatTurn::new("assistant", reply));
        let excess = self.conversation.len().saturating_sub(self.window * 2);
        self.conversation.drain(..excess);
    }
}

impl Oracle for HttpOracle {
    async fn consult(&mut self, request: &OracleRequest) -> OracleResult<String> {
        let response = {
            let body = ChatRequest {
                model: self.model.as_deref(),
                messages: self.messages(request),
            };
            debug!(kind = ?request.kind, messages = body.messages.len(), "consulting oracle");
            self.client.post(&self.endpoint).json(&body).send().await?
        };
        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Http(status.as_u16()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedBody(e.to_string()))?;
        let raw = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OracleError::MalformedBody("no choices".to_string()))?;

        let reply = clean_reply(&raw);
        if reply.is_empty() {
            return Err(OracleError::Empty);
        }
        self.remember(&request.prompt, &reply);
        Ok(reply)
    }
}

/// Strip model reasoning blocks and internal markers, then trim.
pub fn clean_reply(raw: &str) -> String {
    let without_think = THINK_BLOCK.replace_all(raw, "");
    INTERNAL_MARKER
        .replace_all(&without_think, "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{OracleContext, QueryKind};

    fn oracle(window: usize) -> HttpOracle {
        HttpOracle::new(
            "http://127.0.0.1:9/v1/chat/completions".to_string(),
            Some("test-model".to_string()),
            Duration::from_secs(1),
            window,
        )
        .unwrap()
    }

    #[test]
    fn clean_removes_reasoning() {
        assert_eq!(
            clean_reply("<think>the culprit is obvious</think>Check the VPN logs."),
            "Check the VPN logs."
        );
        assert_eq!(clean_reply("Look closer.<think>unterminated"), "Look closer.");
        assert_eq!(
            clean_reply("  [INTERNAL: score=9] Compare login addresses. "),
            "Compare login addresses."
        );
        assert_eq!(clean_reply("<think>x</think>[INTERNAL:y]"), "");
    }

    #[test]
    fn messages_start_with_system_prompt() {
        let o = oracle(10);
        let req = OracleRequest::new(QueryKind::Ask, "hello", OracleContext::default());
        let msgs = o.messages(&req);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, "system");
        assert_eq!(msgs[1].role, "user");
        assert!(msgs[1].content.ends_with("PLAYER QUERY: hello"));
    }

    #[test]
    fn conversation_window_counts_exchanges() {
        let mut o = oracle(2);
        for i in 0..5 {
            o.remember(&format!("q{i}"), &format!("a{i}"));
        }
        assert_eq!(o.conversation().len(), 4);
        assert_eq!(o.conversation()[0].content, "q3");
        assert_eq!(o.conversation()[1].content, "a3");
        assert_eq!(o.conversation()[3].content, "a4");
        let req = OracleRequest::new(QueryKind::Ask, "next", OracleContext::default());
        assert_eq!(o.messages(&req).len(), 6);
    }

    #[test]
    fn default_window_keeps_ten_exchanges() {
        let mut o = oracle(crate::EngineConfig::default().conversation_window);
        for i in 0..15 {
            o.remember(&format!("q{i}"), &format!("a{i}"));
        }
        assert_eq!(o.conversation().len(), 20);
        assert_eq!(o.conversation()[0].content, "q5");
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: None,
            messages: vec![ChatTurn::new("user", "hi")],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("model").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let mut o = oracle(4);
        let req = OracleRequest::new(QueryKind::Ask, "hello", OracleContext::default());
        let err = o.consult(&req).await.unwrap_err();
        assert!(matches!(err, OracleError::Transport(_)));
    }
}
