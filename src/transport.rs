//! Image-to-HTML transport.
//!
//! Sends a rasterized sketch to a multimodal messages endpoint and extracts
//! the HTML reconstruction from the reply. The call is blocking and is never
//! retried; any failure is returned to the caller as a single error.

use crate::error::{Result, WhiteboardError};
use crate::settings::{ApiConfig, AuthScheme, Prompts};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const IMAGE_MEDIA_TYPE: &str = "image/png";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anything that can turn PNG bytes into an HTML document.
pub trait ImageTransport: Send + Sync {
    fn send(&self, png: &[u8]) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum MessageContent<'a> {
    Image { source: ImageSource },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<MessageContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChoiceContent {
    Text(String),
    Parts(Vec<ContentItem>),
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<ChoiceContent>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    content: Option<Vec<ContentItem>>,
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

impl ResponseBody {
    fn first_text(self) -> Option<String> {
        if let Some(items) = self.content {
            if let Some(text) = items.into_iter().find_map(|item| item.text) {
                return Some(text);
            }
        }
        let message = self.choices?.into_iter().find_map(|c| c.message)?;
        match message.content? {
            ChoiceContent::Text(text) => Some(text),
            ChoiceContent::Parts(parts) => parts.into_iter().find_map(|item| item.text),
        }
    }
}

/// Remove markdown code fences the model wraps around its HTML.
pub fn strip_code_fences(input: &str) -> String {
    input
        .replace("```html", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Pull the HTML document out of a raw response body.
pub fn extract_html(body: &str) -> Result<String> {
    let parsed: ResponseBody =
        serde_json::from_str(body).map_err(|e| WhiteboardError::Decode(e.to_string()))?;
    let text = parsed
        .first_text()
        .ok_or_else(|| WhiteboardError::Decode("no text content in response".into()))?;
    let html = strip_code_fences(&text);
    if html.is_empty() {
        return Err(WhiteboardError::Decode("response text was empty".into()));
    }
    Ok(html)
}

/// Blocking HTTPS client for the messages endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    auth: AuthScheme,
    prompts: Prompts,
    max_tokens: u32,
}

impl HttpTransport {
    pub fn new(api: &ApiConfig, prompts: Prompts) -> Result<Self> {
        let api_key = api
            .api_key
            .clone()
            .ok_or_else(|| WhiteboardError::Config("API_KEY is not set".into()))?;
        let endpoint = api
            .endpoint
            .clone()
            .ok_or_else(|| WhiteboardError::Config("END_POINT is not set".into()))?;
        let model = api
            .model
            .clone()
            .ok_or_else(|| WhiteboardError::Config("MODEL is not set".into()))?;
        let client = Client::builder()
            .user_agent("whiteboard image-to-html")
            .build()
            .map_err(|e| WhiteboardError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            auth: api.auth,
            prompts,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn request_json(&self, png: &[u8]) -> Result<String> {
        let body = RequestBody {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &self.prompts.system,
            messages: vec![Message {
                role: "user",
                content: vec![
                    MessageContent::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: IMAGE_MEDIA_TYPE,
                            data: STANDARD.encode(png),
                        },
                    },
                    MessageContent::Text {
                        text: &self.prompts.user,
                    },
                ],
            }],
        };
        serde_json::to_string(&body).map_err(|e| WhiteboardError::Encode(e.to_string()))
    }
}

impl ImageTransport for HttpTransport {
    fn send(&self, png: &[u8]) -> Result<String> {
        let payload = self.request_json(png)?;
        tracing::info!(
            endpoint = %self.endpoint,
            model = %self.model,
            image_bytes = png.len(),
            "sending sketch"
        );

        let request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        let request = match self.auth {
            AuthScheme::ApiKeyHeader => request
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            AuthScheme::Bearer => request.bearer_auth(&self.api_key),
        };

        let response = request
            .body(payload)
            .send()
            .map_err(|e| WhiteboardError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| WhiteboardError::Transport(e.to_string()))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            tracing::warn!(%status, "image-to-html request failed");
            return Err(WhiteboardError::Transport(format!("HTTP {status}: {snippet}")));
        }

        let html = extract_html(&body)?;
        tracing::info!(html_bytes = html.len(), "received html");
        Ok(html)
    }
}
