use crate::board::model::{clamp_stroke_width, PenColor, StrokeStyle};
use serde::{Deserialize, Serialize};

pub const MAX_PEN_WIDTH: f32 = 10.0;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert in IT system design. Please convert a hand-drawn system architecture diagram into a clear and well-organized diagram.";

pub const DEFAULT_USER_PROMPT: &str = "Based on the image below, accurately extract the elements and connections of the configuration diagram \
and reconstruct it into an organized configuration diagram. \n\n[Instructions]\n\
1. Accurately read and organize all elements included in the image \n\
2. Accurately understand the relationships and connections between the elements and reconstruct it into a logical configuration diagram. \n\
3. Provide the output as an HTML file. \n\
4. Please correct any freehand distortions with an emphasis on the readability of the diagram using line , curve ,circle ,squire ,Square,triangle, etc...";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub pen_color: PenColor,
    /// Pen width applied to new strokes. Clamped to `1..=10` when applied.
    #[serde(default = "default_pen_width")]
    pub pen_width: f32,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_user_prompt")]
    pub user_prompt: String,
    /// File the canvas is exported to before preview and send.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// File the returned HTML is written to before opening it.
    #[serde(default = "default_html_path")]
    pub html_path: String,
    /// Initial board size in points.
    #[serde(default = "default_canvas_size")]
    pub canvas_size: (f32, f32),
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
}

fn default_pen_width() -> f32 {
    crate::board::model::DEFAULT_STROKE_WIDTH
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_user_prompt() -> String {
    DEFAULT_USER_PROMPT.to_string()
}

fn default_snapshot_path() -> String {
    crate::board::export::DEFAULT_SNAPSHOT_FILE.to_string()
}

fn default_html_path() -> String {
    "whiteboard.html".to_string()
}

fn default_canvas_size() -> (f32, f32) {
    (800.0, 600.0)
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pen_color: PenColor::default(),
            pen_width: default_pen_width(),
            system_prompt: default_system_prompt(),
            user_prompt: default_user_prompt(),
            snapshot_path: default_snapshot_path(),
            html_path: default_html_path(),
            canvas_size: default_canvas_size(),
            debug_logging: false,
            log_file: None,
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Pen style for new strokes with the width limited to the form's range.
    pub fn pen_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.pen_color.color(),
            width: clamp_stroke_width(self.pen_width).min(MAX_PEN_WIDTH),
        }
    }

    pub fn prompts(&self) -> Prompts {
        Prompts {
            system: self.system_prompt.clone(),
            user: self.user_prompt.clone(),
        }
    }
}

/// Instructions sent alongside the sketch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_USER_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `x-api-key` header plus `anthropic-version`.
    #[default]
    ApiKeyHeader,
    /// `Authorization: Bearer <key>`.
    Bearer,
}

impl AuthScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "x-api-key" | "api-key" | "apikey" => Some(AuthScheme::ApiKeyHeader),
            "bearer" => Some(AuthScheme::Bearer),
            _ => None,
        }
    }
}

/// Remote API connection details, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub auth: AuthScheme,
}

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_ENDPOINT: &str = "END_POINT";
pub const ENV_MODEL: &str = "MODEL";
pub const ENV_AUTH_SCHEME: &str = "AUTH_SCHEME";

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let auth = match non_empty(ENV_AUTH_SCHEME) {
            Some(raw) => AuthScheme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("unknown auth scheme '{}'; using x-api-key", raw);
                AuthScheme::default()
            }),
            None => AuthScheme::default(),
        };
        Self {
            api_key: non_empty(ENV_API_KEY),
            endpoint: non_empty(ENV_ENDPOINT),
            model: non_empty(ENV_MODEL),
            auth,
        }
    }
}
