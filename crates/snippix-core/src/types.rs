use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Config, FontId, ThemeId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Webp,
}

/// Presentation style applied on top of the highlighted code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompositionStyle {
    Plain,
    Gradient,
    Rounded,
    Shadow,
    #[default]
    Macwindow,
}

impl CompositionStyle {
    pub const ALL: [CompositionStyle; 5] = [
        CompositionStyle::Plain,
        CompositionStyle::Gradient,
        CompositionStyle::Rounded,
        CompositionStyle::Shadow,
        CompositionStyle::Macwindow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompositionStyle::Plain => "plain",
            CompositionStyle::Gradient => "gradient",
            CompositionStyle::Rounded => "rounded",
            CompositionStyle::Shadow => "shadow",
            CompositionStyle::Macwindow => "macwindow",
        }
    }
}

impl FromStr for CompositionStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim().to_ascii_lowercase();
        match key.as_str() {
            "plain" | "solid" => Ok(CompositionStyle::Plain),
            "gradient" => Ok(CompositionStyle::Gradient),
            "rounded" => Ok(CompositionStyle::Rounded),
            "shadow" => Ok(CompositionStyle::Shadow),
            "macwindow" | "macos" | "window" => Ok(CompositionStyle::Macwindow),
            _ => Err(Error::UnknownStyle(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    pub line_numbers: bool,
    pub watermark_text: Option<String>,
    #[serde(rename = "style")]
    pub composition_style: CompositionStyle,
    #[serde(rename = "font")]
    pub font_id: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            watermark_text: None,
            composition_style: CompositionStyle::default(),
            font_id: FontId::default().as_str().to_string(),
        }
    }
}

/// One render: the snippet, how to read it and how to present it.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub source: String,
    pub language: String,
    pub theme: String,
    pub options: RenderOptions,
    pub config: Config,
    pub format: OutputFormat,
}

impl RenderRequest {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            language: "auto".to_string(),
            theme: ThemeId::default().as_str().to_string(),
            options: RenderOptions::default(),
            config: Config::default(),
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Failures that were recovered from while producing `bytes`.
    pub recovered: Vec<Error>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("language detection failed")]
    DetectionFailed,
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("unknown font: {0}")]
    UnknownFont(String),
    #[error("unknown composition style: {0}")]
    UnknownStyle(String),
    #[error("input too large: {len} characters (limit {limit})")]
    InputTooLarge { len: usize, limit: usize },
    #[error("empty input")]
    EmptyInput,
    #[error("font load failed: {0}")]
    FontLoadFailed(String),
    #[error("render error: {0}")]
    RenderInternal(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
