use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, Rgba, DEFAULT_BACKGROUND_PADDING, DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT,
    DEFAULT_MAX_SOURCE_LEN, DEFAULT_PADDING, DEFAULT_PNG_OPT_LEVEL, DEFAULT_PNG_QUANTIZE_DITHER,
    DEFAULT_PNG_QUANTIZE_QUALITY, DEFAULT_PNG_QUANTIZE_SPEED, DEFAULT_ROUNDED_RADIUS,
    DEFAULT_SHADOW_BLUR, DEFAULT_SHADOW_OFFSET, DEFAULT_SHADOW_OPACITY, DEFAULT_TAB_WIDTH,
    DEFAULT_WATERMARK_OPACITY, DEFAULT_WATERMARK_SIZE, TITLE_BAR_HEIGHT, WATERMARK_MARGIN,
    WINDOW_BUTTON_RADIUS, WINDOW_BUTTON_SPACING, WINDOW_BUTTON_X_OFFSET, WINDOW_CORNER_RADIUS,
    WINDOW_PADDING,
};

/// Layout and encoding knobs. Everything has a default so a partial JSON
/// document deserializes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub max_source_len: usize,
    #[serde(deserialize_with = "deserialize_pixels")]
    pub padding: u32,
    pub tab_width: usize,
    pub corner_radius: u32,
    pub font: FontOptions,
    pub background: BackgroundOptions,
    pub window: WindowOptions,
    pub shadow: ShadowOptions,
    pub watermark: WatermarkOptions,
    pub png: PngOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
            padding: DEFAULT_PADDING,
            tab_width: DEFAULT_TAB_WIDTH,
            corner_radius: DEFAULT_ROUNDED_RADIUS,
            font: FontOptions::default(),
            background: BackgroundOptions::default(),
            window: WindowOptions::default(),
            shadow: ShadowOptions::default(),
            watermark: WatermarkOptions::default(),
            png: PngOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontOptions {
    pub size: f32,
    pub line_height: f32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    Vertical,
    #[default]
    Diagonal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundOptions {
    #[serde(deserialize_with = "deserialize_pixels")]
    pub padding: u32,
    /// Solid fill replacing the theme gradient when set.
    pub color: Option<String>,
    pub direction: GradientDirection,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_BACKGROUND_PADDING,
            color: None,
            direction: GradientDirection::Diagonal,
        }
    }
}

impl BackgroundOptions {
    pub(crate) fn solid_color(&self) -> Result<Option<Rgba>> {
        match self.color.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Rgba::from_hex(value)
                .map(Some)
                .ok_or_else(|| Error::RenderInternal(format!("invalid background color {value}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowOptions {
    pub title_bar_height: u32,
    pub corner_radius: u32,
    pub button_radius: u32,
    pub button_x_offset: u32,
    pub button_spacing: u32,
    pub button_colors: [String; 3],
    pub padding: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title_bar_height: TITLE_BAR_HEIGHT,
            corner_radius: WINDOW_CORNER_RADIUS,
            button_radius: WINDOW_BUTTON_RADIUS,
            button_x_offset: WINDOW_BUTTON_X_OFFSET,
            button_spacing: WINDOW_BUTTON_SPACING,
            button_colors: [
                "#FF5F56".to_string(),
                "#FFBD2E".to_string(),
                "#27C93F".to_string(),
            ],
            padding: WINDOW_PADDING,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadowOptions {
    pub x: i32,
    pub y: i32,
    pub blur: u32,
    pub opacity: f32,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self {
            x: DEFAULT_SHADOW_OFFSET,
            y: DEFAULT_SHADOW_OFFSET,
            blur: DEFAULT_SHADOW_BLUR,
            opacity: DEFAULT_SHADOW_OPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatermarkOptions {
    pub size: f32,
    pub opacity: f32,
    pub corner: Corner,
    pub margin: u32,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_WATERMARK_SIZE,
            opacity: DEFAULT_WATERMARK_OPACITY,
            corner: Corner::BottomRight,
            margin: WATERMARK_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PngStrip {
    None,
    #[default]
    Safe,
    All,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PngQuantPreset {
    Fast,
    Balanced,
    Best,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PngOptions {
    pub optimize: bool,
    pub level: u8,
    pub strip: PngStrip,
    pub quantize: bool,
    pub quantize_preset: Option<PngQuantPreset>,
    pub quantize_quality: u8,
    pub quantize_speed: u8,
    pub quantize_dither: f32,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            level: DEFAULT_PNG_OPT_LEVEL,
            strip: PngStrip::Safe,
            quantize: false,
            quantize_preset: None,
            quantize_quality: DEFAULT_PNG_QUANTIZE_QUALITY,
            quantize_speed: DEFAULT_PNG_QUANTIZE_SPEED,
            quantize_dither: DEFAULT_PNG_QUANTIZE_DITHER,
        }
    }
}

fn deserialize_pixels<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    parse_pixels_value(&value).map_err(serde::de::Error::custom)
}

fn parse_pixels_value(value: &serde_json::Value) -> std::result::Result<u32, String> {
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| "invalid number".to_string())
            .and_then(pixels_from_f64),
        serde_json::Value::String(s) => parse_pixels_string(s),
        serde_json::Value::Null => Ok(0),
        _ => Err("invalid pixel value".to_string()),
    }
}

fn parse_pixels_string(input: &str) -> std::result::Result<u32, String> {
    let trimmed = input.trim().trim_end_matches("px").trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| format!("invalid number {}", input))?;
    pixels_from_f64(value)
}

fn pixels_from_f64(value: f64) -> std::result::Result<u32, String> {
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(format!("pixel value out of range: {value}"));
    }
    Ok(value.round() as u32)
}
