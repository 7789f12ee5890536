const DEFAULT_TAB_WIDTH: usize = 4;
const DEFAULT_MAX_SOURCE_LEN: usize = 5000;
const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_LINE_HEIGHT: f32 = 1.2;
const MAX_FONT_SIZE: f32 = 256.0;
const MAX_LINE_HEIGHT: f32 = 4.0;
const MAX_TAB_WIDTH: usize = 16;
const DEFAULT_PADDING: u32 = 20;
const DEFAULT_BACKGROUND_PADDING: u32 = 64;
const DEFAULT_ROUNDED_RADIUS: u32 = 20;
const DEFAULT_SHADOW_OFFSET: i32 = 10;
const DEFAULT_SHADOW_BLUR: u32 = 15;
const DEFAULT_SHADOW_OPACITY: f32 = 0.5;
const TITLE_BAR_HEIGHT: u32 = 40;
const WINDOW_CORNER_RADIUS: u32 = 12;
const WINDOW_BUTTON_RADIUS: u32 = 6;
const WINDOW_BUTTON_X_OFFSET: u32 = 22;
const WINDOW_BUTTON_SPACING: u32 = 20;
const WINDOW_PADDING: u32 = 80;
const WINDOW_CONTENT_SHADOW_BLUR: u32 = 10;
const DEFAULT_WATERMARK_SIZE: f32 = 12.0;
const DEFAULT_WATERMARK_OPACITY: f32 = 0.6;
const WATERMARK_MARGIN: u32 = 12;
const ERROR_IMAGE_WIDTH: u32 = 800;
const ERROR_IMAGE_HEIGHT: u32 = 200;
const ERROR_TEXT_SIZE: f32 = 20.0;
const MAX_CANVAS_PIXELS: u64 = 64_000_000;
const DEFAULT_WEBP_QUALITY: f32 = 90.0;
const DEFAULT_PNG_OPT_LEVEL: u8 = 0;
const MAX_PNG_OPT_LEVEL: u8 = 6;
const DEFAULT_PNG_QUANTIZE_QUALITY: u8 = 85;
const DEFAULT_PNG_QUANTIZE_SPEED: u8 = 4;
const DEFAULT_PNG_QUANTIZE_DITHER: f32 = 1.0;

mod canvas;
mod color;
mod compose;
mod config;
mod fonts;
mod input;
mod layout;
mod png;
mod raster;
mod render;
mod syntax;
mod text;
mod theme;
mod types;

pub use canvas::{BlendMode, Canvas, Layer};
pub use color::{blend_over, lerp_channel, Rgba};
pub use compose::{
    gradient_background, gradient_fill, rounded_mask, shadow, solid_background, watermark,
    window_chrome, ChromeSpec, CompositionRecipe, LayerOp, ShadowSpec, WatermarkSpec,
};
pub use config::{
    BackgroundOptions, Config, Corner, FontOptions, GradientDirection, PngOptions, PngQuantPreset,
    PngStrip, ShadowOptions, WatermarkOptions, WindowOptions,
};
pub use fonts::{FontId, FontMetrics};
pub use input::{extract_snippet, Snippet};
pub use crate::png::decode_png;
pub use render::{check_source, render, render_canvas, render_error_canvas, render_with_fallback};
pub use syntax::{tokenize, LanguageChoice, LanguageId, Token, TokenCategory, TokenStream};
pub use theme::{Palette, Theme, ThemeId};
pub use types::{
    CompositionStyle, Error, OutputFormat, RenderOptions, RenderRequest, RenderResult, Result,
};

#[cfg(test)]
mod tests;
