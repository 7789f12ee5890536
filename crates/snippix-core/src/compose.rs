use crate::canvas::rounded_rect_contains;
use crate::fonts::Face;
use crate::raster::draw_run;
use crate::text::{single_line, text_width_cells};
use crate::{
    BlendMode, Canvas, CompositionStyle, Config, Corner, Error, FontId, GradientDirection, Layer,
    Result, Rgba, Theme, WINDOW_CONTENT_SHADOW_BLUR,
};

const WATERMARK_PAD_X: u32 = 5;
const WATERMARK_PAD_Y: u32 = 2;
const BLUR_PASSES: usize = 3;
const WINDOW_CONTENT_SHADOW_ALPHA: u8 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowSpec {
    pub offset: (i32, i32),
    pub blur: u32,
    pub opacity: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChromeSpec {
    pub title_bar_height: u32,
    pub corner_radius: u32,
    pub button_radius: u32,
    pub button_x_offset: u32,
    pub button_spacing: u32,
    pub button_colors: [Rgba; 3],
    /// Space between the window frame and the content on every side.
    pub padding: u32,
    pub body: Rgba,
    pub title_bar: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkSpec {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub opacity: f32,
    pub corner: Corner,
    pub margin: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerOp {
    SolidBackground {
        color: Rgba,
        padding: u32,
    },
    GradientBackground {
        from: Rgba,
        to: Rgba,
        direction: GradientDirection,
        padding: u32,
    },
    RoundedMask {
        radius: u32,
    },
    Shadow(ShadowSpec),
    WindowChrome(ChromeSpec),
    Watermark(WatermarkSpec),
}

impl LayerOp {
    pub fn apply(&self, canvas: &Canvas) -> Result<Canvas> {
        match self {
            LayerOp::SolidBackground { color, padding } => {
                solid_background(canvas, *color, *padding)
            }
            LayerOp::GradientBackground {
                from,
                to,
                direction,
                padding,
            } => gradient_background(canvas, *from, *to, *direction, *padding),
            LayerOp::RoundedMask { radius } => rounded_mask(canvas, *radius),
            LayerOp::Shadow(spec) => shadow(canvas, spec),
            LayerOp::WindowChrome(spec) => window_chrome(canvas, spec),
            LayerOp::Watermark(spec) => Ok(watermark(canvas, spec)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LayerOp::SolidBackground { .. } => "solid_background",
            LayerOp::GradientBackground { .. } => "gradient_background",
            LayerOp::RoundedMask { .. } => "rounded_mask",
            LayerOp::Shadow(_) => "shadow",
            LayerOp::WindowChrome(_) => "window_chrome",
            LayerOp::Watermark(_) => "watermark",
        }
    }
}

/// Ordered layer operations for one presentation style, applied from the
/// content outward.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositionRecipe {
    pub ops: Vec<LayerOp>,
}

impl CompositionRecipe {
    pub fn for_style(
        style: CompositionStyle,
        theme: &Theme,
        config: &Config,
        watermark: Option<WatermarkSpec>,
    ) -> Result<Self> {
        let background = match config.background.solid_color()? {
            Some(color) => LayerOp::SolidBackground {
                color,
                padding: config.background.padding,
            },
            None => LayerOp::GradientBackground {
                from: theme.gradient.0,
                to: theme.gradient.1,
                direction: config.background.direction,
                padding: config.background.padding,
            },
        };
        let shadow = LayerOp::Shadow(ShadowSpec {
            offset: (config.shadow.x, config.shadow.y),
            blur: config.shadow.blur,
            opacity: config.shadow.opacity,
            color: Rgba::BLACK,
        });

        let mut ops = match style {
            CompositionStyle::Plain => Vec::new(),
            CompositionStyle::Gradient => vec![background],
            CompositionStyle::Rounded => vec![LayerOp::RoundedMask {
                radius: config.corner_radius,
            }],
            CompositionStyle::Shadow => vec![shadow],
            CompositionStyle::Macwindow => vec![
                LayerOp::WindowChrome(chrome_spec(theme, config)?),
                LayerOp::RoundedMask {
                    radius: config.window.corner_radius,
                },
                shadow,
                background,
            ],
        };
        if let Some(spec) = watermark {
            ops.push(LayerOp::Watermark(spec));
        }
        Ok(Self { ops })
    }

    pub fn apply(&self, content: Canvas) -> Result<Canvas> {
        let mut canvas = content;
        for op in &self.ops {
            canvas = op.apply(&canvas)?;
            log::debug!(
                "{}: {}x{}",
                op.name(),
                canvas.width(),
                canvas.height()
            );
        }
        Ok(canvas)
    }
}

fn chrome_spec(theme: &Theme, config: &Config) -> Result<ChromeSpec> {
    let window = &config.window;
    let mut button_colors = [Rgba::TRANSPARENT; 3];
    for (slot, raw) in button_colors.iter_mut().zip(&window.button_colors) {
        *slot = Rgba::from_hex(raw)
            .ok_or_else(|| Error::RenderInternal(format!("invalid button color {raw}")))?;
    }
    Ok(ChromeSpec {
        title_bar_height: window.title_bar_height,
        corner_radius: window.corner_radius,
        button_radius: window.button_radius,
        button_x_offset: window.button_x_offset,
        button_spacing: window.button_spacing,
        button_colors,
        padding: window.padding,
        body: theme.window,
        title_bar: theme.title_bar,
    })
}

fn padded_size(content: &Canvas, padding: u32) -> Result<(u32, u32)> {
    let grow = |value: u32| {
        value
            .checked_add(padding.saturating_mul(2))
            .ok_or_else(|| Error::RenderInternal("background padding overflow".to_string()))
    };
    Ok((grow(content.width())?, grow(content.height())?))
}

/// New canvas filled with `color`, content pasted at `padding`.
pub fn solid_background(content: &Canvas, color: Rgba, padding: u32) -> Result<Canvas> {
    let (width, height) = padded_size(content, padding)?;
    let mut out = Canvas::filled(width, height, color)?;
    out.composite(&Layer::over(content.clone(), padding as i64, padding as i64));
    Ok(out)
}

/// Interpolation position of a pixel. Diagonal runs from the top-left pixel
/// to the bottom-right one, so both corners hit the endpoint colors exactly.
fn gradient_t(x: u32, y: u32, width: u32, height: u32, direction: GradientDirection) -> f32 {
    let (num, den) = match direction {
        GradientDirection::Vertical => (y, height.saturating_sub(1)),
        GradientDirection::Diagonal => (
            x + y,
            width.saturating_sub(1) + height.saturating_sub(1),
        ),
    };
    if den == 0 {
        0.0
    } else {
        num as f32 / den as f32
    }
}

pub fn gradient_fill(
    width: u32,
    height: u32,
    from: Rgba,
    to: Rgba,
    direction: GradientDirection,
) -> Result<Canvas> {
    let mut out = Canvas::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let t = gradient_t(x, y, width, height, direction);
            out.put_pixel(x, y, from.lerp(to, t));
        }
    }
    Ok(out)
}

pub fn gradient_background(
    content: &Canvas,
    from: Rgba,
    to: Rgba,
    direction: GradientDirection,
    padding: u32,
) -> Result<Canvas> {
    let (width, height) = padded_size(content, padding)?;
    let mut out = gradient_fill(width, height, from, to, direction)?;
    out.composite(&Layer::over(content.clone(), padding as i64, padding as i64));
    Ok(out)
}

/// Multiplies a rounded-rectangle coverage mask into the alpha channel.
pub fn rounded_mask(content: &Canvas, radius: u32) -> Result<Canvas> {
    let (width, height) = (content.width(), content.height());
    let mut mask = Canvas::new(width, height)?;
    mask.fill_rounded_rect(0, 0, width, height, radius, Rgba::WHITE);
    let mut out = content.clone();
    out.composite(&Layer {
        canvas: mask,
        origin: (0, 0),
        blend: BlendMode::DestinationIn,
    });
    Ok(out)
}

/// Puts a blurred, offset silhouette of `content` beneath it. The canvas
/// grows so the whole shadow stays visible.
pub fn shadow(content: &Canvas, spec: &ShadowSpec) -> Result<Canvas> {
    let blur = spec.blur as i64;
    let (ox, oy) = (spec.offset.0 as i64, spec.offset.1 as i64);
    let left = (blur - ox).max(0);
    let right = (blur + ox).max(0);
    let top = (blur - oy).max(0);
    let bottom = (blur + oy).max(0);
    let width = u32::try_from(content.width() as i64 + left + right)
        .map_err(|_| Error::RenderInternal("shadow width overflow".to_string()))?;
    let height = u32::try_from(content.height() as i64 + top + bottom)
        .map_err(|_| Error::RenderInternal("shadow height overflow".to_string()))?;
    let mut out = Canvas::new(width, height)?;

    let (w, h) = (width as usize, height as usize);
    let mut alpha = vec![0u8; w * h];
    let (sx, sy) = (left + ox, top + oy);
    for y in 0..content.height() {
        for x in 0..content.width() {
            let (dx, dy) = (sx + x as i64, sy + y as i64);
            if dx < 0 || dy < 0 || dx >= width as i64 || dy >= height as i64 {
                continue;
            }
            alpha[dy as usize * w + dx as usize] = content.pixel(x, y).a;
        }
    }
    for radius in blur_radii(spec.blur) {
        box_blur(&mut alpha, w, h, radius);
    }

    let opacity = spec.opacity.clamp(0.0, 1.0);
    for (idx, a) in alpha.iter().enumerate() {
        if *a == 0 {
            continue;
        }
        let scaled = (spec.color.a as f32 * (*a as f32 / 255.0) * opacity).round() as u8;
        out.put_pixel(
            (idx % w) as u32,
            (idx / w) as u32,
            spec.color.with_alpha(scaled),
        );
    }
    out.composite(&Layer::over(content.clone(), left, top));
    Ok(out)
}

/// Three box radii summing to `blur`, approximating a gaussian.
fn blur_radii(blur: u32) -> [usize; BLUR_PASSES] {
    let third = (blur / 3) as usize;
    [third, third, blur as usize - 2 * third]
}

fn box_blur(data: &mut [u8], width: usize, height: usize, radius: usize) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let mut scratch = vec![0u8; data.len()];
    for y in 0..height {
        blur_line(data, &mut scratch, y * width, 1, width, radius);
    }
    for x in 0..width {
        blur_line(&scratch, data, x, width, height, radius);
    }
}

// Sliding-window mean along one row or column; samples past the edges are 0.
fn blur_line(src: &[u8], dst: &mut [u8], start: usize, stride: usize, len: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    let at = |i: usize| src[start + i * stride] as u32;
    let mut sum: u32 = (0..len.min(radius + 1)).map(&at).sum();
    for i in 0..len {
        dst[start + i * stride] = ((sum + window / 2) / window) as u8;
        if i + radius + 1 < len {
            sum += at(i + radius + 1);
        }
        if i >= radius {
            sum -= at(i - radius);
        }
    }
}

/// Wraps `content` in a window: a body, a title bar rounded only at the top
/// and three buttons. The content is inset by `spec.padding` on every side.
pub fn window_chrome(content: &Canvas, spec: &ChromeSpec) -> Result<Canvas> {
    let bar = spec.title_bar_height;
    let pad = spec.padding;
    let width = content
        .width()
        .checked_add(pad.saturating_mul(2))
        .ok_or_else(|| Error::RenderInternal("window width overflow".to_string()))?;
    let height = content
        .height()
        .checked_add(bar)
        .and_then(|value| value.checked_add(pad.saturating_mul(2)))
        .ok_or_else(|| Error::RenderInternal("window height overflow".to_string()))?;
    let mut out = Canvas::new(width, height)?;
    out.fill_rounded_rect(0, 0, width, height, spec.corner_radius, spec.body);

    let (fw, fbar, fr) = (width as f32, bar as f32, spec.corner_radius as f32);
    let lower = fr.min(fbar);
    out.fill_coverage((0, 0, width, bar), spec.title_bar, |px, py| {
        rounded_rect_contains(px, py, 0.0, 0.0, fw, fbar, fr)
            || (py >= lower && py <= fbar && px >= 0.0 && px <= fw)
    });

    let cy = bar as f32 / 2.0;
    for (idx, color) in spec.button_colors.iter().enumerate() {
        let cx = spec.button_x_offset as f32 + idx as f32 * spec.button_spacing as f32;
        out.fill_circle(cx, cy, spec.button_radius as f32, *color);
    }

    if pad == 0 {
        out.composite(&Layer::over(content.clone(), 0, bar as i64));
        return Ok(out);
    }
    // Soft shadow under the padded content, centered on it.
    let blur = pad.min(WINDOW_CONTENT_SHADOW_BLUR);
    let backed = shadow(
        content,
        &ShadowSpec {
            offset: (0, 0),
            blur,
            opacity: 1.0,
            color: Rgba::BLACK.with_alpha(WINDOW_CONTENT_SHADOW_ALPHA),
        },
    )?;
    let origin = i64::from(pad) - i64::from(blur);
    out.composite(&Layer::over(backed, origin, i64::from(bar) + origin));
    Ok(out)
}

/// Draws a translucent backing box and the text at `spec.corner`. Anything
/// past the canvas edge is clipped.
pub fn watermark(content: &Canvas, spec: &WatermarkSpec) -> Canvas {
    let mut out = content.clone();
    let text = single_line(&spec.text);
    if text.is_empty() {
        return out;
    }
    let (face, _) = Face::load_with_fallback(spec.font, spec.size, 1.0);
    let metrics = face.metrics();
    let text_width = (text_width_cells(&text, 1) as u32).saturating_mul(metrics.advance);
    let text_height = metrics.ascent + metrics.descent;
    let box_width = text_width.saturating_add(2 * WATERMARK_PAD_X);
    let box_height = text_height.saturating_add(2 * WATERMARK_PAD_Y);

    let margin = spec.margin as i64;
    let right = out.width() as i64 - margin - box_width as i64;
    let bottom = out.height() as i64 - margin - box_height as i64;
    let (x, y) = match spec.corner {
        Corner::TopLeft => (margin, margin),
        Corner::TopRight => (right, margin),
        Corner::BottomLeft => (margin, bottom),
        Corner::BottomRight => (right, bottom),
    };

    let opacity = spec.opacity.clamp(0.0, 1.0);
    out.fill_rect(
        x,
        y,
        box_width,
        box_height,
        Rgba::BLACK.scale_alpha(opacity * 2.0 / 3.0),
    );
    draw_run(
        &mut out,
        &face,
        &metrics,
        &text,
        (
            x + WATERMARK_PAD_X as i64,
            y + (WATERMARK_PAD_Y + metrics.ascent) as i64,
        ),
        0,
        1,
        Rgba::WHITE.scale_alpha(opacity),
    );
    out
}
