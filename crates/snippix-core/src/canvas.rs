use crate::{blend_over, Error, Result, Rgba, MAX_CANVAS_PIXELS};

const SUPERSAMPLE: u32 = 4;

/// Straight-alpha RGBA pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Over,
    /// Keeps the destination, scaling its alpha by the source alpha.
    DestinationIn,
}

/// A canvas positioned over another one.
#[derive(Debug, Clone)]
pub struct Layer {
    pub canvas: Canvas,
    pub origin: (i64, i64),
    pub blend: BlendMode,
}

impl Layer {
    pub fn over(canvas: Canvas, x: i64, y: i64) -> Self {
        Self {
            canvas,
            origin: (x, y),
            blend: BlendMode::Over,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::RenderInternal(format!(
                "invalid canvas size {width}x{height}"
            )));
        }
        let pixels = width as u64 * height as u64;
        if pixels > MAX_CANVAS_PIXELS {
            return Err(Error::RenderInternal(format!(
                "canvas too large: {width}x{height}"
            )));
        }
        let mut data = Vec::with_capacity(pixels as usize * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width as u64 * height as u64 * 4 != data.len() as u64 {
            return Err(Error::RenderInternal(
                "pixel buffer does not match dimensions".to_string(),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = self.offset(x, y);
        Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Blends `color` with its alpha scaled by `coverage` (0..=255). Pixels
    /// outside the canvas are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba, coverage: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 || coverage == 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let alpha = (color.a as u32 * coverage as u32 + 127) / 255;
        let src = color.with_alpha(alpha as u8);
        let dst = self.pixel(x, y);
        self.put_pixel(x, y, blend_over(src, dst));
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        let (x0, x1) = clip_span(x, w, self.width);
        let (y0, y1) = clip_span(y, h, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color, 255);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        if h > 1 {
            self.fill_rect(x, y + h as i64 - 1, w, 1, color);
        }
        if h > 2 {
            self.fill_rect(x, y + 1, 1, h - 2, color);
            if w > 1 {
                self.fill_rect(x + w as i64 - 1, y + 1, 1, h - 2, color);
            }
        }
    }

    /// Fills the pixels of `bounds` by sampling `inside` on a 4x4 grid per
    /// pixel; partial hits become partial coverage.
    pub fn fill_coverage<F>(&mut self, bounds: (i64, i64, u32, u32), color: Rgba, inside: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        let (x, y, w, h) = bounds;
        let (x0, x1) = clip_span(x, w, self.width);
        let (y0, y1) = clip_span(y, h, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let coverage = pixel_coverage(px, py, &inside);
                self.blend_pixel(px, py, color, coverage);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let x = (cx - radius).floor() as i64;
        let y = (cy - radius).floor() as i64;
        let size = (radius * 2.0).ceil() as u32 + 2;
        let r2 = radius * radius;
        self.fill_coverage((x, y, size, size), color, |px, py| {
            let dx = px - cx;
            let dy = py - cy;
            dx * dx + dy * dy <= r2
        });
    }

    pub fn fill_rounded_rect(&mut self, x: i64, y: i64, w: u32, h: u32, r: u32, color: Rgba) {
        let (fx, fy, fw, fh, fr) = (x as f32, y as f32, w as f32, h as f32, r as f32);
        self.fill_coverage((x, y, w, h), color, |px, py| {
            rounded_rect_contains(px, py, fx, fy, fw, fh, fr)
        });
    }

    /// Merges `layer` into this canvas at the layer origin. Pixels falling
    /// outside are dropped; for `DestinationIn` the area outside the layer
    /// is untouched.
    pub fn composite(&mut self, layer: &Layer) {
        let (ox, oy) = layer.origin;
        let src = &layer.canvas;
        let (x0, x1) = clip_span(ox, src.width, self.width);
        let (y0, y1) = clip_span(oy, src.height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let s = src.pixel((px - ox) as u32, (py - oy) as u32);
                let (dx, dy) = (px as u32, py as u32);
                match layer.blend {
                    BlendMode::Over => {
                        let d = self.pixel(dx, dy);
                        self.put_pixel(dx, dy, blend_over(s, d));
                    }
                    BlendMode::DestinationIn => {
                        let d = self.pixel(dx, dy);
                        let a = (d.a as u32 * s.a as u32 + 127) / 255;
                        self.put_pixel(dx, dy, d.with_alpha(a as u8));
                    }
                }
            }
        }
    }
}

fn clip_span(start: i64, len: u32, limit: u32) -> (i64, i64) {
    let lo = start.max(0);
    let hi = (start + len as i64).min(limit as i64);
    if hi <= lo {
        (0, 0)
    } else {
        (lo, hi)
    }
}

pub(crate) fn pixel_coverage<F>(px: i64, py: i64, inside: &F) -> u8
where
    F: Fn(f32, f32) -> bool,
{
    let mut hits = 0u32;
    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let fx = px as f32 + (sx as f32 + 0.5) / SUPERSAMPLE as f32;
            let fy = py as f32 + (sy as f32 + 0.5) / SUPERSAMPLE as f32;
            if inside(fx, fy) {
                hits += 1;
            }
        }
    }
    let total = SUPERSAMPLE * SUPERSAMPLE;
    ((hits * 255 + total / 2) / total) as u8
}

/// Point-in-rounded-rectangle test. The point is clamped into the band
/// between the corner centers; it is inside when it lies within `r` of the
/// clamped point.
pub(crate) fn rounded_rect_contains(
    px: f32,
    py: f32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    r: f32,
) -> bool {
    if px < x || py < y || px > x + w || py > y + h {
        return false;
    }
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    if r == 0.0 {
        return true;
    }
    let cx = px.clamp(x + r, x + w - r);
    let cy = py.clamp(y + r, y + h - r);
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}
