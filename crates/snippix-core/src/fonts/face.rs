use std::sync::Arc;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};

use super::builtin;
use super::cache::outline_font;
use crate::{
    Canvas, Error, FontId, FontMetrics, Result, Rgba, DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT,
    MAX_FONT_SIZE, MAX_LINE_HEIGHT,
};

#[derive(Clone)]
pub(crate) enum FontSource {
    Outline(Arc<FontVec>),
    Builtin,
}

/// A font at a fixed pixel size.
#[derive(Clone)]
pub(crate) struct Face {
    source: FontSource,
    px: f32,
    line_height: f32,
}

impl Face {
    pub(crate) fn load(id: FontId, px: f32, line_height: f32) -> Result<Self> {
        let source = match id {
            FontId::Builtin => FontSource::Builtin,
            _ => FontSource::Outline(outline_font(id)?),
        };
        Ok(Self::new(source, px, line_height))
    }

    pub(crate) fn builtin(px: f32, line_height: f32) -> Self {
        Self::new(FontSource::Builtin, px, line_height)
    }

    /// Sizes outside `1..=MAX_FONT_SIZE` are clamped; non-finite values
    /// take the defaults.
    fn new(source: FontSource, px: f32, line_height: f32) -> Self {
        Self {
            source,
            px: clamp_finite(px, MAX_FONT_SIZE, DEFAULT_FONT_SIZE),
            line_height: clamp_finite(line_height, MAX_LINE_HEIGHT, DEFAULT_LINE_HEIGHT),
        }
    }

    /// Loads `id`, falling back to DejaVu Sans Mono and then to the bitmap
    /// face. Every failed attempt is returned alongside the face.
    pub(crate) fn load_with_fallback(id: FontId, px: f32, line_height: f32) -> (Self, Vec<Error>) {
        let mut failures = Vec::new();
        let mut chain = vec![id];
        if id != FontId::Dejavu && id != FontId::Builtin {
            chain.push(FontId::Dejavu);
        }
        for candidate in chain {
            match Self::load(candidate, px, line_height) {
                Ok(face) => return (face, failures),
                Err(err) => {
                    log::debug!("font {}: {err}", candidate.as_str());
                    failures.push(err);
                }
            }
        }
        (Self::builtin(px, line_height), failures)
    }

    fn builtin_scale(&self) -> u32 {
        ((self.px / 8.0).round() as u32).max(1)
    }

    pub(crate) fn metrics(&self) -> FontMetrics {
        let (advance, ascent, descent) = match &self.source {
            FontSource::Builtin => {
                let s = self.builtin_scale();
                (
                    builtin::CELL_WIDTH.saturating_mul(s),
                    builtin::GLYPH_ROWS.saturating_mul(s),
                    builtin::DESCENT.saturating_mul(s),
                )
            }
            FontSource::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(self.px));
                let advance = scaled.h_advance(font.glyph_id('M')).round() as u32;
                (
                    advance.max(1),
                    scaled.ascent().ceil().max(1.0) as u32,
                    (-scaled.descent()).ceil().max(0.0) as u32,
                )
            }
        };
        let line_height =
            ((self.px * self.line_height).round() as u32).max(ascent.saturating_add(descent));
        FontMetrics {
            advance,
            ascent,
            descent,
            line_height,
        }
    }

    /// Draws `ch` with its origin at `x` and the baseline at `baseline`.
    /// `cells` is the display width used for the placeholder box.
    pub(crate) fn draw_char(
        &self,
        canvas: &mut Canvas,
        ch: char,
        x: i64,
        baseline: i64,
        cells: u32,
        color: Rgba,
    ) {
        match &self.source {
            FontSource::Builtin => self.draw_bitmap(canvas, ch, x, baseline, cells, color),
            FontSource::Outline(font) => {
                self.draw_outline(font, canvas, ch, x, baseline, cells, color)
            }
        }
    }

    fn draw_bitmap(
        &self,
        canvas: &mut Canvas,
        ch: char,
        x: i64,
        baseline: i64,
        cells: u32,
        color: Rgba,
    ) {
        let Some(columns) = builtin::glyph(ch) else {
            self.draw_placeholder(canvas, x, baseline, cells, color);
            return;
        };
        let s = self.builtin_scale();
        let top = baseline - i64::from(builtin::GLYPH_ROWS) * i64::from(s);
        for (col, row) in builtin::lit_cells(columns) {
            canvas.fill_rect(
                x + i64::from(col) * i64::from(s),
                top + i64::from(row) * i64::from(s),
                s,
                s,
                color,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_outline(
        &self,
        font: &FontVec,
        canvas: &mut Canvas,
        ch: char,
        x: i64,
        baseline: i64,
        cells: u32,
        color: Rgba,
    ) {
        if ch.is_whitespace() {
            return;
        }
        let id = font.glyph_id(ch);
        if id.0 == 0 {
            self.draw_placeholder(canvas, x, baseline, cells, color);
            return;
        }
        let glyph = id.with_scale_and_position(
            PxScale::from(self.px),
            point(x as f32, baseline as f32),
        );
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (ox, oy) = (bounds.min.x as i64, bounds.min.y as i64);
            outlined.draw(|gx, gy, coverage| {
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                canvas.blend_pixel(ox + gx as i64, oy + gy as i64, color, alpha);
            });
        }
    }

    fn draw_placeholder(&self, canvas: &mut Canvas, x: i64, baseline: i64, cells: u32, color: Rgba) {
        let metrics = self.metrics();
        let width = metrics
            .advance
            .saturating_mul(cells.max(1))
            .saturating_sub(2)
            .max(1);
        let height = metrics.ascent.saturating_sub(1).max(1);
        canvas.stroke_rect(x + 1, baseline - height as i64, width, height, color);
    }
}

fn clamp_finite(value: f32, max: f32, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(1.0, max)
    } else {
        default
    }
}
