use crate::fonts::Face;
use crate::layout::{split_token_lines, CodeLayout};
use crate::text::{char_cells, tab_advance};
use crate::{Canvas, Config, FontMetrics, Result, Rgba, Theme, TokenStream};

/// Draws the highlighted code block: theme background, optional line-number
/// gutter, then every token in its palette color.
pub(crate) fn rasterize(
    source: &str,
    stream: &TokenStream,
    face: &Face,
    theme: &Theme,
    config: &Config,
    line_numbers: bool,
) -> Result<Canvas> {
    let metrics = face.metrics();
    let lines = split_token_lines(source, &stream.tokens);
    let layout = CodeLayout::measure(
        &lines,
        metrics,
        config.padding,
        config.tab_width,
        line_numbers,
    )?;
    let mut canvas = Canvas::filled(layout.width, layout.height, theme.background)?;

    if line_numbers {
        draw_gutter(&mut canvas, &layout, theme);
    }

    for (idx, line) in lines.iter().enumerate() {
        let baseline = layout.baseline(idx);
        if line_numbers {
            let number = (idx + 1).to_string();
            let pad = layout.gutter_digits as usize - number.len().min(layout.gutter_digits as usize);
            let x = layout.padding as i64 + (pad as i64) * metrics.advance as i64;
            draw_run(
                &mut canvas,
                face,
                &metrics,
                &number,
                (x, baseline),
                0,
                config.tab_width,
                theme.gutter_foreground,
            );
        }
        let mut col = 0usize;
        for segment in &line.segments {
            col = draw_run(
                &mut canvas,
                face,
                &metrics,
                segment.text,
                (layout.text_origin(), baseline),
                col,
                config.tab_width,
                theme.palette.color(segment.category),
            );
        }
    }

    Ok(canvas)
}

fn draw_gutter(canvas: &mut Canvas, layout: &CodeLayout, theme: &Theme) {
    let advance = layout.metrics.advance;
    let edge = layout.padding + (layout.gutter_digits + 1) * advance;
    canvas.fill_rect(0, 0, edge, layout.height, theme.gutter_background);
    canvas.fill_rect(
        edge as i64,
        0,
        1,
        layout.height,
        theme.gutter_foreground.with_alpha(0x40),
    );
}

/// Draws `text` cell by cell starting at column `col` of the grid anchored
/// at `origin` (x, baseline). Returns the column after the last character.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_run(
    canvas: &mut Canvas,
    face: &Face,
    metrics: &FontMetrics,
    text: &str,
    origin: (i64, i64),
    mut col: usize,
    tab_width: usize,
    color: Rgba,
) -> usize {
    let (x, baseline) = origin;
    let advance = metrics.advance as i64;
    for ch in text.chars() {
        if ch == '\t' {
            col = col.saturating_add(tab_advance(col, tab_width));
            continue;
        }
        if ch.is_control() {
            continue;
        }
        let cells = char_cells(ch);
        // Combining marks sit on the previous cell.
        let at = if cells == 0 { col.saturating_sub(1) } else { col };
        face.draw_char(
            canvas,
            ch,
            x.saturating_add((at as i64).saturating_mul(advance)),
            baseline,
            cells.max(1) as u32,
            color,
        );
        col = col.saturating_add(cells);
    }
    col
}
