use crate::text::text_width_cells;
use crate::{Error, FontMetrics, Result, Token, TokenCategory};

/// A run of one category within a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub(crate) text: &'a str,
    pub(crate) category: TokenCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CodeLine<'a> {
    pub(crate) segments: Vec<Segment<'a>>,
}

impl CodeLine<'_> {
    pub(crate) fn cells(&self, tab_width: usize) -> usize {
        let text: String = self.segments.iter().map(|s| s.text).collect();
        text_width_cells(&text, tab_width)
    }

    fn trim_carriage_return(&mut self) {
        while let Some(last) = self.segments.last_mut() {
            last.text = last.text.strip_suffix('\r').unwrap_or(last.text);
            if !last.text.is_empty() {
                break;
            }
            self.segments.pop();
        }
    }
}

/// Cuts the token stream into lines. A trailing newline closes the last line
/// instead of opening an empty one; an empty document is one empty line.
pub(crate) fn split_token_lines<'a>(source: &'a str, tokens: &[Token]) -> Vec<CodeLine<'a>> {
    let mut lines = Vec::new();
    let mut current = CodeLine::default();
    let mut ended_with_newline = false;

    for token in tokens {
        let Some(text) = source.get(token.range.clone()) else {
            continue;
        };
        let mut pieces = text.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            if !piece.is_empty() {
                current.segments.push(Segment {
                    text: piece,
                    category: token.category,
                });
                ended_with_newline = false;
            }
            if pieces.peek().is_some() {
                current.trim_carriage_return();
                lines.push(std::mem::take(&mut current));
                ended_with_newline = true;
            }
        }
    }

    if !ended_with_newline || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Pixel geometry of the rasterized code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CodeLayout {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) padding: u32,
    pub(crate) gutter_width: u32,
    pub(crate) gutter_digits: u32,
    pub(crate) metrics: FontMetrics,
}

impl CodeLayout {
    pub(crate) fn measure(
        lines: &[CodeLine<'_>],
        metrics: FontMetrics,
        padding: u32,
        tab_width: usize,
        line_numbers: bool,
    ) -> Result<Self> {
        let line_count = lines.len().max(1) as u64;
        let max_cells = lines
            .iter()
            .map(|line| line.cells(tab_width))
            .max()
            .unwrap_or(0) as u64;
        let (gutter_digits, gutter_width) = if line_numbers {
            let digits = line_count.to_string().len() as u64;
            (digits, (digits + 2).saturating_mul(metrics.advance as u64))
        } else {
            (0, 0)
        };

        let pad = 2 * padding as u64;
        let width = max_cells
            .saturating_mul(metrics.advance as u64)
            .saturating_add(gutter_width)
            .saturating_add(pad);
        let height = line_count
            .saturating_mul(metrics.line_height as u64)
            .saturating_add(pad);
        let to_u32 = |value: u64| {
            u32::try_from(value)
                .map_err(|_| Error::RenderInternal(format!("layout overflow: {value}")))
        };

        Ok(Self {
            width: to_u32(width.max(1))?,
            height: to_u32(height.max(1))?,
            padding,
            gutter_width: to_u32(gutter_width)?,
            gutter_digits: gutter_digits as u32,
            metrics,
        })
    }

    /// Left edge of the code text.
    pub(crate) fn text_origin(&self) -> i64 {
        self.padding as i64 + self.gutter_width as i64
    }

    pub(crate) fn baseline(&self, line: usize) -> i64 {
        let m = self.metrics;
        let slack = m.line_height.saturating_sub(m.ascent + m.descent) / 2;
        self.padding as i64 + (line as i64) * m.line_height as i64 + (slack + m.ascent) as i64
    }
}
