use crate::compose::WatermarkSpec;
use crate::fonts::Face;
use crate::png::encode_canvas;
use crate::raster::{draw_run, rasterize};
use crate::text::{single_line, truncate_to_cells};
use crate::{
    tokenize, Canvas, CompositionRecipe, Error, FontId, LanguageChoice, RenderRequest,
    RenderResult, Result, Rgba, ThemeId, ERROR_IMAGE_HEIGHT, ERROR_IMAGE_WIDTH, ERROR_TEXT_SIZE,
};

const ERROR_BACKGROUND: Rgba = Rgba::rgb(0x1E1E1E);
const ERROR_TEXT_X: i64 = 50;
const ERROR_TEXT_Y: i64 = 90;

/// Rejects empty sources and sources longer than `limit` characters. Runs
/// before anything is allocated for the image.
pub fn check_source(source: &str, limit: usize) -> Result<()> {
    if source.is_empty() {
        return Err(Error::EmptyInput);
    }
    let len = source.chars().count();
    if len > limit {
        return Err(Error::InputTooLarge { len, limit });
    }
    Ok(())
}

/// Renders the request and encodes it. Every failure is returned as-is.
pub fn render(request: &RenderRequest) -> Result<RenderResult> {
    let mut recovered = Vec::new();
    let canvas = render_with_ids(request, &mut recovered, parse_ids(request)?)?;
    finish(request, canvas, recovered)
}

/// Renders the request to a canvas without encoding it.
pub fn render_canvas(request: &RenderRequest) -> Result<Canvas> {
    let mut recovered = Vec::new();
    render_with_ids(request, &mut recovered, parse_ids(request)?)
}

/// Renders the request, recovering wherever possible: unknown themes and
/// fonts fall back to the defaults, and any later failure yields the error
/// image. Oversized or empty input is still rejected, and so is a failure to
/// produce the error image itself.
pub fn render_with_fallback(request: &RenderRequest) -> Result<RenderResult> {
    check_source(&request.source, request.config.max_source_len)?;

    let mut recovered = Vec::new();
    let theme = request.theme.parse::<ThemeId>().unwrap_or_else(|err| {
        recovered.push(err);
        ThemeId::default()
    });
    let font = request
        .options
        .font_id
        .parse::<FontId>()
        .unwrap_or_else(|err| {
            recovered.push(err);
            FontId::default()
        });

    let attempt = render_with_ids(request, &mut recovered, (theme, font)).and_then(|canvas| {
        let bytes = encode_canvas(&canvas, request.format, &request.config.png)?;
        Ok((canvas, bytes))
    });
    match attempt {
        Ok((canvas, bytes)) => Ok(RenderResult {
            format: request.format,
            width: canvas.width(),
            height: canvas.height(),
            bytes,
            recovered,
        }),
        Err(err) => {
            log::debug!("render failed, drawing error image: {err}");
            let message = err.to_string();
            recovered.push(err);
            let canvas = render_error_canvas(&message)?;
            finish(request, canvas, recovered)
        }
    }
}

/// Fixed-size canvas showing `Error: <message>` in the bitmap face.
pub fn render_error_canvas(message: &str) -> Result<Canvas> {
    let mut canvas = Canvas::filled(ERROR_IMAGE_WIDTH, ERROR_IMAGE_HEIGHT, ERROR_BACKGROUND)?;
    let face = Face::builtin(ERROR_TEXT_SIZE, 1.0);
    let metrics = face.metrics();
    let max_cells = (ERROR_IMAGE_WIDTH as i64 - 2 * ERROR_TEXT_X) / metrics.advance.max(1) as i64;
    let text = single_line(&format!("Error: {message}"));
    let text = truncate_to_cells(&text, max_cells.max(0) as usize, "...");
    draw_run(
        &mut canvas,
        &face,
        &metrics,
        &text,
        (ERROR_TEXT_X, ERROR_TEXT_Y + metrics.ascent as i64),
        0,
        1,
        Rgba::WHITE,
    );
    Ok(canvas)
}

fn parse_ids(request: &RenderRequest) -> Result<(ThemeId, FontId)> {
    Ok((
        request.theme.parse::<ThemeId>()?,
        request.options.font_id.parse::<FontId>()?,
    ))
}

fn render_with_ids(
    request: &RenderRequest,
    recovered: &mut Vec<Error>,
    (theme_id, font_id): (ThemeId, FontId),
) -> Result<Canvas> {
    let config = &request.config;
    check_source(&request.source, config.max_source_len)?;
    let language = request.language.parse::<LanguageChoice>()?;
    let stream = tokenize(&request.source, language)?;
    log::debug!(
        "tokenized as {} ({} tokens)",
        stream.language.as_str(),
        stream.tokens.len()
    );

    let (face, failures) =
        Face::load_with_fallback(font_id, config.font.size, config.font.line_height);
    recovered.extend(failures);

    let theme = theme_id.theme();
    let content = rasterize(
        &request.source,
        &stream,
        &face,
        theme,
        config,
        request.options.line_numbers,
    )?;

    let watermark = request
        .options
        .watermark_text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| WatermarkSpec {
            text: text.to_string(),
            font: font_id,
            size: config.watermark.size,
            opacity: config.watermark.opacity,
            corner: config.watermark.corner,
            margin: config.watermark.margin,
        });
    let recipe = CompositionRecipe::for_style(
        request.options.composition_style,
        theme,
        config,
        watermark,
    )?;
    recipe.apply(content)
}

fn finish(request: &RenderRequest, canvas: Canvas, recovered: Vec<Error>) -> Result<RenderResult> {
    let bytes = encode_canvas(&canvas, request.format, &request.config.png)?;
    Ok(RenderResult {
        format: request.format,
        width: canvas.width(),
        height: canvas.height(),
        bytes,
        recovered,
    })
}
