use crate::{
    Canvas, Error, OutputFormat, PngOptions, PngQuantPreset, PngStrip, Result,
    DEFAULT_PNG_QUANTIZE_DITHER, DEFAULT_PNG_QUANTIZE_QUALITY, DEFAULT_PNG_QUANTIZE_SPEED,
    DEFAULT_WEBP_QUALITY, MAX_PNG_OPT_LEVEL,
};
use std::io::Cursor;

pub(crate) fn encode_canvas(
    canvas: &Canvas,
    format: OutputFormat,
    config: &PngOptions,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => {
            let png = if config.quantize {
                quantize_rgba_to_png(canvas.data(), canvas.width(), canvas.height(), config)?
            } else {
                encode_rgba_png(canvas.data(), canvas.width(), canvas.height())?
            };
            optimize_png(png, config)
        }
        OutputFormat::Webp => canvas_to_webp(canvas),
    }
}

pub(crate) fn canvas_to_webp(canvas: &Canvas) -> Result<Vec<u8>> {
    let encoder = webp::Encoder::from_rgba(canvas.data(), canvas.width(), canvas.height());
    let webp = encoder.encode(DEFAULT_WEBP_QUALITY);
    Ok(webp.to_vec())
}

pub(crate) fn encode_rgba_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|err| Error::Encode(format!("png encode: {err}")))?;
    writer
        .write_image_data(rgba)
        .map_err(|err| Error::Encode(format!("png encode: {err}")))?;
    drop(writer);
    Ok(out)
}

/// Decodes PNG bytes back into a canvas.
pub fn decode_png(png: &[u8]) -> Result<Canvas> {
    let (rgba, width, height) = decode_png_rgba(png)?;
    Canvas::from_rgba(width, height, rgba)
}

fn decode_png_rgba(png: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let mut decoder = png::Decoder::new(Cursor::new(png));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|err| Error::Encode(format!("png decode: {err}")))?;
    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| Error::Encode("png decode: missing buffer size".to_string()))?;
    let mut buf = vec![0; buffer_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|err| Error::Encode(format!("png decode: {err}")))?;
    let data = &buf[..info.buffer_size()];
    let rgba = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => rgb_to_rgba(data),
        png::ColorType::GrayscaleAlpha => gray_alpha_to_rgba(data),
        png::ColorType::Grayscale => gray_to_rgba(data),
        png::ColorType::Indexed => {
            return Err(Error::Encode(
                "png decode: indexed color not expanded".to_string(),
            ));
        }
    };
    Ok((rgba, info.width, info.height))
}

fn rgb_to_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 3 * 4);
    for chunk in data.chunks_exact(3) {
        out.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
    }
    out
}

fn gray_to_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 4);
    for &g in data {
        out.extend_from_slice(&[g, g, g, 255]);
    }
    out
}

fn gray_alpha_to_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 2 * 4);
    for chunk in data.chunks_exact(2) {
        out.extend_from_slice(&[chunk[0], chunk[0], chunk[0], chunk[1]]);
    }
    out
}

#[derive(Clone, Copy)]
pub(crate) struct QuantizeSettings {
    pub(crate) quality: u8,
    pub(crate) speed: u8,
    pub(crate) dither: f32,
}

impl PngQuantPreset {
    pub(crate) fn settings(self) -> QuantizeSettings {
        match self {
            PngQuantPreset::Fast => QuantizeSettings {
                quality: 70,
                speed: 7,
                dither: 0.5,
            },
            PngQuantPreset::Balanced => QuantizeSettings {
                quality: DEFAULT_PNG_QUANTIZE_QUALITY,
                speed: DEFAULT_PNG_QUANTIZE_SPEED,
                dither: DEFAULT_PNG_QUANTIZE_DITHER,
            },
            PngQuantPreset::Best => QuantizeSettings {
                quality: 95,
                speed: 1,
                dither: 1.0,
            },
        }
    }
}

pub(crate) fn quantize_settings(config: &PngOptions) -> QuantizeSettings {
    if let Some(preset) = config.quantize_preset {
        return preset.settings();
    }
    QuantizeSettings {
        quality: config.quantize_quality,
        speed: config.quantize_speed,
        dither: config.quantize_dither,
    }
}

pub(crate) fn quantize_rgba_to_png(
    rgba: &[u8],
    width: u32,
    height: u32,
    config: &PngOptions,
) -> Result<Vec<u8>> {
    let pixels: Vec<imagequant::RGBA> = rgba
        .chunks_exact(4)
        .map(|c| imagequant::RGBA::new(c[0], c[1], c[2], c[3]))
        .collect();
    if pixels.len() != width as usize * height as usize {
        return Err(Error::Encode("png quantize: invalid rgba buffer".to_string()));
    }

    let mut attr = imagequant::new();
    let settings = quantize_settings(config);
    attr.set_quality(0, settings.quality.min(100))
        .map_err(|err| Error::Encode(format!("png quantize quality: {err:?}")))?;
    attr.set_speed(settings.speed.clamp(1, 10) as i32)
        .map_err(|err| Error::Encode(format!("png quantize speed: {err:?}")))?;
    let mut image = attr
        .new_image(pixels, width as usize, height as usize, 0.0)
        .map_err(|err| Error::Encode(format!("png quantize image: {err:?}")))?;
    let mut result = attr
        .quantize(&mut image)
        .map_err(|err| Error::Encode(format!("png quantize: {err:?}")))?;
    result
        .set_dithering_level(settings.dither.clamp(0.0, 1.0))
        .map_err(|err| Error::Encode(format!("png quantize dither: {err:?}")))?;
    let (palette, indices) = result
        .remapped(&mut image)
        .map_err(|err| Error::Encode(format!("png quantize remap: {err:?}")))?;
    encode_indexed_png(&palette, &indices, width, height)
}

fn encode_indexed_png(
    palette: &[imagequant::RGBA],
    indices: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let mut palette_bytes = Vec::with_capacity(palette.len() * 3);
    let mut trns = Vec::with_capacity(palette.len());
    for color in palette {
        palette_bytes.extend_from_slice(&[color.r, color.g, color.b]);
        trns.push(color.a);
    }
    let has_alpha = trns.iter().any(|a| *a < 255);
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette_bytes);
    if has_alpha {
        encoder.set_trns(trns);
    }
    let mut writer = encoder
        .write_header()
        .map_err(|err| Error::Encode(format!("png encode: {err}")))?;
    writer
        .write_image_data(indices)
        .map_err(|err| Error::Encode(format!("png encode: {err}")))?;
    drop(writer);
    Ok(out)
}

pub(crate) fn optimize_png(png: Vec<u8>, config: &PngOptions) -> Result<Vec<u8>> {
    if !config.optimize {
        return Ok(png);
    }
    let level = config.level.min(MAX_PNG_OPT_LEVEL);
    let mut options = oxipng::Options::from_preset(level);
    options.strip = match config.strip {
        PngStrip::None => oxipng::StripChunks::None,
        PngStrip::Safe => oxipng::StripChunks::Safe,
        PngStrip::All => oxipng::StripChunks::All,
    };
    oxipng::optimize_from_memory(&png, &options)
        .map_err(|err| Error::Encode(format!("png optimize: {err}")))
}
