use super::*;
use crate::fonts::Face;
use crate::layout::*;
use crate::raster::rasterize;
use crate::text::*;

fn builtin_request(source: &str) -> RenderRequest {
    let mut request = RenderRequest::new(source);
    request.options.font_id = "builtin".to_string();
    request
}

fn category_at(source: &str, stream: &TokenStream, needle: &str) -> TokenCategory {
    let offset = source.find(needle).expect("needle in source");
    stream
        .tokens
        .iter()
        .find(|t| t.range.contains(&offset))
        .map(|t| t.category)
        .expect("token at offset")
}

fn assert_covers(source: &str, stream: &TokenStream) {
    let mut next = 0usize;
    let mut rebuilt = String::new();
    for token in &stream.tokens {
        assert_eq!(token.range.start, next, "gap or overlap at {next}");
        assert!(token.range.end > token.range.start, "empty token");
        rebuilt.push_str(&source[token.range.clone()]);
        next = token.range.end;
    }
    assert_eq!(rebuilt, source);
}

#[test]
fn deserialize_partial_config() {
    let cfg: Config = serde_json::from_str(
        r#"{"padding":"24px","tab_width":2,"background":{"padding":10,"direction":"vertical"},"watermark":{"corner":"top-left"}}"#,
    )
    .expect("parse config");
    assert_eq!(cfg.padding, 24);
    assert_eq!(cfg.tab_width, 2);
    assert_eq!(cfg.background.padding, 10);
    assert_eq!(cfg.background.direction, GradientDirection::Vertical);
    assert_eq!(cfg.watermark.corner, Corner::TopLeft);
    assert_eq!(cfg.max_source_len, 5000);
    assert_eq!(cfg.shadow, ShadowOptions::default());
}

#[test]
fn deserialize_rejects_negative_padding() {
    let err = serde_json::from_str::<Config>(r#"{"padding":-4}"#);
    assert!(err.is_err());
}

#[test]
fn parse_hex_colors() {
    assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    assert_eq!(Rgba::from_hex("1e1e1e"), Some(Rgba::rgb(0x1E1E1E)));
    assert_eq!(
        Rgba::from_hex("#00000080"),
        Some(Rgba::new(0, 0, 0, 0x80))
    );
    assert_eq!(Rgba::from_hex("#12345"), None);
    assert_eq!(Rgba::from_hex("#zzzzzz"), None);
    assert_eq!(Rgba::rgb(0xFF5F56).to_hex(), "#FF5F56");
}

#[test]
fn blend_over_opaque_destination() {
    let src = Rgba::new(255, 0, 0, 128);
    let dst = Rgba::new(0, 0, 255, 255);
    let out = blend_over(src, dst);
    assert_eq!(out.a, 255);
    assert!((127..=129).contains(&out.r), "r = {}", out.r);
    assert!((126..=128).contains(&out.b), "b = {}", out.b);
    assert_eq!(out.g, 0);

    assert_eq!(blend_over(Rgba::TRANSPARENT, dst), dst);
    assert_eq!(blend_over(Rgba::WHITE, dst), Rgba::WHITE);
}

#[test]
fn lerp_hits_endpoints() {
    for (a, b) in [(0u8, 255u8), (255, 0), (17, 200), (128, 128), (3, 4)] {
        assert_eq!(lerp_channel(a, b, 0.0), a);
        assert_eq!(lerp_channel(a, b, 1.0), b);
    }
}

#[test]
fn gradient_boundaries() {
    let from = Rgba::rgb(0x7B2CBF);
    let to = Rgba::rgb(0x5A189A);

    let diagonal = gradient_fill(7, 5, from, to, GradientDirection::Diagonal).expect("fill");
    assert_eq!(diagonal.pixel(0, 0), from);
    assert_eq!(diagonal.pixel(6, 4), to);

    let vertical = gradient_fill(3, 9, from, to, GradientDirection::Vertical).expect("fill");
    for x in 0..3 {
        assert_eq!(vertical.pixel(x, 0), from);
        assert_eq!(vertical.pixel(x, 8), to);
    }

    let single = gradient_fill(1, 1, from, to, GradientDirection::Diagonal).expect("fill");
    assert_eq!(single.pixel(0, 0), from);
}

#[test]
fn rounded_mask_is_monotonic() {
    let content = Canvas::filled(100, 60, Rgba::WHITE).expect("canvas");
    let masked = rounded_mask(&content, 20).expect("mask");

    assert_eq!(masked.pixel(50, 30).a, 255);
    assert_eq!(masked.pixel(0, 0).a, 0);
    assert_eq!(masked.pixel(99, 59).a, 0);

    let mut previous = 255u8;
    for i in (0..30u32).rev() {
        let alpha = masked.pixel(i, i).a;
        assert!(alpha <= previous, "alpha rose at ({i},{i})");
        previous = alpha;
    }

    // Colors are untouched, only alpha changes.
    let p = masked.pixel(2, 8);
    assert_eq!((p.r, p.g, p.b), (255, 255, 255));
}

#[test]
fn destination_in_scales_alpha() {
    let mut base = Canvas::filled(2, 1, Rgba::rgb(0x336699)).expect("canvas");
    let mut mask = Canvas::new(1, 1).expect("mask");
    mask.put_pixel(0, 0, Rgba::WHITE.with_alpha(0));
    base.composite(&Layer {
        canvas: mask,
        origin: (1, 0),
        blend: BlendMode::DestinationIn,
    });
    assert_eq!(base.pixel(0, 0).a, 255);
    assert_eq!(base.pixel(1, 0).a, 0);
}

#[test]
fn shadow_grows_canvas_and_sits_beneath() {
    let color = Rgba::rgb(0x272822);
    let content = Canvas::filled(10, 10, color).expect("canvas");
    let spec = ShadowSpec {
        offset: (2, 2),
        blur: 3,
        opacity: 0.5,
        color: Rgba::BLACK,
    };
    let out = shadow(&content, &spec).expect("shadow");
    assert_eq!((out.width(), out.height()), (16, 16));
    assert_eq!(out.pixel(1, 1), color);
    assert_eq!(out.pixel(10, 10), color);

    let near = out.pixel(13, 13).a;
    let far = out.pixel(15, 15).a;
    assert!(near > 0);
    assert!(near <= 128);
    assert!(far <= near);
}

#[test]
fn window_chrome_layout() {
    let body = Rgba::rgb(0x112233);
    let content = Canvas::filled(200, 50, body).expect("canvas");
    let theme = ThemeId::Monokai.theme();
    let recipe = CompositionRecipe::for_style(
        CompositionStyle::Macwindow,
        theme,
        &Config::default(),
        None,
    )
    .expect("recipe");
    let LayerOp::WindowChrome(spec) = &recipe.ops[0] else {
        panic!("first op should be window chrome");
    };
    let out = window_chrome(&content, spec).expect("chrome");
    let pad = WINDOW_PADDING;
    assert_eq!(
        (out.width(), out.height()),
        (200 + 2 * pad, 50 + TITLE_BAR_HEIGHT + 2 * pad)
    );
    assert_eq!(out.pixel(0, 0).a, 0);
    assert_eq!(out.pixel(22, 20), Rgba::rgb(0xFF5F56));
    assert_eq!(out.pixel(42, 20), Rgba::rgb(0xFFBD2E));
    assert_eq!(out.pixel(62, 20), Rgba::rgb(0x27C93F));
    assert_eq!(out.pixel(100, 20), theme.title_bar);
    assert_eq!(out.pixel(pad + 100, TITLE_BAR_HEIGHT + pad + 25), body);
    assert_eq!(out.pixel(20, TITLE_BAR_HEIGHT + pad + 25), theme.window);

    let beside = out.pixel(pad - 2, TITLE_BAR_HEIGHT + pad + 25);
    assert_eq!(beside.a, 255);
    assert_ne!(beside, theme.window);
}

#[test]
fn window_chrome_without_padding_is_flush() {
    let body = Rgba::rgb(0x112233);
    let content = Canvas::filled(200, 50, body).expect("canvas");
    let theme = ThemeId::Monokai.theme();
    let mut config = Config::default();
    config.window.padding = 0;
    let recipe = CompositionRecipe::for_style(CompositionStyle::Macwindow, theme, &config, None)
        .expect("recipe");
    let LayerOp::WindowChrome(spec) = &recipe.ops[0] else {
        panic!("first op should be window chrome");
    };
    let out = window_chrome(&content, spec).expect("chrome");
    assert_eq!((out.width(), out.height()), (200, 90));
    assert_eq!(out.pixel(100, 20), theme.title_bar);
    assert_eq!(out.pixel(100, 60), body);
}

#[test]
fn window_chrome_survives_extreme_geometry() {
    let content = Canvas::filled(40, 20, Rgba::WHITE).expect("canvas");
    let theme = ThemeId::Monokai.theme();
    let recipe = CompositionRecipe::for_style(
        CompositionStyle::Macwindow,
        theme,
        &Config::default(),
        None,
    )
    .expect("recipe");
    let LayerOp::WindowChrome(spec) = &recipe.ops[0] else {
        panic!("first op should be window chrome");
    };

    let mut wide = spec.clone();
    wide.button_x_offset = u32::MAX;
    wide.button_spacing = u32::MAX;
    wide.padding = 0;
    let out = window_chrome(&content, &wide).expect("chrome");
    assert_eq!((out.width(), out.height()), (40, 60));

    let mut padded = spec.clone();
    padded.padding = u32::MAX;
    assert!(matches!(
        window_chrome(&content, &padded),
        Err(Error::RenderInternal(_))
    ));

    let mut request = builtin_request("x = 1\n");
    request.config.window.button_spacing = u32::MAX;
    render_canvas(&request).expect("render with huge button spacing");
}

#[test]
fn recipes_follow_style() {
    let theme = ThemeId::Nord.theme();
    let config = Config::default();
    let names = |style| {
        CompositionRecipe::for_style(style, theme, &config, None)
            .expect("recipe")
            .ops
            .iter()
            .map(|op| match op {
                LayerOp::SolidBackground { .. } => "solid",
                LayerOp::GradientBackground { .. } => "gradient",
                LayerOp::RoundedMask { .. } => "rounded",
                LayerOp::Shadow(_) => "shadow",
                LayerOp::WindowChrome(_) => "chrome",
                LayerOp::Watermark(_) => "watermark",
            })
            .collect::<Vec<_>>()
    };
    assert!(names(CompositionStyle::Plain).is_empty());
    assert_eq!(names(CompositionStyle::Gradient), vec!["gradient"]);
    assert_eq!(names(CompositionStyle::Rounded), vec!["rounded"]);
    assert_eq!(names(CompositionStyle::Shadow), vec!["shadow"]);
    assert_eq!(
        names(CompositionStyle::Macwindow),
        vec!["chrome", "rounded", "shadow", "gradient"]
    );

    let mut solid = Config::default();
    solid.background.color = Some("#101010".to_string());
    let watermark = WatermarkSpec {
        text: "@snippix".to_string(),
        font: FontId::Builtin,
        size: 12.0,
        opacity: 0.6,
        corner: Corner::BottomRight,
        margin: 12,
    };
    let recipe =
        CompositionRecipe::for_style(CompositionStyle::Gradient, theme, &solid, Some(watermark))
            .expect("recipe");
    assert!(matches!(recipe.ops[0], LayerOp::SolidBackground { .. }));
    assert!(matches!(recipe.ops.last(), Some(LayerOp::Watermark(_))));
}

#[test]
fn invalid_background_color_is_reported() {
    let mut config = Config::default();
    config.background.color = Some("not-a-color".to_string());
    let err = CompositionRecipe::for_style(
        CompositionStyle::Gradient,
        ThemeId::Monokai.theme(),
        &config,
        None,
    )
    .expect_err("invalid color");
    assert!(matches!(err, Error::RenderInternal(_)));
}

#[test]
fn watermark_wider_than_canvas_is_clipped() {
    let base = Rgba::rgb(0x336699);
    let content = Canvas::filled(40, 20, base).expect("canvas");
    let spec = WatermarkSpec {
        text: "a watermark that is far wider than the canvas".to_string(),
        font: FontId::Builtin,
        size: 12.0,
        opacity: 0.6,
        corner: Corner::BottomRight,
        margin: 12,
    };
    let out = watermark(&content, &spec);
    assert_eq!((out.width(), out.height()), (40, 20));
    assert_ne!(out.pixel(0, 0), base);

    let tiny = Canvas::filled(1, 1, base).expect("canvas");
    let out = watermark(&tiny, &spec);
    assert_eq!((out.width(), out.height()), (1, 1));
}

#[test]
fn tokens_cover_source() {
    let source = "def add(a, b):\n    # sum\n    return a + b  \r\n\nprint(add(1, 2))";
    let stream = tokenize(source, LanguageChoice::Known(LanguageId::Python)).expect("tokenize");
    assert_eq!(stream.language, LanguageId::Python);
    assert_covers(source, &stream);

    let auto = tokenize(source, LanguageChoice::Auto).expect("tokenize");
    assert_covers(source, &auto);

    let text = tokenize(source, LanguageChoice::Known(LanguageId::Text)).expect("tokenize");
    assert_covers(source, &text);
    assert_eq!(text.tokens.len(), 1);
}

#[test]
fn every_language_covers_source() {
    let source = "let x = \"s\"; // c\nfn f() { return 42; }\n";
    for id in LanguageId::ALL {
        let stream = tokenize(source, LanguageChoice::Known(id)).expect("tokenize");
        assert_covers(source, &stream);
    }
}

#[test]
fn python_categories() {
    let source = "# note\nx = 1\nname = \"hi\"\n";
    let stream = tokenize(source, LanguageChoice::Known(LanguageId::Python)).expect("tokenize");
    assert_eq!(category_at(source, &stream, "# note"), TokenCategory::Comment);
    assert_eq!(category_at(source, &stream, "1"), TokenCategory::Number);
    assert_eq!(category_at(source, &stream, "\"hi\""), TokenCategory::String);
    assert_eq!(category_at(source, &stream, "="), TokenCategory::Operator);
}

#[test]
fn unknown_language_fails() {
    let err = "not-a-real-lang"
        .parse::<LanguageChoice>()
        .expect_err("unknown language");
    assert_eq!(err, Error::UnsupportedLanguage("not-a-real-lang".to_string()));

    let mut request = builtin_request("print(1)");
    request.language = "not-a-real-lang".to_string();
    assert!(matches!(
        render(&request),
        Err(Error::UnsupportedLanguage(_))
    ));
}

#[test]
fn language_aliases() {
    assert_eq!("py".parse::<LanguageId>(), Ok(LanguageId::Python));
    assert_eq!("C#".parse::<LanguageId>(), Ok(LanguageId::Csharp));
    assert_eq!("c++".parse::<LanguageId>(), Ok(LanguageId::Cpp));
    assert_eq!("Shell".parse::<LanguageId>(), Ok(LanguageId::Bash));
    assert_eq!("golang".parse::<LanguageId>(), Ok(LanguageId::Go));
    assert_eq!(" AUTO ".parse::<LanguageChoice>(), Ok(LanguageChoice::Auto));
    for id in LanguageId::ALL {
        assert_eq!(id.as_str().parse::<LanguageId>(), Ok(id));
    }
}

#[test]
fn auto_on_ambiguous_text_is_plain() {
    let stream = tokenize("hello world", LanguageChoice::Auto).expect("tokenize");
    assert_eq!(stream.language, LanguageId::Text);
    assert_eq!(
        stream.tokens,
        vec![Token {
            range: 0..11,
            category: TokenCategory::Plain,
        }]
    );
}

#[test]
fn auto_detection_is_deterministic() {
    let source = "#!/usr/bin/env python3\nimport os\n\ndef main():\n    print(os.getcwd())\n";
    let first = tokenize(source, LanguageChoice::Auto).expect("tokenize");
    let second = tokenize(source, LanguageChoice::Auto).expect("tokenize");
    assert_eq!(first, second);
    assert_eq!(first.language, LanguageId::Python);
}

#[test]
fn tab_stops() {
    assert_eq!(tab_advance(0, 4), 4);
    assert_eq!(tab_advance(1, 4), 3);
    assert_eq!(tab_advance(4, 4), 4);
    assert_eq!(text_width_cells("a\tb", 4), 5);
    assert_eq!(text_width_cells("abcd\t", 4), 8);
    assert_eq!(text_width_cells("\t", 0), 1);
    assert_eq!(text_width_cells("中文", 4), 4);
}

#[test]
fn truncate_cells() {
    assert_eq!(truncate_to_cells("short", 10, "..."), "short");
    assert_eq!(truncate_to_cells("abcdefghij", 6, "..."), "abc...");
    assert_eq!(truncate_to_cells("abc", 0, "..."), "");
}

#[test]
fn split_lines() {
    let lines = |source: &str| {
        let stream = tokenize(source, LanguageChoice::Known(LanguageId::Text)).expect("tokenize");
        split_token_lines(source, &stream.tokens)
            .iter()
            .map(|line| line.segments.iter().map(|s| s.text).collect::<String>())
            .collect::<Vec<_>>()
    };
    assert_eq!(lines(""), vec![String::new()]);
    assert_eq!(lines("a\n"), vec!["a"]);
    assert_eq!(lines("a\r\nb"), vec!["a", "b"]);
    assert_eq!(lines("a\n\nb"), vec!["a", "", "b"]);
    assert_eq!(lines("a\n\n"), vec!["a", ""]);
}

#[test]
fn empty_document_is_one_line() {
    let face = Face::builtin(16.0, 1.2);
    let metrics = face.metrics();
    let stream = tokenize("", LanguageChoice::Known(LanguageId::Text)).expect("tokenize");
    let canvas = rasterize(
        "",
        &stream,
        &face,
        ThemeId::Monokai.theme(),
        &Config::default(),
        true,
    )
    .expect("rasterize");
    let padding = Config::default().padding;
    assert_eq!(canvas.height(), metrics.line_height + 2 * padding);
    assert_eq!(canvas.width(), 3 * metrics.advance + 2 * padding);
}

#[test]
fn builtin_metrics() {
    let metrics = Face::builtin(16.0, 1.2).metrics();
    assert_eq!(
        metrics,
        FontMetrics {
            advance: 12,
            ascent: 14,
            descent: 4,
            line_height: 19,
        }
    );
}

#[test]
fn missing_glyph_draws_placeholder() {
    let face = Face::builtin(16.0, 1.2);
    let metrics = face.metrics();
    let mut canvas = Canvas::new(40, 40).expect("canvas");
    face.draw_char(&mut canvas, 'λ', 4, 30, 1, Rgba::WHITE);
    let lit = canvas.data().chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(lit > 0);
    assert!(lit < (metrics.advance * metrics.ascent) as usize);
}

#[test]
fn print_scenario_dimensions() {
    let mut request = builtin_request("print(1)");
    request.language = "python".to_string();
    request.options.composition_style = CompositionStyle::Plain;
    let result = render(&request).expect("render");
    assert!(result.recovered.is_empty());

    let metrics = Face::builtin(16.0, 1.2).metrics();
    let padding = request.config.padding;
    let gutter = 3 * metrics.advance;
    let decoded = decode_png(&result.bytes).expect("decode");
    assert_eq!(decoded.width(), result.width);
    assert_eq!(decoded.height(), result.height);
    assert!(decoded.width() >= gutter + 8 * metrics.advance + 2 * padding);
    assert!(decoded.height() >= metrics.line_height + 2 * padding);
}

#[test]
fn plain_style_matches_raster() {
    let source = "fn main() {\n\tprintln!(\"hi\");\n}\n";
    let mut request = builtin_request(source);
    request.language = "rust".to_string();
    request.options.composition_style = CompositionStyle::Plain;
    let composed = render_canvas(&request).expect("render");

    let stream = tokenize(source, LanguageChoice::Known(LanguageId::Rust)).expect("tokenize");
    let raw = rasterize(
        source,
        &stream,
        &Face::builtin(16.0, 1.2),
        ThemeId::Monokai.theme(),
        &request.config,
        true,
    )
    .expect("rasterize");
    assert_eq!(composed, raw);
}

#[test]
fn renders_are_deterministic() {
    let mut request = builtin_request("const x = [1, 2, 3];\nconsole.log(x.map(n => n * 2));\n");
    request.options.watermark_text = Some("@snippix".to_string());
    for style in CompositionStyle::ALL {
        request.options.composition_style = style;
        let first = render_canvas(&request).expect("render");
        let second = render_canvas(&request).expect("render");
        assert_eq!(first, second, "style {}", style.as_str());
    }
}

#[test]
fn oversized_input_is_rejected() {
    let request = builtin_request(&"a".repeat(5001));
    let expected = Error::InputTooLarge {
        len: 5001,
        limit: 5000,
    };
    assert_eq!(render(&request).expect_err("too large"), expected);
    assert_eq!(
        render_with_fallback(&request).expect_err("too large"),
        expected
    );
    assert!(check_source(&"a".repeat(5000), 5000).is_ok());
    assert_eq!(check_source("", 5000), Err(Error::EmptyInput));
}

#[test]
fn fallback_recovers_unknown_ids() {
    let mut request = builtin_request("x = 1");
    request.theme = "sunburst".to_string();
    let err = render(&request).expect_err("unknown theme");
    assert_eq!(err, Error::UnknownTheme("sunburst".to_string()));

    let result = render_with_fallback(&request).expect("fallback");
    assert_eq!(
        result.recovered,
        vec![Error::UnknownTheme("sunburst".to_string())]
    );
    assert!(decode_png(&result.bytes).is_ok());

    request.theme = "monokai".to_string();
    request.options.font_id = "comic-sans".to_string();
    let result = render_with_fallback(&request).expect("fallback");
    assert_eq!(
        result.recovered.first(),
        Some(&Error::UnknownFont("comic-sans".to_string()))
    );
}

#[test]
fn fallback_draws_error_image() {
    let mut request = builtin_request("x = 1");
    request.language = "not-a-real-lang".to_string();
    let result = render_with_fallback(&request).expect("fallback");
    assert_eq!((result.width, result.height), (800, 200));
    assert_eq!(
        result.recovered,
        vec![Error::UnsupportedLanguage("not-a-real-lang".to_string())]
    );
}

#[test]
fn error_canvas_shows_message() {
    let canvas = render_error_canvas("something broke").expect("error canvas");
    assert_eq!((canvas.width(), canvas.height()), (800, 200));
    assert_eq!(canvas.pixel(0, 0), Rgba::rgb(0x1E1E1E));
    let white = canvas
        .data()
        .chunks_exact(4)
        .filter(|px| px == &[255, 255, 255, 255])
        .count();
    assert!(white > 0);

    let long = "x".repeat(500);
    assert!(render_error_canvas(&long).is_ok());
}

#[test]
fn webp_output() {
    let mut request = builtin_request("SELECT 1;");
    request.format = OutputFormat::Webp;
    request.options.composition_style = CompositionStyle::Plain;
    let result = render(&request).expect("render");
    assert_eq!(&result.bytes[0..4], b"RIFF");
    assert_eq!(&result.bytes[8..12], b"WEBP");
}

#[test]
fn quantized_png_decodes() {
    let mut request = builtin_request("echo hi");
    request.config.png.quantize = true;
    request.config.png.quantize_preset = Some(PngQuantPreset::Fast);
    request.options.composition_style = CompositionStyle::Gradient;
    let result = render(&request).expect("render");
    let decoded = decode_png(&result.bytes).expect("decode");
    assert_eq!(
        (decoded.width(), decoded.height()),
        (result.width, result.height)
    );
}

#[test]
fn extract_fenced_snippets() {
    let snippet = extract_snippet("```python\nprint(1)\n```");
    assert_eq!(snippet.code, "print(1)");
    assert_eq!(snippet.language_hint, Some(LanguageId::Python));

    let snippet = extract_snippet("```\nx = 1\ny = 2\n```");
    assert_eq!(snippet.code, "x = 1\ny = 2");
    assert_eq!(snippet.language_hint, None);

    let snippet = extract_snippet("```klingon\nqapla\n```");
    assert_eq!(snippet.code, "qapla");
    assert_eq!(snippet.language_hint, None);

    let snippet = extract_snippet("```inline```");
    assert_eq!(snippet.code, "inline");

    let snippet = extract_snippet("````");
    assert_eq!(snippet.code, "````");
    assert_eq!(snippet.language_hint, None);

    let snippet = extract_snippet("  `````\n");
    assert_eq!(snippet.code, "  `````\n");

    let snippet = extract_snippet("no fences here");
    assert_eq!(snippet.code, "no fences here");
    assert_eq!(snippet.language_hint, None);
}

#[test]
fn ids_round_trip() {
    for id in ThemeId::ALL {
        assert_eq!(id.as_str().parse::<ThemeId>(), Ok(id));
    }
    assert_eq!("One_Dark".parse::<ThemeId>(), Ok(ThemeId::OneDark));
    assert_eq!(
        "nope".parse::<ThemeId>(),
        Err(Error::UnknownTheme("nope".to_string()))
    );
    for id in FontId::ALL {
        assert_eq!(id.as_str().parse::<FontId>(), Ok(id));
    }
    for style in CompositionStyle::ALL {
        assert_eq!(style.as_str().parse::<CompositionStyle>(), Ok(style));
    }
    assert_eq!(
        "macos".parse::<CompositionStyle>(),
        Ok(CompositionStyle::Macwindow)
    );
    assert!(matches!(
        "bogus".parse::<CompositionStyle>(),
        Err(Error::UnknownStyle(_))
    ));
}

#[test]
fn canvas_rejects_bad_sizes() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10_000, 10_000).is_err());
    assert!(Canvas::from_rgba(2, 2, vec![0; 15]).is_err());
}

#[test]
fn font_sizes_are_clamped() {
    let metrics = |px: f32, line_height: f32| Face::builtin(px, line_height).metrics();
    let defaults = metrics(DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT);
    assert_eq!(metrics(1e12, 1.2), metrics(MAX_FONT_SIZE, 1.2));
    assert_eq!(metrics(f32::INFINITY, 1.2), defaults);
    assert_eq!(metrics(f32::NAN, f32::NAN), defaults);
    assert_eq!(metrics(-3.0, 1e9), metrics(1.0, MAX_LINE_HEIGHT));
}

#[test]
fn extreme_font_sizes_render() {
    for font in ["builtin", "fira"] {
        for size in [1e12, f32::MAX, f32::NAN, -5.0, 0.0] {
            let mut request = RenderRequest::new("x = 1\n");
            request.language = "python".to_string();
            request.options.font_id = font.to_string();
            request.options.watermark_text = Some("@snippix".to_string());
            request.config.font.size = size;
            request.config.watermark.size = size;
            let canvas = render_canvas(&request).expect("render");
            assert!(canvas.width() > 0, "font {font} size {size}");
        }
    }
}

#[test]
fn huge_tab_width_is_clamped() {
    assert_eq!(text_width_cells("\tx", usize::MAX), MAX_TAB_WIDTH + 1);
    assert_eq!(tab_advance(3, 0), 1);
    assert_eq!(advance_column(usize::MAX, 'x', 4), usize::MAX);

    let mut request = builtin_request("\tx = 1\n\t\ty\n");
    request.config.tab_width = usize::MAX;
    let wide = render_canvas(&request).expect("render");
    request.config.tab_width = MAX_TAB_WIDTH;
    let capped = render_canvas(&request).expect("render");
    assert_eq!(wide, capped);
}

#[test]
fn concurrent_renders_match_serial() {
    for font in ["fira", "dejavu", "builtin"] {
        let mut request = RenderRequest::new("fn main() {\n    println!(\"hi\");\n}\n");
        request.language = "rust".to_string();
        request.options.font_id = font.to_string();
        request.options.watermark_text = Some("@snippix".to_string());

        let canvases: Vec<Canvas> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| render_canvas(&request)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("join").expect("render"))
                .collect()
        });
        let serial = render_canvas(&request).expect("render");
        for canvas in &canvases {
            assert_eq!(canvas, &serial, "font {font}");
        }
    }
}
