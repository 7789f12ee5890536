use crate::args::{Args, FormatArg};
use crate::config::{load_config, load_preferences, save_preferences, Preferences};
use crate::io::{format_from_extension, read_input, read_stdin_with, write_output_with_tty};
use clap::CommandFactory;
use snippix_core::{
    extract_snippet, render, render_with_fallback, LanguageId, OutputFormat, RenderRequest,
    ThemeId,
};
use std::error::Error;
use std::path::PathBuf;

pub(crate) fn run_with(
    args: Args,
    stdin_is_tty: bool,
    stdout_is_tty: bool,
    stdin_override: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    if args.list_themes {
        for id in ThemeId::ALL {
            println!("{}", id.as_str());
        }
        return Ok(());
    }
    if args.list_languages {
        println!("auto");
        for id in LanguageId::ALL {
            println!("{}", id.as_str());
        }
        return Ok(());
    }

    let mut prefs = load_preferences()?;
    apply_overrides(&mut prefs, &args)?;
    if args.save {
        let path = save_preferences(&prefs)?;
        log::info!("saved preferences to {}", path.display());
        if stdout_is_tty {
            println!("SAVED {}", path.display());
        }
    }

    let message = if let Some(input) = args.input.as_deref() {
        if input == "-" {
            read_stdin_with(stdin_override)?
        } else {
            read_input(input)?
        }
    } else if !stdin_is_tty {
        read_stdin_with(stdin_override)?
    } else if args.save {
        return Ok(());
    } else {
        let mut cmd = Args::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let snippet = extract_snippet(&message);
    // An explicit -l wins over the fence hint, which wins over preferences.
    let language = match (args.language.as_deref(), snippet.language_hint) {
        (Some(language), _) => language.to_string(),
        (None, Some(hint)) => hint.as_str().to_string(),
        (None, None) => prefs.language.clone(),
    };
    let request = RenderRequest {
        source: snippet.code,
        language,
        theme: prefs.theme,
        options: prefs.options,
        config: prefs.config,
        format: resolve_format(args.format, args.output.as_ref(), prefs.format),
    };

    let result = if args.strict {
        render(&request)?
    } else {
        render_with_fallback(&request)?
    };
    for err in &result.recovered {
        log::warn!("recovered: {err}");
    }
    log::debug!("rendered {}x{}", result.width, result.height);

    write_output_with_tty(result, args.output.as_ref(), stdout_is_tty)
}

fn apply_overrides(prefs: &mut Preferences, args: &Args) -> Result<(), Box<dyn Error>> {
    if let Some(name) = args.config.as_deref() {
        prefs.config = load_config(name, prefs)?;
    }
    if let Some(theme) = &args.theme {
        prefs.theme = theme.clone();
    }
    if let Some(language) = &args.language {
        prefs.language = language.clone();
    }
    if let Some(font) = &args.font {
        prefs.options.font_id = font.clone();
    }
    if let Some(style) = args.style {
        prefs.options.composition_style = style.into();
    }
    if let Some(show) = args.line_numbers {
        prefs.options.line_numbers = show;
    }
    if let Some(text) = &args.watermark {
        let text = text.trim();
        prefs.options.watermark_text = (!text.is_empty()).then(|| text.to_string());
    }
    if let Some(format) = args.format {
        prefs.format = format.into();
    }
    Ok(())
}

fn resolve_format(
    arg: Option<FormatArg>,
    output: Option<&PathBuf>,
    fallback: OutputFormat,
) -> OutputFormat {
    if let Some(arg) = arg {
        return arg.into();
    }
    output
        .and_then(|path| format_from_extension(path))
        .unwrap_or(fallback)
}
