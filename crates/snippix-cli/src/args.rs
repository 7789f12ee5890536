use clap::{Parser, ValueEnum};
use snippix_core::{CompositionStyle, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snippix",
    about = "Render code snippets as styled images.",
    version
)]
pub(crate) struct Args {
    /// Input file path. Use "-" to read from stdin. A surrounding ``` fence
    /// is stripped and its language hint used.
    pub(crate) input: Option<String>,

    /// Output file path (.png/.webp).
    /// If omitted, writes to stdout (or snippix.png when stdout is a TTY).
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Output format (png or webp).
    #[arg(long, value_enum)]
    pub(crate) format: Option<FormatArg>,

    /// JSON config: "default", "user" or a file path.
    #[arg(short, long)]
    pub(crate) config: Option<String>,

    /// Theme name.
    #[arg(short = 't', long)]
    pub(crate) theme: Option<String>,

    /// Language name, or "auto" to detect it.
    #[arg(short = 'l', long)]
    pub(crate) language: Option<String>,

    /// Composition style.
    #[arg(short = 's', long, value_enum)]
    pub(crate) style: Option<StyleArg>,

    /// Font id (fira, jetbrains, cascadia, dejavu, ubuntu, hack, builtin).
    #[arg(short = 'f', long)]
    pub(crate) font: Option<String>,

    /// Show line numbers.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub(crate) line_numbers: Option<bool>,

    /// Watermark text drawn in a corner. Pass an empty string to clear it.
    #[arg(short = 'w', long)]
    pub(crate) watermark: Option<String>,

    /// Fail instead of recovering with defaults or the error image.
    #[arg(long)]
    pub(crate) strict: bool,

    /// Save theme, language, font, style, line numbers and watermark as
    /// user preferences.
    #[arg(long)]
    pub(crate) save: bool,

    /// Print the available themes and exit.
    #[arg(long)]
    pub(crate) list_themes: bool,

    /// Print the available languages and exit.
    #[arg(long)]
    pub(crate) list_languages: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Png,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StyleArg {
    Plain,
    Gradient,
    Rounded,
    Shadow,
    Macwindow,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Webp => OutputFormat::Webp,
        }
    }
}

impl From<StyleArg> for CompositionStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Plain => CompositionStyle::Plain,
            StyleArg::Gradient => CompositionStyle::Gradient,
            StyleArg::Rounded => CompositionStyle::Rounded,
            StyleArg::Shadow => CompositionStyle::Shadow,
            StyleArg::Macwindow => CompositionStyle::Macwindow,
        }
    }
}
