use snippix_core::{OutputFormat, RenderResult};
use std::error::Error;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub(crate) fn write_output_with_tty(
    result: RenderResult,
    output: Option<&PathBuf>,
    stdout_is_tty: bool,
) -> Result<(), Box<dyn Error>> {
    if let Some(path) = output {
        std::fs::write(path, result.bytes)?;
        if stdout_is_tty {
            print_wrote(path);
        }
        return Ok(());
    }

    if stdout_is_tty {
        let path = Path::new(default_output_name(result.format));
        std::fs::write(path, result.bytes)?;
        print_wrote(path);
        return Ok(());
    }

    let mut stdout = io::stdout();
    stdout.write_all(&result.bytes)?;
    stdout.flush()?;
    Ok(())
}

pub(crate) fn default_output_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Png => "snippix.png",
        OutputFormat::Webp => "snippix.webp",
    }
}

pub(crate) fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension().and_then(|v| v.to_str())?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some(OutputFormat::Png),
        "webp" => Some(OutputFormat::Webp),
        _ => None,
    }
}

pub(crate) fn print_wrote(path: &Path) {
    println!("WROTE {}", path.display());
}

pub(crate) fn read_input(path: &str) -> Result<String, Box<dyn Error>> {
    std::fs::read_to_string(path).map_err(|err| format!("read {path}: {err}").into())
}

pub(crate) fn read_stdin() -> Result<String, io::Error> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

pub(crate) fn read_stdin_with(stdin_override: Option<&str>) -> Result<String, io::Error> {
    if let Some(value) = stdin_override {
        return Ok(value.to_string());
    }
    read_stdin()
}
