use std::env;
use std::path::PathBuf;

/// Directories scanned for font files before the system locations:
/// `SNIPPIX_FONT_DIRS` (comma separated) or the app font dir.
pub(crate) fn resolve_font_dirs() -> Vec<PathBuf> {
    if let Ok(raw) = env::var("SNIPPIX_FONT_DIRS") {
        return parse_font_dir_list(&raw);
    }
    default_font_dir().into_iter().collect()
}

/// Well-known install locations of the named fonts on Linux.
pub(crate) fn system_font_dirs() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/firacode",
        "/usr/share/fonts/truetype/jetbrains",
        "/usr/share/fonts/truetype/cascadia",
        "/usr/share/fonts/truetype/dejavu",
        "/usr/share/fonts/truetype/ubuntu",
        "/usr/share/fonts/truetype/hack",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

pub(crate) fn parse_font_dir_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(expand_home_dir)
        .collect()
}

pub(crate) fn expand_home_dir(value: &str) -> Option<PathBuf> {
    if value == "~" || value.starts_with("~/") || value.starts_with("~\\") {
        let home = home_dir()?;
        let rest = value.trim_start_matches('~');
        return Some(if rest.is_empty() {
            home
        } else {
            home.join(rest.trim_start_matches(['/', '\\']))
        });
    }
    Some(PathBuf::from(value))
}

pub(crate) fn default_font_dir() -> Option<PathBuf> {
    Some(default_app_dir()?.join("fonts"))
}

pub(crate) fn default_app_dir() -> Option<PathBuf> {
    if let Ok(path) = env::var("SNIPPIX_HOME") {
        return Some(PathBuf::from(path));
    }
    Some(home_dir()?.join(".snippix"))
}

pub(crate) fn home_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        if let Some(path) = env::var_os("USERPROFILE") {
            return Some(PathBuf::from(path));
        }
        if let (Some(drive), Some(path)) = (env::var_os("HOMEDRIVE"), env::var_os("HOMEPATH")) {
            return Some(PathBuf::from(drive).join(path));
        }
        None
    } else {
        env::var_os("HOME").map(PathBuf::from)
    }
}
