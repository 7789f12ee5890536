use serde::{Deserialize, Serialize};
use snippix_core::{Config, OutputFormat, RenderOptions, ThemeId};
use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

/// Stored user preferences: the render defaults plus the core config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Preferences {
    pub(crate) theme: String,
    pub(crate) language: String,
    pub(crate) format: OutputFormat,
    pub(crate) options: RenderOptions,
    pub(crate) config: Config,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeId::default().as_str().to_string(),
            language: "auto".to_string(),
            format: OutputFormat::default(),
            options: RenderOptions::default(),
            config: Config::default(),
        }
    }
}

/// Resolves `-c`: "default" for built-in values, "user" for the stored
/// preferences, anything else is read as a JSON config file.
pub(crate) fn load_config(name: &str, prefs: &Preferences) -> Result<Config, Box<dyn Error>> {
    let config = match name {
        "default" => Config::default(),
        "user" => prefs.config.clone(),
        path => {
            let contents = fs::read_to_string(path)
                .map_err(|err| format!("read config {path}: {err}"))?;
            serde_json::from_str(&contents)?
        }
    };
    Ok(config)
}

pub(crate) fn load_preferences() -> Result<Preferences, Box<dyn Error>> {
    let path = user_config_path()?;
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let contents = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn save_preferences(prefs: &Preferences) -> Result<PathBuf, Box<dyn Error>> {
    let path = user_config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(prefs)?)?;
    Ok(path)
}

pub(crate) fn user_config_path() -> Result<PathBuf, Box<dyn Error>> {
    if let Ok(path) = env::var("SNIPPIX_CONFIG_PATH") {
        return Ok(PathBuf::from(path));
    }
    let config_dir = if let Ok(path) = env::var("SNIPPIX_CONFIG_DIR") {
        PathBuf::from(path)
    } else {
        default_app_dir()?.join("config")
    };
    Ok(config_dir.join("user.json"))
}

fn default_app_dir() -> Result<PathBuf, Box<dyn Error>> {
    if let Ok(path) = env::var("SNIPPIX_HOME") {
        return Ok(PathBuf::from(path));
    }
    let home = if cfg!(windows) {
        if let Some(path) = env::var_os("USERPROFILE") {
            PathBuf::from(path)
        } else if let (Some(drive), Some(path)) =
            (env::var_os("HOMEDRIVE"), env::var_os("HOMEPATH"))
        {
            PathBuf::from(drive).join(path)
        } else {
            return Err("unable to resolve home directory".into());
        }
    } else if let Some(path) = env::var_os("HOME") {
        PathBuf::from(path)
    } else {
        return Err("unable to resolve home directory".into());
    };
    Ok(home.join(".snippix"))
}
