mod builtin;
mod cache;
mod dirs;
mod face;

pub(crate) use face::*;

use std::str::FromStr;

use crate::{Error, Result};

/// Fonts a request may name. `Builtin` is compiled in and never fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontId {
    #[default]
    Fira,
    Jetbrains,
    Cascadia,
    Dejavu,
    Ubuntu,
    Hack,
    Builtin,
}

impl FontId {
    pub const ALL: [FontId; 7] = [
        FontId::Fira,
        FontId::Jetbrains,
        FontId::Cascadia,
        FontId::Dejavu,
        FontId::Ubuntu,
        FontId::Hack,
        FontId::Builtin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontId::Fira => "fira",
            FontId::Jetbrains => "jetbrains",
            FontId::Cascadia => "cascadia",
            FontId::Dejavu => "dejavu",
            FontId::Ubuntu => "ubuntu",
            FontId::Hack => "hack",
            FontId::Builtin => "builtin",
        }
    }

    pub(crate) fn families(self) -> &'static [&'static str] {
        match self {
            FontId::Fira => &["Fira Code", "Fira Mono"],
            FontId::Jetbrains => &["JetBrains Mono"],
            FontId::Cascadia => &["Cascadia Code", "Cascadia Mono"],
            FontId::Dejavu => &["DejaVu Sans Mono"],
            FontId::Ubuntu => &["Ubuntu Mono"],
            FontId::Hack => &["Hack"],
            FontId::Builtin => &[],
        }
    }

    pub(crate) fn file_names(self) -> &'static [&'static str] {
        match self {
            FontId::Fira => &["FiraCode-Regular.ttf", "FiraMono-Regular.ttf"],
            FontId::Jetbrains => &["JetBrainsMono-Regular.ttf"],
            FontId::Cascadia => &["CascadiaCode.ttf", "CascadiaMono.ttf"],
            FontId::Dejavu => &["DejaVuSansMono.ttf"],
            FontId::Ubuntu => &["UbuntuMono-R.ttf", "UbuntuMono-Regular.ttf"],
            FontId::Hack => &["Hack-Regular.ttf"],
            FontId::Builtin => &[],
        }
    }
}

impl FromStr for FontId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim().to_ascii_lowercase();
        let id = match key.as_str() {
            "fira" | "fira-code" | "firacode" => FontId::Fira,
            "jetbrains" | "jetbrains-mono" => FontId::Jetbrains,
            "cascadia" | "cascadia-code" => FontId::Cascadia,
            "dejavu" | "dejavu-sans-mono" => FontId::Dejavu,
            "ubuntu" | "ubuntu-mono" => FontId::Ubuntu,
            "hack" => FontId::Hack,
            "builtin" | "bitmap" => FontId::Builtin,
            _ => return Err(Error::UnknownFont(value.to_string())),
        };
        Ok(id)
    }
}

/// Monospace cell metrics in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub advance: u32,
    pub ascent: u32,
    pub descent: u32,
    pub line_height: u32,
}
