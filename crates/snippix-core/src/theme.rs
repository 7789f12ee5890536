use std::str::FromStr;

use crate::{Error, Result, Rgba, TokenCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    #[default]
    Monokai,
    GithubDark,
    GithubLight,
    Dracula,
    Nord,
    OneDark,
    SolarizedDark,
    SolarizedLight,
    Material,
    Gruvbox,
    Default,
}

impl ThemeId {
    pub const ALL: [ThemeId; 11] = [
        ThemeId::Monokai,
        ThemeId::GithubDark,
        ThemeId::GithubLight,
        ThemeId::Dracula,
        ThemeId::Nord,
        ThemeId::OneDark,
        ThemeId::SolarizedDark,
        ThemeId::SolarizedLight,
        ThemeId::Material,
        ThemeId::Gruvbox,
        ThemeId::Default,
    ];

    pub fn as_str(self) -> &'static str {
        self.theme().name
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            ThemeId::Monokai => &MONOKAI,
            ThemeId::GithubDark => &GITHUB_DARK,
            ThemeId::GithubLight => &GITHUB_LIGHT,
            ThemeId::Dracula => &DRACULA,
            ThemeId::Nord => &NORD,
            ThemeId::OneDark => &ONE_DARK,
            ThemeId::SolarizedDark => &SOLARIZED_DARK,
            ThemeId::SolarizedLight => &SOLARIZED_LIGHT,
            ThemeId::Material => &MATERIAL,
            ThemeId::Gruvbox => &GRUVBOX,
            ThemeId::Default => &DEFAULT,
        }
    }
}

impl FromStr for ThemeId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim().to_ascii_lowercase().replace('_', "-");
        ThemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| Error::UnknownTheme(value.to_string()))
    }
}

/// Colors per token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub keyword: Rgba,
    pub string: Rgba,
    pub comment: Rgba,
    pub number: Rgba,
    pub operator: Rgba,
    pub identifier: Rgba,
    pub punctuation: Rgba,
    pub plain: Rgba,
}

impl Palette {
    pub fn color(&self, category: TokenCategory) -> Rgba {
        match category {
            TokenCategory::Keyword => self.keyword,
            TokenCategory::String => self.string,
            TokenCategory::Comment => self.comment,
            TokenCategory::Number => self.number,
            TokenCategory::Operator => self.operator,
            TokenCategory::Identifier => self.identifier,
            TokenCategory::Punctuation => self.punctuation,
            TokenCategory::Plain => self.plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub palette: Palette,
    pub gutter_background: Rgba,
    pub gutter_foreground: Rgba,
    pub gradient: (Rgba, Rgba),
    /// Window body behind the code in the `macwindow` style.
    pub window: Rgba,
    pub title_bar: Rgba,
}

static MONOKAI: Theme = Theme {
    name: "monokai",
    background: Rgba::rgb(0x272822),
    palette: Palette {
        keyword: Rgba::rgb(0xF92672),
        string: Rgba::rgb(0xE6DB74),
        comment: Rgba::rgb(0x75715E),
        number: Rgba::rgb(0xAE81FF),
        operator: Rgba::rgb(0xF92672),
        identifier: Rgba::rgb(0xA6E22E),
        punctuation: Rgba::rgb(0xF8F8F2),
        plain: Rgba::rgb(0xF8F8F2),
    },
    gutter_background: Rgba::rgb(0x1E1F1C),
    gutter_foreground: Rgba::rgb(0x90908A),
    gradient: (Rgba::rgb(0x7B2CBF), Rgba::rgb(0x5A189A)),
    window: Rgba::rgb(0x272822),
    title_bar: Rgba::rgb(0x1E1F1C),
};

static GITHUB_DARK: Theme = Theme {
    name: "github-dark",
    background: Rgba::rgb(0x0D1117),
    palette: Palette {
        keyword: Rgba::rgb(0xFF7B72),
        string: Rgba::rgb(0xA5D6FF),
        comment: Rgba::rgb(0x8B949E),
        number: Rgba::rgb(0x79C0FF),
        operator: Rgba::rgb(0xFF7B72),
        identifier: Rgba::rgb(0xD2A8FF),
        punctuation: Rgba::rgb(0xC9D1D9),
        plain: Rgba::rgb(0xC9D1D9),
    },
    gutter_background: Rgba::rgb(0x010409),
    gutter_foreground: Rgba::rgb(0x6E7681),
    gradient: (Rgba::rgb(0x4895EF), Rgba::rgb(0x4361EE)),
    window: Rgba::rgb(0x0D1117),
    title_bar: Rgba::rgb(0x161B22),
};

static GITHUB_LIGHT: Theme = Theme {
    name: "github-light",
    background: Rgba::rgb(0xFFFFFF),
    palette: Palette {
        keyword: Rgba::rgb(0xCF222E),
        string: Rgba::rgb(0x0A3069),
        comment: Rgba::rgb(0x6E7781),
        number: Rgba::rgb(0x0550AE),
        operator: Rgba::rgb(0xCF222E),
        identifier: Rgba::rgb(0x8250DF),
        punctuation: Rgba::rgb(0x24292F),
        plain: Rgba::rgb(0x24292F),
    },
    gutter_background: Rgba::rgb(0xF6F8FA),
    gutter_foreground: Rgba::rgb(0x8C959F),
    gradient: (Rgba::rgb(0xA8DADC), Rgba::rgb(0x457B9D)),
    window: Rgba::rgb(0xFFFFFF),
    title_bar: Rgba::rgb(0xEAEEF2),
};

static DRACULA: Theme = Theme {
    name: "dracula",
    background: Rgba::rgb(0x282A36),
    palette: Palette {
        keyword: Rgba::rgb(0xFF79C6),
        string: Rgba::rgb(0xF1FA8C),
        comment: Rgba::rgb(0x6272A4),
        number: Rgba::rgb(0xBD93F9),
        operator: Rgba::rgb(0xFF79C6),
        identifier: Rgba::rgb(0x50FA7B),
        punctuation: Rgba::rgb(0xF8F8F2),
        plain: Rgba::rgb(0xF8F8F2),
    },
    gutter_background: Rgba::rgb(0x21222C),
    gutter_foreground: Rgba::rgb(0x6272A4),
    gradient: (Rgba::rgb(0x6C5CE7), Rgba::rgb(0xA29BFE)),
    window: Rgba::rgb(0x282A36),
    title_bar: Rgba::rgb(0x21222C),
};

static NORD: Theme = Theme {
    name: "nord",
    background: Rgba::rgb(0x2E3440),
    palette: Palette {
        keyword: Rgba::rgb(0x81A1C1),
        string: Rgba::rgb(0xA3BE8C),
        comment: Rgba::rgb(0x616E88),
        number: Rgba::rgb(0xB48EAD),
        operator: Rgba::rgb(0x81A1C1),
        identifier: Rgba::rgb(0x88C0D0),
        punctuation: Rgba::rgb(0xECEFF4),
        plain: Rgba::rgb(0xD8DEE9),
    },
    gutter_background: Rgba::rgb(0x272C36),
    gutter_foreground: Rgba::rgb(0x4C566A),
    gradient: (Rgba::rgb(0x5E60CE), Rgba::rgb(0x7209B7)),
    window: Rgba::rgb(0x2E3440),
    title_bar: Rgba::rgb(0x3B4252),
};

static ONE_DARK: Theme = Theme {
    name: "one-dark",
    background: Rgba::rgb(0x282C34),
    palette: Palette {
        keyword: Rgba::rgb(0xC678DD),
        string: Rgba::rgb(0x98C379),
        comment: Rgba::rgb(0x5C6370),
        number: Rgba::rgb(0xD19A66),
        operator: Rgba::rgb(0x56B6C2),
        identifier: Rgba::rgb(0x61AFEF),
        punctuation: Rgba::rgb(0xABB2BF),
        plain: Rgba::rgb(0xABB2BF),
    },
    gutter_background: Rgba::rgb(0x21252B),
    gutter_foreground: Rgba::rgb(0x636D83),
    gradient: (Rgba::rgb(0xF72585), Rgba::rgb(0xB5179E)),
    window: Rgba::rgb(0x282C34),
    title_bar: Rgba::rgb(0x21252B),
};

static SOLARIZED_DARK: Theme = Theme {
    name: "solarized-dark",
    background: Rgba::rgb(0x002B36),
    palette: Palette {
        keyword: Rgba::rgb(0x859900),
        string: Rgba::rgb(0x2AA198),
        comment: Rgba::rgb(0x586E75),
        number: Rgba::rgb(0xD33682),
        operator: Rgba::rgb(0x859900),
        identifier: Rgba::rgb(0x268BD2),
        punctuation: Rgba::rgb(0x93A1A1),
        plain: Rgba::rgb(0x839496),
    },
    gutter_background: Rgba::rgb(0x073642),
    gutter_foreground: Rgba::rgb(0x586E75),
    gradient: (Rgba::rgb(0xFB5607), Rgba::rgb(0xFF006E)),
    window: Rgba::rgb(0x002B36),
    title_bar: Rgba::rgb(0x073642),
};

static SOLARIZED_LIGHT: Theme = Theme {
    name: "solarized-light",
    background: Rgba::rgb(0xFDF6E3),
    palette: Palette {
        keyword: Rgba::rgb(0x859900),
        string: Rgba::rgb(0x2AA198),
        comment: Rgba::rgb(0x93A1A1),
        number: Rgba::rgb(0xD33682),
        operator: Rgba::rgb(0x859900),
        identifier: Rgba::rgb(0x268BD2),
        punctuation: Rgba::rgb(0x586E75),
        plain: Rgba::rgb(0x657B83),
    },
    gutter_background: Rgba::rgb(0xEEE8D5),
    gutter_foreground: Rgba::rgb(0x93A1A1),
    gradient: (Rgba::rgb(0xFFBE0B), Rgba::rgb(0xFB5607)),
    window: Rgba::rgb(0xFDF6E3),
    title_bar: Rgba::rgb(0xEEE8D5),
};

static MATERIAL: Theme = Theme {
    name: "material",
    background: Rgba::rgb(0x263238),
    palette: Palette {
        keyword: Rgba::rgb(0xC792EA),
        string: Rgba::rgb(0xC3E88D),
        comment: Rgba::rgb(0x546E7A),
        number: Rgba::rgb(0xF78C6C),
        operator: Rgba::rgb(0x89DDFF),
        identifier: Rgba::rgb(0x82AAFF),
        punctuation: Rgba::rgb(0x89DDFF),
        plain: Rgba::rgb(0xEEFFFF),
    },
    gutter_background: Rgba::rgb(0x1E272C),
    gutter_foreground: Rgba::rgb(0x37474F),
    gradient: (Rgba::rgb(0x06FFA5), Rgba::rgb(0x00D9FF)),
    window: Rgba::rgb(0x263238),
    title_bar: Rgba::rgb(0x1E272C),
};

static GRUVBOX: Theme = Theme {
    name: "gruvbox",
    background: Rgba::rgb(0x282828),
    palette: Palette {
        keyword: Rgba::rgb(0xFB4934),
        string: Rgba::rgb(0xB8BB26),
        comment: Rgba::rgb(0x928374),
        number: Rgba::rgb(0xD3869B),
        operator: Rgba::rgb(0xFE8019),
        identifier: Rgba::rgb(0xFABD2F),
        punctuation: Rgba::rgb(0xEBDBB2),
        plain: Rgba::rgb(0xEBDBB2),
    },
    gutter_background: Rgba::rgb(0x1D2021),
    gutter_foreground: Rgba::rgb(0x7C6F64),
    gradient: (Rgba::rgb(0xFB8500), Rgba::rgb(0xFFB703)),
    window: Rgba::rgb(0x282828),
    title_bar: Rgba::rgb(0x1D2021),
};

static DEFAULT: Theme = Theme {
    name: "default",
    background: Rgba::rgb(0x1E1E1E),
    palette: Palette {
        keyword: Rgba::rgb(0x569CD6),
        string: Rgba::rgb(0xCE9178),
        comment: Rgba::rgb(0x6A9955),
        number: Rgba::rgb(0xB5CEA8),
        operator: Rgba::rgb(0xD4D4D4),
        identifier: Rgba::rgb(0x9CDCFE),
        punctuation: Rgba::rgb(0xD4D4D4),
        plain: Rgba::rgb(0xD4D4D4),
    },
    gutter_background: Rgba::rgb(0x181818),
    gutter_foreground: Rgba::rgb(0x858585),
    gradient: (Rgba::rgb(0x1A1A2E), Rgba::rgb(0x16213E)),
    window: Rgba::rgb(0x1E1E1E),
    title_bar: Rgba::rgb(0x323233),
};
