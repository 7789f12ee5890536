use std::ops::Range;
use std::str::FromStr;

use once_cell::sync::Lazy;
use syntect::easy::ScopeRegionIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};

use crate::{Error, Result};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Minimum detection score for `auto` to trust a grammar.
const DETECTION_THRESHOLD: f64 = 0.2;
const WEAK_CATEGORY_WEIGHT: f64 = 0.15;
const INVALID_PENALTY: f64 = 2.0;
const FIRST_LINE_BONUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    String,
    Comment,
    Number,
    Operator,
    Identifier,
    Punctuation,
    Plain,
}

impl TokenCategory {
    fn detection_weight(self) -> f64 {
        match self {
            TokenCategory::Keyword
            | TokenCategory::String
            | TokenCategory::Comment
            | TokenCategory::Number
            | TokenCategory::Operator => 1.0,
            TokenCategory::Identifier | TokenCategory::Punctuation => WEAK_CATEGORY_WEIGHT,
            TokenCategory::Plain => 0.0,
        }
    }
}

/// Known languages, declared in lexical order of their ids. Auto detection
/// walks this order, so earlier ids win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanguageId {
    Bash,
    Cpp,
    Csharp,
    Css,
    Go,
    Html,
    Java,
    Javascript,
    Kotlin,
    Php,
    Python,
    Ruby,
    Rust,
    Sql,
    Swift,
    Text,
    Typescript,
}

impl LanguageId {
    pub const ALL: [LanguageId; 17] = [
        LanguageId::Bash,
        LanguageId::Cpp,
        LanguageId::Csharp,
        LanguageId::Css,
        LanguageId::Go,
        LanguageId::Html,
        LanguageId::Java,
        LanguageId::Javascript,
        LanguageId::Kotlin,
        LanguageId::Php,
        LanguageId::Python,
        LanguageId::Ruby,
        LanguageId::Rust,
        LanguageId::Sql,
        LanguageId::Swift,
        LanguageId::Text,
        LanguageId::Typescript,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::Bash => "bash",
            LanguageId::Cpp => "cpp",
            LanguageId::Csharp => "csharp",
            LanguageId::Css => "css",
            LanguageId::Go => "go",
            LanguageId::Html => "html",
            LanguageId::Java => "java",
            LanguageId::Javascript => "javascript",
            LanguageId::Kotlin => "kotlin",
            LanguageId::Php => "php",
            LanguageId::Python => "python",
            LanguageId::Ruby => "ruby",
            LanguageId::Rust => "rust",
            LanguageId::Sql => "sql",
            LanguageId::Swift => "swift",
            LanguageId::Text => "text",
            LanguageId::Typescript => "typescript",
        }
    }

    // Grammars missing from the bundled set borrow a close relative.
    fn lookup_tokens(self) -> &'static [&'static str] {
        match self {
            LanguageId::Bash => &["bash", "sh"],
            LanguageId::Cpp => &["cpp", "c++"],
            LanguageId::Csharp => &["cs", "c#"],
            LanguageId::Css => &["css"],
            LanguageId::Go => &["go"],
            LanguageId::Html => &["html"],
            LanguageId::Java => &["java"],
            LanguageId::Javascript => &["js", "javascript"],
            LanguageId::Kotlin => &["kt", "kotlin", "java"],
            LanguageId::Php => &["php"],
            LanguageId::Python => &["py", "python"],
            LanguageId::Ruby => &["rb", "ruby"],
            LanguageId::Rust => &["rs", "rust"],
            LanguageId::Sql => &["sql"],
            LanguageId::Swift => &["swift", "go"],
            LanguageId::Text => &[],
            LanguageId::Typescript => &["ts", "typescript", "js"],
        }
    }

    fn syntax(self) -> &'static SyntaxReference {
        let ps = &*SYNTAX_SET;
        self.lookup_tokens()
            .iter()
            .find_map(|token| ps.find_syntax_by_token(token))
            .unwrap_or_else(|| ps.find_syntax_plain_text())
    }
}

impl FromStr for LanguageId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim().to_ascii_lowercase();
        let id = match key.as_str() {
            "py" => LanguageId::Python,
            "js" => LanguageId::Javascript,
            "ts" => LanguageId::Typescript,
            "c++" => LanguageId::Cpp,
            "cs" | "c#" => LanguageId::Csharp,
            "rb" => LanguageId::Ruby,
            "sh" | "shell" => LanguageId::Bash,
            "rs" => LanguageId::Rust,
            "golang" => LanguageId::Go,
            "kt" => LanguageId::Kotlin,
            "plain" | "plaintext" | "txt" => LanguageId::Text,
            other => LanguageId::ALL
                .into_iter()
                .find(|id| id.as_str() == other)
                .ok_or_else(|| Error::UnsupportedLanguage(value.to_string()))?,
        };
        Ok(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageChoice {
    #[default]
    Auto,
    Known(LanguageId),
}

impl FromStr for LanguageChoice {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim();
        if key.is_empty() || key.eq_ignore_ascii_case("auto") {
            return Ok(LanguageChoice::Auto);
        }
        key.parse().map(LanguageChoice::Known)
    }
}

/// A classified byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub range: Range<usize>,
    pub category: TokenCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    pub language: LanguageId,
    pub tokens: Vec<Token>,
}

impl TokenStream {
    fn plain(text: &str) -> Self {
        let tokens = if text.is_empty() {
            Vec::new()
        } else {
            vec![Token {
                range: 0..text.len(),
                category: TokenCategory::Plain,
            }]
        };
        Self {
            language: LanguageId::Text,
            tokens,
        }
    }
}

/// Splits `text` into categorized tokens that cover it exactly.
///
/// With [`LanguageChoice::Auto`] every known grammar is scored and the best
/// one above the detection threshold is used; otherwise the text comes back
/// as a single plain token.
pub fn tokenize(text: &str, language: LanguageChoice) -> Result<TokenStream> {
    match language {
        LanguageChoice::Known(LanguageId::Text) => Ok(TokenStream::plain(text)),
        LanguageChoice::Known(id) => {
            let tokens = scan(text, id.syntax())?
                .into_iter()
                .map(|(token, _)| token)
                .collect();
            Ok(TokenStream {
                language: id,
                tokens,
            })
        }
        LanguageChoice::Auto => match detect(text) {
            Ok((id, tokens)) => Ok(TokenStream {
                language: id,
                tokens,
            }),
            Err(err) => {
                log::debug!("{err}; using plain text");
                Ok(TokenStream::plain(text))
            }
        },
    }
}

fn detect(text: &str) -> Result<(LanguageId, Vec<Token>)> {
    let ps = &*SYNTAX_SET;
    let first_line = text.lines().next().unwrap_or("");
    let claimed = ps.find_syntax_by_first_line(first_line).map(|s| &s.name);

    let mut best: Option<(f64, LanguageId, Vec<Token>)> = None;
    for id in LanguageId::ALL {
        if id == LanguageId::Text {
            continue;
        }
        let syntax = id.syntax();
        if syntax.name == ps.find_syntax_plain_text().name {
            continue;
        }
        let scanned = match scan(text, syntax) {
            Ok(scanned) => scanned,
            Err(err) => {
                log::debug!("{} grammar failed: {err}", id.as_str());
                continue;
            }
        };
        let mut score = detection_score(text, &scanned);
        if claimed == Some(&syntax.name) {
            score += FIRST_LINE_BONUS;
        }
        log::debug!("detect {}: {score:.3}", id.as_str());
        let better = best.as_ref().map_or(true, |(top, _, _)| score > *top);
        if better {
            let tokens = scanned.into_iter().map(|(token, _)| token).collect();
            best = Some((score, id, tokens));
        }
    }

    match best {
        Some((score, id, tokens)) if score >= DETECTION_THRESHOLD => Ok((id, tokens)),
        _ => Err(Error::DetectionFailed),
    }
}

fn detection_score(text: &str, scanned: &[(Token, usize)]) -> f64 {
    let mut weighted = 0.0;
    let mut invalid = 0usize;
    let mut total = 0usize;
    for (token, invalid_bytes) in scanned {
        let significant = text[token.range.clone()]
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .count();
        total += significant;
        weighted += significant as f64 * token.category.detection_weight();
        invalid += invalid_bytes;
    }
    if total == 0 {
        return 0.0;
    }
    (weighted - INVALID_PENALTY * invalid as f64) / total as f64
}

/// Tokenizes with one grammar. Each token carries the number of its
/// non-whitespace bytes that sat in an `invalid` scope.
fn scan(text: &str, syntax: &SyntaxReference) -> Result<Vec<(Token, usize)>> {
    let ps = &*SYNTAX_SET;
    let mut state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();
    let mut out: Vec<(Token, usize)> = Vec::new();
    let mut line_start = 0usize;

    for line in text.split_inclusive('\n') {
        let ops = state
            .parse_line(line, ps)
            .map_err(|err| Error::RenderInternal(format!("tokenize: {err}")))?;
        let mut pos = line_start;
        for (piece, op) in ScopeRegionIterator::new(&ops, line) {
            stack
                .apply(op)
                .map_err(|err| Error::RenderInternal(format!("tokenize: {err:?}")))?;
            if piece.is_empty() {
                continue;
            }
            let (category, invalid) = classify(stack.as_slice());
            let invalid_bytes = if invalid {
                piece.bytes().filter(|b| !b.is_ascii_whitespace()).count()
            } else {
                0
            };
            push_token(&mut out, pos..pos + piece.len(), category, invalid_bytes);
            pos += piece.len();
        }
        let line_end = line_start + line.len();
        if pos < line_end {
            push_token(&mut out, pos..line_end, TokenCategory::Plain, 0);
        }
        line_start = line_end;
    }

    Ok(out)
}

fn push_token(
    out: &mut Vec<(Token, usize)>,
    range: Range<usize>,
    category: TokenCategory,
    invalid: usize,
) {
    if let Some((last, last_invalid)) = out.last_mut() {
        if last.category == category && last.range.end == range.start {
            last.range.end = range.end;
            *last_invalid += invalid;
            return;
        }
    }
    out.push((Token { range, category }, invalid));
}

fn classify(stack: &[Scope]) -> (TokenCategory, bool) {
    let names: Vec<String> = stack.iter().map(|scope| scope.build_string()).collect();
    let invalid = names.iter().any(|name| has_prefix(name, "invalid"));

    if names.iter().any(|name| has_prefix(name, "comment")) {
        return (TokenCategory::Comment, invalid);
    }
    if names.iter().any(|name| has_prefix(name, "string")) {
        return (TokenCategory::String, invalid);
    }
    for name in names.iter().rev() {
        let category = if has_prefix(name, "constant.numeric") {
            TokenCategory::Number
        } else if has_prefix(name, "keyword.operator") {
            TokenCategory::Operator
        } else if has_prefix(name, "keyword")
            || has_prefix(name, "storage")
            || has_prefix(name, "constant.language")
        {
            TokenCategory::Keyword
        } else if has_prefix(name, "punctuation") {
            TokenCategory::Punctuation
        } else if has_prefix(name, "entity.name")
            || has_prefix(name, "support")
            || has_prefix(name, "variable")
        {
            TokenCategory::Identifier
        } else {
            continue;
        };
        return (category, invalid);
    }
    (TokenCategory::Plain, invalid)
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
