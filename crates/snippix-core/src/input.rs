use crate::LanguageId;

const FENCE: &str = "```";

/// Code pulled out of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub code: String,
    /// Language named after the opening fence, when it is a known one.
    pub language_hint: Option<LanguageId>,
}

/// Strips a surrounding ```` ``` ```` fence and reads the language hint on the
/// opening line. Messages without a complete fence are returned as-is,
/// including runs of four or five backticks, where the opening and
/// closing fences would overlap.
pub fn extract_snippet(message: &str) -> Snippet {
    let trimmed = message.trim();
    let fenced = trimmed.len() >= 2 * FENCE.len()
        && trimmed.starts_with(FENCE)
        && trimmed.ends_with(FENCE);
    if !fenced {
        return Snippet {
            code: message.to_string(),
            language_hint: None,
        };
    }

    let inner = &trimmed[FENCE.len()..trimmed.len() - FENCE.len()];
    let Some((first, body)) = inner.split_once('\n') else {
        return Snippet {
            code: inner.trim().to_string(),
            language_hint: None,
        };
    };

    let language_hint = first.trim().parse::<LanguageId>().ok();
    let code = body.strip_suffix('\n').unwrap_or(body);
    let code = code.strip_suffix('\r').unwrap_or(code).to_string();
    Snippet {
        code,
        language_hint,
    }
}
