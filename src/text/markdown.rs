//! Markdown stripping for pasted text.
//!
//! The rewrites run once, in order. Later passes assume the markup handled by
//! earlier ones is already gone (fenced code before inline code, images before
//! links, bold before italics). Anything that does not match is left as
//! literal text.
//!
//! Line-start markers only consume horizontal whitespace, so blank lines
//! between paragraphs survive until the final collapse. CRLF line endings are
//! folded to `\n` first, so Windows text strips the same as Unix text.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z]*\n.*?```").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+").unwrap());
static RE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-*_]{3,}[ \t]*$").unwrap());
static RE_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>[ \t]?").unwrap());
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*+][ \t]+").unwrap());
static RE_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").unwrap());
static RE_STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~([^~]+)~~").unwrap());
static RE_BOLD_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_BOLD_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([^_]+)__").unwrap());
static RE_ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static RE_ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_]+)_").unwrap());
static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
// Unicode `\w` also covers combining marks and connector punctuation.
static RE_WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w$").unwrap());

/// Removes markdown markup and returns plain prose. Never fails.
pub fn strip(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut result = RE_CODE_FENCE.replace_all(&text, "").into_owned();

    result = RE_INLINE_CODE.replace_all(&result, "$1").into_owned();
    result = RE_IMAGE.replace_all(&result, "$1").into_owned();
    result = RE_LINK.replace_all(&result, "$1").into_owned();

    result = RE_HEADING.replace_all(&result, "").into_owned();
    result = RE_RULE.replace_all(&result, "").into_owned();
    result = RE_BLOCKQUOTE.replace_all(&result, "").into_owned();
    result = RE_BULLET.replace_all(&result, "").into_owned();
    result = RE_ORDERED.replace_all(&result, "").into_owned();

    result = RE_STRIKE.replace_all(&result, "$1").into_owned();
    result = RE_BOLD_STAR.replace_all(&result, "$1").into_owned();
    result = RE_BOLD_UNDERSCORE.replace_all(&result, "$1").into_owned();

    result = unwrap_isolated(&result, &RE_ITALIC_STAR, '*');
    result = unwrap_isolated(&result, &RE_ITALIC_UNDERSCORE, '_');

    result = RE_BLANK_LINES.replace_all(&result, "\n\n").into_owned();

    result.trim().to_string()
}

/// Replaces each match of `re` with its first group, skipping matches whose
/// delimiters touch a word character or another `delim`.
///
/// A rejected candidate only skips its first character, so a later candidate
/// that overlaps it can still match.
fn unwrap_isolated(text: &str, re: &Regex, delim: char) -> String {
    let blocks = |c: char| c == delim || is_word_char(c);

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(caps) = re.captures_at(text, search) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();

        if before.is_some_and(blocks) || after.is_some_and(blocks) {
            // delimiters are single-byte ASCII
            search = whole.start() + 1;
            continue;
        }

        out.push_str(&text[copied..whole.start()]);
        out.push_str(inner.as_str());
        copied = whole.end();
        search = whole.end();
    }

    out.push_str(&text[copied..]);
    out
}

fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    RE_WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}
