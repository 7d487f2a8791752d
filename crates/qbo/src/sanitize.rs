//! Text sanitization for QBO entity names and query strings.

use std::sync::LazyLock;

use regex::Regex;

/// Emoji and pictograph ranges, plus the variation selector and ASCII control
/// characters. Line labels carry emoji markers in the UI; QBO entity names
/// must not.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        "\u{1F600}-\u{1F64F}", // emoticons
        "\u{1F300}-\u{1F5FF}", // symbols & pictographs
        "\u{1F680}-\u{1F6FF}", // transport & map
        "\u{1F1E0}-\u{1F1FF}", // flags
        "\u{2500}-\u{2BEF}",   // box drawing and misc symbols
        "\u{2702}-\u{27B0}",
        "\u{24C2}-\u{1F251}",
        "\u{FE0F}",            // variation selector
        "\u{00}-\u{1F}",
        "]+",
    ))
    .expect("emoji pattern is a constant")
});

/// Strip emoji, pictographs and control characters.
pub fn strip_emoji(text: &str) -> String {
    EMOJI.replace_all(text, "").into_owned()
}

/// Escape a value for interpolation into a QBO query string literal.
/// Backslashes first, then single quotes; the other order would double-escape
/// the quotes.
pub fn escape_query(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
