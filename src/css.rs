//! CSS content filtering and prompt truncation
//!
//! Both helpers are pure string transforms. The filter strips the parts of a
//! stylesheet that add prompt length without adding signal (comments, media
//! queries, keyframes, `!important`), the truncator clips a prompt to a fixed
//! character budget without leaving a rule open mid-brace.

use regex::Regex;

/// Filter CSS content to remove unnecessary elements.
///
/// Substitutions run in order over the whole text: block and line comments,
/// `@media` blocks, `@keyframes` blocks, `!important` tokens, then whitespace
/// collapse. Line comments are only stripped when not preceded by a colon so
/// that `url(http://...)` survives.
///
/// Known limitation: the `@media`/`@keyframes` patterns match lazily up to
/// the first `}` rather than balancing braces, so nested rules inside those
/// blocks are not fully stripped. This mirrors the service's long-standing
/// behavior and is left as-is.
pub fn filter_css_content(input: &str) -> String {
    let comment_re = Regex::new(r"(?m)/\*[\s\S]*?\*/|([^:]|^)//.*$").unwrap();
    let media_re = Regex::new(r"@media[^{]+\{[\s\S]+?\}").unwrap();
    let keyframes_re = Regex::new(r"@keyframes[^{]+\{[\s\S]+?\}").unwrap();
    let important_re = Regex::new(r"\s*!important").unwrap();
    let whitespace_re = Regex::new(r"\s+").unwrap();

    let css = comment_re.replace_all(input, "${1}");
    let css = media_re.replace_all(&css, "");
    let css = keyframes_re.replace_all(&css, "");
    let css = important_re.replace_all(&css, "");
    let css = whitespace_re.replace_all(&css, " ");

    css.trim().to_string()
}

/// Truncate text to at most `max_len` characters.
///
/// If the truncated window contains a `}`, the cut is moved back to the last
/// one (inclusive) so a CSS rule is never left unterminated. With no `}` in
/// the window the raw slice is returned, and `max_len >= len` is a no-op.
pub fn truncate(text: &str, max_len: usize) -> &str {
    let end = text
        .char_indices()
        .nth(max_len)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let window = &text[..end];

    match window.rfind('}') {
        Some(pos) => &window[..=pos],
        None => window,
    }
}
