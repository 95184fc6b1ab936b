//! Human-readable formatting of raw classifier labels.
//!
//! Raw labels follow the `"<Category>___<condition>"` convention, e.g.
//! `"Grape___black_rot"`. The display form drops the category and title-cases
//! the condition: `"Black Rot"`.

/// Separator between the category prefix and the condition.
const CATEGORY_SEPARATOR: &str = "___";

/// Word characters as understood by the label convention (ASCII only).
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convert a raw machine label into display text.
///
/// 1. Strip the leading `<word>___` category prefix, if any. The prefix is the
///    longest run of leading word characters that ends in `___`.
/// 2. Replace the remaining underscores with spaces.
/// 3. Uppercase every word character that starts a word.
pub fn format_label(raw: &str) -> String {
    let condition = strip_category(raw);
    let spaced = condition.replace('_', " ");

    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        let word = is_word_char(c);
        if word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = word;
    }
    out
}

/// Remove the category prefix, leaving the condition part of the label.
fn strip_category(raw: &str) -> &str {
    let run_len = raw
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(raw.len(), |(i, _)| i);
    let run = &raw[..run_len];

    // The prefix needs at least one word character before the separator.
    match run.get(1..).and_then(|tail| tail.rfind(CATEGORY_SEPARATOR)) {
        Some(pos) => &raw[1 + pos + CATEGORY_SEPARATOR.len()..],
        None => raw,
    }
}
