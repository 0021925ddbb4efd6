//! Script-based comment classification.

/// Whether `c` case-folds to a Russian Cyrillic letter (а-я or ё).
///
/// Besides upper and lower case this covers the historic letter forms in
/// U+1C80..=U+1C86, which case-fold to в, д, о, с, т, т and ъ.
fn is_cyrillic_letter(c: char) -> bool {
    if ('\u{1C80}'..='\u{1C86}').contains(&c) {
        return true;
    }
    c.to_lowercase()
        .any(|lower| ('а'..='я').contains(&lower) || lower == 'ё')
}

/// Remove every non-overlapping occurrence of `name` from `text`.
///
/// An empty name leaves the text untouched.
pub fn strip_mention(text: &str, name: &str) -> String {
    if name.is_empty() {
        return text.to_string();
    }
    text.replace(name, "")
}

/// Decide whether a comment must be deleted.
///
/// `mentioned_name` is the display name of the actor the comment replies
/// to. VK prefixes replies with that name, so it is stripped first to keep a
/// Cyrillic-named user from getting every reply to them flagged.
pub fn should_flag(text: &str, mentioned_name: &str) -> bool {
    strip_mention(text, mentioned_name)
        .chars()
        .any(is_cyrillic_letter)
}
