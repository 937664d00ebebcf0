/// Capitalise the first letter of every alphabetic run and lowercase the rest.
///
/// Any non-alphabetic character starts a new run, so `"gpt4o"` becomes
/// `"Gpt4O"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Label for a token-details row, e.g. `Prompt: Cached Tokens`.
pub fn category_label(prefix: &str, category: &str) -> String {
    format!("{prefix}: {}", title_case(&category.replace('_', " ")))
}
