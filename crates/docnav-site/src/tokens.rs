//! Path tokenization and title derivation.
//!
//! Document paths map to URL tokens by convention:
//! - `index.md` -> `[]` (the root document)
//! - `guide.md` -> `["guide"]`
//! - `guides/index.md` -> `["guides"]`
//! - `guides/setup.md` -> `["guides", "setup"]`

/// File extension stripped from document paths.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Name of the document that represents its directory.
pub const DEFAULT_DOCUMENT: &str = "index";

/// Strip the markdown extension and split into non-empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.strip_suffix(MARKDOWN_EXTENSION)
        .unwrap_or(path)
        .split('/')
        .filter(|s| !s.is_empty())
}

/// Convert a document path into URL path tokens.
///
/// A trailing default document contributes no token, so a top-level
/// `index.md` yields an empty sequence.
pub fn tokenize(path: &str) -> Vec<String> {
    let mut tokens: Vec<String> = segments(path).map(str::to_owned).collect();
    if tokens.last().is_some_and(|last| last == DEFAULT_DOCUMENT) {
        tokens.pop();
    }
    tokens
}

/// Whether the path names a directory's default document (`.../index.md`).
pub fn is_default_document(path: &str) -> bool {
    segments(path).last() == Some(DEFAULT_DOCUMENT)
}

/// Derive a display title from a single token.
///
/// Splits on `-` and capitalizes the first letter of every word; the rest of
/// each word is kept as is.
///
/// ```ignore
/// assert_eq!(title_from_token("getting-started"), "Getting Started");
/// ```
pub fn title_from_token(token: &str) -> String {
    let mut result = String::with_capacity(token.len());
    for (i, word) in token.split('-').enumerate() {
        if i > 0 {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}
