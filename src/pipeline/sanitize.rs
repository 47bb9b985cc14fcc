//! Filename sanitising: arbitrary model output → filesystem-safe base name.
//!
//! Whitespace is removed entirely rather than trimmed, so a multi-word
//! answer becomes one contiguous token. Length is capped in characters and,
//! separately, in UTF-8 bytes: most filesystems limit a name to 255 bytes,
//! and a 100-character CJK name is 300.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a sanitized base name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Byte budget for a base name: 255 minus `.pdf` and the widest
/// collision suffix `（4294967295）` (16 bytes).
pub const MAX_NAME_BYTES: usize = 235;

/// Substituted when nothing survives sanitising.
pub const UNTITLED_NAME: &str = "未命名文档";

/// Characters that Windows (and in part POSIX) forbid in file names.
static RE_ILLEGAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/*?:"<>|]"#).unwrap());

/// Produce a base name with no reserved characters, no whitespace, at most
/// [`MAX_NAME_CHARS`] characters and [`MAX_NAME_BYTES`] bytes, and never
/// empty.
pub fn clean_filename(name: &str) -> String {
    let stripped = RE_ILLEGAL.replace_all(name, "");
    let mut cleaned = String::new();
    for c in stripped
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(MAX_NAME_CHARS)
    {
        if cleaned.len() + c.len_utf8() > MAX_NAME_BYTES {
            break;
        }
        cleaned.push(c);
    }

    if cleaned.is_empty() {
        UNTITLED_NAME.to_string()
    } else {
        cleaned
    }
}
