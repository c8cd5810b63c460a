//! Unicode script predicates and line normalization.
//!
//! Transcript lines carry punctuation, brackets, stage directions in ASCII
//! and stray symbols that the aligner never emits as words. Before matching,
//! a line is reduced to the characters that can appear in word intervals:
//! Japanese script characters and full-width alphanumerics.
//!
//! # Example
//!
//! ```
//! use tgalign::align::normalize_line;
//!
//! assert_eq!(normalize_line("「こんにちは、ＡＢＣ！」"), "こんにちはabc");
//! assert_eq!(normalize_line("(sigh)"), "");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Hiragana, Katakana, CJK ideographs and the iteration/closing marks.
pub fn is_script_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'     // hiragana
        | '\u{30A0}'..='\u{30FF}'   // katakana
        | '\u{31F0}'..='\u{31FF}'   // katakana phonetic extensions
        | '\u{FF66}'..='\u{FF9F}'   // halfwidth katakana
        | '\u{4E00}'..='\u{9FFF}'   // CJK unified ideographs
        | '\u{3400}'..='\u{4DBF}'   // CJK extension A
        | '\u{F900}'..='\u{FAFF}'   // CJK compatibility ideographs
        | '\u{3005}'..='\u{3007}'   // 々 〆 〇
    )
}

/// Full-width digits and Latin letters.
pub fn is_fullwidth_alnum(c: char) -> bool {
    matches!(c, '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}')
}

/// Characters that survive filtering and that a merged block may be joined after.
pub fn is_kept_char(c: char) -> bool {
    is_script_char(c) || is_fullwidth_alnum(c)
}

/// Keep script characters and full-width alphanumerics, then NFKC-normalize,
/// lowercase and drop whitespace.
///
/// An empty result means the line has nothing to align against.
pub fn normalize_line(line: &str) -> String {
    let kept: String = line.chars().filter(|c| is_kept_char(*c)).collect();
    normalize_text(&kept)
}

/// NFKC, lowercase and whitespace removal without script filtering.
///
/// Word intervals are compared in this form when checking match boundaries.
pub fn normalize_text(text: &str) -> String {
    text.nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
