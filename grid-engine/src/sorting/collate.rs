//! Locale-aware string comparison.
//!
//! Comparison is done in three levels, like a Unicode collator:
//!
//! 1. base letters, case- and accent-insensitive, grouped by character
//!    class (whitespace and punctuation, then digits, then letters)
//! 2. accents, unaccented first
//! 3. case, lowercase first
//!
//! Base letters come from canonical decomposition (NFD): combining marks
//! are dropped from the primary key and only count at the accent level.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// One collation element: a base character and its accent and case flags.
#[derive(Debug, Clone, Copy)]
struct Element {
    class: u8,
    base: char,
    accented: bool,
    upper: bool,
}

/// Compare two strings for display ordering.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = elements(a);
    let b = elements(b);
    a.iter()
        .map(|e| (e.class, e.base))
        .cmp(b.iter().map(|e| (e.class, e.base)))
        .then_with(|| a.iter().map(|e| e.accented).cmp(b.iter().map(|e| e.accented)))
        .then_with(|| a.iter().map(|e| e.upper).cmp(b.iter().map(|e| e.upper)))
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.accented = true;
            }
            continue;
        }
        let lower = c.to_lowercase().next().unwrap_or(c);
        let (base, accented) = match fold_stroke(lower) {
            Some(base) => (base, true),
            None => (lower, false),
        };
        out.push(Element {
            class: class_of(base),
            base,
            accented,
            upper: c.is_uppercase(),
        });
    }
    out
}

fn class_of(c: char) -> u8 {
    if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else if c.is_numeric() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        3
    }
}

/// Letters whose diacritic is part of the glyph and has no canonical
/// decomposition.
fn fold_stroke(c: char) -> Option<char> {
    Some(match c {
        'đ' | 'ð' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        'ł' => 'l',
        'ø' => 'o',
        'ŧ' => 't',
        'ƀ' => 'b',
        'ɨ' => 'i',
        'ƶ' => 'z',
        _ => return None,
    })
}
