//! Define the reserved keyword vocabulary for the Cero language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const table
//! ([`KEYWORDS`]) recording canonical spellings. It also derives the per-letter *tail tables* the lexer uses to classify
//! a scanned word without comparing strings.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - [`KEYWORDS`] is sorted by spelling, so keywords sharing a first letter are contiguous.
//! - A keyword's *tail* is every byte after its first one, packed little-endian into a `u64` with zero padding. A word
//!   is a keyword exactly when its first byte and packed tail both match, which caps keywords at
//!   [`MAX_KEYWORD_LEN`] bytes.
//!
//! ## Examples
//! ```rust
//! use cero_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("struct"), Some(KeywordId::Struct));
//! assert_eq!(keywords::lookup(b"unchecked"), Some(KeywordId::Unchecked));
//! assert_eq!(keywords::lookup(b"breaking"), None);
//! ```

/// Stable identifier for every reserved keyword.
///
/// Variants are declared in the same order as [`KEYWORDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    Break,
    Catch,
    Const,
    Continue,
    Do,
    Else,
    Enum,
    For,
    If,
    In,
    Interface,
    Let,
    Mut,
    Private,
    Public,
    Raise,
    Return,
    Static,
    Struct,
    Switch,
    Try,
    Unchecked,
    While,
}

/// Registry entry for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
}

const fn info(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo { id, canonical }
}

/// Every reserved keyword, sorted by spelling.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Break, "break"),
    info(KeywordId::Catch, "catch"),
    info(KeywordId::Const, "const"),
    info(KeywordId::Continue, "continue"),
    info(KeywordId::Do, "do"),
    info(KeywordId::Else, "else"),
    info(KeywordId::Enum, "enum"),
    info(KeywordId::For, "for"),
    info(KeywordId::If, "if"),
    info(KeywordId::In, "in"),
    info(KeywordId::Interface, "interface"),
    info(KeywordId::Let, "let"),
    info(KeywordId::Mut, "mut"),
    info(KeywordId::Private, "private"),
    info(KeywordId::Public, "public"),
    info(KeywordId::Raise, "raise"),
    info(KeywordId::Return, "return"),
    info(KeywordId::Static, "static"),
    info(KeywordId::Struct, "struct"),
    info(KeywordId::Switch, "switch"),
    info(KeywordId::Try, "try"),
    info(KeywordId::Unchecked, "unchecked"),
    info(KeywordId::While, "while"),
];

/// Longest spelling a keyword may have: one leading byte plus a tail that fits in a `u64`.
pub const MAX_KEYWORD_LEN: usize = 1 + size_of::<u64>();

/// Resolve a spelling to its keyword, if it is one.
pub fn from_str(word: &str) -> Option<KeywordId> {
    KEYWORDS
        .binary_search_by(|entry| entry.canonical.cmp(word))
        .ok()
        .map(|at| KEYWORDS[at].id)
}

/// Canonical spelling of a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    KEYWORDS[id as usize].canonical
}

// ============================================================================
// Tail tables
// ============================================================================

/// A keyword split into its first byte and packed tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordTail {
    pub first: u8,
    pub tail: u64,
    pub id: KeywordId,
}

/// Pack every byte of `word` after the first into a little-endian `u64`.
///
/// Returns `None` for an empty word or one whose tail is longer than eight bytes.
pub const fn encode_tail(word: &[u8]) -> Option<u64> {
    if word.is_empty() || word.len() > MAX_KEYWORD_LEN {
        return None;
    }
    let mut bytes = [0u8; 8];
    let mut i = 1;
    while i < word.len() {
        bytes[i - 1] = word[i];
        i += 1;
    }
    Some(u64::from_le_bytes(bytes))
}

const fn build_tails() -> [KeywordTail; KEYWORDS.len()] {
    let mut tails = [KeywordTail {
        first: 0,
        tail: 0,
        id: KeywordId::Break,
    }; KEYWORDS.len()];

    let mut i = 0;
    while i < KEYWORDS.len() {
        let bytes = KEYWORDS[i].canonical.as_bytes();
        let tail = match encode_tail(bytes) {
            Some(tail) => tail,
            None => panic!("keyword is too long to encode its tail"),
        };
        tails[i] = KeywordTail {
            first: bytes[0],
            tail,
            id: KEYWORDS[i].id,
        };
        i += 1;
    }
    tails
}

/// Range of [`KEYWORD_TAILS`] holding the keywords that start with each lowercase ASCII letter.
const fn build_ranges() -> [(u8, u8); 26] {
    let mut ranges = [(0u8, 0u8); 26];
    let mut i = 0;
    while i < KEYWORD_TAILS.len() {
        let first = KEYWORD_TAILS[i].first;
        assert!(first.is_ascii_lowercase(), "keywords must start with a lowercase ASCII letter");
        let slot = (first - b'a') as usize;
        if ranges[slot].0 == ranges[slot].1 {
            ranges[slot].0 = i as u8;
        }
        ranges[slot].1 = i as u8 + 1;
        i += 1;
    }
    ranges
}

const fn bytes_less(a: &[u8], b: &[u8]) -> bool {
    let mut i = 0;
    while i < a.len() && i < b.len() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
        i += 1;
    }
    a.len() < b.len()
}

const fn table_is_consistent() -> bool {
    let mut i = 0;
    while i < KEYWORDS.len() {
        if KEYWORDS[i].id as usize != i {
            return false;
        }
        if i > 0 && !bytes_less(KEYWORDS[i - 1].canonical.as_bytes(), KEYWORDS[i].canonical.as_bytes()) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(table_is_consistent(), "KEYWORDS must be sorted and follow KeywordId order");

/// Every keyword as a [`KeywordTail`], in [`KEYWORDS`] order.
pub static KEYWORD_TAILS: [KeywordTail; KEYWORDS.len()] = build_tails();

static TAIL_RANGES: [(u8, u8); 26] = build_ranges();

/// Tails of the keywords starting with `first`. Empty for any byte that starts no keyword.
pub fn tails_for(first: u8) -> &'static [KeywordTail] {
    if !first.is_ascii_lowercase() {
        return &[];
    }
    let (start, end) = TAIL_RANGES[(first - b'a') as usize];
    &KEYWORD_TAILS[start as usize..end as usize]
}

/// Classify a scanned word by comparing packed tails.
pub fn lookup(word: &[u8]) -> Option<KeywordId> {
    let (&first, _) = word.split_first()?;
    let tail = encode_tail(word)?;
    tails_for(first).iter().find(|entry| entry.tail == tail).map(|entry| entry.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_is_found_by_tail() {
        for entry in KEYWORDS {
            assert_eq!(lookup(entry.canonical.as_bytes()), Some(entry.id), "{}", entry.canonical);
            assert_eq!(from_str(entry.canonical), Some(entry.id));
            assert_eq!(as_str(entry.id), entry.canonical);
        }
    }

    #[test]
    fn test_prefixes_and_extensions_are_not_keywords() {
        for word in ["brea", "breaking", "i", "ifs", "whil", "whiles", "uncheckedx", "returns", "d", "Do", "RETURN"] {
            assert_eq!(lookup(word.as_bytes()), None, "{word}");
        }
    }

    #[test]
    fn test_encode_tail_is_little_endian() {
        assert_eq!(encode_tail(b"do"), Some(u64::from(b'o')));
        assert_eq!(encode_tail(b"in"), Some(u64::from(b'n')));
        assert_eq!(encode_tail(b"x"), Some(0));
        assert_eq!(encode_tail(b""), None);
        assert_eq!(encode_tail(b"abcdefghij"), None);
    }

    #[test]
    fn test_tails_for_groups_by_first_letter() {
        let s: Vec<_> = tails_for(b's').iter().map(|t| t.id).collect();
        assert_eq!(s, vec![KeywordId::Static, KeywordId::Struct, KeywordId::Switch]);
        assert!(tails_for(b'z').is_empty());
        assert!(tails_for(b'_').is_empty());
        assert!(tails_for(b'S').is_empty());
    }
}
