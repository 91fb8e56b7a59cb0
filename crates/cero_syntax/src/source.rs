//! Source inputs and locked views of their text.
//!
//! A [`Source`] names a piece of program text: a file on disk or a buffer supplied by the caller. Reading the text
//! requires [`Source::lock`], which yields a [`SourceView`] that owns (or borrows) the bytes for as long as it lives.
//! Tokens and AST nodes store only offsets into that text, so resolving them needs the same view.
//!
//! ## Notes
//! - Offsets are [`SourceOffset`] (`u32`), but valid sources never exceed [`SOURCE_SIZE_MAX`] bytes. The lexer enforces
//!   this limit, not `lock`.
//! - File contents are read into an owned buffer; the buffer is released when the view is dropped. At most one byte
//!   past [`SOURCE_SIZE_MAX`] is read, which is enough for the lexer to reject the file.
//!
//! ## Examples
//! ```rust
//! use cero_syntax::source::Source;
//!
//! let source = Source::from_string("main() {\n\treturn;\n}", "main.ce");
//! let view = source.lock().unwrap();
//! let location = view.locate(10, 4);
//! assert_eq!(location.to_string(), "main.ce:2:5");
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};

use thiserror::Error;

use crate::diagnostics::CodeLocation;

/// Offset into source text, or length of a range of source text.
pub type SourceOffset = u32;

/// Number of bits needed to represent any offset into a valid source.
pub const SOURCE_SIZE_BITS: u32 = 24;

/// Largest accepted source size in bytes (16 MiB minus one).
pub const SOURCE_SIZE_MAX: SourceOffset = (1 << SOURCE_SIZE_BITS) - 1;

/// Tab width used to compute columns unless configured otherwise.
pub const DEFAULT_TAB_SIZE: u8 = 4;

/// Failure to lock a file-backed [`Source`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("could not open file `{path}`: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound { path: path.to_string() },
            _ => SourceError::Open {
                path: path.to_string(),
                source: err,
            },
        }
    }
}

/// A compiler input: either a file path or caller-owned text with a display name.
#[derive(Debug, Clone)]
pub struct Source<'a> {
    path: String,
    text: Option<&'a [u8]>,
}

impl<'a> Source<'a> {
    /// A source read from the file at `path` when locked.
    pub fn from_file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: None,
        }
    }

    /// A source over `text`, reported under `name`.
    pub fn from_string(text: &'a str, name: impl Into<String>) -> Self {
        Self::from_bytes(text.as_bytes(), name)
    }

    /// A source over raw bytes, which need not be valid UTF-8.
    pub fn from_bytes(text: &'a [u8], name: impl Into<String>) -> Self {
        Self {
            path: name.into(),
            text: Some(text),
        }
    }

    /// Path of the file, or the name given to in-memory text.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Gain access to the text. Never fails for in-memory sources.
    pub fn lock(&self) -> Result<SourceView<'a>, SourceError> {
        let text = match self.text {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(read_capped(&self.path).map_err(|err| SourceError::from_io(&self.path, err))?),
        };
        Ok(SourceView {
            text,
            path: self.path.clone(),
        })
    }
}

/// Read the file at `path`, stopping one byte past [`SOURCE_SIZE_MAX`].
fn read_capped(path: &str) -> io::Result<Vec<u8>> {
    const READ_LIMIT: u64 = SOURCE_SIZE_MAX as u64 + 1;

    let file = File::open(path)?;
    let size_hint = file.metadata().map_or(0, |metadata| metadata.len().min(READ_LIMIT));
    let mut text = Vec::with_capacity(size_hint as usize);
    file.take(READ_LIMIT).read_to_end(&mut text)?;
    Ok(text)
}

/// Locked access to the text of a [`Source`].
#[derive(Debug, Clone)]
pub struct SourceView<'a> {
    text: Cow<'a, [u8]>,
    path: String,
}

impl SourceView<'_> {
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text of `length` bytes at `offset`, with invalid UTF-8 replaced.
    pub fn slice(&self, offset: SourceOffset, length: SourceOffset) -> Cow<'_, str> {
        let start = (offset as usize).min(self.text.len());
        let end = (start + length as usize).min(self.text.len());
        String::from_utf8_lossy(&self.text[start..end])
    }

    /// Line and column of `offset`. Tabs advance the column by `tab_size`, every other byte by one.
    pub fn locate(&self, offset: SourceOffset, tab_size: u8) -> CodeLocation {
        let end = (offset as usize).min(self.text.len());
        let before = &self.text[..end];

        let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |at| at + 1);
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count() as u32;
        let column = 1 + before[line_start..]
            .iter()
            .map(|&b| if b == b'\t' { u32::from(tab_size) } else { 1 })
            .sum::<u32>();

        CodeLocation::new(self.path.clone(), line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_counts_lines_and_tabs() {
        let source = Source::from_string("\nfoo() {\n\tlet x;\n}", "test");
        let view = source.lock().unwrap();
        assert_eq!(view.locate(0, 4), CodeLocation::new("test", 1, 1));
        assert_eq!(view.locate(1, 4), CodeLocation::new("test", 2, 1));
        assert_eq!(view.locate(10, 4), CodeLocation::new("test", 3, 5));
        assert_eq!(view.locate(10, 8), CodeLocation::new("test", 3, 9));
        assert_eq!(view.locate(13, 2), CodeLocation::new("test", 3, 6));
    }

    #[test]
    fn test_locate_past_end_clamps() {
        let source = Source::from_string("ab\ncd", "test");
        let view = source.lock().unwrap();
        assert_eq!(view.locate(100, 4), CodeLocation::new("test", 2, 3));
    }

    #[test]
    fn test_columns_count_bytes() {
        let source = Source::from_string("ÄÖ x", "test");
        let view = source.lock().unwrap();
        assert_eq!(view.locate(5, 4).column, 6);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let source = Source::from_file("definitely/not/here.ce");
        assert_eq!(source.path(), "definitely/not/here.ce");
        assert!(matches!(source.lock(), Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn test_directory_cannot_be_opened() {
        let dir = std::env::temp_dir();
        let source = Source::from_file(dir.to_string_lossy().into_owned());
        assert!(matches!(source.lock(), Err(SourceError::Open { .. })));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("cero_source_test_{}.ce", std::process::id()));
        std::fs::write(&path, "main() {}").unwrap();
        let source = Source::from_file(path.to_string_lossy().into_owned());
        let view = source.lock().unwrap();
        assert_eq!(view.text(), b"main() {}");
        assert_eq!(view.slice(0, 4), "main");
        drop(view);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_oversized_file_is_read_up_to_limit() {
        let path = std::env::temp_dir().join(format!("cero_source_large_{}.ce", std::process::id()));
        std::fs::write(&path, vec![b' '; SOURCE_SIZE_MAX as usize + 4096]).unwrap();
        let source = Source::from_file(path.to_string_lossy().into_owned());
        let view = source.lock().unwrap();
        assert_eq!(view.len(), SOURCE_SIZE_MAX as usize + 1);
        drop(view);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_bytes_source_keeps_invalid_utf8() {
        let source = Source::from_bytes(b"a\xffb", "bytes");
        let view = source.lock().unwrap();
        assert_eq!(view.text(), b"a\xffb");
        assert_eq!(view.len(), 3);
    }
}
