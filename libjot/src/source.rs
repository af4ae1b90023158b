//! Source text management.
//!
//! A [`Source`] owns one immutable input buffer together with a line-start
//! index computed once at construction. Offsets into the buffer resolve to
//! line/column pairs in O(log lines) plus a scan bounded by the length of
//! one line, so error reporting stays cheap even for very large inputs.
//!
//! The buffer is reference counted: an owned byte buffer or a shared memory
//! map, aliased freely by whoever else holds the allocation. It is never
//! mutated after the `Source` is built.

use std::fmt;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;

use crate::error::LoadError;

/// Tab width used for column reporting when the caller does not pick one.
pub const DEFAULT_TAB_SIZE: usize = 8;

/// Backing storage for a source buffer.
#[derive(Clone)]
enum Contents {
    /// No buffer at all: a name-only source.
    Empty,
    /// Reference-counted owned bytes.
    Owned(Arc<[u8]>),
    /// Shared read-only memory map.
    Mapped(Arc<Mmap>),
}

impl Contents {
    fn bytes(&self) -> &[u8] {
        match self {
            Contents::Empty => &[],
            Contents::Owned(bytes) => bytes,
            Contents::Mapped(map) => &map[..],
        }
    }
}

/// One immutable input text plus its precomputed line-start index.
#[derive(Clone)]
pub struct Source {
    file_name: String,
    contents: Contents,
    line_start_indexes: Vec<usize>,
}

/// The line containing an offset and the offset of that line's first byte.
/// Lines are 0-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineAndIndex {
    pub line: usize,
    pub index: usize,
}

/// A 0-based line paired with a 0-based visual column after tab expansion.
///
/// Rendering is 1-based for both, matching what editors display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineAndColumn {
    pub line: usize,
    pub column: usize,
}

impl LineAndColumn {
    /// Append the 1-based `line:column` rendering to `buffer`.
    pub fn append_to_string(&self, buffer: &mut String) {
        let _ = write!(buffer, "{}:{}", self.line + 1, self.column + 1);
    }
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Offsets immediately following every newline byte, strictly increasing.
///
/// The implicit start of line 0 is not recorded, and neither is an offset
/// that would equal the buffer size, so every entry is a real line start
/// inside the buffer.
fn find_line_start_indexes(contents: &[u8]) -> Vec<usize> {
    let mut indexes = Vec::new();
    for (i, &b) in contents.iter().enumerate() {
        if b == b'\n' && i + 1 < contents.len() {
            indexes.push(i + 1);
        }
    }
    indexes
}

impl Source {
    /// A source with a name but no contents. Behaves as absent:
    /// [`Source::has_contents`] is false.
    pub fn empty(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: Contents::Empty,
            line_start_indexes: Vec::new(),
        }
    }

    /// Build a source from an owned text buffer.
    pub fn from_string(file_name: impl Into<String>, text: String) -> Self {
        Self::from_bytes(file_name, text.into_bytes())
    }

    /// Build a source from an owned byte buffer.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::from_shared(file_name, Arc::from(bytes))
    }

    /// Build a source from an already-shared buffer. The allocation is
    /// aliased, not copied; the last holder releases it.
    pub fn from_shared(file_name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let line_start_indexes = find_line_start_indexes(&bytes);
        Self {
            file_name: file_name.into(),
            contents: Contents::Owned(bytes),
            line_start_indexes,
        }
    }

    /// Build a source from a shared memory map.
    pub fn from_mapped(file_name: impl Into<String>, map: Arc<Mmap>) -> Self {
        let line_start_indexes = find_line_start_indexes(&map);
        Self {
            file_name: file_name.into(),
            contents: Contents::Mapped(map),
            line_start_indexes,
        }
    }

    /// Memory-map a file read-only and wrap it as a source.
    ///
    /// The file must stay unmodified for the lifetime of the returned
    /// `Source`; truncating or rewriting it while the map is live is
    /// undefined behavior on most platforms.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Source, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| LoadError::new(path, err))?;
        let size = file
            .metadata()
            .map_err(|err| LoadError::new(path, err))?
            .len();
        // Mapping a zero-length file fails on Linux.
        if size == 0 {
            return Ok(Source::from_bytes(path.display().to_string(), Vec::new()));
        }
        // SAFETY: the map is read-only and the contract above requires the
        // file to stay unmodified while the Source lives.
        let map = unsafe { Mmap::map(&file) }.map_err(|err| LoadError::new(path, err))?;
        Ok(Source::from_mapped(path.display().to_string(), Arc::new(map)))
    }

    /// Read all of standard input into an owned source named `<stdin>`.
    pub fn load_stdin() -> Result<Source, LoadError> {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|err| LoadError::new("<stdin>", err))?;
        Ok(Source::from_bytes("<stdin>", bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &[u8] {
        self.contents.bytes()
    }

    pub fn size(&self) -> usize {
        self.contents.bytes().len()
    }

    /// Whether this source was ever given a buffer. An empty loaded file has
    /// contents; a name-only source does not.
    pub fn has_contents(&self) -> bool {
        !matches!(self.contents, Contents::Empty)
    }

    /// The line containing `char_index` and that line's first byte offset.
    ///
    /// Binary search over the recorded line starts; offsets before the first
    /// recorded start are on line 0.
    pub fn get_line_and_start_index(&self, char_index: usize) -> LineAndIndex {
        let starts = &self.line_start_indexes;
        let line = starts.partition_point(|&start| start <= char_index);
        let index = if line == 0 { 0 } else { starts[line - 1] };
        LineAndIndex { line, index }
    }

    /// The line and tab-expanded visual column of `char_index`.
    ///
    /// Scans forward from the line start, one column per byte, with a tab at
    /// column `c` advancing to the next multiple of `tab_size`. The scan is
    /// bounded by the line length, never the buffer length.
    pub fn get_line_and_column(&self, char_index: usize, tab_size: usize) -> LineAndColumn {
        let tab_size = tab_size.max(1);
        let LineAndIndex { line, index } = self.get_line_and_start_index(char_index);
        let bytes = self.contents.bytes();
        let end = char_index.min(bytes.len());
        let mut column = 0;
        for &b in &bytes[index..end] {
            if b == b'\t' {
                column = (column / tab_size + 1) * tab_size;
            } else {
                column += 1;
            }
        }
        LineAndColumn { line, column }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("file_name", &self.file_name)
            .field("size", &self.size())
            .field("lines", &(self.line_start_indexes.len() + 1))
            .finish()
    }
}

/// A cheap reference to a position inside a [`Source`].
///
/// The source reference is optional; a location without one is valid and
/// renders with the `<unknown>` placeholder name.
#[derive(Clone, Copy, Debug, Default)]
pub struct Location<'s> {
    pub source: Option<&'s Source>,
    pub char_index: usize,
}

impl<'s> Location<'s> {
    pub fn new(source: &'s Source, char_index: usize) -> Self {
        Self {
            source: Some(source),
            char_index,
        }
    }

    /// Delegates to the source when present; the zero value otherwise.
    pub fn get_line_and_start_index(&self) -> LineAndIndex {
        match self.source {
            Some(source) => source.get_line_and_start_index(self.char_index),
            None => LineAndIndex::default(),
        }
    }

    /// Delegates to the source when present; the zero value otherwise.
    pub fn get_line_and_column(&self, tab_size: usize) -> LineAndColumn {
        match self.source {
            Some(source) => source.get_line_and_column(self.char_index, tab_size),
            None => LineAndColumn::default(),
        }
    }

    /// Append `file:line:column` to `buffer`, using `<unknown>` when there
    /// is no source or the source has an empty file name.
    pub fn append_to_string(&self, buffer: &mut String, tab_size: usize) {
        match self.source {
            Some(source) if !source.file_name().is_empty() => {
                buffer.push_str(source.file_name());
            }
            _ => buffer.push_str("<unknown>"),
        }
        buffer.push(':');
        self.get_line_and_column(tab_size).append_to_string(buffer);
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = String::new();
        self.append_to_string(&mut buffer, DEFAULT_TAB_SIZE);
        f.write_str(&buffer)
    }
}
