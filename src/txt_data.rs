use crate::error::{Error, Result};
use std::ops::Index;
use std::path::Path;
use std::str::Lines;

/// A whole line-oriented text file held in memory.
#[derive(Debug)]
pub struct DataFile {
    buf: String,
}

impl DataFile {
    /// Reads a file that must be valid UTF-8 throughout, since it is written back verbatim.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DataFile> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Open {
            path: path.display().to_string(),
            source,
        })?;
        String::from_utf8(bytes)
            .map(DataFile::from)
            .map_err(|source| Error::NotText {
                path: path.display().to_string(),
                line: line_number(&source.as_bytes()[..source.utf8_error().valid_up_to()]),
                source,
            })
    }

    /// Reads decoded export bytes; anything undecodable is replaced.
    pub fn from_bytes(bytes: &[u8]) -> DataFile {
        DataFile {
            buf: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn lines(&self) -> Lines<'_> {
        self.buf.lines()
    }
}

impl From<String> for DataFile {
    fn from(buf: String) -> Self {
        DataFile { buf }
    }
}

/// 1-based number of the line that follows `prefix`.
fn line_number(prefix: &[u8]) -> usize {
    prefix.iter().filter(|&&b| b == b'\n').count() + 1
}

/// Byte offset of the `n`th character, or the end of the line when it is shorter.
fn char_offset(line: &str, n: usize) -> usize {
    line.char_indices().nth(n).map_or(line.len(), |(i, _)| i)
}

/// Characters `start..end` of `line`, clipped to the line like a Python slice.
pub fn slice(line: &str, start: usize, end: usize) -> &str {
    let l = char_offset(line, start);
    let r = char_offset(line, end).max(l);
    &line[l..r]
}

/// Characters from `start` to the end of `line`.
pub fn slice_from(line: &str, start: usize) -> &str {
    &line[char_offset(line, start)..]
}

#[derive(Clone, Copy)]
struct Span(usize, usize);

impl DataFile {
    /// Iterates the records tagged `ty`, splitting each into raw (untrimmed) columns.
    ///
    /// Lines are stripped of surrounding whitespace before the columns are cut, blank lines are
    /// skipped, and `delimiters[0]` must locate the record tag.
    pub fn records<'a, 'b>(
        &'a self,
        ty: &'b str,
        delimiters: &'b [(usize, usize)],
    ) -> RecordIter<'a, 'b> {
        let delimiters = delimiters
            .iter()
            .map(|&(p, l)| Span(p, p + l))
            .collect::<Vec<_>>();
        RecordIter {
            lines: self.buf.lines(),
            ty,
            delimiters,
        }
    }
}

pub struct RecordIter<'a, 'b> {
    lines: Lines<'a>,
    ty: &'b str,
    delimiters: Vec<Span>,
}

impl<'a, 'b> Iterator for RecordIter<'a, 'b> {
    type Item = Record<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?.trim();
            if line.is_empty() {
                continue;
            }
            let Span(l, r) = self.delimiters[0];
            if slice(line, l, r) == self.ty {
                break Some(Record {
                    line,
                    fields: self
                        .delimiters
                        .iter()
                        .map(|&Span(l, r)| slice(line, l, r))
                        .collect::<Vec<_>>(),
                });
            }
        }
    }
}

#[derive(Debug)]
pub struct Record<'a> {
    line: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn line(&self) -> &'a str {
        self.line
    }
}

impl<'a> Index<usize> for Record<'a> {
    type Output = &'a str;

    fn index(&self, i: usize) -> &Self::Output {
        &self.fields[i]
    }
}
