use crate::error::{Result, SolError};
use crate::index::types::{LineNumber, MAX_LINE_BYTES};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Sequential line scanner with a fixed per-line ceiling.
///
/// Lines are returned without their terminator (`\n` or `\r\n`) and are
/// numbered from 1. A line longer than the ceiling is an error; the scanner
/// never buffers more than `max_line_bytes + 2` bytes for a single line.
pub struct LineReader<R> {
    inner: R,
    path: PathBuf,
    buf: Vec<u8>,
    line_number: LineNumber,
    max_line_bytes: usize,
}

impl LineReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SolError::unreadable(path, e))?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            buf: Vec::new(),
            line_number: 0,
            max_line_bytes: MAX_LINE_BYTES,
        }
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Number of the last line returned (0 before the first call)
    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    /// Read the next line. `Ok(None)` at end of file.
    pub fn next_line(&mut self) -> Result<Option<(LineNumber, &[u8])>> {
        self.buf.clear();
        let limit = self.max_line_bytes as u64 + 2;
        let read = (&mut self.inner)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| SolError::unreadable(&self.path, e))?;

        if read == 0 {
            return Ok(None);
        }

        self.line_number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        if self.buf.len() > self.max_line_bytes {
            return Err(SolError::LineTooLong {
                path: self.path.clone(),
                line: self.line_number,
                limit: self.max_line_bytes,
            });
        }

        Ok(Some((self.line_number, &self.buf)))
    }
}
