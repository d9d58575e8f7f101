//! Line source over any `std::io::Read`
//!
//! Both the serial port and replay files are read through [`ReaderSource`].
//! It splits the byte stream on `\n` and keeps partial lines across read
//! timeouts, so a line that straddles a timeout is delivered intact.

use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::error::Result;

use super::source_trait::{LineRead, LineSource, SourceStats};

/// Line splitter over a byte stream
pub struct ReaderSource<R: Read> {
    name: String,
    reader: BufReader<R>,
    /// Bytes of a line not yet terminated
    pending: Vec<u8>,
    stats: SourceStats,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader; `name` is used in console and log output
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader: BufReader::new(reader),
            pending: Vec::new(),
            stats: SourceStats::default(),
        }
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    fn take_line(&mut self) -> LineRead {
        let line = std::mem::take(&mut self.pending);
        self.stats.record_line(line.len());
        LineRead::Line(line)
    }
}

impl<R: Read + Send> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> Result<LineRead> {
        loop {
            match self.reader.read_until(b'\n', &mut self.pending) {
                // Nothing more will come; flush an unterminated tail first
                Ok(0) => {
                    if self.pending.is_empty() {
                        return Ok(LineRead::EndOfStream);
                    }
                    return Ok(self.take_line());
                }
                Ok(_) => {
                    if self.pending.last() == Some(&b'\n') {
                        return Ok(self.take_line());
                    }
                    // EOF hit mid-line; the next call returns Ok(0) and flushes
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    self.stats.record_timeout();
                    return Ok(LineRead::TimedOut);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn stats(&self) -> SourceStats {
        self.stats.clone()
    }
}
