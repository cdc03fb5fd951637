use std::io::{self, BufRead, BufReader, Read};

use memchr::memchr;

use crate::error::ReaderError;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Forward-only byte source with one-byte lookahead and push-back.
///
/// Bytes handed to [`Source::unread`] are replayed before anything else is
/// pulled from the wrapped reader. Once a read fails the source remembers it,
/// see [`Source::has_error`].
pub struct Source<R> {
    reader: BufReader<R>,
    pushback: Vec<u8>,
    pushback_pos: usize,
    failed: bool,
}

impl<R: Read> Source<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            pushback: Vec::new(),
            pushback_pos: 0,
            failed: false,
        }
    }

    /// True once any read from the wrapped reader has failed.
    pub fn has_error(&self) -> bool {
        self.failed
    }

    /// Returns the next byte without consuming it, `None` at end of input.
    pub fn peek_byte(&mut self) -> Result<Option<u8>, ReaderError> {
        if let Some(&b) = self.pending().first() {
            return Ok(Some(b));
        }
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Err(e.into());
                }
            }
        }
    }

    pub fn at_end(&mut self) -> Result<bool, ReaderError> {
        Ok(self.peek_byte()?.is_none())
    }

    /// Puts `bytes` back in front of everything not yet read.
    pub fn unread(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let mut front = Vec::with_capacity(bytes.len() + self.pending().len());
        front.extend_from_slice(bytes);
        front.extend_from_slice(self.pending());
        self.pushback = front;
        self.pushback_pos = 0;
    }

    /// Consumes empty lines (`\n` or `\r\n`) at the front.
    pub fn skip_blank_lines(&mut self) -> Result<(), ReaderError> {
        loop {
            match self.peek_byte()? {
                Some(b'\n') => self.consume_byte(),
                Some(b'\r') => {
                    self.consume_byte();
                    if self.peek_byte()? == Some(b'\n') {
                        self.consume_byte();
                    } else {
                        self.unread(b"\r");
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Reads one line and appends it to `dst` without the `\n` terminator or
    /// a `\r` directly before it.
    ///
    /// A final line without a terminator counts as a line. Returns `false`
    /// only when no bytes were left.
    pub fn read_line_append(&mut self, dst: &mut Vec<u8>) -> Result<bool, ReaderError> {
        let line_start = dst.len();
        let mut terminated = false;
        let mut any = false;

        let pending = &self.pushback[self.pushback_pos..];
        if !pending.is_empty() {
            any = true;
            match memchr(b'\n', pending) {
                Some(pos) => {
                    dst.extend_from_slice(&pending[..pos]);
                    self.advance_pushback(pos + 1);
                    terminated = true;
                }
                None => {
                    let len = pending.len();
                    dst.extend_from_slice(pending);
                    self.advance_pushback(len);
                }
            }
        }

        if !terminated {
            let n = match self.reader.read_until(b'\n', dst) {
                Ok(n) => n,
                Err(e) => {
                    self.failed = true;
                    return Err(e.into());
                }
            };
            if n > 0 {
                any = true;
                if dst.last() == Some(&b'\n') {
                    dst.pop();
                }
            }
        }

        if !any {
            return Ok(false);
        }
        if dst.len() > line_start && dst.last() == Some(&b'\r') {
            dst.pop();
        }
        Ok(true)
    }

    fn pending(&self) -> &[u8] {
        &self.pushback[self.pushback_pos..]
    }

    fn advance_pushback(&mut self, amt: usize) {
        self.pushback_pos += amt;
        if self.pushback_pos >= self.pushback.len() {
            self.pushback.clear();
            self.pushback_pos = 0;
        }
    }

    fn consume_byte(&mut self) {
        if self.pending().is_empty() {
            self.reader.consume(1);
        } else {
            self.advance_pushback(1);
        }
    }
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pending = self.pending();
        if !pending.is_empty() {
            let n = pending.len().min(buf.len());
            buf[..n].copy_from_slice(&pending[..n]);
            self.advance_pushback(n);
            return Ok(n);
        }
        match self.reader.read(buf) {
            Err(e) if e.kind() != io::ErrorKind::Interrupted => {
                self.failed = true;
                Err(e)
            }
            other => other,
        }
    }
}
