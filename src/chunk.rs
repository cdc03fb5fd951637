use std::io::{self, Read};

use memchr::memchr;

use crate::validate::trim_cr;

pub const DEFAULT_CHUNK_SIZE: usize = 128 * 1024;

/// A bounded in-memory window of not-yet-parsed bytes.
///
/// Unread data lives in `data[start..end]`. Lines are consumed from the
/// front, and [`Chunk::refill`] moves the unread residual to the front before
/// reading more, growing the buffer when a single line does not fit.
#[derive(Debug, Clone)]
pub struct Chunk {
    data: Vec<u8>,
    start: usize,
    end: usize,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CHUNK_SIZE)
    }
}

impl Chunk {
    /// Creates an empty chunk; a zero capacity is bumped to one byte.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity.max(1)],
            start: 0,
            end: 0,
        }
    }

    /// Creates a chunk pre-loaded with `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut data = bytes.to_vec();
        let end = data.len();
        if data.is_empty() {
            data.push(0);
        }
        Self { data, start: 0, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The unread region.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    /// Consumes one `\n`-terminated line and appends it, minus the terminator
    /// and an optional `\r`, to `dst`.
    ///
    /// Transactional: when no full line is available neither the chunk nor
    /// `dst` is touched and `false` is returned.
    pub fn read_line_append(&mut self, dst: &mut Vec<u8>) -> bool {
        let unread = &self.data[self.start..self.end];
        match memchr(b'\n', unread) {
            Some(pos) => {
                dst.extend_from_slice(trim_cr(&unread[..pos]));
                self.start += pos + 1;
                true
            }
            None => false,
        }
    }

    /// Consumes complete empty lines (`\n` or `\r\n`) at the front.
    pub fn skip_blank_lines(&mut self) {
        loop {
            let skip = match self.as_slice() {
                [b'\n', ..] => 1,
                [b'\r', b'\n', ..] => 2,
                _ => break,
            };
            self.start += skip;
        }
    }

    /// Marks the whole unread region as consumed and returns it.
    pub fn take_remaining(&mut self) -> &[u8] {
        let start = self.start;
        self.start = self.end;
        &self.data[start..self.end]
    }

    /// Moves the residual to the front and performs one read from `reader`
    /// into the free space. If the residual fills the whole buffer the
    /// buffer is doubled first. Returns the number of bytes read; zero means
    /// `reader` is at end of input.
    pub fn refill<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        if self.start > 0 {
            self.data.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        if self.end == self.data.len() {
            let grown = self.data.len() * 2;
            self.data.resize(grown, 0);
        }

        loop {
            match reader.read(&mut self.data[self.end..]) {
                Ok(n) => {
                    self.end += n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines() {
        let mut chunk = Chunk::from_bytes(b"1\n22\r\n3");
        let mut line = Vec::new();

        assert!(chunk.read_line_append(&mut line));
        assert_eq!(line, b"1");
        line.clear();
        assert!(chunk.read_line_append(&mut line));
        assert_eq!(line, b"22");
        assert_eq!(chunk.as_slice(), b"3");
    }

    #[test]
    fn test_incomplete_line_is_untouched() {
        let mut chunk = Chunk::from_bytes(b"ACGT");
        let mut line = b"keep".to_vec();

        assert!(!chunk.read_line_append(&mut line));
        assert_eq!(line, b"keep");
        assert_eq!((chunk.start(), chunk.end()), (0, 4));
    }

    #[test]
    fn test_skip_blank_lines() {
        let mut chunk = Chunk::from_bytes(b"\n\r\n\n@r\n");
        chunk.skip_blank_lines();
        assert_eq!(chunk.as_slice(), b"@r\n");

        let mut chunk = Chunk::from_bytes(b"\r");
        chunk.skip_blank_lines();
        assert_eq!(chunk.as_slice(), b"\r");
    }

    #[test]
    fn test_refill_keeps_residual() {
        let mut reader = Cursor::new(b"23\n456\n".to_vec());
        let mut chunk = Chunk::with_capacity(4);

        assert_eq!(chunk.refill(&mut reader).unwrap(), 4);
        assert_eq!(chunk.as_slice(), b"23\n4");

        let mut line = Vec::new();
        assert!(chunk.read_line_append(&mut line));
        assert_eq!(line, b"23");

        chunk.refill(&mut reader).unwrap();
        assert_eq!(chunk.as_slice(), b"456\n");
        assert_eq!(chunk.refill(&mut reader).unwrap(), 0);
    }

    #[test]
    fn test_refill_grows_when_full() {
        let mut reader = Cursor::new(b"abcdefgh\n".to_vec());
        let mut chunk = Chunk::with_capacity(2);

        chunk.refill(&mut reader).unwrap();
        assert_eq!(chunk.as_slice(), b"ab");
        chunk.refill(&mut reader).unwrap();
        assert_eq!(chunk.capacity(), 4);
        assert_eq!(chunk.as_slice(), b"abcd");
    }

    #[test]
    fn test_take_remaining() {
        let mut chunk = Chunk::from_bytes(b"@r\nAC");
        let mut line = Vec::new();
        assert!(chunk.read_line_append(&mut line));
        assert_eq!(chunk.take_remaining(), b"AC");
        assert!(chunk.is_empty());
    }
}
