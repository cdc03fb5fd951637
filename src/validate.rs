use memchr::memchr;

pub const HEADER_SIGIL: u8 = b'@';
pub const SEPARATOR_SIGIL: u8 = b'+';

/// What to do when a header or separator line lacks its sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigilPolicy {
    /// Accept the record silently.
    Ignore,
    /// Accept the record and log a warning.
    #[default]
    Warn,
    /// Reject the record with [`ReaderError::InvalidFormat`](crate::ReaderError::InvalidFormat).
    Strict,
}

pub fn header_valid(line: &[u8]) -> bool {
    line.first() == Some(&HEADER_SIGIL)
}

pub fn separator_valid(line: &[u8]) -> bool {
    line.first() == Some(&SEPARATOR_SIGIL)
}

/// Sniffs whether `buf` plausibly starts with FASTQ records.
///
/// Leading blank lines are skipped, then the complete lines of the first
/// record are checked for the header and separator sigils. A buffer too short
/// to hold a whole record passes as long as what it does hold is consistent.
pub fn chunk_looks_like_fastq(buf: &[u8]) -> bool {
    let mut rest = buf;
    let mut line_no = 0;
    while line_no < 4 {
        let Some(pos) = memchr(b'\n', rest) else {
            break;
        };
        let line = trim_cr(&rest[..pos]);
        rest = &rest[pos + 1..];
        if line_no == 0 && line.is_empty() {
            continue;
        }
        let ok = match line_no {
            0 => header_valid(line),
            2 => separator_valid(line),
            _ => true,
        };
        if !ok {
            return false;
        }
        line_no += 1;
    }
    true
}

#[inline]
pub(crate) fn trim_cr(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((&b'\r', head)) => head,
        _ => line,
    }
}
