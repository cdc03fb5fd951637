/// One header/sequence/quality triplet.
///
/// Fields hold line content with the terminator stripped. Whether the header
/// still carries its `@` depends on who filled it: [`FastqModule`] writes the
/// line verbatim, [`FastqReader`] strips the sigil.
///
/// [`FastqModule`]: crate::FastqModule
/// [`FastqReader`]: crate::FastqReader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub header: Vec<u8>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.header.clear();
        self.seq.clear();
        self.qual.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.seq.is_empty() && self.qual.is_empty()
    }

    /// Header up to the first space or tab.
    pub fn name(&self) -> &[u8] {
        match memchr::memchr2(b' ', b'\t', &self.header) {
            Some(pos) => &self.header[..pos],
            None => &self.header,
        }
    }

    /// Header text after the name, with leading whitespace removed.
    pub fn comment(&self) -> &[u8] {
        let rest = &self.header[self.name().len()..];
        let start = rest
            .iter()
            .position(|&b| b != b' ' && b != b'\t')
            .unwrap_or(rest.len());
        &rest[start..]
    }

    /// Length check for callers that want it; the parser never enforces it.
    pub fn lengths_match(&self) -> bool {
        self.seq.len() == self.qual.len()
    }
}
