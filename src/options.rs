use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::validate::SigilPolicy;

/// How [`FastqReader`](crate::FastqReader) pulls data from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Parse from an in-memory chunk and fall back to line reads from the
    /// input when a record straddles the end of the chunk.
    #[default]
    Buffered,
    /// Read every record line by line from the input.
    Unbuffered,
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub mode: ReadMode,
    /// Initial chunk capacity in bytes. The chunk grows when a single line
    /// does not fit.
    pub chunk_size: usize,
    pub sigil_policy: SigilPolicy,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            mode: ReadMode::Buffered,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sigil_policy: SigilPolicy::Warn,
        }
    }
}

impl ReaderOptions {
    pub fn with_mode(mut self, mode: ReadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_sigil_policy(mut self, sigil_policy: SigilPolicy) -> Self {
        self.sigil_policy = sigil_policy;
        self
    }
}
