//! Resumable FASTQ record parsing across chunked and streamed input.
//!
//! [`FastqModule`] is the state machine: it remembers which of a record's
//! four lines comes next, so a record may start in one in-memory [`Chunk`]
//! and be finished from the underlying [`Source`]. [`FastqReader`] is the
//! refill loop that drives it.

mod chunk;
mod error;
mod fastq;
mod options;
mod reader;
mod record;
mod source;
mod stage;
pub mod validate;

pub use chunk::{Chunk, DEFAULT_CHUNK_SIZE};
pub use error::ReaderError;
pub use fastq::FastqModule;
pub use options::{ReadMode, ReaderOptions};
pub use reader::FastqReader;
pub use record::Record;
pub use source::Source;
pub use stage::Stage;
pub use validate::SigilPolicy;
