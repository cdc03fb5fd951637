use std::io::Read;

use log::{debug, warn};

use crate::chunk::Chunk;
use crate::error::ReaderError;
use crate::fastq::FastqModule;
use crate::options::{ReadMode, ReaderOptions};
use crate::record::Record;
use crate::source::Source;
use crate::stage::Stage;
use crate::validate::{chunk_looks_like_fastq, header_valid, SigilPolicy};

/// Streaming FASTQ reader.
///
/// Drives a [`FastqModule`] over a chunk that is refilled from the input.
/// When the chunk runs dry in the middle of a record the unread tail is
/// pushed back into the input and the record is finished with direct line
/// reads, then chunked parsing resumes with the next record.
///
/// Returned records have the `@` stripped from the header.
pub struct FastqReader<R> {
    source: Source<R>,
    chunk: Chunk,
    module: FastqModule,
    options: ReaderOptions,
    records: u64,
    sniffed: bool,
    done: bool,
}

impl<R: Read> FastqReader<R> {
    /// Creates a buffered reader with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        Self {
            source: Source::new(reader),
            chunk: Chunk::with_capacity(options.chunk_size),
            module: FastqModule::new(),
            options,
            records: 0,
            sniffed: false,
            done: false,
        }
    }

    /// Number of complete records returned so far.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    pub fn stage(&self) -> Stage {
        self.module.stage()
    }

    /// Reads the next record into `record`, reusing its allocations.
    ///
    /// Returns `Ok(false)` at the end of input. Input that ends inside a
    /// record is reported as [`ReaderError::TruncatedRecord`]; after that,
    /// and after I/O errors, the reader only returns `Ok(false)`.
    pub fn read_record(&mut self, record: &mut Record) -> Result<bool, ReaderError> {
        if self.done {
            return Ok(false);
        }
        let result = self.read_next(record);
        if !matches!(result, Ok(true) | Err(ReaderError::InvalidFormat { .. })) {
            self.done = true;
        }
        result
    }

    fn read_next(&mut self, record: &mut Record) -> Result<bool, ReaderError> {
        let complete = match self.options.mode {
            ReadMode::Buffered => self.read_buffered(record)?,
            ReadMode::Unbuffered => self.module.read_file(&mut self.source, record)?,
        };
        if !complete {
            if self.module.is_mid_record() {
                return Err(ReaderError::TruncatedRecord {
                    stage: self.module.stage(),
                    record: self.records + 1,
                });
            }
            return Ok(false);
        }
        self.finish_record(record)?;
        Ok(true)
    }

    fn read_buffered(&mut self, record: &mut Record) -> Result<bool, ReaderError> {
        loop {
            if self.chunk.is_empty() {
                if self.chunk.refill(&mut self.source)? == 0 {
                    return Ok(false);
                }
                self.sniff()?;
            }
            if self.module.read_buffer(&mut self.chunk, record) {
                return Ok(true);
            }
            if !self.module.is_mid_record() {
                // at most a partial header is buffered, so the chunk can
                // simply be topped up and parsed again
                if self.chunk.refill(&mut self.source)? > 0 {
                    continue;
                }
            }

            debug!(
                "chunk ended inside record {} at the {} line, reading the rest from the input",
                self.records + 1,
                self.module.stage()
            );
            self.source.unread(self.chunk.take_remaining());
            return self.module.read_transition(&mut self.source, record);
        }
    }

    fn sniff(&mut self) -> Result<(), ReaderError> {
        if self.sniffed {
            return Ok(());
        }
        self.sniffed = true;
        if chunk_looks_like_fastq(self.chunk.as_slice()) {
            return Ok(());
        }
        self.on_violation("input does not look like FASTQ".to_string())
    }

    fn finish_record(&mut self, record: &mut Record) -> Result<(), ReaderError> {
        self.records += 1;
        let header_ok = header_valid(&record.header);
        if !header_ok {
            self.on_violation(format!(
                "record {} header does not start with '@'",
                self.records
            ))?;
        }
        if !self.module.last_separator_valid() {
            self.on_violation(format!(
                "record {} separator does not start with '+'",
                self.records
            ))?;
        }
        if header_ok {
            record.header.remove(0);
        }
        Ok(())
    }

    fn on_violation(&self, message: String) -> Result<(), ReaderError> {
        match self.options.sigil_policy {
            SigilPolicy::Ignore => Ok(()),
            SigilPolicy::Warn => {
                warn!("{message}");
                Ok(())
            }
            SigilPolicy::Strict => Err(ReaderError::InvalidFormat { message }),
        }
    }
}

impl<R: Read> Iterator for FastqReader<R> {
    type Item = Result<Record, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = Record::new();
        match self.read_record(&mut record) {
            Ok(true) => Some(Ok(record)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
