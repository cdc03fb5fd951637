use std::io::Read;

use log::{debug, error};

use crate::chunk::Chunk;
use crate::error::ReaderError;
use crate::record::Record;
use crate::source::Source;
use crate::stage::Stage;
use crate::validate::separator_valid;

/// Resumable FASTQ record parser.
///
/// Holds the position within the current record and a scratch line for the
/// separator. One module is bound to one input for its whole life; records
/// are read with one of three strategies:
///
/// - [`read_buffer`](Self::read_buffer) parses from an in-memory [`Chunk`]
///   and never blocks,
/// - [`read_transition`](Self::read_transition) finishes a record the chunk
///   could not hold by reading lines straight from the [`Source`],
/// - [`read_file`](Self::read_file) reads a whole record from the source.
///
/// Header lines are stored verbatim, sigil included.
#[derive(Debug, Clone)]
pub struct FastqModule {
    stage: Stage,
    tmp: Vec<u8>,
    separator_ok: bool,
}

impl Default for FastqModule {
    fn default() -> Self {
        Self::new()
    }
}

impl FastqModule {
    pub fn new() -> Self {
        Self {
            stage: Stage::Header,
            tmp: Vec::new(),
            separator_ok: true,
        }
    }

    /// Rebuilds a module from a value produced by [`checkpoint`](Self::checkpoint).
    ///
    /// # Panics
    ///
    /// Panics if `raw` does not encode a stage. The parser cannot continue
    /// from an unknown position without corrupting output.
    pub fn resume(raw: u8) -> Self {
        let stage = Stage::try_from(raw).unwrap_or_else(|raw| invalid_state(raw));
        Self {
            stage,
            ..Self::new()
        }
    }

    pub fn checkpoint(&self) -> u8 {
        self.stage.as_raw()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// True when some but not all lines of a record have been consumed.
    pub fn is_mid_record(&self) -> bool {
        self.stage != Stage::Header
    }

    /// Whether the most recently consumed separator line started with `+`.
    pub fn last_separator_valid(&self) -> bool {
        self.separator_ok
    }

    /// Parses lines out of `chunk` until the record is complete or the chunk
    /// runs out of whole lines.
    ///
    /// All record fields are cleared on entry. Returns `true` when all four
    /// lines were taken in this call. On `false` the stage records how far
    /// the record got; the rest of it must come from
    /// [`read_transition`](Self::read_transition), not from another call
    /// here, since that would clear the lines already taken.
    pub fn read_buffer(&mut self, chunk: &mut Chunk, record: &mut Record) -> bool {
        record.clear();
        if chunk.is_empty() {
            return false;
        }
        if self.stage == Stage::Header {
            chunk.skip_blank_lines();
        }

        loop {
            let dst = Self::destination(self.stage, &mut self.tmp, record);
            if !chunk.read_line_append(dst) {
                return false;
            }
            if self.advance() {
                return true;
            }
        }
    }

    /// Reads the remaining lines of the current record directly from
    /// `source`, appending to what earlier calls left in `record`.
    ///
    /// Returns `Ok(false)` without reading when the source has failed before
    /// or has nothing left. If the source runs dry partway, the stage is left
    /// at the missing line and a later call continues from there.
    pub fn read_transition<R: Read>(
        &mut self,
        source: &mut Source<R>,
        record: &mut Record,
    ) -> Result<bool, ReaderError> {
        if source.has_error() {
            return Ok(false);
        }
        if self.stage == Stage::Header {
            source.skip_blank_lines()?;
        }
        if source.peek_byte()?.is_none() {
            return Ok(false);
        }
        if self.stage == Stage::Header {
            // nothing of this record has been read yet
            record.clear();
        }

        loop {
            let dst = Self::destination(self.stage, &mut self.tmp, record);
            if !source.read_line_append(dst)? {
                debug!("source ended before the {} line", self.stage);
                return Ok(false);
            }
            if self.advance() {
                return Ok(true);
            }
        }
    }

    /// Reads a complete record from `source`, overwriting each field as its
    /// line is read.
    ///
    /// Returns `Ok(false)` when the source is already at end of input, or
    /// when it ends before the quality line; in the latter case
    /// [`is_mid_record`](Self::is_mid_record) reports the truncation.
    pub fn read_file<R: Read>(
        &mut self,
        source: &mut Source<R>,
        record: &mut Record,
    ) -> Result<bool, ReaderError> {
        source.skip_blank_lines()?;
        if source.at_end()? {
            return Ok(false);
        }

        self.stage = Stage::Header;
        loop {
            let dst = Self::destination(self.stage, &mut self.tmp, record);
            dst.clear();
            if !source.read_line_append(dst)? {
                return Ok(false);
            }
            if self.advance() {
                return Ok(true);
            }
        }
    }

    fn destination<'a>(
        stage: Stage,
        tmp: &'a mut Vec<u8>,
        record: &'a mut Record,
    ) -> &'a mut Vec<u8> {
        match stage {
            Stage::Header => &mut record.header,
            Stage::Sequence => &mut record.seq,
            Stage::Separator => tmp,
            Stage::Quality => &mut record.qual,
        }
    }

    /// Moves past the line just read. Returns `true` once the record is complete.
    fn advance(&mut self) -> bool {
        if self.stage == Stage::Separator {
            self.separator_ok = separator_valid(&self.tmp);
            self.tmp.clear();
        }
        self.stage = self.stage.next();
        self.stage == Stage::Header
    }
}

#[cold]
fn invalid_state(raw: u8) -> ! {
    error!("FASTQ reader has entered an invalid state: {raw}");
    panic!("FASTQ reader has entered an invalid state: {raw}");
}
