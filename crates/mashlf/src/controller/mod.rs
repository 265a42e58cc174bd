//! Line length control: decides where terminators go.

#[cfg(test)]
mod tests;

use std::io::Write;

use bstr::BStr;

use crate::{
    error::MashError,
    options::CutRange,
    rng::UniformSource,
    sequencer::Flush,
};

/// Writes flushed units through to a sink and inserts a line feed every
/// `cut_length` code points, redrawing `cut_length` from `range` after each
/// one.
#[derive(Debug)]
pub struct LineController<W, R> {
    range: CutRange,
    cut_length: usize,
    code_count: usize,
    lines: u64,
    rng: R,
    sink: W,
}

impl<W: Write, R: UniformSource> LineController<W, R> {
    /// Takes ownership of `rng` and `sink` and draws the first cut length.
    pub fn new(range: CutRange, mut rng: R, sink: W) -> Self {
        let cut_length = range.pick(rng.uniform_f64());
        tracing::trace!(cut_length, "first cut length");
        Self {
            range,
            cut_length,
            code_count: 0,
            lines: 0,
            rng,
            sink,
        }
    }

    /// Target length of the line in progress.
    #[must_use]
    pub fn cut_length(&self) -> usize {
        self.cut_length
    }

    /// Code points written since the last terminator.
    #[must_use]
    pub fn code_count(&self) -> usize {
        self.code_count
    }

    /// Terminators written so far, the final one included.
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Writes `flush` verbatim, then a terminator if the line is long
    /// enough.
    ///
    /// # Errors
    ///
    /// [`MashError::Write`] if the sink fails. The controller should not be
    /// used afterwards.
    pub fn consume(&mut self, flush: Flush<'_>) -> Result<(), MashError> {
        if !flush.bytes().is_empty() {
            tracing::trace!(bytes = ?BStr::new(flush.bytes()), code_points = flush.code_points(), "pass through");
            self.sink.write_all(flush.bytes()).map_err(MashError::Write)?;
        }
        self.code_count += flush.code_points();
        if self.code_count >= self.cut_length {
            self.terminate()?;
            self.cut_length = self.range.pick(self.rng.uniform_f64());
            tracing::trace!(cut_length = self.cut_length, "next cut length");
        }
        Ok(())
    }

    /// Terminates a trailing partial line, flushes the sink and returns it.
    ///
    /// # Errors
    ///
    /// [`MashError::Write`] if the final terminator or the flush fails.
    pub fn finalize(mut self) -> Result<W, MashError> {
        if self.code_count > 0 {
            self.terminate()?;
        }
        self.sink.flush().map_err(MashError::Write)?;
        tracing::debug!(lines = self.lines, "output finished");
        Ok(self.sink)
    }

    fn terminate(&mut self) -> Result<(), MashError> {
        self.sink.write_all(b"\n").map_err(MashError::Write)?;
        self.code_count = 0;
        self.lines += 1;
        Ok(())
    }
}
