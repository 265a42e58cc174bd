use std::io::{BufReader, Read, Write};

use crate::{
    controller::LineController,
    error::{ConfigError, MashError},
    options::{CutRange, MashOptions},
    rng::{SeededRng, UniformSource},
    sequencer::{SeqInput, Utf8Sequencer},
};

/// One run of the filter: a sequencer feeding a line controller.
///
/// Input may be fed in chunks of any size; the output does not depend on how
/// the stream is split.
///
/// ```rust
/// use mashlf::{LineMasher, MashOptions};
///
/// let options = MashOptions { min_length: 5, max_length: 5, ..Default::default() };
/// let mut masher = LineMasher::new(options, Vec::new()).unwrap();
/// masher.feed(b"ab\nc").unwrap();
/// masher.feed(b"d\n").unwrap();
/// assert_eq!(masher.finish().unwrap(), b"abcd\n");
/// ```
#[derive(Debug)]
pub struct LineMasher<W, R = SeededRng> {
    sequencer: Utf8Sequencer,
    controller: LineController<W, R>,
}

impl<W: Write> LineMasher<W, SeededRng> {
    /// Validates `options` and seeds the line length generator.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the length bounds are not positive.
    pub fn new(options: MashOptions, sink: W) -> Result<Self, ConfigError> {
        let range = options.cut_range()?;
        tracing::debug!(
            min = range.min(),
            max = range.max(),
            seed = options.seed,
            distribution = ?options.distribution,
            "line range"
        );
        Ok(Self::with_rng(range, SeededRng::new(options.seed), sink))
    }
}

impl<W: Write, R: UniformSource> LineMasher<W, R> {
    /// Builds a masher around an explicit generator.
    pub fn with_rng(range: CutRange, rng: R, sink: W) -> Self {
        Self {
            sequencer: Utf8Sequencer::new(),
            controller: LineController::new(range, rng, sink),
        }
    }

    /// Processes one input byte.
    ///
    /// # Errors
    ///
    /// [`MashError::Write`] if the sink fails.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), MashError> {
        self.step(SeqInput::Byte(byte))
    }

    /// Processes a chunk of input.
    ///
    /// # Errors
    ///
    /// [`MashError::Write`] if the sink fails; the rest of the chunk is not
    /// processed.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), MashError> {
        chunk.iter().try_for_each(|&b| self.push_byte(b))
    }

    /// Drains the sequencer, terminates the last line and returns the sink.
    ///
    /// # Errors
    ///
    /// [`MashError::Write`] if the sink fails.
    pub fn finish(mut self) -> Result<W, MashError> {
        self.step(SeqInput::FlushBuffered)?;
        self.step(SeqInput::ReleasePending)?;
        debug_assert!(self.sequencer.is_idle());
        self.controller.finalize()
    }

    fn step(&mut self, input: SeqInput) -> Result<(), MashError> {
        let controller = &mut self.controller;
        self.sequencer
            .step(input, |flush| controller.consume(flush.strip_line_feed()))
    }
}

/// Runs the filter over a whole reader, writing into `sink`.
///
/// # Errors
///
/// [`MashError::Config`] before anything is read, then [`MashError::Read`]
/// or [`MashError::Write`] on I/O failure.
pub fn mash<Rd: Read, W: Write>(options: MashOptions, input: Rd, sink: W) -> Result<W, MashError> {
    let mut masher = LineMasher::new(options, sink)?;
    drive(&mut masher, input)?;
    masher.finish()
}

fn drive<Rd: Read, W: Write, R: UniformSource>(
    masher: &mut LineMasher<W, R>,
    input: Rd,
) -> Result<(), MashError> {
    for byte in BufReader::new(input).bytes() {
        masher.push_byte(byte.map_err(MashError::Read)?)?;
    }
    Ok(())
}

/// Runs the filter over an in-memory buffer.
///
/// # Errors
///
/// [`ConfigError`] when the length bounds are not positive.
///
/// # Panics
///
/// Never in practice: writes into a `Vec` cannot fail.
pub fn mash_bytes(options: MashOptions, input: &[u8]) -> Result<Vec<u8>, ConfigError> {
    let mut masher = LineMasher::new(options, Vec::with_capacity(input.len() + input.len() / 8))?;
    let finished = masher.feed(input).and_then(|()| masher.finish());
    Ok(finished.expect("writes into a Vec cannot fail"))
}
