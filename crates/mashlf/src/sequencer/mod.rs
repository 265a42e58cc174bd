//! Incremental UTF-8 boundary detection.
//!
//! Overview
//! - [`Utf8Sequencer`] is fed one byte at a time and reports, per byte, the
//!   raw bytes that now form a finished unit: a complete code point, a broken
//!   sequence, or a broken sequence together with the ASCII byte that broke
//!   it. It never decodes; it only groups bytes and counts units.
//! - Each input goes through two phases. [`Utf8Sequencer::tick`] classifies
//!   the input and exposes the resulting [`Flush`]; the caller consumes it;
//!   [`Utf8Sequencer::tock`] then retires whatever was flushed. Keeping the
//!   retirement separate means a sequence that just completed is still
//!   visible as such until the consumer has handled it, and the drain inputs
//!   can reuse the same transitions without counting a unit twice.
//!
//! Malformed input
//! - A continuation byte with no open sequence is a unit of its own.
//! - An open sequence broken by an ASCII byte flushes as one group of two
//!   units.
//! - An open sequence broken by a lead byte flushes alone as one unit; the
//!   lead byte is held back for one step because the buffer still holds the
//!   broken prefix while the consumer reads it.
//!
//! End of stream
//! - After the last byte, tick with [`SeqInput::FlushBuffered`] and then with
//!   [`SeqInput::ReleasePending`], tocking after each. The first emits a
//!   dangling incomplete sequence, the second a held lead byte.


/// Length of a multi-byte sequence, announced by its lead byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqLen {
    /// `110xxxxx`
    Two,
    /// `1110xxxx`
    Three,
    /// `1111xxxx`
    Four,
}

impl SeqLen {
    /// Total bytes in the sequence, lead byte included.
    #[must_use]
    pub const fn bytes(self) -> u8 {
        match self {
            SeqLen::Two => 2,
            SeqLen::Three => 3,
            SeqLen::Four => 4,
        }
    }
}

/// What a single byte means in UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// `0xxxxxxx`
    Ascii,
    /// `10xxxxxx`
    Continuation,
    /// First byte of a multi-byte sequence.
    Lead(SeqLen),
}

impl ByteClass {
    /// Classifies `byte` by its high bits only. `0xF8..=0xFF` are treated as
    /// four-byte leads.
    #[must_use]
    pub const fn of(byte: u8) -> Self {
        match byte {
            0x00..=0x7F => ByteClass::Ascii,
            0x80..=0xBF => ByteClass::Continuation,
            0xC0..=0xDF => ByteClass::Lead(SeqLen::Two),
            0xE0..=0xEF => ByteClass::Lead(SeqLen::Three),
            0xF0..=0xFF => ByteClass::Lead(SeqLen::Four),
        }
    }
}

/// Input to [`Utf8Sequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqInput {
    /// The next byte of the stream.
    Byte(u8),
    /// End of stream, first drain: flush an incomplete sequence.
    FlushBuffered,
    /// End of stream, second drain: flush a held lead byte.
    ReleasePending,
}

/// Bytes that may be written through, with the number of code points they
/// stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flush<'a> {
    bytes: &'a [u8],
    code_points: usize,
}

impl<'a> Flush<'a> {
    /// Nothing to write.
    pub const NONE: Flush<'static> = Flush {
        bytes: &[],
        code_points: 0,
    };

    /// Builds a flush from raw parts.
    #[must_use]
    pub const fn new(bytes: &'a [u8], code_points: usize) -> Self {
        Self { bytes, code_points }
    }

    /// Raw bytes to pass through.
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Code points the bytes count for.
    #[must_use]
    pub const fn code_points(&self) -> usize {
        self.code_points
    }

    /// `true` when there is nothing to write and nothing to count.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.code_points == 0
    }

    /// Drops a trailing line feed and the code point it counted for.
    ///
    /// Source line feeds are delimiters: the caller inserts its own.
    #[must_use]
    pub fn strip_line_feed(self) -> Self {
        match self.bytes.split_last() {
            Some((b'\n', rest)) => Self {
                bytes: rest,
                code_points: self.code_points.saturating_sub(1),
            },
            _ => self,
        }
    }
}

/// Sequencer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Range {
    /// Nothing open.
    Init,
    /// An ASCII byte was just flushed, possibly behind a broken prefix.
    Ascii,
    /// A stray continuation byte was just flushed.
    Continuation,
    /// A multi-byte sequence is open; `field` continuation bytes seen so
    /// far. Complete once `field + 1 == len.bytes()`.
    Open { len: SeqLen, field: u8 },
}

/// Longest UTF-8 sequence, and the longest flush (3-byte prefix + ASCII).
const RAW_CAPACITY: usize = 4;

/// Byte-at-a-time UTF-8 unit splitter. See the module docs for the
/// tick/tock protocol.
#[derive(Debug, Clone)]
pub struct Utf8Sequencer {
    range: Range,
    pending: Option<u8>,
    /// Units in the current flush; non-zero exactly between a flushing
    /// `tick` and the following `tock`.
    code_count: usize,
    raw: [u8; RAW_CAPACITY],
    raw_len: usize,
}

impl Default for Utf8Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Sequencer {
    /// A sequencer with nothing buffered.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            range: Range::Init,
            pending: None,
            code_count: 0,
            raw: [0; RAW_CAPACITY],
            raw_len: 0,
        }
    }

    /// `true` when no byte is buffered or held back.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.raw_len == 0 && self.pending.is_none()
    }

    /// Runs `consume` on the flush produced by `input`, then tocks.
    ///
    /// # Errors
    ///
    /// Returns whatever `consume` returns. The sequencer is tocked either
    /// way.
    pub fn step<E>(
        &mut self,
        input: SeqInput,
        consume: impl FnOnce(Flush<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let result = consume(self.tick(input));
        self.tock();
        result
    }

    /// Classifies `input` and returns the bytes it makes ready. Must be
    /// followed by [`tock`](Self::tock) before the next tick.
    pub fn tick(&mut self, input: SeqInput) -> Flush<'_> {
        debug_assert_eq!(self.code_count, 0, "tick without tock");
        match input {
            SeqInput::Byte(byte) => self.tick_byte(byte),
            SeqInput::FlushBuffered => {
                // After a tock the buffer only holds an incomplete sequence.
                if self.raw_len > 0 {
                    self.range = Range::Init;
                    self.code_count = 1;
                }
            }
            SeqInput::ReleasePending => {
                if let Some(held) = self.pending.take() {
                    self.start_unit(held);
                    self.range = Range::Init;
                    self.code_count = 1;
                }
            }
        }
        self.current()
    }

    /// Retires the flush returned by the last [`tick`](Self::tick).
    pub fn tock(&mut self) {
        if self.code_count > 0 {
            self.raw_len = 0;
            self.code_count = 0;
        }
        self.range = match self.range {
            Range::Open { len, field } if field + 1 == len.bytes() => Range::Init,
            Range::Ascii | Range::Continuation => Range::Init,
            open @ (Range::Init | Range::Open { .. }) => open,
        };
    }

    fn tick_byte(&mut self, byte: u8) {
        if let Some(held) = self.pending.take() {
            self.start_unit(held);
        }

        match (self.range, ByteClass::of(byte)) {
            (Range::Open { len, field }, ByteClass::Continuation) => {
                let field = field + 1;
                self.push_raw(byte);
                self.range = Range::Open { len, field };
                if field + 1 == len.bytes() {
                    self.code_count = 1;
                }
            }
            (Range::Open { .. }, ByteClass::Ascii) => {
                // Broken prefix and the ASCII byte leave together.
                self.push_raw(byte);
                self.range = Range::Ascii;
                self.code_count = 2;
            }
            (Range::Open { .. }, ByteClass::Lead(len)) => {
                // Broken prefix leaves now; the new lead waits one step.
                self.pending = Some(byte);
                self.range = Range::Open { len, field: 0 };
                self.code_count = 1;
            }
            (Range::Init | Range::Ascii | Range::Continuation, class) => {
                self.start_unit(byte);
                match class {
                    ByteClass::Ascii => {
                        self.range = Range::Ascii;
                        self.code_count = 1;
                    }
                    ByteClass::Continuation => {
                        self.range = Range::Continuation;
                        self.code_count = 1;
                    }
                    ByteClass::Lead(len) => {
                        self.range = Range::Open { len, field: 0 };
                    }
                }
            }
        }
    }

    fn start_unit(&mut self, byte: u8) {
        self.raw_len = 0;
        self.push_raw(byte);
    }

    fn push_raw(&mut self, byte: u8) {
        debug_assert!(self.raw_len < RAW_CAPACITY, "sequencer buffer overflow");
        self.raw[self.raw_len] = byte;
        self.raw_len += 1;
    }

    fn current(&self) -> Flush<'_> {
        if self.code_count == 0 {
            return Flush::NONE;
        }
        Flush::new(&self.raw[..self.raw_len], self.code_count)
    }
}
