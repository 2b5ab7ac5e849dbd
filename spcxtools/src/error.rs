//! Error types for decoding SPCX streams
//!
//! Every error is fatal to the decode: the format carries no marker to
//! resynchronize on, so nothing after a corrupt word can be trusted.

use thiserror::Error;

/// Why an event word was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventViolation {
    /// Bit 7 of the tag byte is reserved and must be zero
    #[error("reserved tag bit is set")]
    ReservedBit,

    /// Channel codes below 2 have no channel
    #[error("channel code {code} is reserved")]
    ReservedChannel { code: u8 },
}

/// Failure to decode a single block from its words
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Descriptor top byte does not carry the sync constant
    #[error("invalid descriptor {descriptor:#010x}")]
    InvalidDescriptor { descriptor: u32 },

    /// An event or overflow word failed tag validation
    #[error("invalid event record {word:#010x} at word {index}: {violation}")]
    InvalidEventRecord {
        index: usize,
        word: u32,
        violation: EventViolation,
    },

    /// Block too short to hold its descriptor and header word
    #[error("truncated block of {words} word(s)")]
    Truncated { words: usize },
}

/// Failure to decode a stream
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error other than the short read that marks the trailer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A block failed to decode
    #[error("block {block} at byte offset {offset}: {source}")]
    Block {
        block: usize,
        offset: u64,
        #[source]
        source: BlockError,
    },

    /// Input ended partway through a length word or a block
    #[error("block {block} at byte offset {offset}: truncated, {missing} byte(s) missing")]
    TruncatedBlock {
        block: usize,
        offset: u64,
        missing: u64,
    },

    /// Bytes follow a zero trailer
    #[error("unexpected data after trailer at byte offset {offset}")]
    TrailingData { offset: u64 },

    /// Trailer count disagrees with the number of decoded blocks
    #[error("expected {expected} blocks but found {found}")]
    TrailerMismatch { expected: u32, found: usize },

    /// Input ended before any length word could be read
    #[error("stream ended before a trailer was read")]
    MissingTrailer,

    /// A previous error stopped the reader
    #[error("decoding stopped by an earlier error in block {block} at byte offset {offset}")]
    Halted { block: usize, offset: u64 },
}

impl Error {
    pub fn is_invalid_descriptor(&self) -> bool {
        matches!(
            self,
            Error::Block {
                source: BlockError::InvalidDescriptor { .. },
                ..
            }
        )
    }

    pub fn is_invalid_event_record(&self) -> bool {
        matches!(
            self,
            Error::Block {
                source: BlockError::InvalidEventRecord { .. },
                ..
            }
        )
    }

    /// Input cut short, or a block too short for its descriptor and header
    pub fn is_truncated_block(&self) -> bool {
        matches!(
            self,
            Error::TruncatedBlock { .. }
                | Error::Block {
                    source: BlockError::Truncated { .. },
                    ..
                }
        )
    }

    pub fn is_trailer_mismatch(&self) -> bool {
        matches!(self, Error::TrailerMismatch { .. })
    }
}
