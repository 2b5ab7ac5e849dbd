//! Deserialization of SPCX streams, plain or zstd-compressed (`.spcx.zst`)
//!
//! A stream is a run of length-prefixed blocks followed by a trailer:
//!
//! ```text
//! L0 | L0 words | L1 | L1 words | ... | N
//! ```
//!
//! The trailer `N` looks like one more length prefix. It is recognized only
//! because the input ends before `N` further words can be read, and it must
//! equal the number of blocks decoded before it.

use crate::error::Error;
use crate::{spc, Block, Spcx, WORD_SIZE};
use std::io::{BufReader, Read};
use tracing::{debug, info};
use zstd::stream;

/// Decode an uncompressed stream and check its trailer
pub fn spcx(rdr: impl Read) -> Result<Spcx, Error> {
    let blocks = Reader::new(BufReader::new(rdr)).collect::<Result<Vec<_>, _>>()?;
    Ok(Spcx::new(blocks))
}

/// Decode a zstd-compressed stream and check its trailer
pub fn spcx_compressed(rdr: impl Read) -> Result<Spcx, Error> {
    let zrdr = stream::read::Decoder::new(rdr)?;
    spcx(zrdr)
}

/// Decode a stream, decompressing it first when `compressed` is set
pub fn decode(rdr: impl Read, compressed: bool) -> Result<Spcx, Error> {
    if compressed {
        spcx_compressed(rdr)
    } else {
        spcx(rdr)
    }
}

/// Where the reader stands in the stream
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum State {
    ReadingBlocks,
    /// The input ran out right after a length word; `trailer` is that
    /// length, which could not be materialized into a block
    Terminated { trailer: u32 },
    /// An error stopped decoding at the block starting at `offset`
    Failed { block: usize, offset: u64 },
}

/// Outcome of one [`Reader::step`]
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Step {
    Block(Block),
    /// The trailer was found and matches the block count
    End,
}

/// Result of asking the input for a fixed number of words
enum Fill {
    Full(Vec<u32>),
    /// Input ended after this many bytes
    Short(u64),
}

/// Streaming block reader.
///
/// Each [`step`](Reader::step) yields one block until the trailer is reached.
/// As an iterator it yields blocks, then stops after the trailer check or
/// the first error.
pub struct Reader<R> {
    rdr: R,
    state: State,
    last_length: Option<u32>,
    blocks: usize,
    offset: u64,
}

impl<R: Read> Reader<R> {
    pub fn new(rdr: R) -> Self {
        Reader {
            rdr,
            state: State::ReadingBlocks,
            last_length: None,
            blocks: 0,
            offset: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of blocks decoded so far
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Bytes consumed from the input so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Advance by one block, or reach the trailer and check it.
    ///
    /// Once terminated, every further call repeats the trailer check without
    /// touching the input. Once failed, every further call returns
    /// [`Error::Halted`] without touching the input.
    pub fn step(&mut self) -> Result<Step, Error> {
        match self.state {
            State::Terminated { trailer } => return self.check_trailer(trailer),
            State::Failed { block, offset } => return Err(Error::Halted { block, offset }),
            State::ReadingBlocks => {}
        }

        let start = self.offset;
        let result = self.read_block(start);
        if result.is_err() && self.state == State::ReadingBlocks {
            self.state = State::Failed {
                block: self.blocks,
                offset: start,
            };
        }
        result
    }

    fn read_block(&mut self, start: u64) -> Result<Step, Error> {
        let length = match self.read_words(1)? {
            Fill::Full(words) => words[0],
            Fill::Short(0) => {
                // Input ends on a block boundary: the previous length was the trailer
                let trailer = self.last_length.ok_or(Error::MissingTrailer)?;
                return self.terminate(trailer);
            }
            Fill::Short(got) => return Err(self.truncated(start, WORD_SIZE as u64 - got)),
        };
        self.last_length = Some(length);

        // A zero-word block cannot hold a descriptor
        if length == 0 {
            let at = self.offset;
            let extra = (&mut self.rdr).take(1).read_to_end(&mut Vec::new())?;
            if extra > 0 {
                self.offset += extra as u64;
                return Err(Error::TrailingData { offset: at });
            }
            return self.terminate(length);
        }

        let want = length as u64 * WORD_SIZE as u64;
        let words = match self.read_words(length as usize)? {
            Fill::Full(words) => words,
            Fill::Short(0) => return self.terminate(length),
            Fill::Short(got) => return Err(self.truncated(start, want - got)),
        };

        let block = spc::decode(&words).map_err(|source| Error::Block {
            block: self.blocks,
            offset: start,
            source,
        })?;
        debug!(
            block = self.blocks,
            offset = start,
            events = block.len(),
            raw = block.raw,
            time_per_bin = block.time_per_bin,
            "read block"
        );
        self.blocks += 1;
        Ok(Step::Block(block))
    }

    fn truncated(&self, start: u64, missing: u64) -> Error {
        debug!(block = self.blocks, offset = start, missing, "input ends inside a block");
        Error::TruncatedBlock {
            block: self.blocks,
            offset: start,
            missing,
        }
    }

    fn terminate(&mut self, trailer: u32) -> Result<Step, Error> {
        self.state = State::Terminated { trailer };
        info!(trailer, blocks = self.blocks, "reached trailer");
        self.check_trailer(trailer)
    }

    fn check_trailer(&self, trailer: u32) -> Result<Step, Error> {
        if trailer as usize != self.blocks {
            return Err(Error::TrailerMismatch {
                expected: trailer,
                found: self.blocks,
            });
        }
        Ok(Step::End)
    }

    /// Read exactly `n` little-endian words, or report how many bytes were
    /// left. Bytes of a short read are consumed and counted in the offset.
    fn read_words(&mut self, n: usize) -> Result<Fill, Error> {
        let want = n as u64 * WORD_SIZE as u64;
        let mut buf = Vec::new();
        let got = (&mut self.rdr).take(want).read_to_end(&mut buf)? as u64;
        self.offset += got;
        if got < want {
            return Ok(Fill::Short(got));
        }
        let words = buf
            .chunks_exact(WORD_SIZE)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(Fill::Full(words))
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<Block, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::ReadingBlocks {
            return None;
        }
        match self.step() {
            Ok(Step::Block(block)) => Some(Ok(block)),
            Ok(Step::End) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
