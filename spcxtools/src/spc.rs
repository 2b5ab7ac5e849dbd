//! Decoding of a single block: descriptor word, header word, event words
//!
//! Event words share one layout, the tag byte on top of a 24-bit field:
//!
//! | bit 7    | bit 6    | bit 5 | bits 0-4     | low 24 bits         |
//! |----------|----------|-------|--------------|---------------------|
//! | reserved | overflow | gap   | channel code | time, or overflow   |
//!
//! An overflow word carries no event. Its payload replaces the block's
//! overflow counter, which supplies the bits above the 24-bit time field of
//! every event that follows it in the same block.

use crate::bit::{low24, top_byte, BitOps};
use crate::error::{BlockError, EventViolation};
use crate::{Block, Event, CHANNEL_OFFSET, SYNC, TIME_BITS};
use tracing::trace;

/// Descriptor word and header word precede the events
pub const HEADER_WORDS: usize = 2;

const RAW_BIT: usize = 2;
const RESERVED_BIT: usize = 7;
const OVERFLOW_BIT: usize = 6;
const GAP_BIT: usize = 5;
const CHANNEL_MASK: u8 = 0x1F;

/// Per-block metadata from the first word of the block
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Descriptor {
    pub raw: bool,
    pub time_per_bin: u32,
}

impl Descriptor {
    pub fn parse(word: u32) -> Result<Self, BlockError> {
        let top = top_byte(word);
        let mut sync = top;
        sync.clear(RAW_BIT);
        if sync != SYNC {
            return Err(BlockError::InvalidDescriptor { descriptor: word });
        }
        Ok(Descriptor {
            raw: top.check(RAW_BIT),
            time_per_bin: low24(word),
        })
    }
}

/// One event word, unpacked
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Record {
    /// New absolute value of the overflow counter
    Overflow { value: u32 },
    /// Photon event with its 24-bit time field
    Event { channel: u8, time: u32, gap: bool },
}

impl Record {
    pub fn parse(word: u32) -> Result<Self, EventViolation> {
        let tag = top_byte(word);
        if tag.check(RESERVED_BIT) {
            return Err(EventViolation::ReservedBit);
        }
        if tag.check(OVERFLOW_BIT) {
            return Ok(Record::Overflow { value: low24(word) });
        }
        let code = tag & CHANNEL_MASK;
        let channel = code
            .checked_sub(CHANNEL_OFFSET)
            .ok_or(EventViolation::ReservedChannel { code })?;
        Ok(Record::Event {
            channel,
            time: low24(word),
            gap: tag.check(GAP_BIT),
        })
    }
}

/// Combine the overflow counter with a 24-bit time field
#[inline]
pub fn macro_time(overflow: u32, time: u32) -> u64 {
    (overflow as u64) << TIME_BITS | time as u64
}

/// Decode one block from all of its words.
///
/// The header word is skipped unchecked. A rejected word fails the whole
/// block; no partially decoded events are returned.
pub fn decode(words: &[u32]) -> Result<Block, BlockError> {
    let (descriptor, records) = match words {
        [descriptor, _header, records @ ..] => (*descriptor, records),
        _ => return Err(BlockError::Truncated { words: words.len() }),
    };
    let descriptor = Descriptor::parse(descriptor)?;

    let mut events = Vec::with_capacity(records.len());
    records
        .iter()
        .enumerate()
        .try_fold(0u32, |overflow, (i, &word)| -> Result<u32, BlockError> {
            let record = Record::parse(word).map_err(|violation| {
                BlockError::InvalidEventRecord {
                    index: i + HEADER_WORDS,
                    word,
                    violation,
                }
            })?;
            match record {
                Record::Overflow { value } => {
                    trace!(value, "macro time overflow");
                    Ok(value)
                }
                Record::Event { channel, time, gap } => {
                    events.push(Event {
                        channel,
                        time: macro_time(overflow, time),
                        gap,
                    });
                    Ok(overflow)
                }
            }
        })?;

    Ok(Block {
        raw: descriptor.raw,
        time_per_bin: descriptor.time_per_bin,
        events,
    })
}
