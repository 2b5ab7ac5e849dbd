pub mod bit;
pub mod cfg;
pub mod de;
pub mod error;
pub mod ser;
pub mod spc;

pub use error::{BlockError, Error, EventViolation};

/// Size in bytes of one little-endian word, the atomic unit of the format
pub const WORD_SIZE: usize = 4;
/// Descriptor top byte with the raw-mode bit masked out
pub const SYNC: u8 = 0xC1;
/// Width of the time field stored in every event word
pub const TIME_BITS: u32 = 24;
pub const TIME_MASK: u32 = 0x00FF_FFFF;
/// Channel codes 0 and 1 are structural; channel = code - CHANNEL_OFFSET
pub const CHANNEL_OFFSET: u8 = 2;

/// The basic representation of a decoded photon event
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Event {
    /// Channel (0-indexed) of the event
    pub channel: u8,
    /// Absolute macro time, overflow counter included
    pub time: u64,
    /// An unrecorded interval precedes this event
    pub gap: bool,
}

/// One decoded record of the container
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Block {
    /// Raw-mode flag from the descriptor
    pub raw: bool,
    /// Time per bin, passed through from the descriptor unmodified
    pub time_per_bin: u32,
    pub events: Vec<Event>,
}

impl Block {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A fully decoded and trailer-checked stream of blocks
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Spcx {
    blocks: Vec<Block>,
}

impl Spcx {
    pub(crate) fn new(blocks: Vec<Block>) -> Self {
        Spcx { blocks }
    }

    /// Number of blocks, equal to the trailer of the stream
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// All events in stream order, paired with the index of their block
    pub fn events(&self) -> impl Iterator<Item = (usize, &Event)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .flat_map(|(i, b)| b.events.iter().map(move |e| (i, e)))
    }
}

impl IntoIterator for Spcx {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Spcx {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
