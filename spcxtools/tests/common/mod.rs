#![allow(dead_code)]

//! Reference streams recorded from the acquisition hardware, as words

pub const DESCRIPTOR: u32 = 0xC102_8302;
pub const HEADER: u32 = 0x4000_0000;
pub const TIME_PER_BIN: u32 = 0x02_8302;

/// Three blocks of one, two and three events
pub const SMALL: [u32; 16] = [
    3, DESCRIPTOR, HEADER, 0x0500_BA16,
    4, DESCRIPTOR, HEADER, 0x0800_A71B, 0x0800_B8DD,
    5, DESCRIPTOR, HEADER, 0x0400_B9C8, 0x0D00_BB4B, 0x0700_BC2F,
    3,
];

/// Second block crosses two macro time overflows
pub const WITH_OVERFLOW: [u32; 16] = [
    3, DESCRIPTOR, HEADER, 0x0500_BA16,
    10, DESCRIPTOR, HEADER,
    0x04FF_FA27, 0x09FF_FB55, 0x4000_0001, 0x0500_02AC,
    0x09FF_F957, 0x07FF_FA47, 0x4000_0002, 0x0500_03CC,
    2,
];

/// `SMALL` with the gap flag set on the first event of every block
pub const WITH_GAP: [u32; 16] = [
    3, DESCRIPTOR, HEADER, 0x2500_BA16,
    4, DESCRIPTOR, HEADER, 0x2800_A71B, 0x0800_B8DD,
    5, DESCRIPTOR, HEADER, 0x2400_B9C8, 0x0D00_BB4B, 0x0700_BC2F,
    3,
];

/// Little-endian bytes of a word sequence, as written to disk
pub fn bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Replace every occurrence of one word
pub fn replace(words: &[u32], from: u32, to: u32) -> Vec<u32> {
    words.iter().map(|&w| if w == from { to } else { w }).collect()
}

/// Synthetic stream of `blocks` blocks with `events` events each, and an
/// overflow word every 256 events
pub fn synthetic(blocks: u32, events: u32) -> Vec<u8> {
    let mut words = Vec::new();
    for _ in 0..blocks {
        let overflows = events.saturating_sub(1) / 256;
        words.push(2 + events + overflows);
        words.push(DESCRIPTOR);
        words.push(HEADER);
        for i in 0..events {
            if i > 0 && i % 256 == 0 {
                words.push(0x4000_0000 | i / 256);
            }
            let channel = 2 + i % 16;
            words.push(channel << 24 | i.wrapping_mul(0x1_0000) & 0x00FF_FFFF);
        }
    }
    words.push(blocks);
    bytes(&words)
}
