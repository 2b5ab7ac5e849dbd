#![allow(dead_code)]

const DESCRIPTOR: u32 = 0xC102_8302;
const HEADER: u32 = 0x4000_0000;

/// Little-endian stream of `blocks` blocks with `events` events each, an
/// overflow word every 256 events, and a matching trailer
pub fn load_test_data(blocks: u32, events: u32) -> Vec<u8> {
    let mut words = Vec::new();
    for _ in 0..blocks {
        words.push(2 + events + events.saturating_sub(1) / 256);
        words.push(DESCRIPTOR);
        words.push(HEADER);
        for i in 0..events {
            if i > 0 && i % 256 == 0 {
                words.push(HEADER | i / 256);
            }
            words.push((2 + i % 16) << 24 | (i % 256) << 16);
        }
    }
    words.push(blocks);
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}
