//! Serialization of decoded streams: tab-separated events and JSON summaries

use crate::cfg::{Column, Export};
use crate::{Block, Spcx};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Serialize events to tab-separated values, one record per event.
pub fn tsv(wtr: &mut csv::Writer<impl Write>, spcx: &Spcx, export: &Export) -> Result<()> {
    for (i, event) in spcx.events().filter(|(_, e)| export.keeps(e.channel)) {
        let record = export.columns.iter().map(|c| match c {
            Column::Block => i.to_string(),
            Column::Channel => event.channel.to_string(),
            Column::Time => event.time.to_string(),
            Column::Gap => (event.gap as u8).to_string(),
        });
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Overview of a decoded stream
#[derive(Serialize, Debug, PartialEq)]
pub struct Summary {
    pub blocks: usize,
    pub events: usize,
    pub per_block: Vec<BlockSummary>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct BlockSummary {
    pub raw: bool,
    pub time_per_bin: u32,
    pub events: usize,
    pub gaps: usize,
    pub first_time: Option<u64>,
    pub last_time: Option<u64>,
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        BlockSummary {
            raw: block.raw,
            time_per_bin: block.time_per_bin,
            events: block.len(),
            gaps: block.events.iter().filter(|e| e.gap).count(),
            first_time: block.events.first().map(|e| e.time),
            last_time: block.events.last().map(|e| e.time),
        }
    }
}

pub fn summary(spcx: &Spcx) -> Summary {
    let per_block: Vec<BlockSummary> = spcx.iter().map(BlockSummary::from).collect();
    Summary {
        blocks: spcx.len(),
        events: per_block.iter().map(|b| b.events).sum(),
        per_block,
    }
}

/// Serialize the summary of a stream as pretty-printed JSON
pub fn summary_json(wtr: &mut impl Write, spcx: &Spcx) -> Result<()> {
    serde_json::to_writer_pretty(&mut *wtr, &summary(spcx))?;
    writeln!(wtr)?;
    Ok(())
}
