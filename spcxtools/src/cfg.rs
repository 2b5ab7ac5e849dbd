//! Configuration tools: how decoded events are exported

use serde::{Deserialize, Serialize};

/// Export specification, read from a JSON file.
///
/// All fields are optional. With an empty specification every event is
/// written with all columns, in the order of [`Column`]'s variants.
///
/// ```json
/// {
///     "columns": ["Channel", "Time"],
///     "channels": [0, 3]
/// }
/// ```
///
/// writes only the channel and time of events on channels 0 and 3.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Export {
    #[serde(default = "all_columns")]
    pub columns: Vec<Column>,
    /// Channels to keep; empty keeps every channel
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<u8>,
}

/// One output column per event
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Column {
    /// Index of the block holding the event
    Block,
    Channel,
    Time,
    /// Gap flag as 0 or 1
    Gap,
}

impl Export {
    pub fn keeps(&self, channel: u8) -> bool {
        self.channels.is_empty() || self.channels.contains(&channel)
    }
}

fn all_columns() -> Vec<Column> {
    vec![Column::Block, Column::Channel, Column::Time, Column::Gap]
}

impl Default for Export {
    fn default() -> Self {
        Export {
            columns: all_columns(),
            channels: Vec::new(),
        }
    }
}
