//! `spcxinfo [-z] [INPUT]`
//!
//! Decode an `.spcx` (or `.spcx.zst`) stream and print a JSON summary of
//! its blocks. Exits nonzero if the stream fails to decode, which makes
//!
//!     spcxinfo mydata.spcx > /dev/null
//!
//! a quick integrity check.

use argh::FromArgs;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{stdin, stdout, Write};
use std::path::Path;

use spcxtools::{de, ser};

const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");

#[derive(Debug, FromArgs, Clone)]
/// Print a JSON summary of the blocks in an .spcx stream
pub struct CliArgs {
    /// print version information
    #[argh(switch, short = 'v')]
    pub version: bool,
    /// treat the input, including standard input, as zstd-compressed
    #[argh(switch, short = 'z')]
    pub zstd: bool,
    /// file to read (reads standard input by default); a .zst file is
    /// decompressed first
    #[argh(positional)]
    pub input: Option<String>,
}

fn main() -> Result<()> {
    let args: CliArgs = argh::from_env();
    if args.version {
        println!(
            concat!(
                env!("CARGO_BIN_NAME"),
                " ",
                "{}",
            ),
            GIT_VERSION,
        );
        return Ok(())
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let spcx = match args.input {
        Some(path) => {
            let f = File::open(&path).with_context(|| format!("cannot open {}", path))?;
            let compressed = args.zstd || Path::new(&path)
                .extension()
                .map_or(false, |e| e == "zst");
            de::decode(f, compressed).with_context(|| format!("cannot decode {}", path))?
        },
        None => de::decode(stdin().lock(), args.zstd).context("cannot decode standard input")?,
    };

    let stdout = stdout();
    let mut stdout = stdout.lock();
    ser::summary_json(&mut stdout, &spcx)?;
    stdout.flush()?;
    Ok(())
}
