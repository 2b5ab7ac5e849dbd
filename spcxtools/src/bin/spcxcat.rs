use argh::FromArgs;
use anyhow::{bail, Context, Result};
use either::{Either, Left, Right};
use std::fs::{self, File};
use std::io::{stdin, stdout, BufReader, Write};
use std::path::Path;

use spcxtools::{cfg::Export, de, ser};

const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");

#[derive(Debug, FromArgs, Clone)]
/// Decode photon events from the .spcx binary format and print them as
/// tab-separated values (block, channel, time, gap) to standard output.
/// Inputs ending in .zst are decompressed first.
pub struct CliArgs {
    /// print version information
    #[argh(switch, short = 'v')]
    pub version: bool,
    /// JSON export specification selecting columns and channels
    #[argh(option, short = 'c')]
    pub config: Option<String>,
    /// treat all inputs, including standard input, as zstd-compressed
    #[argh(switch, short = 'z')]
    pub zstd: bool,
    /// with no input or when input is '-', read from standard input
    #[argh(positional)]
    pub input: Vec<String>,
}

fn main() -> Result<()> {
    let args: CliArgs = argh::from_env();
    if args.version {
        let stdout = stdout();
        let mut stdout = stdout.lock();
        writeln!(
            stdout,
            concat!(
                env!("CARGO_BIN_NAME"),
                " ",
                "{}",
            ),
            GIT_VERSION,
        )?;
        return Ok(())
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let export: Export = match &args.config {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("cannot open {}", path))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("cannot parse export specification {}", path))?
        },
        None => Export::default(),
    };

    // Collect inputs
    let mut inputs: Vec<Either<(), String>> = Vec::new();
    if args.input.is_empty() {
        inputs.push(Left(()));
    } else {
        let mut contains_stdin = false;
        for i in args.input {
            if i == "-" {
                if contains_stdin {
                    bail!("cannot specify '-' for stdin twice");
                }
                contains_stdin = true;
                inputs.push(Left(()));
            } else {
                match fs::metadata(&i) {
                    Ok(m) => {
                        if m.is_file() {
                            inputs.push(Right(i));
                        } else {
                            bail!("{} is not a file", &i);
                        }
                    },
                    Err(e) => bail!("{}: {}", &i, e),
                }
            }
        }
    }

    let stdout = stdout();
    let stdout = stdout.lock();
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_writer(stdout);

    for i in inputs {
        let spcx = match i {
            Left(()) => {
                let stdin = stdin();
                let stdin = stdin.lock();
                de::decode(stdin, args.zstd).context("cannot decode standard input")?
            },
            Right(path) => {
                let compressed = args.zstd || Path::new(&path)
                    .extension()
                    .map_or(false, |e| e == "zst");
                let f = File::open(&path)?;
                de::decode(f, compressed).with_context(|| format!("cannot decode {}", path))?
            },
        };
        ser::tsv(&mut wtr, &spcx, &export)?;
    }
    Ok(())
}
