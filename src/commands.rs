//! Runs one command: read the network files, apply the set operation, write results.

use crate::config::Command;
use crate::input::{read_network_file, read_prefix_file, NetworkLine, PrefixParser};
use crate::models::{FamilySets, Notation};
use crate::output::{emit, OutputFormat};
use crate::processing::Remainder;
use colored::Colorize;
use itertools::Itertools;
use std::error::Error;
use std::io::Write;

/// Execute `command`, writing its results to `out`.
///
/// # Arguments
/// * `command` - The operation and its input files
/// * `parser` - Parser settings for every input line
/// * `format` - Output format
/// * `out` - Destination for results (stdout in the binary)
///
/// # Returns
/// * `Ok(usize)` - Number of result items written
/// * `Err` - If a file can't be read or any line fails to parse
pub fn run<W: Write>(
    command: &Command,
    parser: &PrefixParser,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize, Box<dyn Error>> {
    log::info!("#Start run({command:?})");

    let count = match command {
        Command::Merge { netfile } => {
            let nets = read_prefix_file(netfile, parser)?;
            let merged = nets.merge();
            emit(out, format, merged.iter())?
        }
        Command::Exclude {
            basefile,
            excludefile,
        } => {
            let bases = read_network_file(basefile, parser)?;
            let excludes = read_prefix_file(excludefile, parser)?;
            let base_sets: FamilySets = bases.iter().map(|line| line.prefix).collect();
            let report = base_sets.exclude_each(&excludes)?;
            log_exclusions(&report);
            emit(out, format, exclusion_output(&report, &bases))?
        }
        Command::Expand { netfile } => {
            let nets = read_prefix_file(netfile, parser)?;
            emit(out, format, nets.expand())?
        }
        Command::Overlap {
            netfile_a,
            netfile_b,
        } => {
            let a = read_prefix_file(netfile_a, parser)?;
            let b = read_prefix_file(netfile_b, parser)?;
            emit(out, format, [a.overlaps(&b)?])?
        }
        Command::Contains {
            netfile_a,
            netfile_b,
        } => {
            let a = read_prefix_file(netfile_a, parser)?;
            let b = read_prefix_file(netfile_b, parser)?;
            emit(out, format, [a.contains(&b)?])?
        }
        Command::Normalize {
            netfile,
            no_compress,
            hexify,
        } => {
            let notation = Notation {
                compress: !no_compress,
                hexify: *hexify,
            };
            let lines = read_network_file(netfile, parser)?;
            let canonical = lines
                .iter()
                .map(|line| parser.canonicalize(&line.text, notation))
                .collect::<Result<Vec<String>, _>>()?;
            emit(out, format, canonical)?
        }
    };

    log::info!("#End run() wrote {count} items");
    Ok(count)
}

/// Lines to print for an exclusion.
///
/// A base that no exclude touched is printed as written in the base file, so
/// `10.0.0.5/24` stays `10.0.0.5/24`. When several base lines were merged into
/// one untouched prefix, each of them is printed once, in ascending order.
/// Carved bases print their fragments.
fn exclusion_output(report: &[Remainder], bases: &[NetworkLine]) -> Vec<String> {
    let mut written: Vec<&NetworkLine> = bases.iter().collect();
    written.sort_by_key(|line| line.prefix);

    let mut output = Vec::new();
    for remainder in report {
        match remainder {
            Remainder::Unchanged(base) => {
                // every base line starting inside a merged base lies inside it
                let key = |line: &&NetworkLine| (line.prefix.family(), line.prefix.first());
                let start =
                    written.partition_point(|line| key(line) < (base.family(), base.first()));
                let end =
                    written.partition_point(|line| key(line) <= (base.family(), base.last()));
                output.extend(
                    written[start..end]
                        .iter()
                        .map(|line| line.text.clone())
                        .unique(),
                );
            }
            _ => output.extend(remainder.prefixes().iter().map(|p| p.to_string())),
        }
    }
    output
}

fn log_exclusions(report: &[Remainder]) {
    for remainder in report {
        match remainder {
            Remainder::Unchanged(base) => log::debug!("{base}: unchanged"),
            Remainder::Removed(base) => {
                log::info!("{base}: {}", "fully excluded".red())
            }
            Remainder::Carved { base, fragments } => {
                log::debug!("{base}: {} fragments left", fragments.len())
            }
        }
    }
}
