//! Reading prefix lists from files.

use super::PrefixParser;
use crate::error::CidrError;
use crate::models::{FamilySets, Prefix};
use std::error::Error;
use std::path::Path;

/// A network as written on an input line, with the prefix it parses to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLine {
    /// Trimmed text of the line.
    pub text: String,
    pub prefix: Prefix,
}

/// Parse non-blank lines, keeping their text. Errors carry the 1-based line number.
fn parse_lines<I, S>(lines: I, parser: &PrefixParser) -> Result<Vec<NetworkLine>, (usize, CidrError)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        let text = line.as_ref().trim();
        if text.is_empty() {
            continue;
        }
        let prefix = parser.parse(text).map_err(|e| (i + 1, e))?;
        parsed.push(NetworkLine {
            text: text.to_string(),
            prefix,
        });
    }
    Ok(parsed)
}

fn bucket(lines: &[NetworkLine]) -> FamilySets {
    let sets: FamilySets = lines.iter().map(|line| line.prefix).collect();
    log::debug!(
        "parsed {} IPv4 and {} IPv6 prefixes",
        sets.v4.len(),
        sets.v6.len()
    );
    sets
}

/// Parse lines into per-family prefix sets.
///
/// Lines are trimmed and blank lines skipped. The first malformed line fails
/// the whole batch.
pub fn parse_prefixes<I, S>(lines: I, parser: &PrefixParser) -> Result<FamilySets, CidrError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines = parse_lines(lines, parser).map_err(|(_, e)| e)?;
    Ok(bucket(&lines))
}

/// Read a file with one network per line, keeping each line as written.
///
/// # Arguments
/// * `path` - File to read
/// * `parser` - Parser settings for each line
///
/// # Returns
/// * `Ok(Vec<NetworkLine>)` - The non-blank lines, in file order
/// * `Err` - If the file can't be read or a line doesn't parse; the message names the file and line
pub fn read_network_file(path: &Path, parser: &PrefixParser) -> Result<Vec<NetworkLine>, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    log::info!("Reading networks from {}", path.display());

    let lines = parse_lines(content.lines(), parser)
        .map_err(|(line, e)| format!("{}:{line}: {e}", path.display()))?;
    Ok(lines)
}

/// Read a file with one network per line into per-family prefix sets.
pub fn read_prefix_file(path: &Path, parser: &PrefixParser) -> Result<FamilySets, Box<dyn Error>> {
    let lines = read_network_file(path, parser)?;
    Ok(bucket(&lines))
}
