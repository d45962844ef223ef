//! Command line and environment configuration.

use crate::input::{BareAddress, ParserConfig};
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default log4rs configuration file, looked up in the working directory.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Merge, exclude and expand lists of IPv4/IPv6 CIDR networks.
#[derive(Parser, Debug)]
#[command(name = "cidr-tools", version)]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Reject bare addresses instead of reading them as /32 or /128 hosts.
    #[arg(long, global = true)]
    pub require_length: bool,

    /// log4rs YAML configuration; logs go to stderr at warn level when the file is missing.
    #[arg(long, env = "CIDR_TOOLS_LOG_CONFIG", default_value = DEFAULT_LOG_CONFIG, global = true)]
    pub log_config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// One operation on network list files (one network per line).
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Merge a list of networks into the minimal cover.
    Merge { netfile: PathBuf },
    /// Exclude the networks of one list from another.
    Exclude {
        basefile: PathBuf,
        excludefile: PathBuf,
    },
    /// Print every address of a list of networks.
    Expand { netfile: PathBuf },
    /// Print whether two lists share any address.
    Overlap { netfile_a: PathBuf, netfile_b: PathBuf },
    /// Print whether the first list covers every address of the second.
    Contains { netfile_a: PathBuf, netfile_b: PathBuf },
    /// Print the canonical form of each network, in input order.
    Normalize {
        netfile: PathBuf,
        /// Write every IPv6 group instead of compressing zero runs to `::`.
        #[arg(long)]
        no_compress: bool,
        /// Write IPv6 with embedded IPv4 (e.g. `::ffff:1.2.3.4`) as hex groups.
        #[arg(long)]
        hexify: bool,
    },
}

impl Cli {
    /// Parser settings selected on the command line.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            bare_address: if self.require_length {
                BareAddress::Reject
            } else {
                BareAddress::HostPrefix
            },
        }
    }
}
