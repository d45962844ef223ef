//! Input side: parsing tokens and reading prefix lists.
//!
//! - [`parser`] - token to [`crate::models::Prefix`] conversion
//! - [`reader`] - line/file reading and bucketing by family

mod parser;
mod reader;

pub use parser::{BareAddress, ParserConfig, PrefixParser};
pub use reader::{parse_prefixes, read_network_file, read_prefix_file, NetworkLine};
