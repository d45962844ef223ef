//! CIDR set algebra for IPv4 and IPv6.
//!
//! Merges lists of networks into their minimal cover, excludes one list from
//! another, and enumerates the addresses a list covers. Every result is
//! expressed as aligned prefixes, and the two address families are always
//! processed separately.
//!
//! ```
//! use cidr_tools::input::{parse_prefixes, PrefixParser};
//!
//! let nets = parse_prefixes(["10.0.0.0/25", "10.0.0.128/25"], &PrefixParser::default()).unwrap();
//! let merged: Vec<String> = nets.merge().iter().map(|p| p.to_string()).collect();
//! assert_eq!(merged, vec!["10.0.0.0/24"]);
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::CidrError;
pub use input::{parse_prefixes, PrefixParser};
pub use models::{AddressFamily, FamilySets, Prefix, PrefixSet};
pub use processing::{expand, merge, normalize, subtract};
