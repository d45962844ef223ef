//! Value types for CIDR set algebra.
//!
//! - [`AddressFamily`] - IPv4 / IPv6 and their widths
//! - [`Prefix`] - an aligned address block
//! - [`PrefixSet`] and [`FamilySets`] - ordered prefix collections

mod address;
mod family;
mod prefix;
mod prefix_set;

// Re-export public types
pub use address::{cidr_mask, cut_addr, format_address, Notation};
pub use family::AddressFamily;
pub use prefix::Prefix;
pub use prefix_set::{FamilySets, PrefixSet};
