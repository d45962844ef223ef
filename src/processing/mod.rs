//! CIDR set algebra.
//!
//! All operations work on one family at a time; [`crate::models::FamilySets`]
//! runs them per family and never mixes the results.
//! - [`normalize`] - aggregation into the minimal cover
//! - [`subtract`] - exclusion by bisection
//! - [`expand`] - lazy address enumeration
//! - [`query`] - overlap and containment

mod expand;
mod normalize;
mod query;
mod subtract;

// Re-export public functions
pub use expand::{expand, Addresses};
pub use normalize::{merge, normalize, union};
pub use query::{contains, overlap};
pub use subtract::{exclude_each, subtract, Remainder};

#[cfg(test)]
mod properties;
