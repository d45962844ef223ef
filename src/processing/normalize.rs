//! Aggregation of prefixes into their minimal cover.
//!
//! Sorting by (base, length) puts every container before the prefixes it
//! contains, so a single left-to-right pass with a stack is enough:
//! contained prefixes are dropped against the top of the stack, and sibling
//! halves on top are folded into their parent until no fold applies.

use crate::error::CidrError;
use crate::models::{FamilySets, Prefix, PrefixSet};
use itertools::Itertools;

/// Reduce a set to the unique minimal collection of prefixes covering the same addresses.
///
/// The result does not depend on the order or multiplicity of the input.
pub fn normalize(set: &PrefixSet) -> PrefixSet {
    let mut stack: Vec<Prefix> = Vec::with_capacity(set.len());

    for prefix in set.iter().copied().dedup() {
        if let Some(top) = stack.last() {
            if top.contains(&prefix) {
                log::trace!("drop {prefix}, covered by {top}");
                continue;
            }
        }
        stack.push(prefix);
        fold_siblings(&mut stack);
    }

    log::debug!(
        "normalize {}: {} prefixes -> {}",
        set.family(),
        set.len(),
        stack.len()
    );
    PrefixSet::from_sorted(set.family(), stack)
}

/// Replace the two top entries by their parent while they are sibling halves.
fn fold_siblings(stack: &mut Vec<Prefix>) {
    while stack.len() >= 2 {
        let upper = stack[stack.len() - 1];
        let lower = stack[stack.len() - 2];
        if !lower.is_adjacent_mergeable(&upper) {
            break;
        }
        let Some(parent) = lower.parent() else {
            break;
        };
        log::trace!("merge {lower} + {upper} -> {parent}");
        stack.truncate(stack.len() - 2);
        stack.push(parent);
    }
}

/// Aggregate a set. Alias of [`normalize`] under its command name.
pub fn merge(set: &PrefixSet) -> PrefixSet {
    normalize(set)
}

/// Normalized union of two sets of the same family.
///
/// Fails with [`CidrError::FamilyMismatch`] when the families differ.
pub fn union(a: &PrefixSet, b: &PrefixSet) -> Result<PrefixSet, CidrError> {
    a.check_family(b.family())?;
    let combined = PrefixSet::from_prefixes(a.family(), a.iter().chain(b.iter()).copied())?;
    Ok(normalize(&combined))
}

impl FamilySets {
    /// Normalize both families independently.
    pub fn merge(&self) -> FamilySets {
        FamilySets {
            v4: normalize(&self.v4),
            v6: normalize(&self.v6),
        }
    }
}
