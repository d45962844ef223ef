use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use std::net::IpAddr;

use super::{expand, normalize, subtract};
use crate::models::{AddressFamily, Prefix, PrefixSet};

/// Prefixes are drawn from a 256-address window so they collide often.
const WINDOW: u128 = 256;

/// Two random sets of the same family inside one window.
#[derive(Clone, Debug)]
struct Sample {
    window_start: u128,
    base: PrefixSet,
    exclude: PrefixSet,
}

fn window_start(family: AddressFamily) -> u128 {
    match family {
        AddressFamily::V4 => 0x0A00_0000,    // 10.0.0.0/24
        AddressFamily::V6 => u128::MAX - 255, // top of the address space
    }
}

fn arbitrary_set(g: &mut Gen, family: AddressFamily) -> PrefixSet {
    let count = usize::arbitrary(g) % 12;
    let prefixes = (0..count).map(|_| {
        let addr = window_start(family) | u128::from(u8::arbitrary(g));
        let length = family.width() - u8::arbitrary(g) % 9;
        Prefix::new(family, addr, length).unwrap()
    });
    PrefixSet::from_prefixes(family, prefixes).unwrap()
}

impl Arbitrary for Sample {
    fn arbitrary(g: &mut Gen) -> Self {
        let family = *g.choose(&AddressFamily::ALL).unwrap();
        Sample {
            window_start: window_start(family),
            base: arbitrary_set(g, family),
            exclude: arbitrary_set(g, family),
        }
    }
}

fn covered(set: &PrefixSet, window_start: u128) -> Vec<u128> {
    (0..WINDOW)
        .map(|offset| window_start + offset)
        .filter(|addr| set.contains_addr(*addr))
        .collect()
}

fn to_u128(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u128::from(u32::from(a)),
        IpAddr::V6(a) => u128::from(a),
    }
}

#[quickcheck]
fn normalize_is_idempotent(sample: Sample) -> bool {
    let once = normalize(&sample.base);
    normalize(&once) == once
}

#[quickcheck]
fn normalize_ignores_duplicates(sample: Sample) -> bool {
    let doubled = PrefixSet::from_prefixes(
        sample.base.family(),
        sample.base.iter().rev().chain(sample.base.iter()).copied(),
    )
    .unwrap();
    normalize(&doubled) == normalize(&sample.base)
}

#[quickcheck]
fn normalize_preserves_union(sample: Sample) -> bool {
    covered(&normalize(&sample.base), sample.window_start)
        == covered(&sample.base, sample.window_start)
}

#[quickcheck]
fn normalize_is_disjoint(sample: Sample) -> bool {
    normalize(&sample.base).is_normalized()
}

#[quickcheck]
fn subtract_matches_address_difference(sample: Sample) -> bool {
    let result = subtract(&sample.base, &sample.exclude).unwrap();
    let expected: Vec<u128> = (0..WINDOW)
        .map(|offset| sample.window_start + offset)
        .filter(|a| sample.base.contains_addr(*a) && !sample.exclude.contains_addr(*a))
        .collect();
    result.is_normalized() && covered(&result, sample.window_start) == expected
}

#[quickcheck]
fn expand_is_complete_and_ascending(sample: Sample) -> bool {
    let addresses: Vec<u128> = expand(&sample.base).map(to_u128).collect();
    let total: u128 = normalize(&sample.base)
        .iter()
        .map(|p| p.size().unwrap())
        .sum();
    addresses.len() as u128 == total
        && addresses.windows(2).all(|w| w[0] < w[1])
        && addresses == covered(&sample.base, sample.window_start)
}
