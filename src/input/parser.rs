//! Text to [`Prefix`] conversion.
//!
//! Accepts `addr/len` or a bare address. Host bits set in the address are
//! masked off, so `10.0.0.5/24` parses as `10.0.0.0/24`. An IPv6 address may
//! carry a zone (`fe80::1%eth0`); the zone plays no part in set operations.

use crate::error::CidrError;
use crate::models::{format_address, AddressFamily, Notation, Prefix};
use regex::Regex;
use std::sync::OnceLock;

/// Grammar of the `/len` suffix. A sign is matched only to report it as out of range.
static LENGTH_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_length_regex() -> &'static Regex {
    LENGTH_REGEX.get_or_init(|| Regex::new(r"^(-?)([0-9]+)$").expect("Invalid Regex"))
}

/// What to do with a token that has no `/len` suffix.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BareAddress {
    /// Treat it as a single-address prefix (`/32` or `/128`).
    #[default]
    HostPrefix,
    /// Fail with [`CidrError::MissingPrefixLength`].
    Reject,
}

/// Parser settings.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    pub bare_address: BareAddress,
}

/// A parsed token and the parts of its text a [`Prefix`] does not keep.
struct ParsedToken<'t> {
    prefix: Prefix,
    length_present: bool,
    zone: Option<&'t str>,
}

/// Converts CIDR tokens into prefixes.
#[derive(Debug, Copy, Clone, Default)]
pub struct PrefixParser {
    config: ParserConfig,
}

impl PrefixParser {
    pub fn new(config: ParserConfig) -> PrefixParser {
        PrefixParser { config }
    }

    /// Parse one token into a prefix of the family its address belongs to.
    ///
    /// The token is trimmed first.
    pub fn parse(&self, token: &str) -> Result<Prefix, CidrError> {
        self.parse_token(token).map(|parsed| parsed.prefix)
    }

    /// Canonical text of a token.
    ///
    /// Network bits are masked and IPv6 is written in `notation`. A bare
    /// address stays bare and a zone is kept, e.g. `::0` becomes `::`,
    /// `::FF/2` becomes `::/2` and `FE80::1%eth0` becomes `fe80::1%eth0`.
    pub fn canonicalize(&self, token: &str, notation: Notation) -> Result<String, CidrError> {
        let parsed = self.parse_token(token)?;
        let prefix = parsed.prefix;
        let mut text = format_address(prefix.family(), prefix.first(), notation);
        if let Some(zone) = parsed.zone {
            text.push('%');
            text.push_str(zone);
        }
        if parsed.length_present {
            text.push_str(&format!("/{}", prefix.length()));
        }
        Ok(text)
    }

    fn parse_token<'t>(&self, token: &'t str) -> Result<ParsedToken<'t>, CidrError> {
        let token = token.trim();
        let unparsable = || CidrError::UnparsableAddress {
            token: token.to_string(),
        };

        let (addr_text, length_text) = match token.split_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (token, None),
        };
        let (addr_text, zone) = match addr_text.split_once('%') {
            Some((addr, zone)) => (addr, Some(zone)),
            None => (addr_text, None),
        };
        let (family, addr) = AddressFamily::detect(addr_text).ok_or_else(unparsable)?;
        if let Some(zone) = zone {
            let valid_zone = !zone.is_empty()
                && zone
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
            if family != AddressFamily::V6 || !valid_zone {
                return Err(unparsable());
            }
        }

        let length = match length_text {
            Some(text) => self.parse_length(token, text, family)?,
            None => match self.config.bare_address {
                BareAddress::HostPrefix => family.width(),
                BareAddress::Reject => {
                    return Err(CidrError::MissingPrefixLength {
                        token: token.to_string(),
                    })
                }
            },
        };

        log::trace!("parsed {token} as {family} {addr:#x}/{length}");
        Ok(ParsedToken {
            prefix: Prefix::new(family, addr, length)?,
            length_present: length_text.is_some(),
            zone,
        })
    }

    fn parse_length(&self, token: &str, text: &str, family: AddressFamily) -> Result<u8, CidrError> {
        let caps = get_length_regex()
            .captures(text)
            .ok_or_else(|| CidrError::UnparsableAddress {
                token: token.to_string(),
            })?;
        let out_of_range = || CidrError::PrefixLengthOutOfRange {
            token: token.to_string(),
            length: text.to_string(),
            max: family.width(),
        };

        if !caps[1].is_empty() {
            return Err(out_of_range());
        }
        match caps[2].parse::<u8>() {
            Ok(length) if length <= family.width() => Ok(length),
            _ => Err(out_of_range()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(token: &str) -> Result<Prefix, CidrError> {
        PrefixParser::default().parse(token)
    }

    #[test]
    fn test_parse_ipv4_and_ipv6() {
        let prefix = parse("10.0.0.0/24").unwrap();
        assert_eq!(prefix.family(), AddressFamily::V4);
        assert_eq!(prefix.length(), 24);

        let prefix = parse("2001:db8::/32").unwrap();
        assert_eq!(prefix.family(), AddressFamily::V6);
        assert_eq!(prefix.to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_parse_masks_host_bits() {
        assert_eq!(parse("10.0.0.5/24").unwrap().to_string(), "10.0.0.0/24");
        assert_eq!(parse("::FF/2").unwrap().to_string(), "::/2");
        assert_eq!(
            parse("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/0")
                .unwrap()
                .to_string(),
            "::/0"
        );
    }

    #[test]
    fn test_parse_bare_address_is_host_prefix() {
        assert_eq!(parse("1.2.3.4").unwrap().to_string(), "1.2.3.4/32");
        assert_eq!(parse("  ::1 ").unwrap().to_string(), "::1/128");
    }

    #[test]
    fn test_parse_bare_address_rejected_when_configured() {
        let parser = PrefixParser::new(ParserConfig {
            bare_address: BareAddress::Reject,
        });
        assert_eq!(
            parser.parse("1.2.3.4").unwrap_err(),
            CidrError::MissingPrefixLength {
                token: "1.2.3.4".to_string()
            }
        );
        assert!(parser.parse("1.2.3.4/32").is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("banana").unwrap_err(),
            CidrError::UnparsableAddress {
                token: "banana".to_string()
            }
        );
        assert!(matches!(
            parse("10.0.0/8"),
            Err(CidrError::UnparsableAddress { .. })
        ));
        assert!(matches!(
            parse("10.0.0.0/abc"),
            Err(CidrError::UnparsableAddress { .. })
        ));
        assert!(matches!(
            parse("10.0.0.0/"),
            Err(CidrError::UnparsableAddress { .. })
        ));
        assert!(matches!(
            parse("10.0.0.0/8/8"),
            Err(CidrError::UnparsableAddress { .. })
        ));
        assert_eq!(
            parse("10.0.0.0/33").unwrap_err(),
            CidrError::PrefixLengthOutOfRange {
                token: "10.0.0.0/33".to_string(),
                length: "33".to_string(),
                max: 32
            }
        );
        assert!(matches!(
            parse("10.0.0.0/-1"),
            Err(CidrError::PrefixLengthOutOfRange { .. })
        ));
        assert!(matches!(
            parse("::/129"),
            Err(CidrError::PrefixLengthOutOfRange { max: 128, .. })
        ));
        assert!(matches!(
            parse("::/99999999999999999999"),
            Err(CidrError::PrefixLengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_ipv6_zone() {
        assert_eq!(parse("fe80::%int").unwrap(), parse("fe80::").unwrap());
        assert_eq!(parse("fe80::1%eth0/64").unwrap().to_string(), "fe80::/64");
        assert_eq!(parse("2001:db8::%eth2").unwrap().length(), 128);
        for token in ["2001:db8::/128%eth2", "10.0.0.1%eth0", "fe80::%", "fe80::%a%b/64"] {
            assert!(
                matches!(parse(token), Err(CidrError::UnparsableAddress { .. })),
                "{token} should not parse"
            );
        }
    }

    #[test]
    fn test_canonicalize() {
        let parser = PrefixParser::default();
        let canonical = |token: &str| parser.canonicalize(token, Notation::default()).unwrap();
        assert_eq!(canonical("::0"), "::");
        assert_eq!(canonical("::0/0"), "::/0");
        assert_eq!(canonical("::0/128"), "::/128");
        assert_eq!(canonical("::FF"), "::ff");
        assert_eq!(canonical("::FF/2"), "::/2");
        assert_eq!(canonical("0:0:0:0:0:0:0:0/64"), "::/64");
        assert_eq!(canonical("10.1.2.3/8"), "10.0.0.0/8");
        assert_eq!(canonical("10.1.2.3"), "10.1.2.3");
        assert_eq!(canonical("FE80::1%eth0"), "fe80::1%eth0");
        assert_eq!(canonical("fe80::1%eth0/64"), "fe80::%eth0/64");
    }

    #[test]
    fn test_canonicalize_notation() {
        let parser = PrefixParser::default();
        let uncompressed = Notation {
            compress: false,
            hexify: false,
        };
        let hexify = Notation {
            compress: true,
            hexify: true,
        };
        assert_eq!(parser.canonicalize("::1", uncompressed).unwrap(), "0:0:0:0:0:0:0:1");
        assert_eq!(
            parser.canonicalize("1::/64", uncompressed).unwrap(),
            "1:0:0:0:0:0:0:0/64"
        );
        assert_eq!(parser.canonicalize("1.2.3.4/24", uncompressed).unwrap(), "1.2.3.0/24");
        assert_eq!(
            parser.canonicalize("::FFFF:34.90.242.162", hexify).unwrap(),
            "::ffff:225a:f2a2"
        );
        assert_eq!(
            parser.canonicalize("::FFFF:34.90.242.162/64", hexify).unwrap(),
            "::/64"
        );
    }
}
