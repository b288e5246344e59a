//! Named datatype validators (spec §2 "Datatype registry", §9 design note
//! "Datatype validator interface"). Implements `recli_core::Validate` so
//! the grammar engine can delegate literal matching to a datatype name
//! without depending on this crate.
//!
//! Grounded on `examples/original_source/src/datatypes.c`
//! (`recli_datatypes[]`), one function per entry.

use recli_core::validate::{Validate, ValidateOutcome};

fn parse_boolean(word: &str) -> bool {
    matches!(word, "on" | "off" | "1" | "0")
}

fn parse_integer(word: &str) -> bool {
    !word.is_empty() && word.parse::<i64>().is_ok()
}

fn parse_ipv4addr(word: &str) -> bool {
    let parts: Vec<&str> = word.split('.').collect();
    parts.len() == 4 && parts.iter().all(|p| p.parse::<u16>().is_ok_and(|n| n <= 255))
}

fn parse_ipprefix(word: &str) -> bool {
    match word.split_once('/') {
        Some((addr, bits)) => {
            parse_ipv4addr(addr) && bits.parse::<u8>().is_ok_and(|b| b <= 32)
        }
        None => false,
    }
}

fn parse_ipv6addr(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c == ':' || c.is_ascii_hexdigit())
}

fn parse_ipaddr(word: &str) -> bool {
    parse_ipv4addr(word) || parse_ipv6addr(word)
}

fn parse_macaddr(word: &str) -> bool {
    let parts: Vec<&str> = word.split(':').collect();
    parts.len() == 6 && parts.iter().all(|p| u8::from_str_radix(p, 16).is_ok())
}

/// One label of a hostname: 1-63 chars, alphanumeric or `-`, no leading
/// `-`. Grounded on `datatypes.c::parse_label`.
fn valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn parse_hostname(word: &str) -> bool {
    if word == "." {
        return true;
    }
    if word.len() > 253 {
        return false;
    }
    word.split('.').all(valid_label)
}

fn parse_string(word: &str) -> bool {
    match word.chars().next() {
        Some(q @ ('"' | '\'' | '`')) => {
            crate::lexer::tokenize(word).is_ok_and(|v| v.len() == 1) && word.ends_with(q)
        }
        _ => true,
    }
}

fn parse_quoted(word: &str, quote: char) -> bool {
    word.starts_with(quote) && parse_string(word)
}

/// Validate a single word against one of the twelve built-in datatypes
/// (spec §2). Unknown names are rejected by the grammar-text parser
/// before this is ever consulted.
pub fn validate_builtin(name: &str, word: &str) -> bool {
    match name {
        "BOOLEAN" => parse_boolean(word),
        "INTEGER" => parse_integer(word),
        "IPADDR" => parse_ipaddr(word),
        "IPV4ADDR" => parse_ipv4addr(word),
        "IPV6ADDR" => parse_ipv6addr(word),
        "IPPREFIX" => parse_ipprefix(word),
        "MACADDR" => parse_macaddr(word),
        "HOSTNAME" => parse_hostname(word),
        "STRING" => parse_string(word),
        "DQSTRING" => parse_quoted(word, '"'),
        "SQSTRING" => parse_quoted(word, '\''),
        "BQSTRING" => parse_quoted(word, '`'),
        _ => false,
    }
}

/// The twelve built-in datatype names, in registration order (spec §2).
pub const BUILTIN_NAMES: &[&str] = &[
    "BOOLEAN", "INTEGER", "IPADDR", "IPV4ADDR", "IPV6ADDR", "IPPREFIX", "MACADDR", "HOSTNAME",
    "STRING", "DQSTRING", "SQSTRING", "BQSTRING",
];

/// A [`Validate`] backed by the built-in registry. The core engine never
/// sees concrete parser functions, only this object through a trait
/// reference - the seam documented in `recli_core::validate`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatatypeRegistry;

impl DatatypeRegistry {
    pub fn is_known(&self, name: &str) -> bool {
        BUILTIN_NAMES.contains(&name)
    }
}

impl Validate for DatatypeRegistry {
    fn validate(&self, datatype: &str, word: &str) -> ValidateOutcome {
        if validate_builtin(datatype, word) {
            ValidateOutcome::Valid
        } else {
            ValidateOutcome::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_accepts_on_off_and_digits() {
        assert!(parse_boolean("on"));
        assert!(parse_boolean("off"));
        assert!(parse_boolean("1"));
        assert!(!parse_boolean("yes"));
    }

    #[test]
    fn ipv4_rejects_out_of_range_octet() {
        assert!(parse_ipv4addr("10.0.0.1"));
        assert!(!parse_ipv4addr("10.0.0.256"));
        assert!(!parse_ipv4addr("10.0.0"));
    }

    #[test]
    fn ipprefix_requires_mask() {
        assert!(parse_ipprefix("10.0.0.0/24"));
        assert!(!parse_ipprefix("10.0.0.0/33"));
        assert!(!parse_ipprefix("10.0.0.0"));
    }

    #[test]
    fn macaddr_requires_six_hex_groups() {
        assert!(parse_macaddr("00:11:22:33:44:55"));
        assert!(!parse_macaddr("00:11:22:33:44"));
    }

    #[test]
    fn hostname_rejects_leading_hyphen() {
        assert!(parse_hostname("example.com"));
        assert!(!parse_hostname("-bad.com"));
    }

    #[test]
    fn registry_reports_unknown_datatypes() {
        let reg = DatatypeRegistry;
        assert!(reg.is_known("IPADDR"));
        assert!(!reg.is_known("NOPE"));
        assert_eq!(reg.validate("NOPE", "x"), ValidateOutcome::Invalid);
    }
}
