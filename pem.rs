//! PEM-adjacent marshal-text helper: wraps binary key bytes in a block
//! whose type label is `<SCHEME NAME> PUBLIC KEY` or `<SCHEME NAME>
//! PRIVATE KEY`, uppercased. The codec itself (full PEM RFC compliance) is
//! out of this library's scope; this is the minimal round-trip a caller
//! needs to get keys in and out of text form.

extern crate alloc;
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use base64::{engine::general_purpose::STANDARD, Engine};

use hpq_core::{Error, Result};

const LINE_WIDTH: usize = 64;

/// The two PEM label kinds a key's marshal-text path can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

impl KeyKind {
    fn label(self) -> &'static str {
        match self {
            KeyKind::Public => "PUBLIC KEY",
            KeyKind::Private => "PRIVATE KEY",
        }
    }
}

/// Wrap `data` in a `-----BEGIN <SCHEME NAME> PUBLIC|PRIVATE KEY-----` PEM
/// block. `scheme_name` is upper-cased as part of the label.
pub fn marshal_text(scheme_name: &str, kind: KeyKind, data: &[u8]) -> String {
    let label = format!("{} {}", scheme_name.to_uppercase(), kind.label());
    let body = STANDARD.encode(data);

    let mut out = String::new();
    out.push_str(&format!("-----BEGIN {label}-----\n"));
    for chunk in body.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(core::str::from_utf8(chunk).expect("base64 output is ascii"));
        out.push('\n');
    }
    out.push_str(&format!("-----END {label}-----\n"));
    out
}

/// Parse a block produced by [`marshal_text`]. Returns the scheme name (as
/// it appeared before the `PUBLIC KEY`/`PRIVATE KEY` suffix, uppercased),
/// the key kind, and the decoded bytes.
pub fn unmarshal_text(text: &str) -> Result<(String, KeyKind, Vec<u8>)> {
    let text = text.trim();
    let mut lines = text.lines();

    let header = lines.next().ok_or(Error::Uninitialized)?;
    let label = header
        .strip_prefix("-----BEGIN ")
        .and_then(|s| s.strip_suffix("-----"))
        .ok_or(Error::Uninitialized)?;

    let (scheme_name, kind) = if let Some(prefix) = label.strip_suffix(" PUBLIC KEY") {
        (prefix, KeyKind::Public)
    } else if let Some(prefix) = label.strip_suffix(" PRIVATE KEY") {
        (prefix, KeyKind::Private)
    } else {
        return Err(Error::Uninitialized);
    };

    let footer = format!("-----END {label}-----");
    let mut body = String::new();
    let mut saw_footer = false;
    for line in lines {
        if line == footer {
            saw_footer = true;
            break;
        }
        body.push_str(line);
    }
    if !saw_footer {
        return Err(Error::Uninitialized);
    }

    let data = STANDARD
        .decode(body.as_bytes())
        .map_err(|_| Error::Uninitialized)?;
    Ok((scheme_name.to_string(), kind, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_text() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let text = marshal_text("x25519", KeyKind::Public, &data);
        assert!(text.starts_with("-----BEGIN X25519 PUBLIC KEY-----\n"));
        let (scheme, kind, decoded) = unmarshal_text(&text).unwrap();
        assert_eq!(scheme, "X25519");
        assert_eq!(kind, KeyKind::Public);
        assert_eq!(decoded, data);
    }

    #[test]
    fn label_distinguishes_public_and_private() {
        let data = [0xAAu8; 32];
        let text = marshal_text("ed25519", KeyKind::Private, &data);
        assert!(text.contains("ED25519 PRIVATE KEY"));
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(unmarshal_text("not a pem block").is_err());
    }

    #[test]
    fn wraps_long_bodies_at_line_width() {
        let data = [7u8; 200];
        let text = marshal_text("ml-kem-768", KeyKind::Public, &data);
        for line in text.lines().filter(|l| !l.starts_with("-----")) {
            assert!(line.len() <= LINE_WIDTH);
        }
    }
}
