//! NI URI codec.
//!
//! Grammar: `ni://<authority>/<hash-name>;<hex-digest>[?<query>]`
//!
//! The authority may be empty (`ni:///sha-256;...`). When it is not, exactly
//! one `/` separates it from the hash name. Digests are lowercase hex, not the
//! base64url form RFC 6920 uses.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::hash_spec::HashSpec;
use crate::validation::ParseError;

/// Query key marking a salted leaf name.
pub const SALT_QUERY_KEY: &str = "salt";

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Regex::new(
            r"^ni://(?P<authority>[^/;?#]*)/(?P<name>[^/;?#]+);(?P<digest>[0-9A-Fa-f]+)(?:\?(?P<query>.*))?$",
        )
        .expect("invalid regex")
    })
}

/// A named information identifier.
///
/// Two identifiers are equal iff their string forms are equal; ordering is
/// the byte order of the string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ni(String);

impl Ni {
    /// Parses and validates an identifier.
    pub fn parse(value: impl Into<String>) -> Result<Self, ParseError> {
        let s = value.into();
        if !grammar().is_match(&s) {
            return Err(ParseError::new(s));
        }
        Ok(Self(s))
    }

    /// String form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Authority segment, empty when absent.
    pub fn authority(&self) -> &str {
        self.component("authority").unwrap_or_default()
    }

    /// Hash algorithm name.
    pub fn hash_name(&self) -> &str {
        self.component("name").unwrap_or_default()
    }

    /// Hex digest.
    pub fn digest(&self) -> &str {
        self.component("digest").unwrap_or_default()
    }

    /// Query string without the leading `?`, if any.
    pub fn query(&self) -> Option<&str> {
        self.component("query")
    }

    /// Salt token carried in the query, if any.
    pub fn salt(&self) -> Option<&str> {
        self.query()?
            .split('&')
            .find_map(|pair| pair.strip_prefix(SALT_QUERY_KEY)?.strip_prefix('='))
    }

    /// Appends `?<query>` to this identifier.
    ///
    /// Identifiers that already carry a query keep it; the new one is joined
    /// with `&`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the result does not parse back, e.g. when
    /// `query` contains a line break.
    pub fn with_query(&self, query: &str) -> Result<Ni, ParseError> {
        Ni::parse(self.append_query(query))
    }

    fn append_query(&self, query: &str) -> String {
        let sep = if self.query().is_some() { '&' } else { '?' };
        format!("{}{}{}", self.0, sep, query)
    }

    /// Consumes the identifier, returning its string form.
    pub fn into_string(self) -> String {
        self.0
    }

    fn component(&self, group: &str) -> Option<&str> {
        grammar()
            .captures(&self.0)
            .and_then(|caps| caps.name(group))
            .map(|m| m.as_str())
    }
}

impl fmt::Display for Ni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ni {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ni::parse(s)
    }
}

impl TryFrom<String> for Ni {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ni::parse(value)
    }
}

impl From<Ni> for String {
    fn from(value: Ni) -> Self {
        value.0
    }
}

impl AsRef<str> for Ni {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds `ni://<authority>/<hash_name>;<digest_hex>`.
///
/// Callers supply a hex digest; the result is not re-validated.
pub fn encode(digest_hex: &str, hash_name: &str, authority: &str) -> Ni {
    let mut s = String::with_capacity(8 + authority.len() + hash_name.len() + digest_hex.len());
    s.push_str("ni://");
    s.push_str(authority);
    if !authority.ends_with('/') {
        s.push('/');
    }
    s.push_str(hash_name);
    s.push(';');
    s.push_str(digest_hex);
    Ni(s)
}

/// Same as [`encode`] with `?<query>` appended; likewise not re-validated.
pub fn encode_with_query(digest_hex: &str, hash_name: &str, authority: &str, query: &str) -> Ni {
    Ni(encode(digest_hex, hash_name, authority).append_query(query))
}

/// Extracts the hex digest from an NI string.
///
/// # Errors
///
/// Returns [`ParseError`] when `ni` does not match the grammar.
pub fn digest_of(ni: &str) -> Result<String, ParseError> {
    Ni::parse(ni).map(|ni| ni.digest().to_string())
}

/// Names a text: UTF-8 bytes, hashed with `spec`, hex-encoded.
pub fn hash_text(text: &str, spec: &HashSpec) -> Ni {
    let digest = spec.digest(text.as_bytes());
    encode(&hex::encode(digest), spec.hash_name(), spec.authority())
}
