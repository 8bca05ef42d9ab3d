//! Response cookies rendered as a single `Set-Cookie` value.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// A cookie a handler wants set on the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<Duration>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Cookie names must be non-empty RFC 7230 tokens.
    pub fn is_valid_name(&self) -> bool {
        !self.name.is_empty() && self.name.bytes().all(is_token_byte)
    }

    /// Render the `Set-Cookie` header value.
    ///
    /// Leading dots in the domain are stripped, and values containing a
    /// space or comma are quoted.
    pub fn to_header_value(&self) -> String {
        let mut out = format!("{}={}", self.name, quote_value(&self.value));

        if let Some(path) = &self.path {
            out.push_str(&format!("; Path={}", path));
        }

        if let Some(domain) = &self.domain {
            let domain = domain.trim_start_matches('.');
            if !domain.is_empty() {
                out.push_str(&format!("; Domain={}", domain));
            }
        }

        if let Some(expires) = &self.expires {
            out.push_str(&format!("; Expires={}", expires.format("%a, %d %b %Y %H:%M:%S GMT")));
        }

        if let Some(max_age) = &self.max_age {
            out.push_str(&format!("; Max-Age={}", max_age.as_secs()));
        }

        if self.http_only {
            out.push_str("; HttpOnly");
        }

        if self.secure {
            out.push_str("; Secure");
        }

        if let Some(same_site) = &self.same_site {
            out.push_str(&format!("; SameSite={}", same_site));
        }

        out
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn quote_value(value: &str) -> String {
    if value.contains(' ') || value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
