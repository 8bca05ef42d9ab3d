//! Strict `application/x-www-form-urlencoded` parsing.
//!
//! # Responsibilities
//! - Parse the query string and urlencoded request bodies
//! - Reject malformed percent escapes and `;` separators
//! - Enforce a body size ceiling
//!
//! # Design Decisions
//! - Validation is done here; decoding is delegated to `url::form_urlencoded`
//! - Values keep their arrival order per key
//! - Non-form bodies (JSON, octet streams, multipart) are left untouched

use axum::http::{header, HeaderMap, Method};
use std::collections::HashMap;

/// Errors raised while parsing form data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid percent escape in {0:?}")]
    InvalidEscape(String),

    #[error("invalid semicolon separator in {0:?}")]
    Semicolon(String),

    #[error("form body of {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("malformed content type {0:?}")]
    ContentType(String),
}

/// Multimap of decoded form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: HashMap<String, Vec<String>>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an urlencoded string such as `a=1&b=two+words`.
    pub fn parse(input: &str) -> Result<Self, FormError> {
        let mut form = Form::new();
        form.extend_from(input)?;
        Ok(form)
    }

    fn extend_from(&mut self, input: &str) -> Result<(), FormError> {
        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }
            if pair.contains(';') {
                return Err(FormError::Semicolon(pair.to_string()));
            }
            if !has_valid_escapes(pair) {
                return Err(FormError::InvalidEscape(pair.to_string()));
            }
            for (key, value) in url::form_urlencoded::parse(pair.as_bytes()) {
                self.append(key.into_owned(), value.into_owned());
            }
        }
        Ok(())
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append every value of `other` after the existing ones.
    fn merge(&mut self, other: &Form) {
        for (key, values) in &other.values {
            self.values
                .entry(key.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }
}

/// Forms extracted from a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedForm {
    /// Body values followed by query values.
    pub form: Form,
    /// Body values only.
    pub post_form: Form,
}

/// Parse the query string and, for POST/PUT/PATCH with an urlencoded
/// content type, the body.
pub fn parse_request_form(
    method: &Method,
    query: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
    max_body_bytes: usize,
) -> Result<ParsedForm, FormError> {
    let mut post_form = Form::new();

    if *method == Method::POST || *method == Method::PUT || *method == Method::PATCH {
        if let Some(media_type) = media_type(headers)? {
            if media_type == "application/x-www-form-urlencoded" {
                if body.len() > max_body_bytes {
                    return Err(FormError::TooLarge {
                        size: body.len(),
                        limit: max_body_bytes,
                    });
                }
                post_form.extend_from(&String::from_utf8_lossy(body))?;
            }
        }
    }

    let query_form = match query {
        Some(q) => Form::parse(q)?,
        None => Form::new(),
    };

    let mut form = post_form.clone();
    form.merge(&query_form);

    Ok(ParsedForm { form, post_form })
}

/// Lowercased media type of the request, without parameters.
fn media_type(headers: &HeaderMap) -> Result<Option<String>, FormError> {
    let Some(raw) = headers.get(header::CONTENT_TYPE) else {
        return Ok(None);
    };
    let raw = raw
        .to_str()
        .map_err(|_| FormError::ContentType(String::from_utf8_lossy(raw.as_bytes()).into_owned()))?;

    let essence = raw.split(';').next().unwrap_or_default().trim();
    let valid = essence
        .split_once('/')
        .map(|(kind, sub)| is_token(kind) && is_token(sub))
        .unwrap_or(false);
    if !valid {
        return Err(FormError::ContentType(raw.to_string()));
    }

    Ok(Some(essence.to_ascii_lowercase()))
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let ok = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !ok {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
