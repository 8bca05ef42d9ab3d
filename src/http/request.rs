//! Transport-agnostic request handed to resource handlers.
//!
//! # Responsibilities
//! - Carry method, URI, headers, buffered body and path parameters
//! - Expose parsed form values once the dispatcher has parsed them
//!
//! # Design Decisions
//! - The body is fully buffered before dispatch; handlers run synchronously
//! - Form parsing is an explicit step so its failure can become a 400

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use std::collections::HashMap;

use super::form::{parse_request_form, Form, FormError};

/// An incoming request as seen by a resource.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    form: Form,
    post_form: Form,
}

impl Request {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            params: HashMap::new(),
            form: Form::new(),
            post_form: Form::new(),
        }
    }

    /// Request for a method and a literal URI, chainable with the `with_*`
    /// setters. Panics if `uri` is not a valid URI, like `Uri::from_static`.
    pub fn from_static(method: Method, uri: &'static str) -> Self {
        Self::new(method, Uri::from_static(uri))
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Path parameter captured by the router, e.g. `id` in `/items/{id}`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Body and query values. Empty until [`Request::parse_form`] ran.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Body values only.
    pub fn post_form(&self) -> &Form {
        &self.post_form
    }

    /// First form value for `key`.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form.get(key)
    }

    /// Parse query and urlencoded body into [`Request::form`].
    pub fn parse_form(&mut self, max_body_bytes: usize) -> Result<(), FormError> {
        let parsed = parse_request_form(
            &self.method,
            self.uri.query(),
            &self.headers,
            &self.body,
            max_body_bytes,
        )?;
        self.form = parsed.form;
        self.post_form = parsed.post_form;
        Ok(())
    }
}
