//! Route storage and the per-request dispatch pipeline.
//!
//! # Responsibilities
//! - Keep the ordered route list
//! - Resolve the verb handler for a route's resource
//! - Run the handler and turn its result into a [`Reply`]
//! - Tag successful GET bodies with validators and answer 304 on match
//!
//! # Design Decisions
//! - Every gate writes a fixed status with an empty body and stops
//! - Handler statuses are passed through untouched, 4xx/5xx only get logged
//! - Response headers are joined per name and set once (no appending)

use axum::http::{header, HeaderValue, Method, StatusCode};

use super::cache;
use super::route::Route;
use crate::config::DispatchConfig;
use crate::http::{Reply, Request};
use crate::resource::resolve;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Capability dispatcher over an ordered list of routes.
#[derive(Debug, Default)]
pub struct RestHandler {
    routes: Vec<Route>,
    config: DispatchConfig,
}

impl RestHandler {
    /// Create a handler with default dispatch settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            routes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Append a route.
    pub fn register_route(&mut self, route: Route) {
        tracing::debug!(pattern = %route.pattern(), "Route registered");
        self.routes.push(route);
    }

    /// Replace the whole route list.
    pub fn set_routes(&mut self, routes: Vec<Route>) {
        tracing::debug!(count = routes.len(), "Route list replaced");
        self.routes = routes;
    }

    /// Run the dispatch pipeline for one request against `route`.
    pub fn handle(&self, route: &Route, mut request: Request) -> Reply {
        let mut reply = Reply::new(StatusCode::OK);
        if self.config.allow_any_origin {
            reply
                .headers_mut()
                .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        }

        if let Err(e) = request.parse_form(self.config.max_form_bytes) {
            tracing::debug!(pattern = %route.pattern(), error = %e, "Malformed form data");
            reply.set_status(StatusCode::BAD_REQUEST);
            return reply;
        }

        let Some(handler) = resolve(request.method(), route.resource()) else {
            tracing::debug!(
                pattern = %route.pattern(),
                method = %request.method(),
                "Method not supported by resource"
            );
            reply.set_status(StatusCode::METHOD_NOT_ALLOWED);
            return reply;
        };

        let (code, response) = handler(&request);
        if code.is_client_error() || code.is_server_error() {
            tracing::warn!(
                pattern = %route.pattern(),
                method = %request.method(),
                status = code.as_u16(),
                "Handler reported failure"
            );
        }
        reply.set_status(code);

        let Some(response) = response else {
            return reply;
        };

        let body = match response.body() {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(pattern = %route.pattern(), error = %e, "Failed to produce response body");
                reply.set_status(StatusCode::INTERNAL_SERVER_ERROR);
                return reply;
            }
        };

        if *request.method() == Method::GET && code == StatusCode::OK {
            let etag = cache::etag(&body);
            reply
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static(cache::CACHE_CONTROL));
            if let Ok(value) = HeaderValue::from_str(&etag) {
                reply.headers_mut().insert(header::ETAG, value);
            }

            let presented = request
                .headers()
                .get(header::IF_NONE_MATCH)
                .map(HeaderValue::as_bytes);
            if cache::matches(presented, &etag) {
                reply.set_status(StatusCode::NOT_MODIFIED);
                return reply;
            }
        }

        // Written before the handler's headers so a `Set-Cookie` there overrides it.
        if let Some(cookie) = response.cookie() {
            if !cookie.is_valid_name() {
                tracing::warn!(cookie = %cookie.name, "Dropping cookie with invalid name");
            } else {
                match HeaderValue::from_str(&cookie.to_header_value()) {
                    Ok(value) => {
                        reply.headers_mut().insert(header::SET_COOKIE, value);
                    }
                    Err(e) => {
                        tracing::warn!(cookie = %cookie.name, error = %e, "Dropping unencodable cookie");
                    }
                }
            }
        }

        if let Some(headers) = response.headers() {
            for name in headers.keys() {
                let mut joined = Vec::new();
                for (i, value) in headers.get_all(name).iter().enumerate() {
                    if i > 0 {
                        joined.extend_from_slice(b", ");
                    }
                    joined.extend_from_slice(value.as_bytes());
                }
                match HeaderValue::from_bytes(&joined) {
                    Ok(value) => {
                        reply.headers_mut().insert(name.clone(), value);
                    }
                    Err(e) => {
                        tracing::warn!(header = %name, error = %e, "Skipping invalid response header");
                    }
                }
            }
        }

        reply
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        reply.set_body(body);
        reply
    }
}
