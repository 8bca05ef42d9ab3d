//! Binding registered routes into an axum `Router`.
//!
//! # Responsibilities
//! - Register every route pattern with axum
//! - Buffer the body and capture path params before dispatch
//! - Answer the slash-toggled twin of a pattern with a redirect
//!
//! # Design Decisions
//! - The handler is frozen in an `Arc` once bound; no locking while serving
//! - The first registration of a pattern wins, later duplicates are skipped
//! - Patterns that differ only in parameter names count as duplicates
//! - Malformed patterns are rejected up front instead of panicking in axum

use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use super::{RestHandler, RouteError};
use crate::http::{Reply, Request};
use crate::observability::metrics;

impl RestHandler {
    /// Register every route on `router`, or on a fresh router when `None`.
    ///
    /// Paths already routed on `router` must not overlap the registered
    /// patterns; axum panics on such a conflict.
    pub fn into_router(self, router: Option<Router>) -> Result<Router, RouteError> {
        for route in self.routes() {
            validate_pattern(route.pattern())?;
        }

        let mut router = router.unwrap_or_default();
        let handler = Arc::new(self);
        let mut bound: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();

        for (index, route) in handler.routes().iter().enumerate() {
            let pattern = route.pattern();
            if !seen.insert(pattern_shape(pattern)) {
                tracing::warn!(pattern = %pattern, "Skipping duplicate route pattern");
                continue;
            }

            let shared = handler.clone();
            router = router.route(
                pattern,
                any(move |request: axum::extract::Request| serve_route(shared.clone(), index, request)),
            );
            bound.push(pattern);
            tracing::debug!(pattern = %pattern, "Route bound");
        }

        if handler.config().strict_slash {
            for pattern in bound.iter().copied() {
                let Some(twin) = slash_twin(pattern) else {
                    continue;
                };
                if seen.contains(&pattern_shape(&twin)) {
                    continue;
                }
                router = router.route(&twin, any(redirect_slash));
            }
        }

        Ok(router)
    }
}

/// Reject patterns the axum router would refuse to insert.
fn validate_pattern(pattern: &str) -> Result<(), RouteError> {
    let Some(path) = pattern.strip_prefix('/') else {
        return Err(RouteError::InvalidPattern(pattern.to_string()));
    };

    let invalid = |segment: &str| RouteError::InvalidSegment {
        pattern: pattern.to_string(),
        segment: segment.to_string(),
    };

    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().copied().enumerate() {
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err(invalid(segment));
        }

        let unescaped = segment.replace("{{", "").replace("}}", "");
        let opens = unescaped.matches('{').count();
        let closes = unescaped.matches('}').count();
        if opens != closes || opens > 1 {
            return Err(invalid(segment));
        }
        if opens == 0 {
            continue;
        }

        let (Some(start), Some(end)) = (unescaped.find('{'), unescaped.find('}')) else {
            return Err(invalid(segment));
        };
        if end < start {
            return Err(invalid(segment));
        }
        let name = &unescaped[start + 1..end];
        match name.strip_prefix('*') {
            Some(rest) => {
                let whole = start == 0 && end == unescaped.len() - 1;
                if rest.is_empty() || !whole || i != last {
                    return Err(invalid(segment));
                }
            }
            None if name.is_empty() => return Err(invalid(segment)),
            None => {}
        }
    }

    Ok(())
}

/// Pattern with parameter names erased: `/items/{id}` → `/items/{}`.
fn pattern_shape(pattern: &str) -> String {
    let mut shape = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                shape.push_str("{{");
            }
            '{' => {
                let catch_all = chars.peek() == Some(&'*');
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                }
                shape.push_str(if catch_all { "{*}" } else { "{}" });
            }
            _ => shape.push(c),
        }
    }
    shape
}

/// `/a/` ↔ `/a`, or `None` for the root and catch-all patterns.
fn slash_twin(pattern: &str) -> Option<String> {
    if pattern == "/" || pattern.contains("{*") {
        return None;
    }
    match pattern.strip_suffix('/') {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(format!("{}/", pattern)),
    }
}

async fn serve_route(handler: Arc<RestHandler>, index: usize, request: axum::extract::Request) -> Reply {
    let start = Instant::now();
    let (mut parts, body) = request.into_parts();

    let params: HashMap<String, String> = match RawPathParams::from_request_parts(&mut parts, &()).await {
        Ok(raw) => raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        Err(_) => HashMap::new(),
    };

    let buffered = axum::body::to_bytes(body, handler.config().max_body_bytes).await;

    let route = &handler.routes()[index];
    let method = parts.method.clone();
    let reply = match buffered {
        Ok(bytes) => {
            let request = Request::new(parts.method, parts.uri)
                .with_headers(parts.headers)
                .with_body(bytes)
                .with_params(params);
            handler.handle(route, request)
        }
        Err(e) => {
            tracing::debug!(pattern = %route.pattern(), error = %e, "Failed to read request body");
            let mut reply = Reply::new(StatusCode::BAD_REQUEST);
            if handler.config().allow_any_origin {
                reply
                    .headers_mut()
                    .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
            reply
        }
    };

    metrics::record_request(method.as_str(), reply.status().as_u16(), route.pattern(), start);
    reply
}

async fn redirect_slash(uri: Uri) -> Response {
    let path = uri.path();
    let mut target = match path.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => format!("{}/", path),
    };
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
    match HeaderValue::from_str(&target) {
        Ok(location) => {
            response.headers_mut().insert(header::LOCATION, location);
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Cannot build redirect location");
        }
    }
    response
}
