//! Liveness resource.

use axum::http::StatusCode;

use super::{GetSupported, HandlerResult};
use crate::http::Request;
use crate::response::{Response, SimpleResponse};

/// Answers GET with `{"status":"ACK"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ping;

impl GetSupported for Ping {
    fn get(&self, _request: &Request) -> HandlerResult {
        let response: Box<dyn Response> = Box::new(SimpleResponse::ack(""));
        (StatusCode::OK, Some(response))
    }
}

crate::resource!(Ping: Get);
