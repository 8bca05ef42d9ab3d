//! Shared resources and helpers for integration tests.

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderValue, Request as HttpRequest, StatusCode};
use axum::Router;
use serde::Serialize;
use tower::ServiceExt;

use rest_dispatch::resource::{DeleteSupported, GetSupported, PostSupported};
use rest_dispatch::response::ResponseError;
use rest_dispatch::{
    Cookie, HandlerResult, HttpServer, Request, Response, RestHandler, Route, ServiceConfig,
    SimpleResponse, StandardResponse,
};

#[derive(Serialize)]
struct Item<'a> {
    id: &'a str,
}

/// `/items/{id}`: GET echoes the id, POST acks the `name` form field,
/// DELETE answers 204 with no response.
pub struct Items;

impl GetSupported for Items {
    fn get(&self, request: &Request) -> HandlerResult {
        let id = request.param("id").unwrap_or_default();
        if id == "missing" {
            let nak: Box<dyn Response> =
                Box::new(SimpleResponse::fail_args(format_args!("item {} not found", id)));
            return (StatusCode::NOT_FOUND, Some(nak));
        }

        let mut response = StandardResponse::new();
        if let Err(e) = response.set_json_body(&Item { id }) {
            let nak: Box<dyn Response> = Box::new(SimpleResponse::fail(e.to_string()));
            return (StatusCode::INTERNAL_SERVER_ERROR, Some(nak));
        }
        (StatusCode::OK, Some(Box::new(response) as Box<dyn Response>))
    }
}

impl PostSupported for Items {
    fn post(&self, request: &Request) -> HandlerResult {
        let name = request.form_value("name").unwrap_or_default();
        let ack: Box<dyn Response> = Box::new(SimpleResponse::ack(name));
        (StatusCode::CREATED, Some(ack))
    }
}

impl DeleteSupported for Items {
    fn delete(&self, _request: &Request) -> HandlerResult {
        (StatusCode::NO_CONTENT, None)
    }
}

rest_dispatch::resource!(Items: Get, Post, Delete);

/// GET returns "testbody" with a cookie and a custom header.
pub struct Decorated;

impl GetSupported for Decorated {
    fn get(&self, _request: &Request) -> HandlerResult {
        let mut response = StandardResponse::new();
        response.set_body("testbody");
        response.set_cookie(Cookie::new("CookieMonster", "").with_domain("monster.cookie.net"));

        let mut headers = HeaderMap::new();
        headers.insert("Test-Header", HeaderValue::from_static("my-value"));
        response.set_headers(headers);

        (StatusCode::OK, Some(Box::new(response) as Box<dyn Response>))
    }
}

rest_dispatch::resource!(Decorated: Get);

/// Response whose body can never be produced.
pub struct Unreadable;

impl Response for Unreadable {
    fn body(&self) -> Result<Bytes, ResponseError> {
        Err(ResponseError::Body("storage offline".into()))
    }

    fn cookie(&self) -> Option<&Cookie> {
        None
    }

    fn headers(&self) -> Option<&HeaderMap> {
        None
    }
}

/// GET always fails to produce its body.
pub struct Broken;

impl GetSupported for Broken {
    fn get(&self, _request: &Request) -> HandlerResult {
        (StatusCode::OK, Some(Box::new(Unreadable) as Box<dyn Response>))
    }
}

rest_dispatch::resource!(Broken: Get);

/// Handler with the standard test routes registered.
pub fn test_handler(config: &ServiceConfig) -> RestHandler {
    let mut handler = RestHandler::with_config(config.dispatch.clone());
    handler.register_route(Route::new(rest_dispatch::Ping, "/ping"));
    handler.register_route(Route::new(Items, "/items/{id}"));
    handler.register_route(Route::new(Decorated, "/decorated/"));
    handler.register_route(Route::new(Broken, "/broken"));
    handler
}

/// Fully layered router with the standard test routes.
pub fn test_router() -> Router {
    let config = ServiceConfig::default();
    let handler = test_handler(&config);
    HttpServer::new(config, handler)
        .expect("test routes are valid")
        .router()
}

/// Send one request through `router` and collect the body.
pub async fn send(router: &Router, request: HttpRequest<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}
