//! Resources and their per-verb capabilities.
//!
//! # Data Flow
//! ```text
//! (Method, &dyn Resource)
//!     → resolve() probes the one capability matching the method
//!     → Some(Handler) if the resource implements it, None otherwise
//! ```
//!
//! # Design Decisions
//! - One single-method trait per verb; no shared base behaviour
//! - `Resource` only exposes capability probes, all defaulting to `None`
//! - The `resource!` macro wires the probes for the implemented verbs
//! - Unknown methods resolve to `None`, never panic

pub mod ping;

use axum::http::{Method, StatusCode};
use std::any::Any;

use crate::http::Request;
use crate::response::Response;

pub use ping::Ping;

/// What every handler returns: a status and an optional response.
pub type HandlerResult = (StatusCode, Option<Box<dyn Response>>);

/// A resolved capability, ready to be invoked with a request.
pub type Handler<'a> = Box<dyn Fn(&Request) -> HandlerResult + 'a>;

/// Resources that accept GET.
pub trait GetSupported {
    fn get(&self, request: &Request) -> HandlerResult;
}

/// Resources that accept POST.
pub trait PostSupported {
    fn post(&self, request: &Request) -> HandlerResult;
}

/// Resources that accept PUT.
pub trait PutSupported {
    fn put(&self, request: &Request) -> HandlerResult;
}

/// Resources that accept DELETE.
pub trait DeleteSupported {
    fn delete(&self, request: &Request) -> HandlerResult;
}

/// Resources that accept HEAD.
pub trait HeadSupported {
    fn head(&self, request: &Request) -> HandlerResult;
}

/// Resources that accept PATCH.
pub trait PatchSupported {
    fn patch(&self, request: &Request) -> HandlerResult;
}

/// Upcast to `Any` so a stored resource can be recovered by type.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A routable value. Implement it with [`resource!`](crate::resource!)
/// rather than by hand.
pub trait Resource: AsAny {
    fn as_get(&self) -> Option<&dyn GetSupported> {
        None
    }

    fn as_post(&self) -> Option<&dyn PostSupported> {
        None
    }

    fn as_put(&self) -> Option<&dyn PutSupported> {
        None
    }

    fn as_delete(&self) -> Option<&dyn DeleteSupported> {
        None
    }

    fn as_head(&self) -> Option<&dyn HeadSupported> {
        None
    }

    fn as_patch(&self) -> Option<&dyn PatchSupported> {
        None
    }
}

/// Implement [`Resource`] for a type, enabling the listed verbs.
///
/// ```ignore
/// struct Items;
/// impl GetSupported for Items { /* ... */ }
/// impl PostSupported for Items { /* ... */ }
/// resource!(Items: Get, Post);
///
/// struct Opaque;
/// resource!(Opaque);
/// ```
#[macro_export]
macro_rules! resource {
    (@probe Get) => {
        fn as_get(&self) -> Option<&dyn $crate::resource::GetSupported> { Some(self) }
    };
    (@probe Post) => {
        fn as_post(&self) -> Option<&dyn $crate::resource::PostSupported> { Some(self) }
    };
    (@probe Put) => {
        fn as_put(&self) -> Option<&dyn $crate::resource::PutSupported> { Some(self) }
    };
    (@probe Delete) => {
        fn as_delete(&self) -> Option<&dyn $crate::resource::DeleteSupported> { Some(self) }
    };
    (@probe Head) => {
        fn as_head(&self) -> Option<&dyn $crate::resource::HeadSupported> { Some(self) }
    };
    (@probe Patch) => {
        fn as_patch(&self) -> Option<&dyn $crate::resource::PatchSupported> { Some(self) }
    };
    ($ty:ty $(: $($verb:ident),+ $(,)?)?) => {
        impl $crate::resource::Resource for $ty {
            $($($crate::resource!(@probe $verb);)+)?
        }
    };
}

/// Find the handler for `method` on `resource`.
pub fn resolve<'a>(method: &Method, resource: &'a dyn Resource) -> Option<Handler<'a>> {
    match *method {
        Method::GET => resource
            .as_get()
            .map(|r| Box::new(move |req: &Request| r.get(req)) as Handler<'a>),
        Method::POST => resource
            .as_post()
            .map(|r| Box::new(move |req: &Request| r.post(req)) as Handler<'a>),
        Method::PUT => resource
            .as_put()
            .map(|r| Box::new(move |req: &Request| r.put(req)) as Handler<'a>),
        Method::DELETE => resource
            .as_delete()
            .map(|r| Box::new(move |req: &Request| r.delete(req)) as Handler<'a>),
        Method::HEAD => resource
            .as_head()
            .map(|r| Box::new(move |req: &Request| r.head(req)) as Handler<'a>),
        Method::PATCH => resource
            .as_patch()
            .map(|r| Box::new(move |req: &Request| r.patch(req)) as Handler<'a>),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each verb answers with its own status so the resolved handler is identifiable.
    struct OnlyGet;
    impl GetSupported for OnlyGet {
        fn get(&self, _: &Request) -> HandlerResult {
            (StatusCode::OK, None)
        }
    }
    crate::resource!(OnlyGet: Get);

    struct OnlyPost;
    impl PostSupported for OnlyPost {
        fn post(&self, _: &Request) -> HandlerResult {
            (StatusCode::CREATED, None)
        }
    }
    crate::resource!(OnlyPost: Post);

    struct OnlyPut;
    impl PutSupported for OnlyPut {
        fn put(&self, _: &Request) -> HandlerResult {
            (StatusCode::ACCEPTED, None)
        }
    }
    crate::resource!(OnlyPut: Put);

    struct OnlyDelete;
    impl DeleteSupported for OnlyDelete {
        fn delete(&self, _: &Request) -> HandlerResult {
            (StatusCode::NO_CONTENT, None)
        }
    }
    crate::resource!(OnlyDelete: Delete);

    struct OnlyHead;
    impl HeadSupported for OnlyHead {
        fn head(&self, _: &Request) -> HandlerResult {
            (StatusCode::RESET_CONTENT, None)
        }
    }
    crate::resource!(OnlyHead: Head);

    struct OnlyPatch;
    impl PatchSupported for OnlyPatch {
        fn patch(&self, _: &Request) -> HandlerResult {
            (StatusCode::PARTIAL_CONTENT, None)
        }
    }
    crate::resource!(OnlyPatch: Patch);

    struct Nothing;
    crate::resource!(Nothing);

    struct GetAndPost;
    impl GetSupported for GetAndPost {
        fn get(&self, _: &Request) -> HandlerResult {
            (StatusCode::OK, None)
        }
    }
    impl PostSupported for GetAndPost {
        fn post(&self, _: &Request) -> HandlerResult {
            (StatusCode::CREATED, None)
        }
    }
    crate::resource!(GetAndPost: Get, Post);

    const VERBS: [Method; 6] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::HEAD,
        Method::PATCH,
    ];

    fn status_of(method: &Method, resource: &dyn Resource) -> Option<StatusCode> {
        let req = Request::new(method.clone(), "/".parse().unwrap());
        resolve(method, resource).map(|h| h(&req).0)
    }

    #[test]
    fn test_single_capability_resources() {
        let cases: [(&dyn Resource, Method, StatusCode); 6] = [
            (&OnlyGet, Method::GET, StatusCode::OK),
            (&OnlyPost, Method::POST, StatusCode::CREATED),
            (&OnlyPut, Method::PUT, StatusCode::ACCEPTED),
            (&OnlyDelete, Method::DELETE, StatusCode::NO_CONTENT),
            (&OnlyHead, Method::HEAD, StatusCode::RESET_CONTENT),
            (&OnlyPatch, Method::PATCH, StatusCode::PARTIAL_CONTENT),
        ];

        for (resource, supported, expected) in cases {
            for verb in VERBS.iter() {
                let got = status_of(verb, resource);
                if *verb == supported {
                    assert_eq!(got, Some(expected), "{} should resolve", verb);
                } else {
                    assert_eq!(got, None, "{} should not resolve for a {} resource", verb, supported);
                }
            }
        }
    }

    #[test]
    fn test_no_capabilities() {
        for verb in VERBS.iter() {
            assert!(resolve(verb, &Nothing).is_none());
        }
    }

    #[test]
    fn test_multiple_capabilities() {
        assert_eq!(status_of(&Method::GET, &GetAndPost), Some(StatusCode::OK));
        assert_eq!(status_of(&Method::POST, &GetAndPost), Some(StatusCode::CREATED));
        assert_eq!(status_of(&Method::PUT, &GetAndPost), None);
    }

    #[test]
    fn test_unknown_methods() {
        for method in [Method::OPTIONS, Method::TRACE, Method::CONNECT] {
            assert!(resolve(&method, &GetAndPost).is_none());
        }
        let custom = Method::from_bytes(b"PURGE").unwrap();
        assert!(resolve(&custom, &OnlyGet).is_none());
    }

    #[test]
    fn test_downcast() {
        let resource: &dyn Resource = &OnlyGet;
        assert!(resource.as_any().downcast_ref::<OnlyGet>().is_some());
        assert!(resource.as_any().downcast_ref::<OnlyPost>().is_none());
    }
}
