//! Pattern → resource pairs.

use std::fmt;
use std::sync::Arc;

use crate::resource::Resource;

/// A URL pattern bound to a resource. Immutable once built.
#[derive(Clone)]
pub struct Route {
    pattern: String,
    resource: Arc<dyn Resource>,
}

impl Route {
    pub fn new(resource: impl Resource, pattern: impl Into<String>) -> Self {
        Self::from_arc(Arc::new(resource), pattern)
    }

    /// Build a route around a resource shared with the caller.
    pub fn from_arc(resource: Arc<dyn Resource>, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            resource,
        }
    }

    /// Router pattern, axum syntax (`/items/{id}`).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn resource(&self) -> &dyn Resource {
        self.resource.as_ref()
    }

    pub(crate) fn shared_resource(&self) -> &Arc<dyn Resource> {
        &self.resource
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);
    crate::resource!(Named);

    #[test]
    fn test_route_accessors() {
        let route = Route::new(Named("X"), "/the/pattern");
        assert_eq!(route.pattern(), "/the/pattern");

        let named = route.resource().as_any().downcast_ref::<Named>().unwrap();
        assert_eq!(named.0, "X");
    }

    #[test]
    fn test_from_arc_keeps_identity() {
        let shared: Arc<dyn Resource> = Arc::new(Named("Y"));
        let route = Route::from_arc(shared.clone(), "/y");
        assert!(Arc::ptr_eq(route.shared_resource(), &shared));

        let cloned = route.clone();
        assert!(Arc::ptr_eq(cloned.shared_resource(), &shared));
    }
}
