//! HTML forms can only POST; `?_method=patch|put|delete` picks the real verb.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use serde::Deserialize;
use std::future::{Ready, ready};

/// Rewrites the method of `POST` requests before routing.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

/// Query parameter carrying the overriding verb.
#[derive(Debug, Default, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Only PATCH, PUT and DELETE may be tunnelled.
fn overridden_method(query: &str) -> Option<Method> {
    let value = web::Query::<OverrideQuery>::from_query(query)
        .ok()?
        .into_inner()
        .method?;

    match value.to_ascii_uppercase().as_str() {
        "PATCH" => Some(Method::PATCH),
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = overridden_method(req.query_string()) {
                tracing::debug!(method = %method, path = %req.path(), "Method override");
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_known_verbs_override() {
        assert_eq!(overridden_method("_method=delete"), Some(Method::DELETE));
        assert_eq!(overridden_method("a=1&_method=PATCH"), Some(Method::PATCH));
        assert_eq!(overridden_method("_method=get"), None);
        assert_eq!(overridden_method("method=delete"), None);
    }

    #[test]
    fn test_encoded_query_is_decoded() {
        assert_eq!(overridden_method("%5Fmethod=delete"), Some(Method::DELETE));
        assert_eq!(overridden_method("_method=%50ATCH"), Some(Method::PATCH));
        assert_eq!(overridden_method("q=a%26_method%3Ddelete"), None);
    }
}
