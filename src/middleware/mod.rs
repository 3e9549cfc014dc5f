/// HTTP middleware for KnowledgeKnot
///
/// Plain HTML forms can only issue GET and POST, so the edit and delete
/// forms carry the real verb in a `_method` query parameter. This
/// middleware rewrites such a POST to the declared method before routing.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::Error;
use std::future::{ready, Ready};

/// Rewrites `POST /...?_method=PUT` and `POST /...?_method=DELETE` to the
/// declared method. Only POST may be overridden; any other method, or an
/// unrecognised `_method` value, passes through untouched.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_from_query(req.query_string()) {
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}

fn override_from_query(query: &str) -> Option<Method> {
    let value = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
