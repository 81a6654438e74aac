//! Role guard middleware

use crate::auth::{AuthenticatedContext, require_role};
use crate::core::models::Role;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::HttpMessage;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;

/// Restrict the wrapped routes to a set of roles.
///
/// Must run after [`AuthMiddleware`](super::AuthMiddleware): register it with `.wrap()`
/// *before* the auth middleware so that actix places it further inside.
#[derive(Debug, Clone)]
pub struct RequireRole {
    allowed: Rc<[Role]>,
}

impl RequireRole {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: Rc::from(allowed),
        }
    }

    pub fn admin() -> Self {
        Self::new(&[Role::Admin])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service,
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

/// Service implementation for the role guard
pub struct RequireRoleService<S> {
    service: S,
    allowed: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let extensions = req.extensions();
            require_role(extensions.get::<AuthenticatedContext>(), &self.allowed).map(|_| ())
        };

        match decision {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => Box::pin(ready(Ok(req.error_response(err).map_into_right_body()))),
        }
    }
}
