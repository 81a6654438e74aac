//! Authentication middleware

use crate::server::middleware::helpers::authorization_header;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error};

/// Bearer-token authentication for the wrapped routes.
///
/// On success the `AuthenticatedContext` is inserted into the request extensions and the
/// inner service runs. On failure the request is answered with a 401 and never reaches it.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                error!("Application state missing for {}", req.path());
                let err = ApiError::internal("Application state not configured");
                return Ok(req.error_response(err).map_into_right_body());
            };

            let header = authorization_header(req.headers());

            match state.auth.authenticate(header.as_deref()).await {
                Ok(ctx) => {
                    debug!("Request authenticated as {}", ctx.account().email);
                    req.extensions_mut().insert(ctx);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    debug!("Rejecting {} {}: {}", req.method(), req.path(), err);
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}
