//! Request logging middleware

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::time::Instant;
use tracing::{error, info, warn};

/// Logs one line per request: method, path, status and elapsed time.
///
/// Server errors additionally log the underlying error, which never reaches the client
/// body outside development mode.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestLoggerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerService { service }))
    }
}

/// Service implementation for the request logger
pub struct RequestLoggerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let elapsed = start.elapsed().as_millis();

            match &result {
                Ok(res) => {
                    let status = res.status();
                    if status.is_server_error() {
                        let cause = res
                            .response()
                            .error()
                            .map(|e| e.to_string())
                            .unwrap_or_default();
                        error!(
                            method = %method,
                            path = %path,
                            status = status.as_u16(),
                            "Request failed after {}ms: {}",
                            elapsed,
                            cause
                        );
                    } else {
                        info!("{} {} - {} - {}ms", method, path, status.as_u16(), elapsed);
                    }
                }
                Err(e) => {
                    warn!("{} {} - error after {}ms: {}", method, path, elapsed, e);
                }
            }

            result
        })
    }
}
