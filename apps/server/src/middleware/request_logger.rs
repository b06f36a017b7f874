//! Access log for the test management API.
//!
//! Each request is tagged with an id that appears on both of its log lines
//! and in the `x-request-id` response header. A client that already sends
//! a UUID in that header keeps it, so its own logs line up with ours.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Reuse the caller's id when it is a valid UUID, otherwise mint one.
fn request_id(req: &ServiceRequest) -> Uuid {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// What the access log needs once the handler has answered.
struct Exchange {
    id: Uuid,
    method: String,
    path: String,
    started: Instant,
}

impl Exchange {
    fn finish(&self, status: StatusCode) {
        let status = status.as_u16();
        let duration_ms = self.started.elapsed().as_millis() as u64;
        let (id, method, path) = (&self.id, &self.method, &self.path);

        match status {
            500..=u16::MAX => error!(
                target: "api",
                request_id = %id, method = %method, path = %path,
                status, duration_ms,
                "request failed"
            ),
            400..=499 => warn!(
                target: "api",
                request_id = %id, method = %method, path = %path,
                status, duration_ms,
                "request rejected"
            ),
            _ => info!(
                target: "api",
                request_id = %id, method = %method, path = %path,
                status, duration_ms,
                "request served"
            ),
        }
    }
}

/// Wraps an app so every request is logged and tagged with an id.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let exchange = Exchange {
            id: request_id(&req),
            method: req.method().to_string(),
            path: req.path().to_string(),
            started: Instant::now(),
        };

        {
            let conn = req.connection_info();
            info!(
                target: "api",
                request_id = %exchange.id,
                method = %exchange.method,
                path = %exchange.path,
                query = req.query_string(),
                peer = conn.realip_remote_addr().unwrap_or("-"),
                "request received"
            );
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            exchange.finish(res.status());
            if let Ok(value) = HeaderValue::from_str(&exchange.id.to_string()) {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Ok(res)
        })
    }
}
