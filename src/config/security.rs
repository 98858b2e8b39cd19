//! Response headers added to every API response.
//!
//! Seat maps and bookings change with every request, so responses are marked
//! `no-store` unless a handler chose its own cache policy.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY,
    STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::http::{Request, Response};
use tower::{Layer, Service};

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

const FIXED_HEADERS: [(HeaderName, &str); 6] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (X_XSS_PROTECTION, "1; mode=block"),
    (CONTENT_SECURITY_POLICY, "default-src 'none'; frame-ancestors 'none'"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (PERMISSIONS_POLICY, "geolocation=(), microphone=(), camera=(), payment=()"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";
const NO_STORE: &str = "no-store";

fn apply(headers: &mut HeaderMap, hsts: bool) {
    for (name, value) in FIXED_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
        .entry(CACHE_CONTROL)
        .or_insert(HeaderValue::from_static(NO_STORE));
    if hsts {
        headers.insert(STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ApiHeadersLayer {
    hsts: bool,
}

impl ApiHeadersLayer {
    /// `hsts` should only be set when the service is reached over HTTPS.
    pub fn new(hsts: bool) -> Self {
        Self { hsts }
    }
}

impl<S> Layer<S> for ApiHeadersLayer {
    type Service = ApiHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiHeaders {
            inner,
            hsts: self.hsts,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiHeaders<S> {
    inner: S,
    hsts: bool,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for ApiHeaders<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ApiHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        ApiHeadersFuture {
            inner: self.inner.call(request),
            hsts: self.hsts,
        }
    }
}

#[pin_project::pin_project]
pub struct ApiHeadersFuture<F> {
    #[pin]
    inner: F,
    hsts: bool,
}

impl<F, ResBody, E> Future for ApiHeadersFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = ready!(this.inner.poll(cx))?;
        apply(response.headers_mut(), *this.hsts);
        Poll::Ready(Ok(response))
    }
}

pub fn create_security_headers_layer(hsts: bool) -> ApiHeadersLayer {
    if hsts {
        tracing::info!("Security: HSTS enabled");
    }
    ApiHeadersLayer::new(hsts)
}
