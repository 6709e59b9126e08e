// File: ./src/client/redirect.rs
//! Tower middleware that follows 3xx responses, so "non-200" always means
//! the status after redirects.
use http::header::{AUTHORIZATION, LOCATION};
use http::{Request, Response, Uri};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Resolves a `Location` value against the URI that produced it. Relative
/// locations inherit scheme and authority; `None` if the value is unusable.
pub fn resolve_location(current: &Uri, location: &str) -> Option<Uri> {
    let parts = location.parse::<Uri>().ok()?.into_parts();
    let mut builder = Uri::builder();

    match (parts.scheme, parts.authority) {
        (Some(scheme), Some(authority)) => {
            builder = builder.scheme(scheme).authority(authority);
        }
        (None, None) => {
            builder = builder
                .scheme(current.scheme()?.clone())
                .authority(current.authority()?.clone());
        }
        _ => return None,
    }

    let path = parts
        .path_and_query
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    builder.path_and_query(path).build().ok()
}

#[derive(Clone, Debug)]
pub struct FollowRedirectLayer {
    max_redirects: usize,
}

impl FollowRedirectLayer {
    pub fn new(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl Default for FollowRedirectLayer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REDIRECTS)
    }
}

impl<S> Layer<S> for FollowRedirectLayer {
    type Service = FollowRedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FollowRedirectService {
            inner,
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FollowRedirectService<S> {
    inner: S,
    max_redirects: usize,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FollowRedirectService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Clone + Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        let max_redirects = self.max_redirects;

        Box::pin(async move {
            let mut request = req;
            let mut hops = 0;

            loop {
                let retry = request.clone();
                let response = inner.call(request).await?;

                if !response.status().is_redirection() || hops >= max_redirects {
                    return Ok(response);
                }
                let next_uri = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|loc| resolve_location(retry.uri(), loc));
                let Some(next_uri) = next_uri else {
                    return Ok(response);
                };

                log::debug!(
                    "{} {} -> {}",
                    response.status().as_u16(),
                    retry.uri(),
                    next_uri
                );
                request = retry;
                // The bearer token stays with the host it was issued for.
                if request.uri().authority() != next_uri.authority() {
                    request.headers_mut().remove(AUTHORIZATION);
                }
                *request.uri_mut() = next_uri;
                hops += 1;
            }
        })
    }
}
