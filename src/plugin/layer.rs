//! Tower integration for server-side pipelines.

use super::Firetor;
use http::{Request, Response, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that initializes Firebase before the wrapped service sees a request.
#[derive(Clone, Debug)]
pub struct FiretorLayer {
    firetor: Firetor,
}

impl FiretorLayer {
    pub fn new(firetor: Firetor) -> Self {
        Self { firetor }
    }
}

impl<S> Layer<S> for FiretorLayer {
    type Service = FiretorService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FiretorService {
            inner,
            firetor: self.firetor.clone(),
        }
    }
}

/// Service produced by [`FiretorLayer`].
///
/// On success the default [`FirebaseApp`](crate::FirebaseApp) is added to the request
/// extensions. On failure the request is answered with `500 Internal Server Error` and the
/// inner service is not called.
#[derive(Clone, Debug)]
pub struct FiretorService<S> {
    inner: S,
    firetor: Firetor,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FiretorService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let firetor = self.firetor.clone();
        // The readied service goes into the future; a fresh clone stays behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match firetor.intercept().await {
                Ok(Some(app)) => {
                    req.extensions_mut().insert(app);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(plugin = Firetor::KEY, error = %err, "Firebase initialization failed");
                    let mut response = Response::new(ResBody::default());
                    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                    return Ok(response);
                }
            }

            inner.call(req).await
        })
    }
}
