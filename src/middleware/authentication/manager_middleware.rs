use crate::helpers::RequestContext;
use crate::middleware::authentication::{AccessGuard, CallInfo};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::body::BoxBody;
use tower::Service;

/// Runs the access check once per call, before the request reaches the
/// generated service. Streaming calls are checked at stream establishment
/// and individual messages are never looked at.
#[derive(Clone)]
pub struct ManagerMiddleware<S> {
    pub service: S,
    pub guard: Arc<AccessGuard>,
}

impl<S, ReqBody> Service<http::Request<ReqBody>> for ManagerMiddleware<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<BoxBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<ReqBody>) -> Self::Future {
        // the clone is not guaranteed to be ready, keep the one that is
        let clone = self.service.clone();
        let mut service = std::mem::replace(&mut self.service, clone);
        let guard = self.guard.clone();

        Box::pin(async move {
            let call = CallInfo::from_http(&req);
            tracing::info!("---> intercepting method: {}", call.method);
            req.extensions_mut()
                .insert(RequestContext::from_metadata(&call.metadata));

            match guard.authorize(&call) {
                Ok(Some(claims)) => {
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                Ok(None) => service.call(req).await,
                Err(status) => {
                    tracing::warn!(
                        method = %call.method,
                        code = ?status.code(),
                        "call rejected: {}",
                        status.message()
                    );
                    Ok(status.to_http())
                }
            }
        })
    }
}
