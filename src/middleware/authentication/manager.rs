use crate::middleware::authentication::{AccessGuard, ManagerMiddleware};
use std::sync::Arc;
use tower::Layer;

/// Tower layer that puts [`AccessGuard`] in front of every gRPC route.
#[derive(Clone)]
pub struct Manager {
    guard: Arc<AccessGuard>,
}

impl Manager {
    pub fn new(guard: AccessGuard) -> Self {
        Self {
            guard: Arc::new(guard),
        }
    }
}

impl<S> Layer<S> for Manager {
    type Service = ManagerMiddleware<S>;

    fn layer(&self, service: S) -> Self::Service {
        ManagerMiddleware {
            service,
            guard: self.guard.clone(),
        }
    }
}
