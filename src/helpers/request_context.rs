use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tonic::{metadata::MetadataMap, Status};

pub const GRPC_TIMEOUT: &str = "grpc-timeout";

/// Per-call deadline and cancellation state.
///
/// Created when the call arrives so that the deadline counts from arrival,
/// not from the moment a handler gets around to looking at it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::default()
        }
    }

    pub fn from_metadata(metadata: &MetadataMap) -> Self {
        let timeout = metadata
            .get(GRPC_TIMEOUT)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_timeout);
        match timeout {
            Some(timeout) => Self::with_deadline(Instant::now() + timeout),
            None => Self::new(),
        }
    }

    /// Looks for a context stored by the access layer and falls back to the
    /// request's own metadata.
    pub fn of<T>(request: &tonic::Request<T>) -> Self {
        request
            .extensions()
            .get::<Self>()
            .cloned()
            .unwrap_or_else(|| Self::from_metadata(request.metadata()))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Marks the call as given up for every clone of this context.
    ///
    /// The transport never sets this flag: when a client disconnects, tonic
    /// drops the handler future instead. It is for in-process callers that
    /// want `check()` to report `Cancelled`.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// `Canceled` or `DeadlineExceeded` when the caller has given up.
    pub fn check(&self) -> Result<(), Status> {
        if self.is_cancelled() {
            tracing::info!("request is canceled");
            return Err(Status::cancelled("request is canceled"));
        }
        if self.is_expired() {
            tracing::info!("deadline is exceeded");
            return Err(Status::deadline_exceeded("deadline is exceeded"));
        }
        Ok(())
    }
}

/// Parses a `grpc-timeout` value: at most eight ASCII digits followed by
/// one of `H`, `M`, `S`, `m`, `u`, `n`.
fn parse_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let timeout = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(timeout)
}
