use super::LaptopServer;
use crate::pb::{RateLaptopRequest, RateLaptopResponse};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;

const RATE_BUFFER: usize = 16;

impl LaptopServer {
    /// Answers every rating with the laptop's updated count and average,
    /// in the order the ratings arrived.
    ///
    /// Ratings are committed one by one: if the call fails half way, the
    /// ones already answered stay recorded.
    pub fn rate<S>(
        &self,
        mut stream: S,
    ) -> impl Stream<Item = Result<RateLaptopResponse, Status>> + Send + 'static
    where
        S: Stream<Item = Result<RateLaptopRequest, Status>> + Unpin + Send + 'static,
    {
        let laptops = self.laptops.clone();
        let ratings = self.ratings.clone();
        let (tx, rx) = mpsc::channel(RATE_BUFFER);

        tokio::spawn(async move {
            while let Some(message) = stream.next().await {
                let request = match message {
                    Ok(request) => request,
                    Err(err) => {
                        tracing::error!("cannot receive stream request: {:?}", err);
                        let status = Status::unknown(format!(
                            "cannot receive stream request: {}",
                            err.message()
                        ));
                        let _ = tx.send(Err(status)).await;
                        return;
                    }
                };
                tracing::info!(
                    "received a rate-laptop request: id = {}, score = {}",
                    request.laptop_id,
                    request.score
                );

                if !request.score.is_finite() {
                    let status = Status::invalid_argument(format!(
                        "score must be a finite number, got {}",
                        request.score
                    ));
                    let _ = tx.send(Err(status)).await;
                    return;
                }

                if !laptops.contains(&request.laptop_id).await {
                    let status = Status::not_found(format!(
                        "laptop id {} is not found",
                        request.laptop_id
                    ));
                    let _ = tx.send(Err(status)).await;
                    return;
                }

                let rating = ratings.record(&request.laptop_id, request.score).await;
                let response = RateLaptopResponse {
                    laptop_id: request.laptop_id,
                    rated_count: rating.count,
                    average_score: rating.average(),
                };
                if tx.send(Ok(response)).await.is_err() {
                    tracing::warn!("client stopped reading rate-laptop responses");
                    return;
                }
            }
            tracing::info!("no more rate-laptop requests");
        });

        ReceiverStream::new(rx)
    }
}
