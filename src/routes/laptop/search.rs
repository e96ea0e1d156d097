use super::LaptopServer;
use crate::pb::{Filter, SearchLaptopRequest, SearchLaptopResponse};
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream};
use tonic::Status;

/// Responses queued ahead of a client that reads slower than the scan.
const SEARCH_BUFFER: usize = 4;

impl LaptopServer {
    /// Streams every stored laptop that passes the filter. A request
    /// without a filter matches the whole catalog.
    ///
    /// The scan runs on its own task and ends as soon as a send fails,
    /// which happens once the client has dropped the stream.
    pub fn search(
        &self,
        request: SearchLaptopRequest,
    ) -> impl Stream<Item = Result<SearchLaptopResponse, Status>> + Send + 'static {
        let filter = request.filter.unwrap_or_else(|| Filter {
            max_price_usd: f64::INFINITY,
            ..Default::default()
        });
        tracing::info!("receive a search-laptop request with filter: {:?}", filter);

        let laptops = self.laptops.clone();
        let (tx, rx) = mpsc::channel(SEARCH_BUFFER);

        tokio::spawn(async move {
            let mut sent = 0usize;
            let result = laptops
                .search(&filter, |laptop| {
                    let tx = tx.clone();
                    sent += 1;
                    async move {
                        let id = laptop.id.clone();
                        let response = SearchLaptopResponse {
                            laptop: Some(laptop),
                        };
                        tx.send(Ok(response))
                            .await
                            .map_err(|_| Status::cancelled("client closed the search stream"))?;
                        tracing::debug!("sent laptop with id: {}", id);
                        Ok::<_, Status>(())
                    }
                })
                .await;

            match result {
                Ok(()) => tracing::info!("search finished, {} laptop(s) sent", sent),
                Err(status) => tracing::warn!("search aborted: {}", status.message()),
            }
        });

        ReceiverStream::new(rx)
    }
}
