use super::AuthInterceptorClient;
use crate::pb::laptop_service_client::LaptopServiceClient;
use crate::pb::{
    CreateLaptopRequest, Filter, Laptop, RateLaptopRequest, RateLaptopResponse,
    SearchLaptopRequest, UploadImageRequest, UploadImageResponse,
};
use std::path::Path;
use std::time::Duration;
use tonic::codegen::InterceptedService;
use tonic::transport::Channel;
use tonic::{Code, Request, Status};

const CALL_TIMEOUT: Duration = Duration::from_secs(5);
const CHUNK_SIZE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("rpc failed: {0}")]
    Rpc(#[from] Status),
    #[error("cannot read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} laptop ids but {1} scores")]
    Mismatch(usize, usize),
}

type Service = LaptopServiceClient<InterceptedService<Channel, AuthInterceptorClient>>;

/// Thin wrapper over the generated client with a per-call timeout.
#[derive(Clone)]
pub struct LaptopClient {
    service: Service,
}

impl LaptopClient {
    pub fn new(channel: Channel, interceptor: AuthInterceptorClient) -> Self {
        Self {
            service: LaptopServiceClient::with_interceptor(channel, interceptor),
        }
    }

    fn request<T>(message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(CALL_TIMEOUT);
        request
    }

    /// Returns the stored id, or `None` when a laptop with that id already exists.
    pub async fn create_laptop(&self, laptop: Laptop) -> Result<Option<String>, ClientError> {
        let request = Self::request(CreateLaptopRequest {
            laptop: Some(laptop),
        });
        match self.service.clone().create_laptop(request).await {
            Ok(response) => {
                let id = response.into_inner().id;
                tracing::info!("created laptop with id: {}", id);
                Ok(Some(id))
            }
            Err(status) if status.code() == Code::AlreadyExists => {
                tracing::info!("laptop already exists");
                Ok(None)
            }
            Err(status) => Err(status.into()),
        }
    }

    pub async fn search_laptop(&self, filter: Filter) -> Result<Vec<Laptop>, ClientError> {
        tracing::info!("searching for laptops with filter: {:?}", filter);
        let request = Self::request(SearchLaptopRequest {
            filter: Some(filter),
        });
        let mut stream = self.service.clone().search_laptop(request).await?.into_inner();

        let mut found = Vec::new();
        while let Some(response) = stream.message().await? {
            if let Some(laptop) = response.laptop {
                tracing::info!(
                    price_usd = laptop.price_usd,
                    brand = %laptop.brand,
                    name = %laptop.name,
                    "found laptop {}",
                    laptop.id
                );
                found.push(laptop);
            }
        }
        Ok(found)
    }

    /// Uploads the file at `path` in 1 KiB chunks; its extension becomes the image type.
    pub async fn upload_image(
        &self,
        laptop_id: &str,
        path: &Path,
    ) -> Result<UploadImageResponse, ClientError> {
        let data = tokio::fs::read(path).await?;
        let image_type = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut messages = vec![UploadImageRequest::info(laptop_id, image_type)];
        messages.extend(data.chunks(CHUNK_SIZE).map(UploadImageRequest::chunk));

        let request = Self::request(tokio_stream::iter(messages));
        let response = self.service.clone().upload_image(request).await?.into_inner();
        tracing::info!("image uploaded with id: {}, size: {}", response.id, response.size);
        Ok(response)
    }

    /// Sends one rating per `(laptop id, score)` pair and collects the answers.
    pub async fn rate_laptop(
        &self,
        laptop_ids: &[String],
        scores: &[f64],
    ) -> Result<Vec<RateLaptopResponse>, ClientError> {
        if laptop_ids.len() != scores.len() {
            return Err(ClientError::Mismatch(laptop_ids.len(), scores.len()));
        }

        let messages: Vec<_> = laptop_ids
            .iter()
            .zip(scores)
            .map(|(laptop_id, &score)| RateLaptopRequest {
                laptop_id: laptop_id.clone(),
                score,
            })
            .collect();

        let request = Self::request(tokio_stream::iter(messages));
        let mut stream = self.service.clone().rate_laptop(request).await?.into_inner();

        let mut responses = Vec::new();
        while let Some(response) = stream.message().await? {
            tracing::info!(
                "laptop {} rated {} times, average score {}",
                response.laptop_id,
                response.rated_count,
                response.average_score
            );
            responses.push(response);
        }
        Ok(responses)
    }
}
