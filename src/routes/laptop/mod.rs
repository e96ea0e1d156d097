mod create;
mod rate;
mod search;
mod upload;

pub use upload::MAX_IMAGE_SIZE;

use crate::db::{DiskImageStore, LaptopStore, RatingStore};
use crate::pb::laptop_service_server::LaptopService;
use crate::pb::{
    CreateLaptopRequest, CreateLaptopResponse, RateLaptopRequest, RateLaptopResponse,
    SearchLaptopRequest, SearchLaptopResponse, UploadImageRequest, UploadImageResponse,
};
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tonic::{Request, Response, Status, Streaming};

pub type ResponseStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send + 'static>>;

/// gRPC `LaptopService` backed by the in-memory catalog, the image blob
/// store and the rating accumulator.
#[derive(Clone)]
pub struct LaptopServer {
    laptops: Arc<LaptopStore>,
    images: Arc<DiskImageStore>,
    ratings: Arc<RatingStore>,
    max_image_size: usize,
}

impl LaptopServer {
    pub fn new(
        laptops: Arc<LaptopStore>,
        images: Arc<DiskImageStore>,
        ratings: Arc<RatingStore>,
    ) -> Self {
        Self {
            laptops,
            images,
            ratings,
            max_image_size: MAX_IMAGE_SIZE,
        }
    }

    pub fn with_max_image_size(mut self, max_image_size: usize) -> Self {
        self.max_image_size = max_image_size;
        self
    }
}

#[tonic::async_trait]
impl LaptopService for LaptopServer {
    async fn create_laptop(
        &self,
        request: Request<CreateLaptopRequest>,
    ) -> Result<Response<CreateLaptopResponse>, Status> {
        self.create(request).await
    }

    type SearchLaptopStream = ResponseStream<SearchLaptopResponse>;

    async fn search_laptop(
        &self,
        request: Request<SearchLaptopRequest>,
    ) -> Result<Response<Self::SearchLaptopStream>, Status> {
        let stream = self.search(request.into_inner());
        Ok(Response::new(Box::pin(stream)))
    }

    async fn upload_image(
        &self,
        request: Request<Streaming<UploadImageRequest>>,
    ) -> Result<Response<UploadImageResponse>, Status> {
        let response = self.upload(request.into_inner()).await?;
        Ok(Response::new(response))
    }

    type RateLaptopStream = ResponseStream<RateLaptopResponse>;

    async fn rate_laptop(
        &self,
        request: Request<Streaming<RateLaptopRequest>>,
    ) -> Result<Response<Self::RateLaptopStream>, Status> {
        let stream = self.rate(request.into_inner());
        Ok(Response::new(Box::pin(stream)))
    }
}

#[cfg(test)]
mod tests;
