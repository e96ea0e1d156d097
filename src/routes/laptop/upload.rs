use super::LaptopServer;
use crate::db::ImageStoreError;
use crate::pb::{upload_image_request::Data, UploadImageRequest, UploadImageResponse};
use futures::{Stream, StreamExt};
use tonic::Status;

/// 1 MiB
pub const MAX_IMAGE_SIZE: usize = 1 << 20;

impl LaptopServer {
    /// Receives an image as one `info` message followed by any number of
    /// chunks, then stores it in one piece once the client closes its side.
    ///
    /// Nothing reaches the blob store when the laptop is unknown, the stream
    /// breaks, or the image grows past the size limit.
    #[tracing::instrument(name = "Upload image.", skip(self, stream))]
    pub async fn upload<S>(&self, mut stream: S) -> Result<UploadImageResponse, Status>
    where
        S: Stream<Item = Result<UploadImageRequest, Status>> + Unpin + Send,
    {
        let info = match stream.next().await {
            Some(Ok(UploadImageRequest {
                data: Some(Data::Info(info)),
            })) => info,
            Some(Ok(_)) => {
                return Err(Status::unknown("first message must carry the image info"));
            }
            Some(Err(err)) => {
                tracing::error!("cannot receive image info: {:?}", err);
                return Err(Status::unknown(format!(
                    "cannot receive image info: {}",
                    err.message()
                )));
            }
            None => return Err(Status::unknown("stream closed before image info")),
        };
        tracing::info!(
            "receive an upload-image request for laptop {} with image type {:?}",
            info.laptop_id,
            info.image_type
        );

        if !self.laptops.contains(&info.laptop_id).await {
            return Err(Status::not_found(format!(
                "cannot find laptop with id: {}",
                info.laptop_id
            )));
        }

        let mut image_data: Vec<u8> = Vec::new();
        while let Some(message) = stream.next().await {
            let chunk = match message {
                Ok(UploadImageRequest {
                    data: Some(Data::ChunkData(chunk)),
                }) => chunk,
                Ok(_) => return Err(Status::unknown("expected image chunk data")),
                Err(err) => {
                    tracing::error!("cannot receive chunk data: {:?}", err);
                    return Err(Status::unknown(format!(
                        "cannot receive chunk data: {}",
                        err.message()
                    )));
                }
            };

            let size = image_data.len() + chunk.len();
            if size > self.max_image_size {
                tracing::warn!("image is too large: {} > {}", size, self.max_image_size);
                return Err(Status::invalid_argument(format!(
                    "image is too large: {} > {}",
                    size, self.max_image_size
                )));
            }
            image_data.extend_from_slice(&chunk);
        }
        tracing::debug!("finished receiving image data, {} bytes", image_data.len());

        let size = u32::try_from(image_data.len())
            .map_err(|_| Status::invalid_argument("image size does not fit the response"))?;

        let image_id = self
            .images
            .save(&info.laptop_id, &info.image_type, &image_data)
            .await
            .map_err(|err| match err {
                ImageStoreError::InvalidType(_) => Status::invalid_argument(err.to_string()),
                ImageStoreError::Io { .. } => {
                    tracing::error!("cannot save image to store: {}", err);
                    Status::internal(format!("cannot save image to store: {err}"))
                }
            })?;
        tracing::info!("saved image with id: {}", image_id);

        Ok(UploadImageResponse { id: image_id, size })
    }
}
