use super::LaptopServer;
use crate::db::LaptopStoreError;
use crate::helpers::RequestContext;
use crate::pb::{CreateLaptopRequest, CreateLaptopResponse};
use tonic::{Request, Response, Status};
use uuid::Uuid;

impl LaptopServer {
    /// Stores a new laptop. A supplied id must be a UUID and is kept as is,
    /// an empty one is replaced by a freshly generated UUID.
    #[tracing::instrument(name = "Create laptop.", skip(self, request))]
    pub async fn create(
        &self,
        request: Request<CreateLaptopRequest>,
    ) -> Result<Response<CreateLaptopResponse>, Status> {
        let context = RequestContext::of(&request);
        let mut laptop = request
            .into_inner()
            .laptop
            .ok_or_else(|| Status::invalid_argument("laptop is not provided"))?;
        tracing::info!("Received a request to create a laptop with id: {:?}", laptop.id);

        if laptop.id.is_empty() {
            laptop.id = Uuid::new_v4().to_string();
        } else if let Err(err) = Uuid::parse_str(&laptop.id) {
            return Err(Status::invalid_argument(format!(
                "laptop id is not a valid UUID: {err}"
            )));
        }

        // nothing is written for a caller that has already gone away
        context.check()?;

        self.laptops.save(&laptop).await.map_err(|err| match err {
            LaptopStoreError::AlreadyExists(_) => {
                Status::already_exists(format!("cannot save laptop to store: {err}"))
            }
        })?;
        tracing::info!("saved laptop with id: {}", laptop.id);

        Ok(Response::new(CreateLaptopResponse { id: laptop.id }))
    }
}
