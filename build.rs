//! Generates the gRPC client and server stubs for the catalog services.
//!
//! Message types live in `src/pb`, so the services are described with the
//! manual builder and no `protoc` install is needed at build time.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn method(
    name: &str,
    route: &str,
    input: &str,
    output: &str,
    client_streaming: bool,
    server_streaming: bool,
) -> Method {
    let mut builder = Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::pb::{input}"))
        .output_type(format!("crate::pb::{output}"))
        .codec_path(CODEC);
    if client_streaming {
        builder = builder.client_streaming();
    }
    if server_streaming {
        builder = builder.server_streaming();
    }
    builder.build()
}

fn main() {
    let laptop_service = Service::builder()
        .name("LaptopService")
        .package("catalog")
        .method(method(
            "create_laptop",
            "CreateLaptop",
            "CreateLaptopRequest",
            "CreateLaptopResponse",
            false,
            false,
        ))
        .method(method(
            "search_laptop",
            "SearchLaptop",
            "SearchLaptopRequest",
            "SearchLaptopResponse",
            false,
            true,
        ))
        .method(method(
            "upload_image",
            "UploadImage",
            "UploadImageRequest",
            "UploadImageResponse",
            true,
            false,
        ))
        .method(method(
            "rate_laptop",
            "RateLaptop",
            "RateLaptopRequest",
            "RateLaptopResponse",
            true,
            true,
        ))
        .build();

    let auth_service = Service::builder()
        .name("AuthService")
        .package("catalog")
        .method(method(
            "login",
            "Login",
            "LoginRequest",
            "LoginResponse",
            false,
            false,
        ))
        .build();

    Builder::new().compile(&[laptop_service, auth_service]);
    println!("cargo:rerun-if-changed=build.rs");
}
