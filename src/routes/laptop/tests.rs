use super::*;
use crate::helpers::RequestContext;
use crate::pb::{memory::Unit, Filter, Memory};
use crate::sample;
use futures::{stream, StreamExt};
use std::collections::HashSet;
use std::time::Instant;
use tempfile::TempDir;
use tonic::Code;

struct Fixture {
    server: LaptopServer,
    laptops: Arc<LaptopStore>,
    images: Arc<DiskImageStore>,
    _dir: TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let laptops = Arc::new(LaptopStore::new());
    let images = Arc::new(DiskImageStore::new(dir.path()));
    let ratings = Arc::new(RatingStore::new());
    Fixture {
        server: LaptopServer::new(laptops.clone(), images.clone(), ratings),
        laptops,
        images,
        _dir: dir,
    }
}

fn create_request(laptop: crate::pb::Laptop) -> Request<CreateLaptopRequest> {
    Request::new(CreateLaptopRequest {
        laptop: Some(laptop),
    })
}

#[tokio::test]
async fn test_create_keeps_supplied_id() {
    let fx = fixture();
    let laptop = sample::new_laptop();

    let response = fx.server.create(create_request(laptop.clone())).await.unwrap();
    assert_eq!(response.get_ref().id, laptop.id);
    assert_eq!(fx.laptops.find(&laptop.id).await, Some(laptop));
}

#[tokio::test]
async fn test_create_generates_id_when_empty() {
    let fx = fixture();
    let mut seen = HashSet::new();
    for _ in 0..3 {
        let mut laptop = sample::new_laptop();
        laptop.id.clear();

        let id = fx.server.create(create_request(laptop)).await.unwrap().into_inner().id;
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert!(seen.insert(id));
    }
    assert_eq!(fx.laptops.len().await, 3);
}

#[tokio::test]
async fn test_create_rejects_invalid_id() {
    let fx = fixture();
    let mut laptop = sample::new_laptop();
    laptop.id = "invalid-uuid".to_string();

    let err = fx.server.create(create_request(laptop)).await.unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
    assert!(fx.laptops.is_empty().await);
}

#[tokio::test]
async fn test_create_rejects_duplicate_id() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();

    let err = fx.server.create(create_request(laptop)).await.unwrap_err();
    assert_eq!(err.code(), Code::AlreadyExists);
}

#[tokio::test]
async fn test_create_without_laptop_is_invalid() {
    let fx = fixture();
    let err = fx
        .server
        .create(Request::new(CreateLaptopRequest { laptop: None }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_create_skips_save_for_cancelled_call() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    let mut request = create_request(laptop.clone());
    let context = RequestContext::new();
    context.cancel();
    request.extensions_mut().insert(context);

    let err = fx.server.create(request).await.unwrap_err();
    assert_eq!(err.code(), Code::Cancelled);
    assert!(fx.laptops.find(&laptop.id).await.is_none());
}

#[tokio::test]
async fn test_create_skips_save_after_deadline() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    let mut request = create_request(laptop.clone());
    request
        .extensions_mut()
        .insert(RequestContext::with_deadline(Instant::now()));

    let err = fx.server.create(request).await.unwrap_err();
    assert_eq!(err.code(), Code::DeadlineExceeded);
    assert!(fx.laptops.is_empty().await);
}

#[tokio::test]
async fn test_search_streams_exactly_the_matches() {
    let fx = fixture();
    let mut expected = HashSet::new();

    for i in 0..6 {
        let mut laptop = sample::new_laptop();
        let cpu = laptop.cpu.get_or_insert_with(Default::default);
        match i {
            0 => laptop.price_usd = 2500.0,
            1 => cpu.number_cores = 2,
            2 => cpu.min_ghz = 2.0,
            3 => laptop.ram = Some(Memory::new(4096, Unit::Megabyte)),
            4 => {
                laptop.price_usd = 1999.0;
                cpu.number_cores = 4;
                cpu.min_ghz = 2.5;
                cpu.max_ghz = 4.5;
                laptop.ram = Some(Memory::new(16, Unit::Gigabyte));
                expected.insert(laptop.id.clone());
            }
            _ => {
                laptop.price_usd = 2000.0;
                cpu.number_cores = 6;
                cpu.min_ghz = 2.8;
                cpu.max_ghz = 5.0;
                laptop.ram = Some(Memory::new(64, Unit::Gigabyte));
                expected.insert(laptop.id.clone());
            }
        }
        fx.laptops.save(&laptop).await.unwrap();
    }

    let filter = Filter {
        max_price_usd: 2000.0,
        min_cpu_cores: 4,
        min_cpu_ghz: 2.2,
        min_ram: Some(Memory::new(8, Unit::Gigabyte)),
    };
    let found: Vec<String> = fx
        .server
        .search(SearchLaptopRequest {
            filter: Some(filter),
        })
        .map(|response| response.unwrap().laptop.unwrap().id)
        .collect()
        .await;

    assert_eq!(found.len(), expected.len());
    assert_eq!(found.into_iter().collect::<HashSet<_>>(), expected);
}

#[tokio::test]
async fn test_create_completes_while_search_stream_is_unread() {
    let fx = fixture();
    for _ in 0..10 {
        fx.laptops.save(&sample::new_laptop()).await.unwrap();
    }

    let pending = fx.server.search(SearchLaptopRequest { filter: None });
    // let the scan fill the channel and block on the unread stream
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    let laptop = sample::new_laptop();
    let created = tokio::time::timeout(
        std::time::Duration::from_secs(2),
        fx.server.create(create_request(laptop.clone())),
    )
    .await
    .expect("create blocked behind an unread search");
    assert_eq!(created.unwrap().into_inner().id, laptop.id);
    assert_eq!(fx.laptops.len().await, 11);

    drop(pending);
}

#[tokio::test]
async fn test_search_without_filter_returns_everything() {
    let fx = fixture();
    for _ in 0..3 {
        fx.laptops.save(&sample::new_laptop()).await.unwrap();
    }

    let count = fx
        .server
        .search(SearchLaptopRequest { filter: None })
        .count()
        .await;
    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_upload_stores_image() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();

    let requests = vec![
        Ok(UploadImageRequest::info(&laptop.id, ".jpg")),
        Ok(UploadImageRequest::chunk(vec![1u8; 1024])),
        Ok(UploadImageRequest::chunk(vec![2u8; 512])),
    ];
    let response = fx.server.upload(stream::iter(requests)).await.unwrap();
    assert_eq!(response.size, 1536);

    let info = fx.images.find(&response.id).await.unwrap();
    assert_eq!(info.laptop_id, laptop.id);
    assert_eq!(std::fs::read(&info.path).unwrap().len(), 1536);
}

#[tokio::test]
async fn test_upload_unknown_laptop_is_not_found() {
    let fx = fixture();
    let requests = vec![
        Ok(UploadImageRequest::info("no-such-laptop", ".jpg")),
        Ok(UploadImageRequest::chunk(vec![0u8; 8])),
    ];

    let err = fx.server.upload(stream::iter(requests)).await.unwrap_err();
    assert_eq!(err.code(), Code::NotFound);
    assert!(fx.images.is_empty().await);
}

#[tokio::test]
async fn test_upload_too_large_saves_nothing() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();

    let mut requests = vec![Ok(UploadImageRequest::info(&laptop.id, ".png"))];
    requests.extend((0..2).map(|_| Ok(UploadImageRequest::chunk(vec![0u8; MAX_IMAGE_SIZE / 2]))));
    requests.push(Ok(UploadImageRequest::chunk(vec![0u8; 1])));

    let err = fx.server.upload(stream::iter(requests)).await.unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
    assert!(fx.images.is_empty().await);
}

#[tokio::test]
async fn test_upload_exactly_max_size_is_accepted() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();
    let server = fx.server.clone().with_max_image_size(16);

    let requests = vec![
        Ok(UploadImageRequest::info(&laptop.id, ".png")),
        Ok(UploadImageRequest::chunk(vec![0u8; 16])),
    ];
    let response = server.upload(stream::iter(requests)).await.unwrap();
    assert_eq!(response.size, 16);
}

#[tokio::test]
async fn test_upload_chunk_before_info_is_protocol_error() {
    let fx = fixture();
    let requests = vec![Ok(UploadImageRequest::chunk(vec![0u8; 8]))];

    let err = fx.server.upload(stream::iter(requests)).await.unwrap_err();
    assert_eq!(err.code(), Code::Unknown);
    assert!(fx.images.is_empty().await);
}

#[tokio::test]
async fn test_upload_broken_stream_saves_nothing() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();

    let requests = vec![
        Ok(UploadImageRequest::info(&laptop.id, ".jpg")),
        Ok(UploadImageRequest::chunk(vec![0u8; 8])),
        Err(Status::aborted("connection reset")),
    ];
    let err = fx.server.upload(stream::iter(requests)).await.unwrap_err();
    assert_eq!(err.code(), Code::Unknown);
    assert!(fx.images.is_empty().await);
}

#[tokio::test]
async fn test_rate_reports_running_average_in_order() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();

    let scores = [8.0, 7.5, 10.0];
    let averages = [8.0, 7.75, 8.5];
    let requests: Vec<_> = scores
        .iter()
        .map(|&score| {
            Ok(RateLaptopRequest {
                laptop_id: laptop.id.clone(),
                score,
            })
        })
        .collect();

    let responses: Vec<_> = fx.server.rate(stream::iter(requests)).collect().await;
    assert_eq!(responses.len(), 3);
    for (i, response) in responses.into_iter().enumerate() {
        let response = response.unwrap();
        assert_eq!(response.laptop_id, laptop.id);
        assert_eq!(response.rated_count as usize, i + 1);
        assert_eq!(response.average_score, averages[i]);
    }
}

#[tokio::test]
async fn test_rate_unknown_laptop_ends_call_after_accepted_ratings() {
    let fx = fixture();
    let laptop = sample::new_laptop();
    fx.laptops.save(&laptop).await.unwrap();

    let requests = vec![
        Ok(RateLaptopRequest {
            laptop_id: laptop.id.clone(),
            score: 6.0,
        }),
        Ok(RateLaptopRequest {
            laptop_id: "unknown".to_string(),
            score: 9.0,
        }),
        Ok(RateLaptopRequest {
            laptop_id: laptop.id.clone(),
            score: 9.0,
        }),
    ];

    let responses: Vec<_> = fx.server.rate(stream::iter(requests)).collect().await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].as_ref().unwrap().rated_count, 1);
    assert_eq!(responses[1].as_ref().unwrap_err().code(), Code::NotFound);
}

#[tokio::test]
async fn test_rate_surfaces_receive_error() {
    let fx = fixture();
    let requests = vec![Err(Status::internal("broken pipe"))];

    let responses: Vec<_> = fx.server.rate(stream::iter(requests)).collect().await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].as_ref().unwrap_err().code(), Code::Unknown);
}
