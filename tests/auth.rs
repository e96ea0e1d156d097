mod common;

use laptop_catalog::client::{
    AccessToken, AuthInterceptorClient, ClientError, LaptopClient, TokenRefresher,
};
use laptop_catalog::pb::Filter;
use laptop_catalog::sample;
use std::time::Duration;
use tonic::Code;

fn status_code(err: ClientError) -> Code {
    match err {
        ClientError::Rpc(status) => status.code(),
        other => panic!("expected an rpc error, got {other}"),
    }
}

fn everything() -> Filter {
    Filter {
        max_price_usd: f64::INFINITY,
        ..Filter::default()
    }
}

#[tokio::test]
async fn login_returns_verifiable_token() {
    let app = common::spawn_app().await;
    let token = app.auth_client("admin1", "secret").await.login().await.unwrap();

    let claims = app.state.jwt_manager.verify(&token).unwrap();
    assert_eq!(claims.username(), "admin1");
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn login_with_wrong_password_is_not_found() {
    let app = common::spawn_app().await;

    let status = app.auth_client("admin1", "wrong").await.login().await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = app.auth_client("nobody", "secret").await.login().await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn missing_token_is_unauthenticated() {
    let app = common::spawn_app().await;
    let client = app.anonymous_client().await;

    let err = client.create_laptop(sample::new_laptop()).await.unwrap_err();
    assert_eq!(status_code(err), Code::Unauthenticated);
    assert!(app.state.laptops.is_empty().await);
}

#[tokio::test]
async fn forged_token_is_unauthenticated() {
    let app = common::spawn_app().await;
    let token = AccessToken::default();
    token.set("not.a.token".to_string());
    let client = LaptopClient::new(app.channel().await, AuthInterceptorClient::new(token));

    let err = client.create_laptop(sample::new_laptop()).await.unwrap_err();
    assert_eq!(status_code(err), Code::Unauthenticated);
}

#[tokio::test]
async fn user_role_cannot_create_but_can_rate() {
    let app = common::spawn_app().await;
    let admin = app.client_for("admin1").await;
    let user = app.client_for("user1").await;

    let err = user.create_laptop(sample::new_laptop()).await.unwrap_err();
    assert_eq!(status_code(err), Code::PermissionDenied);

    let laptop = sample::new_laptop();
    admin.create_laptop(laptop.clone()).await.unwrap();
    let responses = user.rate_laptop(&[laptop.id], &[9.0]).await.unwrap();
    assert_eq!(responses.len(), 1);
}

#[tokio::test]
async fn search_is_public() {
    let app = common::spawn_app().await;
    let admin = app.client_for("admin1").await;
    admin.create_laptop(sample::new_laptop()).await.unwrap();

    let found = app.anonymous_client().await.search_laptop(everything()).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn expired_token_is_unauthenticated() {
    let app = common::spawn_app_with_token_duration(Duration::from_secs(1)).await;
    let client = app.client_for("admin1").await;

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let err = client.create_laptop(sample::new_laptop()).await.unwrap_err();
    assert_eq!(status_code(err), Code::Unauthenticated);
}

#[tokio::test]
async fn refresher_keeps_token_valid_until_stopped() {
    let app = common::spawn_app_with_token_duration(Duration::from_secs(1)).await;
    let token = AccessToken::default();
    let auth = app.auth_client("admin1", "secret").await;

    let refresher = TokenRefresher::start(auth, token.clone(), Duration::from_millis(200))
        .await
        .unwrap();
    assert!(!token.get().is_empty());

    let client = LaptopClient::new(app.channel().await, AuthInterceptorClient::new(token));
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(refresher.is_running());
    client.create_laptop(sample::new_laptop()).await.unwrap();

    refresher.stop().await;
}

#[tokio::test]
async fn refresher_fails_fast_on_bad_credentials() {
    let app = common::spawn_app().await;
    let auth = app.auth_client("admin1", "wrong").await;

    let result = TokenRefresher::start(auth, AccessToken::default(), Duration::from_secs(60)).await;
    assert_eq!(result.err().map(|status| status.code()), Some(Code::NotFound));
}
