use actix_web::{http::StatusCode, test::TestRequest};

use super::helpers::{bearer, credentials_request, expired_token, token_issuer, TestServer};
use crate::data_objects::AccessTokenResponse;

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let res = server.call(TestRequest::get().uri("/health")).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn register_issues_a_bearer_token() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let res = server.call(credentials_request("/api/user/register", "alice", "s3cret")).await;
    assert_eq!(res.status, StatusCode::OK);
    let token = bearer(&res);
    let claims = token_issuer().validate(&token).unwrap();
    assert_eq!(claims.login, "alice");
    let body: AccessTokenResponse = res.json();
    assert_eq!(body.token, token);
}

#[actix_web::test]
async fn register_twice_conflicts() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    server.register("alice", "s3cret").await;
    let res = server.call(credentials_request("/api/user/register", "alice", "another")).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error(), "Login alice is already taken");
}

#[actix_web::test]
async fn register_rejects_bad_bodies() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let garbage = TestRequest::post()
        .uri("/api/user/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"login\": ");
    assert_eq!(server.call(garbage).await.status, StatusCode::BAD_REQUEST);

    let missing_field = TestRequest::post().uri("/api/user/register").set_json(serde_json::json!({ "login": "bob" }));
    assert_eq!(server.call(missing_field).await.status, StatusCode::BAD_REQUEST);

    let not_json = TestRequest::post()
        .uri("/api/user/register")
        .insert_header(("content-type", "text/plain"))
        .set_payload("login=bob&password=x");
    assert_eq!(server.call(not_json).await.status, StatusCode::BAD_REQUEST);

    let empty = server.call(credentials_request("/api/user/register", "bob", "")).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn login_with_the_right_password() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let (_, user_id) = server.register("carol", "pa55word").await;
    let res = server.call(credentials_request("/api/user/login", "carol", "pa55word")).await;
    assert_eq!(res.status, StatusCode::OK);
    let claims = token_issuer().validate(&bearer(&res)).unwrap();
    assert_eq!(claims.user_id, user_id);
}

#[actix_web::test]
async fn login_with_bad_credentials() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    server.register("carol", "pa55word").await;
    let wrong_password = server.call(credentials_request("/api/user/login", "carol", "password")).await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert!(wrong_password.authorization.is_none());
    let unknown_user = server.call(credentials_request("/api/user/login", "dave", "pa55word")).await;
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    // the two failures must be indistinguishable
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[actix_web::test]
async fn protected_routes_need_a_valid_token() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let (_, user_id) = server.register("erin", "pw").await;
    for path in ["/api/user/orders", "/api/user/balance", "/api/user/withdrawals"] {
        assert_eq!(server.get("", path).await.status, StatusCode::UNAUTHORIZED, "{path} without a token");
        assert_eq!(server.get("garbage", path).await.status, StatusCode::UNAUTHORIZED, "{path} with garbage");
        let expired = expired_token(user_id);
        assert_eq!(server.get(&expired, path).await.status, StatusCode::UNAUTHORIZED, "{path} with expired token");
    }
    let res = server.upload_order("", "12345678903").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
