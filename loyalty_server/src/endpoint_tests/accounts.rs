use actix_web::{http::StatusCode, test::TestRequest};
use loyalty_engine::db_types::OrderStatusType;
use serde_json::json;

use super::helpers::{auth_header, TestServer};
use crate::data_objects::{BalanceResponse, WithdrawalResponse};

fn withdraw_request(token: &str, order: &str, sum: f64) -> TestRequest {
    TestRequest::post()
        .uri("/api/user/balance/withdraw")
        .insert_header(auth_header(token))
        .set_json(json!({ "order": order, "sum": sum }))
}

/// Registers a user and credits them with `accrual` cents via a processed order.
async fn funded_user(server: &TestServer, login: &str, accrual: i64) -> String {
    let (token, user_id) = server.register(login, "pw").await;
    assert_eq!(server.upload_order(&token, "12345678903").await.status, StatusCode::ACCEPTED);
    server.apply_verdict(user_id, "12345678903", OrderStatusType::Processed, accrual).await;
    token
}

#[actix_web::test]
async fn new_users_have_an_empty_balance() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let (token, _) = server.register("alice", "pw").await;
    let res = server.get(&token, "/api/user/balance").await;
    assert_eq!(res.status, StatusCode::OK);
    let balance: BalanceResponse = res.json();
    assert_eq!(balance, BalanceResponse { current: 0.0, withdrawn: 0.0 });
    assert_eq!(server.get(&token, "/api/user/withdrawals").await.status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn withdraw_points() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let token = funded_user(&server, "alice", 72_998).await;

    let res = server.call(withdraw_request(&token, "2377225624", 100.0)).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);

    let balance: BalanceResponse = server.get(&token, "/api/user/balance").await.json();
    assert_eq!(balance, BalanceResponse { current: 629.98, withdrawn: 100.0 });

    let res = server.get(&token, "/api/user/withdrawals").await;
    assert_eq!(res.status, StatusCode::OK);
    let withdrawals: Vec<WithdrawalResponse> = res.json();
    assert_eq!(withdrawals.len(), 1);
    assert_eq!(withdrawals[0].order, "2377225624");
    assert_eq!(withdrawals[0].sum, 100.0);
}

#[actix_web::test]
async fn withdraw_more_than_the_balance() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let token = funded_user(&server, "alice", 5_000).await;

    let res = server.call(withdraw_request(&token, "2377225624", 50.5)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.error(), "There are insufficient funds in the account");

    let balance: BalanceResponse = server.get(&token, "/api/user/balance").await.json();
    assert_eq!(balance, BalanceResponse { current: 50.0, withdrawn: 0.0 });
    assert_eq!(server.get(&token, "/api/user/withdrawals").await.status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn withdraw_validation() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let token = funded_user(&server, "alice", 5_000).await;

    let bad_luhn = server.call(withdraw_request(&token, "1233", 1.0)).await;
    assert_eq!(bad_luhn.status, StatusCode::UNPROCESSABLE_ENTITY);
    let negative = server.call(withdraw_request(&token, "2377225624", -5.0)).await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    let zero = server.call(withdraw_request(&token, "2377225624", 0.0)).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);
    let no_sum = TestRequest::post()
        .uri("/api/user/balance/withdraw")
        .insert_header(auth_header(&token))
        .set_json(json!({ "order": "2377225624" }));
    assert_eq!(server.call(no_sum).await.status, StatusCode::BAD_REQUEST);

    let balance: BalanceResponse = server.get(&token, "/api/user/balance").await.json();
    assert_eq!(balance.current, 50.0);
}
