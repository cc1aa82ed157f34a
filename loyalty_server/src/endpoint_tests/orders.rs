use actix_web::{
    http::{header::ContentType, StatusCode},
    test::TestRequest,
};
use chrono::DateTime;
use loyalty_engine::db_types::OrderStatusType;

use super::helpers::{auth_header, TestServer};
use crate::data_objects::{BalanceResponse, OrderResponse};

#[actix_web::test]
async fn upload_order_status_codes() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let (alice, _) = server.register("alice", "pw").await;
    let (bob, _) = server.register("bob", "pw").await;

    let res = server.upload_order(&alice, "12345678903").await;
    assert_eq!(res.status, StatusCode::ACCEPTED);
    let order: OrderResponse = res.json();
    assert_eq!(order.number, "12345678903");
    assert_eq!(order.status, OrderStatusType::New);

    assert_eq!(server.upload_order(&alice, "12345678903").await.status, StatusCode::OK);
    assert_eq!(server.upload_order(&bob, "12345678903").await.status, StatusCode::CONFLICT);
    assert_eq!(server.upload_order(&bob, "1233").await.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(server.upload_order(&bob, "abc").await.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(server.upload_order(&bob, "  ").await.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn upload_order_must_be_plain_text() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let (token, _) = server.register("alice", "pw").await;
    let req = TestRequest::post()
        .uri("/api/user/orders")
        .insert_header(ContentType::json())
        .insert_header(auth_header(&token))
        .set_payload("\"12345678903\"");
    assert_eq!(server.call(req).await.status, StatusCode::BAD_REQUEST);
    // nothing was stored
    assert_eq!(server.get(&token, "/api/user/orders").await.status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn list_orders() {
    let _ = env_logger::try_init();
    let server = TestServer::new().await;
    let (token, user_id) = server.register("alice", "pw").await;
    let (other, _) = server.register("bob", "pw").await;
    assert_eq!(server.get(&token, "/api/user/orders").await.status, StatusCode::NO_CONTENT);

    server.upload_order(&token, "12345678903").await;
    server.upload_order(&token, "79927398713").await;
    server.upload_order(&other, "4561261212345467").await;
    server.apply_verdict(user_id, "12345678903", OrderStatusType::Processed, 50_000).await;

    let res = server.get(&token, "/api/user/orders").await;
    assert_eq!(res.status, StatusCode::OK);
    let orders: Vec<OrderResponse> = res.json();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].number, "12345678903");
    assert_eq!(orders[0].status, OrderStatusType::Processed);
    assert_eq!(orders[0].accrual, Some(500.0));
    assert_eq!(orders[1].number, "79927398713");
    assert_eq!(orders[1].status, OrderStatusType::New);
    assert_eq!(orders[1].accrual, None);
    for order in &orders {
        assert!(DateTime::parse_from_rfc3339(&order.uploaded_at).is_ok(), "{}", order.uploaded_at);
    }

    let balance: BalanceResponse = server.get(&token, "/api/user/balance").await.json();
    assert_eq!(balance, BalanceResponse { current: 500.0, withdrawn: 0.0 });
}
