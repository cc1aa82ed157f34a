use actix_web::{
    http::{
        header::{self, ContentType},
        StatusCode,
    },
    test,
    test::TestRequest,
    web,
    App,
};
use chrono::Duration;
use log::debug;
use loyalty_engine::{
    db_types::{Cents, OrderNumber, OrderStatusType},
    events::EventProducers,
    test_utils::prepare_env::database_with_users,
    AccountApi,
    AuthApi,
    OrderFlowApi,
    OrderManagement,
    SqliteDatabase,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::AuthConfig,
    routes::health,
    server::{json_config, user_scope},
};

// DO NOT re-use this secret anywhere.
pub const TEST_JWT_SECRET: &str = "endpoint-tests-only-b7c1f0";

pub fn auth_config() -> AuthConfig {
    AuthConfig::new(TEST_JWT_SECRET, Duration::hours(1))
}

pub fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(&auth_config())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub authorization: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("Invalid JSON body '{}'. {e}", self.body))
    }

    pub fn error(&self) -> String {
        let v: Value = self.json();
        v["error"].as_str().unwrap_or_default().to_string()
    }
}

/// A fresh database with the full set of user routes in front of it.
pub struct TestServer {
    pub db: SqliteDatabase,
}

impl TestServer {
    pub async fn new() -> Self {
        let (db, _) = database_with_users(&[]).await;
        Self { db }
    }

    pub async fn call(&self, req: TestRequest) -> TestResponse {
        let db = self.db.clone();
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(web::Data::new(OrderFlowApi::new(db.clone(), EventProducers::default())))
                .app_data(web::Data::new(AccountApi::new(db.clone())))
                .app_data(web::Data::new(AuthApi::new(db).with_hash_cost(4)))
                .app_data(web::Data::new(token_issuer()))
                .service(health)
                .service(user_scope::<SqliteDatabase>()),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let authorization =
            res.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(|s| s.to_string());
        let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
        debug!("Response: {status} {body}");
        TestResponse { status, authorization, body }
    }

    /// Registers a user and returns their access token and id.
    pub async fn register(&self, login: &str, password: &str) -> (String, i64) {
        let res = self.call(credentials_request("/api/user/register", login, password)).await;
        assert_eq!(res.status, StatusCode::OK, "Registration failed: {}", res.body);
        let token = bearer(&res);
        let claims = token_issuer().validate(&token).expect("Issued token should be valid");
        (token, claims.user_id)
    }

    pub async fn upload_order(&self, token: &str, number: &str) -> TestResponse {
        let req = TestRequest::post()
            .uri("/api/user/orders")
            .insert_header(ContentType::plaintext())
            .insert_header(auth_header(token))
            .set_payload(number.to_string());
        self.call(req).await
    }

    pub async fn get(&self, token: &str, path: &str) -> TestResponse {
        let mut req = TestRequest::get().uri(path);
        if !token.is_empty() {
            req = req.insert_header(auth_header(token));
        }
        self.call(req).await
    }

    /// Writes an accrual verdict straight to the ledger, as the order poller would.
    pub async fn apply_verdict(&self, user_id: i64, number: &str, status: OrderStatusType, accrual: i64) {
        self.db
            .apply_verdict(user_id, &OrderNumber::from(number), status, Cents::from(accrual))
            .await
            .expect("Could not apply verdict");
    }
}

pub fn credentials_request(path: &str, login: &str, password: &str) -> TestRequest {
    TestRequest::post().uri(path).set_json(serde_json::json!({ "login": login, "password": password }))
}

pub fn auth_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

pub fn bearer(res: &TestResponse) -> String {
    let header = res.authorization.as_deref().expect("No Authorization header in response");
    header.strip_prefix("Bearer ").expect("Authorization header is not a bearer token").to_string()
}

pub fn expired_token(user_id: i64) -> String {
    let then = chrono::Utc::now() - Duration::days(2);
    let claims = JwtClaims { user_id, login: "ghost".into(), iat: then.timestamp(), exp: then.timestamp() + 3600 };
    token_issuer().sign(&claims).unwrap()
}
