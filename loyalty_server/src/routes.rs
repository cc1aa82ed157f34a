//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a few lines long belong in the engine, not
//! here.
//!
//! Every handler is async. Anything that touches the database or hashes a password must be awaited rather than run
//! on the worker thread, otherwise the worker stops serving other requests until it completes.
//!
//! Routes under `/api/user` that take a [`JwtClaims`] argument reject requests without a valid
//! `Authorization: Bearer <token>` header with `401 Unauthorized`.
use actix_web::{get, http::header, web, HttpMessage, HttpRequest, HttpResponse, Responder};
use log::*;
use loyalty_engine::{
    db_types::User,
    AccountApi,
    AccountManagement,
    AuthApi,
    AuthManagement,
    OrderFlowApi,
    OrderManagement,
    SubmitOrderResult,
};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::{
        AccessTokenResponse,
        BalanceResponse,
        Credentials,
        OrderResponse,
        WithdrawRequest,
        WithdrawalResponse,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register_user => Post "/register" impl AuthManagement);
/// Creates an account and logs the new user straight in.
///
/// The access token is returned in the `Authorization` header (and in the body, for convenience).
pub async fn register_user<B: AuthManagement>(
    body: web::Json<Credentials>,
    api: web::Data<AuthApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let Credentials { login, password } = body.into_inner();
    debug!("💻️ POST register for {login}");
    let user = api.register(&login, &password).await?;
    token_response(&user, &signer)
}

route!(login_user => Post "/login" impl AuthManagement);
pub async fn login_user<B: AuthManagement>(
    body: web::Json<Credentials>,
    api: web::Data<AuthApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let Credentials { login, password } = body.into_inner();
    debug!("💻️ POST login for {login}");
    let user = api.authenticate(&login, &password).await?;
    token_response(&user, &signer)
}

fn token_response(user: &User, signer: &TokenIssuer) -> Result<HttpResponse, ServerError> {
    let token = signer.issue_token(user)?;
    trace!("💻️ Issued access token for user #{}", user.id);
    Ok(HttpResponse::Ok()
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .json(AccessTokenResponse { token }))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(upload_order => Post "/orders" impl OrderManagement);
/// Uploads an order number for accrual. The body is the bare number, sent as `text/plain`.
///
/// * `202 Accepted`: the order is new and will be evaluated in the background.
/// * `200 OK`: this user already uploaded the order.
/// * `409 Conflict`: another user already uploaded the order.
/// * `422 Unprocessable Entity`: the number fails the Luhn check.
pub async fn upload_order<B: OrderManagement>(
    req: HttpRequest,
    body: String,
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    if req.content_type() != "text/plain" {
        return Err(ServerError::InvalidRequestBody(format!(
            "Expected a text/plain order number, not '{}'",
            req.content_type()
        )));
    }
    let number = body.trim();
    if number.is_empty() {
        return Err(ServerError::InvalidRequestBody("The order number is missing".into()));
    }
    debug!("💻️ POST order {number} for user #{}", claims.user_id);
    match api.submit_order(claims.user_id, number).await? {
        SubmitOrderResult::Accepted(order) => Ok(HttpResponse::Accepted().json(OrderResponse::from(order))),
        SubmitOrderResult::AlreadyUploaded(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
    }
}

route!(my_orders => Get "/orders" impl AccountManagement, OrderManagement);
/// Lists the user's orders, oldest first. Responds with `204 No Content` if there are none.
pub async fn my_orders<B: AccountManagement + OrderManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for user #{}", claims.user_id);
    let orders = api.orders_for_user(claims.user_id).await?;
    if orders.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }
    let orders = orders.into_iter().map(OrderResponse::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(orders))
}

//----------------------------------------------   Balance  ----------------------------------------------------
route!(my_balance => Get "/balance" impl AccountManagement, OrderManagement);
pub async fn my_balance<B: AccountManagement + OrderManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET balance for user #{}", claims.user_id);
    let balance = api.balance(claims.user_id).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse::from(balance)))
}

route!(withdraw => Post "/balance/withdraw" impl AccountManagement, OrderManagement);
/// Spends points against a new order number.
///
/// * `200 OK`: the withdrawal was recorded.
/// * `400 Bad Request`: the sum is missing, zero or negative.
/// * `422 Unprocessable Entity`: insufficient funds, or the order number fails the Luhn check.
pub async fn withdraw<B: AccountManagement + OrderManagement>(
    claims: JwtClaims,
    body: web::Json<WithdrawRequest>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST withdraw {} against order {} for user #{}", request.sum, request.order, claims.user_id);
    let sum = request
        .sum_in_cents()
        .ok_or_else(|| ServerError::InvalidRequestBody(format!("{} is not a valid amount", request.sum)))?;
    let withdrawal = api.withdraw(claims.user_id, &request.order, sum).await?;
    Ok(HttpResponse::Ok().json(WithdrawalResponse::from(withdrawal)))
}

route!(my_withdrawals => Get "/withdrawals" impl AccountManagement, OrderManagement);
/// Lists the user's withdrawals, oldest first. Responds with `204 No Content` if there are none.
pub async fn my_withdrawals<B: AccountManagement + OrderManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET withdrawals for user #{}", claims.user_id);
    let withdrawals = api.withdrawals_for_user(claims.user_id).await?;
    if withdrawals.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }
    let withdrawals = withdrawals.into_iter().map(WithdrawalResponse::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(withdrawals))
}
