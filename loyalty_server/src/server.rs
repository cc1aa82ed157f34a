use std::{path::Path, time::Duration};

use accrual_client::AccrualApi;
use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    HttpServer,
    Scope,
};
use log::*;
use loyalty_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    AccountApi,
    AccountManagement,
    AuthApi,
    AuthManagement,
    OrderFlowApi,
    OrderManagement,
    OrderPoller,
    ShutdownTrigger,
    SqliteDatabase,
};

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        LoginUserRoute,
        MyBalanceRoute,
        MyOrdersRoute,
        MyWithdrawalsRoute,
        RegisterUserRoute,
        UploadOrderRoute,
        WithdrawRoute,
    },
};

pub const EVENT_BUFFER_SIZE: usize = 25;
const MAX_DB_CONNECTIONS: u32 = 25;

/// Runs the HTTP server and the order poller until the server is stopped (SIGINT/SIGTERM) or the poller fails.
///
/// Stopping the server also stops the poller, and vice versa. The poller is always given the chance to finish the
/// orders it is working on before this function returns.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    ensure_database_dir(&config.database_url)?;
    let mut db = SqliteDatabase::new_with_url(&config.database_url, MAX_DB_CONNECTIONS)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    } else {
        info!("🗃️ Automatic migrations are disabled. Make sure the database schema is up to date.");
    }
    let accrual = AccrualApi::new(config.accrual.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;

    let handlers = create_event_handlers();
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let shutdown = ShutdownTrigger::new();
    let poller = OrderPoller::new(db.clone(), accrual, config.poller, producers.clone());
    let mut poller_handle = tokio::spawn(poller.run(shutdown.to_signal()));

    let srv = create_server_instance(&config, db.clone(), producers)?;
    let srv_handle = srv.handle();
    let mut srv_task = actix_web::rt::spawn(srv);
    let result = tokio::select! {
        res = &mut srv_task => {
            info!("💻️ HTTP server has stopped. Stopping the order poller.");
            shutdown.trigger();
            let srv_result = match res {
                Ok(r) => r.map_err(ServerError::from),
                Err(e) => Err(ServerError::BackendError(e.to_string())),
            };
            let poller_result = match poller_handle.await {
                Ok(r) => r.map_err(|e| ServerError::PollerError(e.to_string())),
                Err(e) => Err(ServerError::PollerError(e.to_string())),
            };
            srv_result.and(poller_result)
        },
        res = &mut poller_handle => {
            let err = match res {
                Ok(Ok(())) => ServerError::PollerError("The poller exited without being asked to".into()),
                Ok(Err(e)) => ServerError::PollerError(e.to_string()),
                Err(e) => ServerError::PollerError(e.to_string()),
            };
            error!("🔄️ {err}. Shutting down the HTTP server.");
            srv_handle.stop(true).await;
            if let Err(e) = srv_task.await {
                warn!("💻️ HTTP server task did not shut down cleanly. {e}");
            }
            Err(err)
        },
    };
    db.close().await;
    result
}

pub fn create_server_instance(
    config: &ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let auth_config = config.auth.clone();
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        let accounts_api = AccountApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&auth_config);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("lpg::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(jwt_signer))
            .service(health)
            .service(user_scope::<SqliteDatabase>())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind(config.run_address.as_str())?
    .run();
    Ok(srv)
}

/// All user-facing routes, mounted under `/api/user`.
pub fn user_scope<B>() -> Scope
where B: AccountManagement + AuthManagement + OrderManagement + 'static {
    web::scope("/api/user")
        .service(RegisterUserRoute::<B>::new())
        .service(LoginUserRoute::<B>::new())
        .service(UploadOrderRoute::<B>::new())
        .service(MyOrdersRoute::<B>::new())
        .service(MyBalanceRoute::<B>::new())
        .service(WithdrawRoute::<B>::new())
        .service(MyWithdrawalsRoute::<B>::new())
}

/// Malformed JSON bodies get the same `{"error": ...}` treatment as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Could not deserialize request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

/// Logs order uploads and every accrual verdict as it is applied, so that the activity of the background poller
/// shows up in the logs.
pub fn create_event_handlers() -> EventHandlers {
    let mut hooks = EventHooks::default();
    hooks.on_order_submitted(|ev| {
        Box::pin(async move {
            debug!("📬️ Order {} is queued for accrual on behalf of user #{}", ev.order.order_number, ev.order.user_id);
        })
    });
    hooks.on_order_verdict(|ev| {
        Box::pin(async move {
            let order = ev.order;
            if ev.unregistered {
                info!("🔄️ Order {} is unknown to the accrual service and has been marked INVALID", order.order_number);
            } else {
                info!(
                    "🔄️ Order {} for user #{} is now {} (accrual {})",
                    order.order_number, order.user_id, order.status, order.accrual
                );
            }
        })
    });
    EventHandlers::new(EVENT_BUFFER_SIZE, hooks)
}

/// SQLite creates a missing database file, but not a missing directory.
fn ensure_database_dir(url: &str) -> Result<(), ServerError> {
    let path = url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            info!("🗃️ Creating database directory {}", dir.display());
            std::fs::create_dir_all(dir).map_err(|e| {
                ServerError::InitializeError(format!("Could not create database directory {}. {e}", dir.display()))
            })
        },
        _ => Ok(()),
    }
}
